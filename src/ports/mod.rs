//! Port traits: the seams between form logic and the outside world.

pub mod backtest_port;
pub mod config_port;
pub mod view_port;
