//! Concrete adapter implementations for ports.

pub mod file_config_adapter;
pub mod http_backtest_adapter;
pub mod terminal_view;
