//! backtest-desk: client for a remote strategy backtesting service.
//!
//! Hexagonal architecture: form logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
