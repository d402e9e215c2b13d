//! Remote backtest service port trait.

use async_trait::async_trait;

use crate::domain::error::SubmissionError;
use crate::domain::result::BacktestResult;
use crate::domain::validation::Submission;

/// Runs one validated submission against the backtest service.
#[async_trait]
pub trait BacktestPort {
    async fn run_backtest(&self, submission: &Submission)
    -> Result<BacktestResult, SubmissionError>;
}
