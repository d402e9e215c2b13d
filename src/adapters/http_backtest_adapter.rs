//! HTTP adapter for the remote backtest endpoint.
//!
//! Sends one multipart POST per submission: the CSV as `file` plus the seven
//! strategy parameters as text fields.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::domain::config_validation::check_endpoint;
use crate::domain::error::{DeskError, SubmissionError};
use crate::domain::result::{
    error_message, BacktestResult, GENERIC_FAILURE_MESSAGE, TRANSPORT_FAILURE_MESSAGE,
};
use crate::domain::validation::Submission;
use crate::ports::backtest_port::BacktestPort;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/backtest";

pub struct HttpBacktestAdapter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBacktestAdapter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Build from `[client]`: `endpoint` (optional, overridable) and
    /// `timeout_secs` (0 keeps the transport default).
    pub fn from_config(
        config: &dyn ConfigPort,
        endpoint_override: Option<&str>,
    ) -> Result<Self, DeskError> {
        let endpoint = endpoint_override
            .map(str::to_string)
            .or_else(|| config.get_text("client", "endpoint"))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        check_endpoint(&endpoint).map_err(|reason| DeskError::ConfigInvalid {
            section: "client".to_string(),
            key: "endpoint".to_string(),
            reason,
        })?;

        let mut builder = reqwest::Client::builder();
        let timeout = config.get_double("client", "timeout_secs", 0.0);
        if timeout.is_finite() && timeout > 0.0 {
            builder = builder.timeout(Duration::from_secs_f64(timeout));
        }
        let client = builder.build().map_err(|e| DeskError::ConfigInvalid {
            section: "client".to_string(),
            key: "timeout_secs".to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Multipart body for a submission.
pub fn build_form(submission: &Submission) -> Result<Form, SubmissionError> {
    let file = Part::bytes(submission.file.content().to_vec())
        .file_name(submission.file.name().to_string())
        .mime_str("text/csv")
        .map_err(|e| SubmissionError::Transport {
            reason: e.to_string(),
        })?;

    let mut form = Form::new().part("file", file);
    for (name, value) in submission.params.form_fields() {
        form = form.text(name, value);
    }
    Ok(form)
}

fn transport_error(err: reqwest::Error) -> SubmissionError {
    let reason = err.to_string();
    SubmissionError::Transport {
        reason: if reason.trim().is_empty() {
            TRANSPORT_FAILURE_MESSAGE.to_string()
        } else {
            reason
        },
    }
}

#[async_trait]
impl BacktestPort for HttpBacktestAdapter {
    async fn run_backtest(
        &self,
        submission: &Submission,
    ) -> Result<BacktestResult, SubmissionError> {
        let form = build_form(submission)?;

        debug!(endpoint = %self.endpoint, "POST backtest");
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "backtest response");

        if !status.is_success() {
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                message: error_message(&body)
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            });
        }

        BacktestResult::from_json(&body).map_err(|e| SubmissionError::Decode {
            reason: format!("invalid backtest response: {e}"),
        })
    }
}
