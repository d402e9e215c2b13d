//! Configuration validation.
//!
//! Checks the `[client]`, `[ui]` and `[defaults]` sections before a
//! controller is built from them.

use crate::domain::error::DeskError;
use crate::domain::params::ParamField;
use crate::ports::config_port::ConfigPort;

pub fn validate_client_config(config: &dyn ConfigPort) -> Result<(), DeskError> {
    validate_endpoint(config)?;
    validate_timeout(config)?;
    validate_notification_secs(config)?;
    validate_defaults(config)?;
    Ok(())
}

fn validate_endpoint(config: &dyn ConfigPort) -> Result<(), DeskError> {
    match config.get_text("client", "endpoint") {
        None => Ok(()),
        Some(endpoint) => check_endpoint(&endpoint).map_err(|reason| DeskError::ConfigInvalid {
            section: "client".to_string(),
            key: "endpoint".to_string(),
            reason,
        }),
    }
}

/// An endpoint must be an absolute http(s) URL.
pub fn check_endpoint(endpoint: &str) -> Result<(), String> {
    let url = reqwest::Url::parse(endpoint).map_err(|e| format!("invalid URL: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme {other:?}, expected http or https")),
    }
}

fn validate_timeout(config: &dyn ConfigPort) -> Result<(), DeskError> {
    let value = config.get_double("client", "timeout_secs", 0.0);
    if !value.is_finite() || value < 0.0 {
        return Err(DeskError::ConfigInvalid {
            section: "client".to_string(),
            key: "timeout_secs".to_string(),
            reason: "timeout_secs must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_notification_secs(config: &dyn ConfigPort) -> Result<(), DeskError> {
    let value = config.get_int("ui", "notification_secs", 5);
    if value < 1 {
        return Err(DeskError::ConfigInvalid {
            section: "ui".to_string(),
            key: "notification_secs".to_string(),
            reason: "notification_secs must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_defaults(config: &dyn ConfigPort) -> Result<(), DeskError> {
    for field in ParamField::ALL {
        if let Some(text) = config.get_text("defaults", field.wire_name()) {
            if text.parse::<f64>().is_err() {
                return Err(DeskError::ConfigInvalid {
                    section: "defaults".to_string(),
                    key: field.wire_name().to_string(),
                    reason: format!("{} must be a number", field.wire_name()),
                });
            }
        }
    }
    Ok(())
}
