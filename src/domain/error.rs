//! Domain error types.

use super::params::ParamField;

/// A local validation failure. Only the first violated rule is reported.
///
/// `Display` yields the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a CSV file")]
    MissingFile,

    #[error("Please select a valid CSV file")]
    InvalidFileType { name: String },

    #[error("The selected CSV file is empty")]
    EmptyFile { name: String },

    #[error("Please enter a valid value for {field}")]
    InvalidField { field: ParamField },

    #[error("RSI Overbought level must be greater than RSI Oversold level")]
    RsiOrdering,

    #[error("MACD Fast period must be less than MACD Slow period")]
    MacdOrdering,
}

/// A remote failure while running a submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("{reason}")]
    Transport { reason: String },

    #[error("{reason}")]
    Decode { reason: String },
}

/// Top-level error type for backtest-desk.
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("CSV error in {file}: {reason}")]
    Csv { file: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DeskError> for std::process::ExitCode {
    fn from(err: &DeskError) -> Self {
        let code: u8 = match err {
            DeskError::Io(_) | DeskError::ConfigParse { .. } | DeskError::ConfigInvalid { .. } => 1,
            DeskError::Validation(_) => 2,
            DeskError::Submission(_) => 3,
            DeskError::Csv { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_names_the_field_label() {
        let err = ValidationError::InvalidField {
            field: ParamField::MacdSignal,
        };
        assert_eq!(err.to_string(), "Please enter a valid value for MACD Signal");
    }

    #[test]
    fn rejected_displays_backend_message() {
        let err = SubmissionError::Rejected {
            status: 400,
            message: "bad data".into(),
        };
        assert_eq!(err.to_string(), "bad data");
    }

    #[test]
    fn validation_converts_into_desk_error() {
        let err: DeskError = ValidationError::MissingFile.into();
        assert!(matches!(err, DeskError::Validation(ValidationError::MissingFile)));
        assert_eq!(err.to_string(), "Please select a CSV file");
    }
}
