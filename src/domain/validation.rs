//! Form validation, checked before anything is sent.
//!
//! Rules run in a fixed order and the first failure wins: file present,
//! `.csv` name, non-empty content, each numeric field positive (form order;
//! periods must be whole numbers), RSI levels ordered, MACD periods ordered.

use super::error::ValidationError;
use super::params::{ParamField, ParamInputs, StrategyParameters};
use super::upload::UploadSelection;

/// A validated request, ready to be sent to the backtest endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub file: UploadSelection,
    pub params: StrategyParameters,
}

pub fn validate_submission(
    selection: Option<&UploadSelection>,
    inputs: &ParamInputs,
) -> Result<Submission, ValidationError> {
    let file = validate_file(selection)?;
    let params = validate_params(inputs)?;
    Ok(Submission {
        file: file.clone(),
        params,
    })
}

pub fn validate_file(
    selection: Option<&UploadSelection>,
) -> Result<&UploadSelection, ValidationError> {
    let file = selection.ok_or(ValidationError::MissingFile)?;
    if !file.has_csv_extension() {
        return Err(ValidationError::InvalidFileType {
            name: file.name().to_string(),
        });
    }
    if file.is_empty() {
        return Err(ValidationError::EmptyFile {
            name: file.name().to_string(),
        });
    }
    Ok(file)
}

pub fn validate_params(inputs: &ParamInputs) -> Result<StrategyParameters, ValidationError> {
    let params = StrategyParameters {
        ma_period: parse_period(inputs, ParamField::MaPeriod)?,
        rsi_period: parse_period(inputs, ParamField::RsiPeriod)?,
        rsi_overbought: parse_level(inputs, ParamField::RsiOverbought)?,
        rsi_oversold: parse_level(inputs, ParamField::RsiOversold)?,
        macd_fast: parse_period(inputs, ParamField::MacdFast)?,
        macd_slow: parse_period(inputs, ParamField::MacdSlow)?,
        macd_signal: parse_period(inputs, ParamField::MacdSignal)?,
    };
    validate_rsi_levels(&params)?;
    validate_macd_periods(&params)?;
    Ok(params)
}

/// A bar count: a positive integer, so `"12.5"` and `"12.0"` are rejected.
fn parse_period(inputs: &ParamInputs, field: ParamField) -> Result<u32, ValidationError> {
    inputs
        .get(field)
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or(ValidationError::InvalidField { field })
}

fn parse_level(inputs: &ParamInputs, field: ParamField) -> Result<f64, ValidationError> {
    inputs
        .get(field)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or(ValidationError::InvalidField { field })
}

fn validate_rsi_levels(params: &StrategyParameters) -> Result<(), ValidationError> {
    if params.rsi_overbought <= params.rsi_oversold {
        return Err(ValidationError::RsiOrdering);
    }
    Ok(())
}

fn validate_macd_periods(params: &StrategyParameters) -> Result<(), ValidationError> {
    if params.macd_fast >= params.macd_slow {
        return Err(ValidationError::MacdOrdering);
    }
    Ok(())
}
