//! Summary metrics returned by the backtest endpoint.

use serde::{Deserialize, Deserializer};
use std::borrow::Cow;

/// Fallback message when a rejected response carries no `error` field.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred during backtesting";

/// Fallback message when the request fails without a usable reason.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "An error occurred while running the backtest";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BacktestResult {
    pub total_trades: u64,
    #[serde(deserialize_with = "lenient_f64")]
    pub win_rate: f64,
    /// Gross profit over gross loss; infinite when there were no losing trades.
    #[serde(deserialize_with = "lenient_f64")]
    pub profit_factor: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub final_portfolio_value: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_return: f64,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub initial_capital: Option<f64>,
}

impl BacktestResult {
    /// Decode a success body, accepting the non-standard `Infinity`/`NaN`
    /// tokens that some JSON encoders emit.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(&quote_non_finite(body))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Extract the `error` string from a failure body, if there is one.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(&quote_non_finite(body))
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn parse_non_finite(text: &str) -> Option<f64> {
    match text.trim() {
        "Infinity" | "+Infinity" | "inf" | "+inf" | "infinity" => Some(f64::INFINITY),
        "-Infinity" | "-inf" | "-infinity" => Some(f64::NEG_INFINITY),
        "NaN" | "nan" => Some(f64::NAN),
        other => other.parse().ok(),
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(v) => Ok(v),
        NumberOrText::Text(s) => parse_non_finite(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid number: {s:?}"))),
    }
}

fn lenient_opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(v)) => Ok(Some(v)),
        Some(NumberOrText::Text(s)) => parse_non_finite(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid number: {s:?}"))),
    }
}

const NON_FINITE_TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

/// Wrap bare `Infinity`, `-Infinity` and `NaN` tokens in quotes so that a
/// strict JSON parser accepts them. Occurrences inside strings are untouched.
pub fn quote_non_finite(body: &str) -> Cow<'_, str> {
    if !NON_FINITE_TOKENS.iter().any(|t| body.contains(t)) {
        return Cow::Borrowed(body);
    }

    let bytes = body.as_bytes();
    let mut out = String::with_capacity(body.len() + 8);
    let mut flushed = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if b == b'"' {
            in_string = true;
            i += 1;
            continue;
        }
        match NON_FINITE_TOKENS
            .iter()
            .find(|t| bytes[i..].starts_with(t.as_bytes()))
        {
            Some(token) => {
                out.push_str(&body[flushed..i]);
                out.push('"');
                out.push_str(token);
                out.push('"');
                i += token.len();
                flushed = i;
            }
            None => i += 1,
        }
    }
    out.push_str(&body[flushed..]);
    Cow::Owned(out)
}
