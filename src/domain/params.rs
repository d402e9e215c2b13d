//! Strategy parameter fields, raw form inputs and validated parameters.

use std::fmt;

/// One of the seven numeric fields on the strategy form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    MaPeriod,
    RsiPeriod,
    RsiOverbought,
    RsiOversold,
    MacdFast,
    MacdSlow,
    MacdSignal,
}

impl ParamField {
    pub const ALL: [ParamField; 7] = [
        ParamField::MaPeriod,
        ParamField::RsiPeriod,
        ParamField::RsiOverbought,
        ParamField::RsiOversold,
        ParamField::MacdFast,
        ParamField::MacdSlow,
        ParamField::MacdSignal,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Multipart field name expected by the backtest endpoint.
    pub fn wire_name(self) -> &'static str {
        match self {
            ParamField::MaPeriod => "ma_period",
            ParamField::RsiPeriod => "rsi_period",
            ParamField::RsiOverbought => "rsi_overbought",
            ParamField::RsiOversold => "rsi_oversold",
            ParamField::MacdFast => "macd_fast",
            ParamField::MacdSlow => "macd_slow",
            ParamField::MacdSignal => "macd_signal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParamField::MaPeriod => "MA Period",
            ParamField::RsiPeriod => "RSI Period",
            ParamField::RsiOverbought => "RSI Overbought",
            ParamField::RsiOversold => "RSI Oversold",
            ParamField::MacdFast => "MACD Fast",
            ParamField::MacdSlow => "MACD Slow",
            ParamField::MacdSignal => "MACD Signal",
        }
    }

    /// The value the backend assumes when the field is absent.
    pub fn default_value(self) -> f64 {
        match self {
            ParamField::MaPeriod => 50.0,
            ParamField::RsiPeriod => 14.0,
            ParamField::RsiOverbought => 70.0,
            ParamField::RsiOversold => 30.0,
            ParamField::MacdFast => 12.0,
            ParamField::MacdSlow => 26.0,
            ParamField::MacdSignal => 9.0,
        }
    }

    /// Period fields take whole bar counts; only the RSI levels may be fractional.
    pub fn is_period(self) -> bool {
        !matches!(self, ParamField::RsiOverbought | ParamField::RsiOversold)
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }
}

impl fmt::Display for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The text currently typed into each field, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamInputs {
    values: [String; 7],
}

impl ParamInputs {
    /// All fields empty.
    pub fn empty() -> Self {
        Self {
            values: Default::default(),
        }
    }

    pub fn get(&self, field: ParamField) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: ParamField, text: impl Into<String>) {
        self.values[field.index()] = text.into();
    }

    pub fn with(mut self, field: ParamField, text: impl Into<String>) -> Self {
        self.set(field, text);
        self
    }
}

impl Default for ParamInputs {
    fn default() -> Self {
        let mut inputs = Self::empty();
        for field in ParamField::ALL {
            inputs.set(field, field.default_value().to_string());
        }
        inputs
    }
}

/// Validated strategy parameters.
///
/// Periods are positive integers, RSI levels finite and positive,
/// `rsi_overbought > rsi_oversold` and `macd_fast < macd_slow`. Built only by
/// [`super::validation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyParameters {
    pub ma_period: u32,
    pub rsi_period: u32,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub macd_fast: u32,
    pub macd_slow: u32,
    pub macd_signal: u32,
}

impl StrategyParameters {
    pub fn get(&self, field: ParamField) -> f64 {
        match field {
            ParamField::MaPeriod => f64::from(self.ma_period),
            ParamField::RsiPeriod => f64::from(self.rsi_period),
            ParamField::RsiOverbought => self.rsi_overbought,
            ParamField::RsiOversold => self.rsi_oversold,
            ParamField::MacdFast => f64::from(self.macd_fast),
            ParamField::MacdSlow => f64::from(self.macd_slow),
            ParamField::MacdSignal => f64::from(self.macd_signal),
        }
    }

    /// Text-encoded `(wire name, value)` pairs in form order.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        ParamField::ALL
            .into_iter()
            .map(|f| (f.wire_name(), self.get(f).to_string()))
            .collect()
    }
}
