//! Display formatting for backtest results.

use super::result::BacktestResult;

pub const INFINITY_SYMBOL: &str = "∞";

/// Visual treatment of a metric, chosen from its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    pub fn classify(value: f64) -> Self {
        if value > 0.0 {
            Tone::Positive
        } else if value < 0.0 {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMetric {
    pub text: String,
    pub tone: Tone,
}

impl RenderedMetric {
    fn toned(text: String, value: f64) -> Self {
        Self {
            text,
            tone: Tone::classify(value),
        }
    }

    fn plain(text: String) -> Self {
        Self {
            text,
            tone: Tone::Neutral,
        }
    }
}

/// The five summary metrics, formatted. Win rate, profit factor and total
/// return carry a tone from their sign; counts and money values stay neutral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResult {
    pub total_trades: RenderedMetric,
    pub win_rate: RenderedMetric,
    pub profit_factor: RenderedMetric,
    pub final_value: RenderedMetric,
    pub total_return: RenderedMetric,
    /// Starting capital, when the service reports it.
    pub initial_capital: Option<RenderedMetric>,
}

impl RenderedResult {
    pub fn from_result(result: &BacktestResult) -> Self {
        Self {
            total_trades: RenderedMetric::plain(result.total_trades.to_string()),
            win_rate: RenderedMetric::toned(format_percent(result.win_rate), result.win_rate),
            profit_factor: RenderedMetric::toned(
                format_number(result.profit_factor),
                result.profit_factor,
            ),
            final_value: RenderedMetric::plain(format_currency(result.final_portfolio_value)),
            total_return: RenderedMetric::toned(
                format_percent(result.total_return),
                result.total_return,
            ),
            initial_capital: result
                .initial_capital
                .map(|v| RenderedMetric::plain(format_currency(v))),
        }
    }
}

/// Shortest decimal form, with the unbounded symbol for infinities.
pub fn format_number(value: f64) -> String {
    if value == f64::INFINITY {
        INFINITY_SYMBOL.to_string()
    } else if value == f64::NEG_INFINITY {
        format!("-{INFINITY_SYMBOL}")
    } else {
        value.to_string()
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number(value))
}

/// Dollar amount with thousands separators and two decimals, e.g. `$12,345.67`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("${}", format_number(value));
    }
    let cents = (value.abs() * 100.0).round() as u128;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}${whole}.{frac:02}",
        whole = group_thousands(cents / 100),
        frac = cents % 100
    )
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
