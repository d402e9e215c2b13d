//! Terminal rendering of the form.
//!
//! Results and notifications are written as text; the loading indicator is an
//! `indicatif` spinner on stderr.

use std::io::Write;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::{debug, warn};

use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::render::{RenderedMetric, RenderedResult, Tone};
use crate::ports::view_port::{DropZoneState, FormView};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

pub struct TerminalView<W: Write> {
    out: W,
    color: bool,
    spinner: Option<ProgressBar>,
    show_spinner: bool,
    trigger_label: String,
    trigger_enabled: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            spinner: None,
            show_spinner: true,
            trigger_label: String::new(),
            trigger_enabled: true,
        }
    }

    /// Disable the spinner, e.g. when stderr is not a terminal.
    pub fn without_spinner(mut self) -> Self {
        self.show_spinner = false;
        self
    }

    pub fn trigger_label(&self) -> &str {
        &self.trigger_label
    }

    pub fn is_trigger_enabled(&self) -> bool {
        self.trigger_enabled
    }

    pub fn is_loading(&self) -> bool {
        self.spinner.is_some()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, metric: &RenderedMetric) -> String {
        if !self.color {
            return metric.text.clone();
        }
        match metric.tone {
            Tone::Positive => format!("{GREEN}{}{RESET}", metric.text),
            Tone::Negative => format!("{RED}{}{RESET}", metric.text),
            Tone::Neutral => metric.text.clone(),
        }
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            warn!(error = %e, "terminal write failed");
        }
    }
}

impl<W: Write> FormView for TerminalView<W> {
    fn set_file_label(&mut self, label: &str) {
        debug!(label, "file label");
    }

    fn set_drop_zone(&mut self, state: DropZoneState) {
        debug!(?state, "drop zone");
    }

    fn set_trigger(&mut self, enabled: bool, label: &str) {
        self.trigger_enabled = enabled;
        self.trigger_label = label.to_string();
    }

    fn set_loading(&mut self, visible: bool) {
        if visible {
            let spinner = if self.show_spinner {
                ProgressBar::new_spinner()
            } else {
                ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
            };
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                spinner.set_style(style);
            }
            spinner.set_message(self.trigger_label.clone());
            spinner.enable_steady_tick(Duration::from_millis(100));
            self.spinner = Some(spinner);
        } else if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn show_results(&mut self, result: &RenderedResult) {
        let mut rows = vec![
            ("Total Trades:", self.paint(&result.total_trades)),
            ("Win Rate:", self.paint(&result.win_rate)),
            ("Profit Factor:", self.paint(&result.profit_factor)),
            ("Final Value:", self.paint(&result.final_value)),
            ("Total Return:", self.paint(&result.total_return)),
        ];
        if let Some(capital) = &result.initial_capital {
            rows.insert(3, ("Initial Capital:", self.paint(capital)));
        }
        self.line("\n=== Backtest Results ===");
        for (label, value) in rows {
            self.line(&format!("{label:<17}{value}"));
        }
    }

    fn hide_results(&mut self) {}

    fn show_notification(&mut self, notification: &Notification) {
        let prefix = match notification.kind {
            NotificationKind::Error => "error",
            NotificationKind::Success => "ok",
        };
        self.line(&format!("{prefix}: {}", notification.message));
    }

    fn remove_notification(&mut self, _kind: NotificationKind) {}
}
