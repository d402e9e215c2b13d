//! The form controller.
//!
//! Owns the user's inputs, the chosen file, the last result and the visible
//! notifications, and drives a [`FormView`] through one serial state machine:
//!
//! ```text
//! Idle -> Validating -> Submitting -> (Succeeded | Failed) -> Idle
//!              \-> Failed -> Idle        (validation error, nothing sent)
//! ```
//!
//! `submit` borrows the controller mutably for the whole request, so a single
//! controller never has two requests in flight.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::error::{SubmissionError, ValidationError};
use super::notification::{NotificationBoard, NotificationKind};
use super::params::{ParamField, ParamInputs};
use super::render::RenderedResult;
use super::result::BacktestResult;
use super::upload::{selected_label, UploadSelection};
use super::validation::validate_submission;
use crate::ports::backtest_port::BacktestPort;
use crate::ports::view_port::{DropZoneState, FormView};

pub const IDLE_TRIGGER_LABEL: &str = "Run Backtest";
pub const BUSY_TRIGGER_LABEL: &str = "Processing...";
pub const DEFAULT_FILE_LABEL: &str = "Choose a CSV file or drag it here";
pub const SUCCESS_MESSAGE: &str = "Backtest completed successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Char(char),
}

/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    /// Cmd on macOS, the Windows key elsewhere.
    pub meta: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            ctrl: true,
            meta: false,
        }
    }

    pub fn meta(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: true,
        }
    }

    /// Ctrl+Enter or Cmd+Enter.
    pub fn is_submit_shortcut(&self) -> bool {
        self.key == Key::Enter && (self.ctrl || self.meta)
    }
}

/// How a submit attempt ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Completed(BacktestResult),
    Invalid(ValidationError),
    Failed(SubmissionError),
}

pub struct FormController<P, V> {
    port: P,
    view: V,
    inputs: ParamInputs,
    selection: Option<UploadSelection>,
    result: Option<BacktestResult>,
    notifications: NotificationBoard,
    state: ControllerState,
    trigger_enabled: bool,
}

impl<P: BacktestPort, V: FormView> FormController<P, V> {
    pub fn new(port: P, view: V, inputs: ParamInputs, notification_ttl: Duration) -> Self {
        let mut controller = Self {
            port,
            view,
            inputs,
            selection: None,
            result: None,
            notifications: NotificationBoard::new(notification_ttl),
            state: ControllerState::Idle,
            trigger_enabled: true,
        };
        controller.view.set_file_label(DEFAULT_FILE_LABEL);
        controller.view.set_drop_zone(DropZoneState::Idle);
        controller.set_busy(false);
        controller.view.hide_results();
        controller
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn inputs(&self) -> &ParamInputs {
        &self.inputs
    }

    pub fn selection(&self) -> Option<&UploadSelection> {
        self.selection.as_ref()
    }

    /// The most recent successful result, if any.
    pub fn result(&self) -> Option<&BacktestResult> {
        self.result.as_ref()
    }

    pub fn notifications(&self) -> &NotificationBoard {
        &self.notifications
    }

    pub fn is_trigger_enabled(&self) -> bool {
        self.trigger_enabled
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// File chosen through the picker.
    pub fn select_file(&mut self, file: UploadSelection) {
        debug!(name = file.name(), bytes = file.len(), "file selected");
        self.view.set_file_label(&selected_label(&file));
        self.view.set_drop_zone(DropZoneState::Selected);
        self.selection = Some(file);
    }

    pub fn drag_over(&mut self) {
        self.view.set_drop_zone(DropZoneState::Hover);
    }

    pub fn drag_leave(&mut self) {
        let state = if self.selection.is_some() {
            DropZoneState::Selected
        } else {
            DropZoneState::Idle
        };
        self.view.set_drop_zone(state);
    }

    /// Files dropped on the drop zone. Only the first is used; an empty drop
    /// changes nothing.
    pub fn drop_files(&mut self, files: Vec<UploadSelection>) {
        match files.into_iter().next() {
            Some(file) => self.select_file(file),
            None => self.drag_leave(),
        }
    }

    pub fn set_param(&mut self, field: ParamField, text: impl Into<String>) {
        self.inputs.set(field, text);
        self.view.mark_input_touched(field);
    }

    /// Ctrl/Cmd+Enter submits exactly as the trigger does; other keys are ignored.
    pub async fn handle_key(&mut self, key: KeyPress) -> Option<SubmitOutcome> {
        if key.is_submit_shortcut() {
            Some(self.submit().await)
        } else {
            None
        }
    }

    /// Remove notifications that have outlived their display time.
    pub fn tick(&mut self, now: Instant) {
        for kind in self.notifications.expire(now) {
            self.view.remove_notification(kind);
        }
    }

    /// Activate the trigger: validate, send, render.
    ///
    /// The mutable borrow is held until the request settles, so a second
    /// submit cannot start while one is in flight.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.transition(ControllerState::Validating);
        let submission = match validate_submission(self.selection.as_ref(), &self.inputs) {
            Ok(s) => s,
            Err(e) => {
                debug!(error = %e, "validation failed");
                self.notify(NotificationKind::Error, e.to_string());
                self.transition(ControllerState::Failed);
                self.transition(ControllerState::Idle);
                return SubmitOutcome::Invalid(e);
            }
        };

        self.transition(ControllerState::Submitting);
        self.set_busy(true);
        self.view.hide_results();
        for kind in self.notifications.clear() {
            self.view.remove_notification(kind);
        }

        info!(
            file = submission.file.name(),
            bytes = submission.file.len(),
            "submitting backtest"
        );

        let outcome = match self.port.run_backtest(&submission).await {
            Ok(result) => {
                info!(total_trades = result.total_trades, "backtest completed");
                self.show_result(&result);
                self.notify(NotificationKind::Success, SUCCESS_MESSAGE);
                self.transition(ControllerState::Succeeded);
                self.result = Some(result.clone());
                SubmitOutcome::Completed(result)
            }
            Err(e) => {
                info!(error = ?e, "backtest failed");
                self.notify(NotificationKind::Error, e.to_string());
                self.transition(ControllerState::Failed);
                SubmitOutcome::Failed(e)
            }
        };

        self.set_busy(false);
        self.transition(ControllerState::Idle);
        outcome
    }

    fn show_result(&mut self, result: &BacktestResult) {
        let rendered = RenderedResult::from_result(result);
        self.view.show_results(&rendered);
        self.view.scroll_to_results();
    }

    fn set_busy(&mut self, busy: bool) {
        self.trigger_enabled = !busy;
        let label = if busy {
            BUSY_TRIGGER_LABEL
        } else {
            IDLE_TRIGGER_LABEL
        };
        self.view.set_trigger(!busy, label);
        self.view.set_loading(busy);
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let notification = self.notifications.post(kind, message, Instant::now());
        self.view.show_notification(notification);
    }

    fn transition(&mut self, next: ControllerState) {
        debug!(from = ?self.state, to = ?next, "state transition");
        self.state = next;
    }
}
