//! Rendering surface port trait.
//!
//! The controller drives every visible change through this trait, so the
//! same form logic can back a terminal, a browser binding or a test recorder.

use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::params::ParamField;
use crate::domain::render::RenderedResult;

/// Visual state of the file drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZoneState {
    Idle,
    Hover,
    Selected,
}

pub trait FormView {
    fn set_file_label(&mut self, label: &str);

    fn set_drop_zone(&mut self, state: DropZoneState);

    /// The submit trigger: whether it can be activated, and its caption.
    fn set_trigger(&mut self, enabled: bool, label: &str);

    fn set_loading(&mut self, visible: bool);

    fn show_results(&mut self, result: &RenderedResult);

    fn hide_results(&mut self);

    fn show_notification(&mut self, notification: &Notification);

    fn remove_notification(&mut self, kind: NotificationKind);

    /// Called after the results region is revealed.
    fn scroll_to_results(&mut self) {}

    /// Called when the user edits a parameter field.
    fn mark_input_touched(&mut self, _field: ParamField) {}
}
