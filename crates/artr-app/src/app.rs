//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the page's
//! interactive state completely decoupled from I/O and from the transform
//! module itself.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Holds the source and encoded text areas.
//! - Requests transforms and applies their outcomes: a success replaces the
//!   opposite text area, a failure opens a notification and leaves both
//!   text areas untouched.
//! - Tracks the latest module lifecycle snapshot for display.
//! - Counts down and dismisses the error notification.

use artr_core::{Direction, ModuleSnapshot, ModuleState, TransformResult};

use crate::{AppAction, AppEvent, DismissReason, Notification};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in isolation.
#[derive(Debug, Clone, Default)]
pub struct App {
    /// Source text (本音).
    raw_text: String,
    /// Encoded text (建前).
    artr_text: String,
    /// Latest lifecycle snapshot seen.
    module: ModuleSnapshot,
    /// Open error notification. `None` if closed.
    notification: Option<Notification>,
}

impl App {
    /// Create an empty App with the module not yet loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::RawEdited(text) => {
                if text == self.raw_text {
                    return vec![];
                }
                self.raw_text = text;
                vec![AppAction::Render]
            },
            AppEvent::ArtrEdited(text) => {
                if text == self.artr_text {
                    return vec![];
                }
                self.artr_text = text;
                vec![AppAction::Render]
            },
            AppEvent::EncodeClicked => self.request(Direction::Encode),
            AppEvent::DecodeClicked => self.request(Direction::Decode),
            AppEvent::ModuleUpdated(snapshot) => {
                if snapshot.state() < self.module.state() {
                    tracing::warn!(
                        current = %self.module.state(),
                        published = %snapshot.state(),
                        "ignoring stale module snapshot"
                    );
                    return vec![];
                }
                self.module = snapshot;
                vec![AppAction::Render]
            },
            AppEvent::TransformCompleted { direction, result } => {
                self.apply(direction, result);
                vec![AppAction::Render]
            },
            AppEvent::DismissNotification(DismissReason::ClickAway) => vec![],
            AppEvent::DismissNotification(DismissReason::CloseButton | DismissReason::Timeout) => {
                if self.notification.take().is_some() { vec![AppAction::Render] } else { vec![] }
            },
            AppEvent::Tick(elapsed) => {
                let expired =
                    self.notification.as_mut().is_some_and(|notification| notification.elapse(elapsed));
                if expired {
                    self.notification = None;
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
            AppEvent::Quit => vec![AppAction::Quit],
        }
    }

    /// Capture the input for `direction` and ask the runtime to transform it.
    fn request(&self, direction: Direction) -> Vec<AppAction> {
        let input = match direction {
            Direction::Encode => self.raw_text.clone(),
            Direction::Decode => self.artr_text.clone(),
        };
        vec![AppAction::Transform { direction, input }]
    }

    fn apply(&mut self, direction: Direction, result: TransformResult) {
        match result {
            TransformResult::Success { text } => match direction {
                Direction::Encode => self.artr_text = text,
                Direction::Decode => self.raw_text = text,
            },
            TransformResult::Failure { message } => {
                tracing::debug!(%direction, %message, "transform failed");
                self.notification = Some(Notification::new(message));
            },
        }
    }

    /// Source text (本音).
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Encoded text (建前).
    pub fn artr_text(&self) -> &str {
        &self.artr_text
    }

    /// Latest module lifecycle state seen.
    pub fn module_state(&self) -> ModuleState {
        self.module.state()
    }

    /// Open notification. `None` if closed.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }
}
