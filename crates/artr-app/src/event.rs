//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from three sources:
//! - User interactions (text edits, button presses, notification dismissal)
//!   and timer ticks.
//! - Module lifecycle publications.
//! - Transform outcomes reported back by the runtime.

use std::time::Duration;

use artr_core::{Direction, ModuleSnapshot, TransformResult};

use crate::DismissReason;

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Source text area edited.
    RawEdited(String),

    /// Encoded text area edited.
    ArtrEdited(String),

    /// Encode button pressed.
    EncodeClicked,

    /// Decode button pressed.
    DecodeClicked,

    /// Module lifecycle published a new snapshot.
    ModuleUpdated(ModuleSnapshot),

    /// Transform finished.
    TransformCompleted {
        /// Direction that was requested.
        direction: Direction,
        /// Classified outcome.
        result: TransformResult,
    },

    /// User or timer asked to close the notification.
    DismissNotification(DismissReason),

    /// Time passed.
    Tick(Duration),

    /// Close the page.
    Quit,
}
