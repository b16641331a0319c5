//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use artr_core::Direction;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Run the transform against the current module snapshot and report the
    /// outcome back as [`crate::AppEvent::TransformCompleted`].
    Transform {
        /// Requested direction.
        direction: Direction,
        /// Text to transform, captured when the button was pressed.
        input: String,
    },
}
