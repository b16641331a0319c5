//! Transform invocation.
//!
//! [`invoke`] is the boundary between user-triggered actions and the external
//! module. Whatever the module does (return, reject, or panic) comes back as
//! a [`TransformResult`]; nothing else crosses this boundary.

use std::{
    any::Any,
    fmt,
    panic::{self, AssertUnwindSafe},
};

use serde::{Deserialize, Serialize};

use crate::{ModuleSnapshot, TransformError, TransformModule};

/// Failure message when the module is not loaded yet.
pub const NOT_READY_MESSAGE: &str = "module not ready";

/// Transform direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Source text to encoded text.
    Encode,
    /// Encoded text to source text.
    Decode,
}

impl Direction {
    fn apply(self, module: &dyn TransformModule, input: &str) -> Result<String, TransformError> {
        match self {
            Self::Encode => module.encode(input),
            Self::Decode => module.decode(input),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => f.write_str("encode"),
            Self::Decode => f.write_str("decode"),
        }
    }
}

/// Classified outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TransformResult {
    /// The module returned transformed text.
    Success {
        /// Transformed text.
        text: String,
    },
    /// The module was not ready, rejected the input, or panicked.
    Failure {
        /// Message to show the user.
        message: String,
    },
}

impl TransformResult {
    /// Failure with the given message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure { message: message.into() }
    }

    /// Check if this is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Run one transform.
///
/// Returns [`NOT_READY_MESSAGE`] as a failure without touching the module if
/// the snapshot is not ready. Module rejections become failures carrying the
/// module's message verbatim. No retry: one call, one attempt.
pub fn invoke(direction: Direction, input: &str, snapshot: &ModuleSnapshot) -> TransformResult {
    let Some(module) = snapshot.module() else {
        tracing::debug!(%direction, state = %snapshot.state(), "transform requested before ready");
        return TransformResult::failure(NOT_READY_MESSAGE);
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| direction.apply(module.as_ref(), input)));

    match outcome {
        Ok(Ok(text)) => TransformResult::Success { text },
        Ok(Err(err)) => {
            tracing::debug!(%direction, error = %err, "transform rejected input");
            TransformResult::Failure { message: err.to_string() }
        },
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(%direction, %message, "transform module panicked");
            TransformResult::Failure { message }
        },
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "transform module panicked".to_string()
    }
}
