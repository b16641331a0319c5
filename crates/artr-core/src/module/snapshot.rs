//! Published lifecycle values.

use std::{fmt, sync::Arc};

use serde::Serialize;

use super::TransformModule;

/// Lifecycle state. Ordered: a controller's state never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleState {
    /// Load not started.
    Unloaded,
    /// Load in progress (or failed; see [`crate::ModuleLifecycleController`]).
    Loading,
    /// Module loaded and initialized.
    Ready,
}

impl fmt::Display for ModuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unloaded => f.write_str("unloaded"),
            Self::Loading => f.write_str("loading"),
            Self::Ready => f.write_str("ready"),
        }
    }
}

/// Immutable lifecycle snapshot.
///
/// The module is carried inside [`ModuleSnapshot::Ready`], so a snapshot in
/// any other state has no capability to call.
#[derive(Clone, Default)]
pub enum ModuleSnapshot {
    /// Load not started.
    #[default]
    Unloaded,
    /// Load in progress.
    Loading,
    /// Module available.
    Ready(Arc<dyn TransformModule>),
}

impl ModuleSnapshot {
    /// Lifecycle state of this snapshot.
    pub fn state(&self) -> ModuleState {
        match self {
            Self::Unloaded => ModuleState::Unloaded,
            Self::Loading => ModuleState::Loading,
            Self::Ready(_) => ModuleState::Ready,
        }
    }

    /// The module. `None` unless ready.
    pub fn module(&self) -> Option<&Arc<dyn TransformModule>> {
        match self {
            Self::Ready(module) => Some(module),
            Self::Unloaded | Self::Loading => None,
        }
    }

    /// Check if the module is ready.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl fmt::Debug for ModuleSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unloaded => f.write_str("Unloaded"),
            Self::Loading => f.write_str("Loading"),
            Self::Ready(_) => f.write_str("Ready(..)"),
        }
    }
}
