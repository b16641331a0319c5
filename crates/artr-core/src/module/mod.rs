//! External transform module lifecycle.
//!
//! The transform is an opaque capability behind [`TransformModule`]. It is
//! fetched and initialized by a [`ModuleLoader`] exactly once per
//! [`ModuleLifecycleController`], in the background, and published as a
//! [`ModuleSnapshot`] that consumers read or subscribe to.
//!
//! ```text
//! Unloaded ──start()──▶ Loading ──load ok──▶ Ready(module)
//!                          │
//!                          └──load err──▶ (stays Loading, error logged)
//! ```

mod controller;
mod snapshot;

use std::{future::Future, sync::Arc};

pub use controller::ModuleLifecycleController;
pub use snapshot::{ModuleSnapshot, ModuleState};

use crate::{LoadError, TransformError};

/// A loaded, initialized transform capability.
///
/// Both operations are pure text transforms: no side effects, and `&self`
/// only, so a module can be shared freely once ready.
pub trait TransformModule: Send + Sync {
    /// Transform source text into its encoded form.
    fn encode(&self, input: &str) -> Result<String, TransformError>;

    /// Transform encoded text back into source text.
    fn decode(&self, input: &str) -> Result<String, TransformError>;
}

/// Fetches and initializes a [`TransformModule`].
///
/// Called at most once per controller. Implementations should do all
/// expensive work here so the module is usable as soon as it is returned.
pub trait ModuleLoader: Send + Sync + 'static {
    /// Fetch the module and run its initialization entry point.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the module cannot be fetched or does not
    /// report readiness.
    fn load(&self) -> impl Future<Output = Result<Arc<dyn TransformModule>, LoadError>> + Send;
}
