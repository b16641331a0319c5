//! ARTR core
//!
//! The parts of the encoder/decoder page with real correctness requirements,
//! independent of any HTTP or UI framework.
//!
//! # Components
//!
//! - [`StyleCache`]: per-response style store whose insertion primitive feeds
//!   an [`InsertionLog`] of rules not yet sent to the client
//! - [`FlushEmitter`]: drains the log at each flush point of a streamed
//!   response into at most one [`StyleFragment`]
//! - [`ModuleLifecycleController`]: loads the transform module once, off the
//!   render path, and publishes [`ModuleSnapshot`]s to any number of readers
//! - [`invoke`]: runs one transform against a snapshot and classifies the
//!   outcome as a [`TransformResult`]
//!
//! # Invariants
//!
//! - Every rule identifier inserted into a cache appears in exactly one
//!   fragment over the life of that cache.
//! - The module capability is reachable only through
//!   [`ModuleSnapshot::Ready`], so it cannot be used before it is loaded.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod invoke;
pub mod module;
pub mod style;

pub use error::{LoadError, StyleError, TransformError};
pub use invoke::{Direction, NOT_READY_MESSAGE, TransformResult, invoke};
pub use module::{
    ModuleLifecycleController, ModuleLoader, ModuleSnapshot, ModuleState, TransformModule,
};
pub use style::{
    CacheOptions, FlushEmitter, InsertionLog, RuleRecord, Style, StyleCache, StyleFragment,
};
