//! Application layer for the ARTR encoder/decoder
//!
//! Pure state machine and generic runtime for the page, enabling tests that
//! drive the same code a frontend runs.
//!
//! # Components
//!
//! - [`App`]: page state machine (two text areas, transform buttons, error
//!   notification)
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Event loop joining driver events with module lifecycle
//!   updates
//! - [`CodecModule`] / [`CodecLoader`]: the ARTR codec as a loadable
//!   transform module

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod codec_module;
mod driver;
mod event;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use codec_module::{CodecLoader, CodecModule};
pub use driver::Driver;
pub use event::AppEvent;
pub use runtime::Runtime;
pub use state::{DismissReason, NOTIFICATION_DURATION, Notification};
