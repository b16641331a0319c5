//! Server error types.

use artr_core::StyleError;
use thiserror::Error;

/// Errors that prevent the server from starting or running.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration error (invalid bind address, invalid cache key).
    ///
    /// Fatal at startup. Fix configuration and restart.
    #[error("configuration error: {0}")]
    Config(String),

    /// Style cache options were rejected.
    #[error("configuration error: {0}")]
    Style(#[from] StyleError),

    /// Listener or stream I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort one streamed page render.
///
/// The render stops at the first failure; chunks already written stay
/// written.
#[derive(Error, Debug)]
pub enum RenderError<E: std::error::Error + 'static> {
    /// The per-response style cache could not be created.
    #[error("style cache: {0}")]
    Style(#[from] StyleError),

    /// The transport refused a chunk.
    #[error("transport write failed: {0}")]
    Transport(#[source] E),
}

/// The receiving end of a [`ChannelTransport`](crate::ChannelTransport) is
/// gone, usually because the client disconnected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("response body receiver dropped")]
pub struct ChannelClosed;
