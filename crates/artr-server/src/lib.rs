//! ARTR encoder/decoder server.
//!
//! Streams the encoder/decoder page with style fragments injected at each
//! flush point, and serves the transform over a small JSON API while the
//! codec module loads in the background.
//!
//! # Architecture
//!
//! This crate provides the "glue" that wraps [`artr_core`]'s style and
//! lifecycle logic and [`artr_app`]'s page state with real I/O. The
//! [`StreamingRenderer`] drives a [`artr_core::FlushEmitter`] over the page
//! [`Segment`]s, while [`Server`] hosts the renderer and the transform API
//! using axum and Tokio.
//!
//! # Components
//!
//! - [`Server`]: starts the module load, binds the listener, serves requests
//! - [`StreamingRenderer`]: interleaves style fragments with page markup
//! - [`Transport`]: chunk sink ([`WriterTransport`], [`ChannelTransport`])
//! - [`view`]: components that register their rules while rendering

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
pub mod http;
mod page;
mod stream;
pub mod view;

use std::net::SocketAddr;

use artr_app::CodecLoader;
use artr_core::ModuleLifecycleController;
pub use config::{DEFAULT_BIND_ADDRESS, RenderOptions, ServerConfig};
pub use error::{ChannelClosed, RenderError, ServerError};
pub use http::{AppState, router};
pub use page::{Segment, TITLE, prologue};
pub use stream::{ChannelTransport, RenderSummary, StreamingRenderer, Transport, WriterTransport};
use tokio::net::TcpListener;

/// ARTR HTTP server.
///
/// The codec module starts loading when the server is bound, before the
/// first request; pages rendered before it is ready show the `loading`
/// state and transforms fail with the not-ready message.
pub struct Server {
    listener: TcpListener,
    state: AppState,
    /// Keeps the lifecycle publisher alive for the life of the server.
    controller: ModuleLifecycleController<CodecLoader>,
}

impl Server {
    /// Start the module load and bind the listener.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Style`] for invalid cache options,
    /// [`ServerError::Config`] for an unparsable bind address, and
    /// [`ServerError::Io`] if the address cannot be bound.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        config.render.cache.validate()?;

        let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
            ServerError::Config(format!("invalid bind address '{}': {e}", config.bind_address))
        })?;

        let controller = ModuleLifecycleController::new(CodecLoader::new(config.load_delay));
        controller.start();

        let state = AppState::new(controller.subscribe(), config.render);
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(%addr, "listener bound");

        Ok(Self { listener, state, controller })
    }

    /// Local address of the listener.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Io`] if the socket has no local address.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve requests until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Io`] if serving fails.
    pub async fn run(self) -> Result<(), ServerError> {
        let Self { listener, state, controller } = self;
        tracing::debug!(?controller, "serving");
        axum::serve(listener, router(state)).await?;
        Ok(())
    }
}
