//! Server and render configuration.

use std::{num::NonZeroUsize, time::Duration};

use artr_core::CacheOptions;

/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

/// Options for one streamed page render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Style cache key and placement.
    pub cache: CacheOptions,
    /// Number of page segments rendered between flush points. The last
    /// segment always ends with a flush.
    pub flush_every: NonZeroUsize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { cache: CacheOptions::default(), flush_every: NonZeroUsize::MIN }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (e.g., "127.0.0.1:3000")
    pub bind_address: String,
    /// Options applied to every page response
    pub render: RenderOptions,
    /// Simulated fetch time of the transform module
    pub load_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            render: RenderOptions::default(),
            load_delay: Duration::ZERO,
        }
    }
}
