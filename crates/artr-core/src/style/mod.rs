//! Style insertion tracking for streamed server rendering.
//!
//! Components insert rules into a per-response [`StyleCache`] while they
//! render. The cache keeps every rule it has ever seen and, alongside, an
//! [`InsertionLog`] of identifiers that are new since the last flush. At each
//! flush point of the response the [`FlushEmitter`] drains that log into one
//! [`StyleFragment`], which the transport writes ahead of the markup that
//! uses it.
//!
//! ```text
//! component ──insert──▶ StyleCache ──(new id)──▶ InsertionLog
//!                                                    │ drain
//!                          transport ◀── fragment ◀── FlushEmitter
//! ```
//!
//! A rule enters the log only when its identifier is unknown to the cache,
//! so it is emitted once no matter how often it is inserted or how the
//! response is chunked.

mod cache;
mod emitter;
mod rule;
mod tracker;

pub use cache::{CacheOptions, DEFAULT_KEY, RuleRecord, StyleCache};
pub use emitter::{FlushEmitter, LAYER_NAME, StyleFragment};
pub use rule::Style;
pub use tracker::InsertionLog;
