//! Streaming page render.
//!
//! The [`StreamingRenderer`] writes the page prologue, then walks the page
//! [`Segment`]s, buffering markup and calling [`FlushEmitter::on_flush`] at
//! each flush point. A flush writes the style fragment first, then the
//! buffered markup, so every class used by a chunk is defined by a fragment
//! already on the wire.
//!
//! # Invariants
//!
//! - The doctype is the first thing written; no fragment precedes it.
//! - Flushes within one render are sequential; the emitter and its cache are
//!   owned by the render call and never shared.
//! - Every rule inserted during a render is written exactly once, whatever
//!   the flush cadence.

use std::future::Future;

use artr_app::App;
use artr_core::{FlushEmitter, StyleCache};
use bytes::Bytes;
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::mpsc,
};

use crate::{ChannelClosed, RenderError, RenderOptions, Segment, prologue};

/// Sink for response chunks, written in order.
pub trait Transport: Send {
    /// Transport-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Write one chunk. Chunks must reach the client in call order.
    fn write_chunk(&mut self, chunk: Bytes) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Transport over any async writer, flushed after each chunk.
#[derive(Debug)]
pub struct WriterTransport<W> {
    writer: W,
}

impl<W> WriterTransport<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: AsyncWrite + Unpin + Send> Transport for WriterTransport<W> {
    type Error = std::io::Error;

    async fn write_chunk(&mut self, chunk: Bytes) -> Result<(), Self::Error> {
        self.writer.write_all(&chunk).await?;
        self.writer.flush().await
    }
}

/// Transport feeding an HTTP response body through a bounded channel.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    sender: mpsc::Sender<Bytes>,
}

impl ChannelTransport {
    /// Wrap the sending half of a body channel.
    pub fn new(sender: mpsc::Sender<Bytes>) -> Self {
        Self { sender }
    }
}

impl Transport for ChannelTransport {
    type Error = ChannelClosed;

    async fn write_chunk(&mut self, chunk: Bytes) -> Result<(), Self::Error> {
        self.sender.send(chunk).await.map_err(|_| ChannelClosed)
    }
}

/// What one render wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Flush points reached.
    pub flushes: usize,
    /// Style fragments written.
    pub fragments: usize,
    /// Rules written across all fragments.
    pub rules: usize,
    /// Chunks written, fragments included.
    pub chunks: usize,
}

/// Renders the page into a [`Transport`] with style fragments interleaved.
#[derive(Debug, Clone, Default)]
pub struct StreamingRenderer {
    options: RenderOptions,
}

impl StreamingRenderer {
    /// Renderer with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the page for `app` with a fresh style cache.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Style`] if the cache options are invalid, and
    /// [`RenderError::Transport`] on the first chunk the transport refuses.
    pub async fn render<T: Transport>(
        &self,
        app: &App,
        transport: &mut T,
    ) -> Result<RenderSummary, RenderError<T::Error>> {
        let cache = StyleCache::new(self.options.cache.clone())?;
        let mut emitter = FlushEmitter::new(cache);
        let mut markup = String::new();
        let mut summary = RenderSummary::default();

        summary.chunks += 1;
        transport.write_chunk(Bytes::from(prologue())).await.map_err(RenderError::Transport)?;

        let flush_every = self.options.flush_every.get();
        let last = Segment::ALL.len() - 1;

        for (index, segment) in Segment::ALL.into_iter().enumerate() {
            markup.push_str(&segment.render(app, emitter.cache_mut()));

            if (index + 1) % flush_every == 0 || index == last {
                Self::flush(&mut emitter, &mut markup, transport, &mut summary).await?;
            }
        }

        tracing::debug!(
            flushes = summary.flushes,
            fragments = summary.fragments,
            rules = summary.rules,
            chunks = summary.chunks,
            "page rendered"
        );

        Ok(summary)
    }

    async fn flush<T: Transport>(
        emitter: &mut FlushEmitter,
        markup: &mut String,
        transport: &mut T,
        summary: &mut RenderSummary,
    ) -> Result<(), RenderError<T::Error>> {
        summary.flushes += 1;

        if let Some(fragment) = emitter.on_flush() {
            summary.fragments += 1;
            summary.rules += fragment.ids().len();
            summary.chunks += 1;
            transport
                .write_chunk(Bytes::from(fragment.to_html()))
                .await
                .map_err(RenderError::Transport)?;
        }

        if !markup.is_empty() {
            summary.chunks += 1;
            transport
                .write_chunk(Bytes::from(std::mem::take(markup)))
                .await
                .map_err(RenderError::Transport)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use artr_core::CacheOptions;

    use super::*;

    async fn render_to_string(options: RenderOptions) -> (String, RenderSummary) {
        let mut transport = WriterTransport::new(Vec::new());
        let summary =
            StreamingRenderer::new(options).render(&App::new(), &mut transport).await.unwrap();
        (String::from_utf8(transport.into_inner()).unwrap(), summary)
    }

    #[tokio::test]
    async fn first_fragment_lands_inside_head() {
        let (html, summary) = render_to_string(RenderOptions::default()).await;

        assert!(html.starts_with("<!DOCTYPE html>"));
        let style_at = html.find("<style").unwrap();
        let head_close = html.find("</head>").unwrap();
        assert!(style_at > html.find("<head>").unwrap());
        assert!(style_at < head_close);
        assert!(html[style_at..].starts_with(r#"<style data-emotion="mui "#));
        assert!(html.contains("@layer emotion {html{"));
        assert!(html.ends_with("</body></html>"));
        assert_eq!(summary.flushes, Segment::ALL.len());
    }

    #[tokio::test]
    async fn doctype_first_for_every_cadence() {
        for flush_every in 1..=Segment::ALL.len() + 1 {
            let options = RenderOptions {
                flush_every: NonZeroUsize::new(flush_every).unwrap(),
                ..RenderOptions::default()
            };
            let (html, _) = render_to_string(options).await;

            assert!(html.starts_with("<!DOCTYPE html>"), "cadence {flush_every}");
            assert!(html.find("<style").unwrap() < html.find("</head>").unwrap());
        }
    }

    #[tokio::test]
    async fn single_flush_writes_one_fragment() {
        let options = RenderOptions {
            flush_every: NonZeroUsize::new(100).unwrap(),
            ..RenderOptions::default()
        };
        let (html, summary) = render_to_string(options).await;

        assert_eq!(summary.flushes, 1);
        assert_eq!(summary.fragments, 1);
        assert_eq!(summary.chunks, 3);
        assert_eq!(html.matches("<style").count(), 1);
    }

    #[tokio::test]
    async fn no_prepend_skips_layer() {
        let options = RenderOptions {
            cache: CacheOptions::new("css"),
            ..RenderOptions::default()
        };
        let (html, _) = render_to_string(options).await;

        assert!(html.contains(r#"<style data-emotion="css "#));
        assert!(!html.contains("@layer"));
    }

    #[tokio::test]
    async fn invalid_key_fails_before_writing() {
        let options = RenderOptions {
            cache: CacheOptions::new("Not Valid"),
            ..RenderOptions::default()
        };
        let mut transport = WriterTransport::new(Vec::new());
        let result = StreamingRenderer::new(options).render(&App::new(), &mut transport).await;

        assert!(matches!(result, Err(RenderError::Style(_))));
        assert!(transport.into_inner().is_empty());
    }

    #[tokio::test]
    async fn closed_channel_aborts_render() {
        let (sender, receiver) = mpsc::channel(1);
        drop(receiver);
        let mut transport = ChannelTransport::new(sender);
        let result = StreamingRenderer::default().render(&App::new(), &mut transport).await;

        assert!(matches!(result, Err(RenderError::Transport(ChannelClosed))));
    }
}
