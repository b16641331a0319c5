//! Flush-point emission of style fragments.

use std::collections::HashSet;

use crate::StyleCache;

/// Cascade layer used for prepended styles.
pub const LAYER_NAME: &str = "emotion";

/// Styles emitted at one flush point.
///
/// Transient: the transport writes it into the response and drops it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleFragment {
    key: String,
    ids: Vec<String>,
    css: String,
    layered: bool,
}

impl StyleFragment {
    /// Cache key the rules belong to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Rule identifiers, in insertion order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Concatenated CSS of the rules, unwrapped.
    pub fn css(&self) -> &str {
        &self.css
    }

    /// Whether the CSS must be wrapped in the [`LAYER_NAME`] cascade layer.
    pub fn is_layered(&self) -> bool {
        self.layered
    }

    /// `data-emotion` attribute value: the key followed by every identifier,
    /// space separated. The client matches these against its own cache when
    /// hydrating.
    pub fn data_attribute(&self) -> String {
        let mut value = self.key.clone();
        for id in &self.ids {
            value.push(' ');
            value.push_str(id);
        }
        value
    }

    /// Style element body, layer-wrapped if required.
    pub fn body(&self) -> String {
        if self.layered { format!("@layer {LAYER_NAME} {{{}}}", self.css) } else { self.css.clone() }
    }

    /// Serialize as an HTML `<style>` element.
    pub fn to_html(&self) -> String {
        format!("<style data-emotion=\"{}\">{}</style>", self.data_attribute(), self.body())
    }
}

/// Converts a cache's pending insertions into fragments at flush points.
///
/// Owns the response's [`StyleCache`]; renderers reach it through
/// [`FlushEmitter::cache_mut`]. One emitter per response.
///
/// # Invariants
///
/// - Each call to [`FlushEmitter::on_flush`] fully drains the pending log.
/// - An identifier is emitted in at most one fragment. A second drain of the
///   same identifier is a bug: debug builds panic, release builds drop the
///   duplicate and log an error.
#[derive(Debug)]
pub struct FlushEmitter {
    cache: StyleCache,
    emitted: HashSet<String>,
    fragments: usize,
}

impl FlushEmitter {
    /// Create an emitter for a fresh response.
    pub fn new(cache: StyleCache) -> Self {
        Self { cache, emitted: HashSet::new(), fragments: 0 }
    }

    /// The response's style cache.
    pub fn cache(&self) -> &StyleCache {
        &self.cache
    }

    /// The response's style cache, for rendering.
    pub fn cache_mut(&mut self) -> &mut StyleCache {
        &mut self.cache
    }

    /// Flush callback.
    ///
    /// Returns `None` when nothing was inserted since the previous flush; the
    /// transport must then write nothing.
    pub fn on_flush(&mut self) -> Option<StyleFragment> {
        let drained = self.cache.drain();
        if drained.is_empty() {
            return None;
        }

        let mut ids = Vec::with_capacity(drained.len());
        let mut css = String::new();

        for id in drained {
            let first_emission = self.emitted.insert(id.clone());
            debug_assert!(first_emission, "style rule {id} drained twice");
            if !first_emission {
                tracing::error!(rule = %id, "style rule drained twice, dropping duplicate");
                continue;
            }

            let rule = self.cache.rule(&id);
            debug_assert!(rule.is_some(), "style rule {id} drained but never stored");
            let Some(rule) = rule else {
                tracing::error!(rule = %id, "style rule drained but never stored");
                continue;
            };

            css.push_str(rule);
            ids.push(id);
        }

        if ids.is_empty() {
            return None;
        }

        self.fragments += 1;
        tracing::debug!(
            key = %self.cache.key(),
            rules = ids.len(),
            fragment = self.fragments,
            "flushing style fragment"
        );

        Some(StyleFragment {
            key: self.cache.key().to_string(),
            ids,
            css,
            layered: self.cache.prepend(),
        })
    }

    /// Number of distinct rules emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted.len()
    }

    /// Number of fragments produced so far.
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Check if a rule has been emitted.
    pub fn was_emitted(&self, id: &str) -> bool {
        self.emitted.contains(id)
    }
}
