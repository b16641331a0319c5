//! Per-response style cache.

use std::collections::HashMap;

use crate::{InsertionLog, Style, StyleError};

/// Default cache key, prefixing class names and fragment attributes.
pub const DEFAULT_KEY: &str = "mui";

/// Style cache configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOptions {
    /// Prefix for generated class names and the `data-emotion` attribute.
    pub key: String,
    /// Place these styles before third-party styles. Emitted CSS is wrapped
    /// in a cascade layer so unlayered stylesheets still override it.
    pub prepend: bool,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self { key: DEFAULT_KEY.to_string(), prepend: true }
    }
}

impl CacheOptions {
    /// Options with the given key and no prepending.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), prepend: false }
    }

    /// Set whether styles are prepended.
    #[must_use]
    pub fn with_prepend(mut self, prepend: bool) -> Self {
        self.prepend = prepend;
        self
    }

    /// Check the key is non-empty and made of `a-z` and `-` only.
    pub fn validate(&self) -> Result<(), StyleError> {
        let valid = !self.key.is_empty()
            && self.key.chars().all(|c| c.is_ascii_lowercase() || c == '-');
        if valid { Ok(()) } else { Err(StyleError::InvalidKey { key: self.key.clone() }) }
    }
}

/// One generated style rule.
///
/// Created once per distinct rule content and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRecord {
    id: String,
    css: String,
}

impl RuleRecord {
    /// Create a rule from its identifier and serialized CSS.
    pub fn new(id: impl Into<String>, css: impl Into<String>) -> Self {
        Self { id: id.into(), css: css.into() }
    }

    /// Content-derived identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Serialized CSS text.
    pub fn css(&self) -> &str {
        &self.css
    }
}

/// Style cache for one response.
///
/// Stores every rule inserted during the response (keyed by identifier) and
/// tracks which identifiers have not been flushed yet. A cache must not be
/// shared between responses: its log describes what *this* response's client
/// has already received.
#[derive(Debug)]
pub struct StyleCache {
    options: CacheOptions,
    /// Canonical store: identifier -> CSS. First write wins.
    inserted: HashMap<String, String>,
    log: InsertionLog,
}

impl StyleCache {
    /// Create an empty cache.
    pub fn new(options: CacheOptions) -> Result<Self, StyleError> {
        options.validate()?;
        Ok(Self { options, inserted: HashMap::new(), log: InsertionLog::new() })
    }

    /// Insert a rule.
    ///
    /// The identifier is queued for the next flush only if the cache has never
    /// seen it. The store write always happens; it is a no-op for known
    /// identifiers.
    pub fn insert(&mut self, rule: RuleRecord) {
        let known = self.inserted.contains_key(rule.id());
        if self.log.on_insert(rule.id(), known) {
            tracing::trace!(rule = %rule.id(), "queued style rule");
        }
        self.inserted.entry(rule.id).or_insert(rule.css);
    }

    /// Serialize a style with this cache's key, insert it, and return its
    /// class name.
    pub fn register(&mut self, style: &Style) -> String {
        let rule = style.serialize(&self.options.key);
        let class = self.class_name(rule.id());
        self.insert(rule);
        class
    }

    /// Take the identifiers inserted since the previous drain, in order.
    pub fn drain(&mut self) -> Vec<String> {
        self.log.drain()
    }

    /// Class name for a rule identifier.
    pub fn class_name(&self, id: &str) -> String {
        format!("{}-{id}", self.options.key)
    }

    /// Stored CSS for an identifier. `None` if never inserted.
    pub fn rule(&self, id: &str) -> Option<&str> {
        self.inserted.get(id).map(String::as_str)
    }

    /// Check if an identifier has ever been inserted.
    pub fn is_inserted(&self, id: &str) -> bool {
        self.inserted.contains_key(id)
    }

    /// Identifiers waiting for the next flush.
    pub fn pending(&self) -> &[String] {
        self.log.pending()
    }

    /// Cache key.
    pub fn key(&self) -> &str {
        &self.options.key
    }

    /// Whether emitted CSS is wrapped in a cascade layer.
    pub fn prepend(&self) -> bool {
        self.options.prepend
    }

    /// Number of distinct rules stored.
    pub fn len(&self) -> usize {
        self.inserted.len()
    }

    /// Check if no rule has been inserted.
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty()
    }
}
