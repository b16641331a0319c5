//! Style rule builder with content-derived identifiers.

use sha2::{Digest, Sha256};

use crate::RuleRecord;

/// Bytes of the SHA-256 digest kept in an identifier.
const ID_HASH_BYTES: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    /// Generated class, `.<key>-<id>`.
    Class,
    /// Fixed selector such as `html` or `body`.
    Global(String),
}

/// A style rule under construction.
///
/// Identifiers depend only on content: two styles with the same selector and
/// declarations (and label) always serialize to the same [`RuleRecord`], which
/// is what lets the cache deduplicate repeated component renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    selector: Selector,
    label: Option<String>,
    declarations: Vec<(String, String)>,
}

impl Default for Style {
    fn default() -> Self {
        Self::new()
    }
}

impl Style {
    /// Style applied through a generated class name.
    pub fn new() -> Self {
        Self { selector: Selector::Class, label: None, declarations: Vec::new() }
    }

    /// Style applied to a fixed selector.
    pub fn global(selector: impl Into<String>) -> Self {
        Self { selector: Selector::Global(selector.into()), label: None, declarations: Vec::new() }
    }

    /// Append a readable label to the identifier.
    ///
    /// The identifier is written into class names and a space-separated
    /// `data-emotion` attribute, so characters outside `A-Za-z0-9_-` are
    /// replaced with `-`. An empty label is no label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        let label: String = label
            .into()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '-' })
            .collect();
        self.label = (!label.is_empty()).then_some(label);
        self
    }

    /// Add a declaration.
    #[must_use]
    pub fn set(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.push((property.into(), value.into()));
        self
    }

    /// Check if the style has no declarations.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Content-derived identifier: hashed declarations plus optional label.
    pub fn name(&self) -> String {
        let mut hasher = Sha256::new();
        if let Selector::Global(selector) = &self.selector {
            hasher.update(selector.as_bytes());
        }
        hasher.update(self.block().as_bytes());
        let digest = hasher.finalize();

        let hash = hex::encode(&digest[..ID_HASH_BYTES]);
        match &self.label {
            Some(label) => format!("{hash}-{label}"),
            None => hash,
        }
    }

    /// Serialize into a rule for a cache with the given key.
    pub fn serialize(&self, key: &str) -> RuleRecord {
        let name = self.name();
        let block = self.block();
        let css = match &self.selector {
            Selector::Class => format!(".{key}-{name}{{{block}}}"),
            Selector::Global(selector) => format!("{selector}{{{block}}}"),
        };
        RuleRecord::new(name, css)
    }

    fn block(&self) -> String {
        self.declarations.iter().map(|(property, value)| format!("{property}:{value};")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_content_equal_id() {
        let a = Style::new().set("height", "100%").set("margin", "0");
        let b = Style::new().set("height", "100%").set("margin", "0");
        assert_eq!(a.name(), b.name());
        assert_eq!(a.serialize("css"), b.serialize("css"));
    }

    #[test]
    fn different_content_different_id() {
        let a = Style::new().set("height", "100%");
        let b = Style::new().set("height", "50%");
        assert_ne!(a.name(), b.name());
    }

    #[test]
    fn label_is_appended() {
        let style = Style::new().set("color", "red").label("Button");
        assert!(style.name().ends_with("-Button"));
        assert_eq!(style.name().len(), ID_HASH_BYTES * 2 + "-Button".len());
    }

    #[test]
    fn label_is_restricted_to_identifier_characters() {
        let style = Style::new().set("color", "red").label("My \"Btn");
        let name = style.name();
        assert!(name.ends_with("-My--Btn"));
        assert!(!name.contains(char::is_whitespace));

        let rule = style.serialize("mui");
        assert!(rule.css().starts_with(&format!(".mui-{name}{{")));
        assert!(!rule.css().contains('"'));
    }

    #[test]
    fn empty_label_is_dropped() {
        let plain = Style::new().set("color", "red");
        assert_eq!(plain.clone().label("").name(), plain.name());
    }

    #[test]
    fn class_rule_uses_key_prefix() {
        let style = Style::new().set("color", "red");
        let rule = style.serialize("mui");
        assert_eq!(rule.css(), format!(".mui-{}{{color:red;}}", style.name()));
    }

    #[test]
    fn global_rule_uses_selector() {
        let rule = Style::global("body").set("margin", "0").serialize("mui");
        assert_eq!(rule.css(), "body{margin:0;}");
    }

    #[test]
    fn global_selector_changes_id() {
        let html = Style::global("html").set("margin", "0");
        let body = Style::global("body").set("margin", "0");
        let class = Style::new().set("margin", "0");
        assert_ne!(html.name(), body.name());
        assert_ne!(html.name(), class.name());
    }
}
