//! The encoder/decoder page as an ordered list of segments.
//!
//! The [`prologue`] comes first and inserts no rules, so the doctype is the
//! first token of every response and the first style fragment lands inside
//! `<head>`. Segments render lazily: a segment's style insertions happen only
//! when the streaming renderer reaches it, so they fall into the flush that
//! precedes its markup.

use artr_app::App;
use artr_core::StyleCache;

use crate::view;

/// Page title.
pub const TITLE: &str = "ARTR Encoder / Decoder";

/// Doctype and the open `<head>`. Takes no cache: it never inserts rules.
pub fn prologue() -> String {
    format!(
        concat!(
            "<!DOCTYPE html>",
            r#"<html lang="ja"><head><meta charset="utf-8">"#,
            r#"<meta name="description" content="{title}">"#,
            "<title>{title}</title>",
        ),
        title = TITLE,
    )
}

/// One independently rendered part of the page, in document order, after
/// the [`prologue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// End of `<head>` and the opening of the layout.
    Head,
    /// Source text field (本音).
    RawField,
    /// Encode/decode button pair.
    Buttons,
    /// Encoded text field (建前).
    ArtrField,
    /// Error notification, if open.
    Notification,
    /// Closing tags.
    Tail,
}

impl Segment {
    /// Every segment in document order.
    pub const ALL: [Self; 6] =
        [Self::Head, Self::RawField, Self::Buttons, Self::ArtrField, Self::Notification, Self::Tail];

    /// Render this segment for `app`, inserting its rules into `cache`.
    pub fn render(self, app: &App, cache: &mut StyleCache) -> String {
        match self {
            Self::Head => {
                view::css_baseline(cache);
                let stack = view::stack_open(cache, &app.module_state().to_string());
                format!("</head><body>{stack}")
            },
            Self::RawField => view::text_field(
                cache,
                "raw-data",
                "本音",
                "本音を書いてください",
                app.raw_text(),
            ),
            Self::Buttons => {
                view::button_group(cache, &[("encode", "🤫 建前化"), ("decode", "🫣 本音化")])
            },
            Self::ArtrField => view::text_field(
                cache,
                "artr-data",
                "建前",
                "建前を書いてください",
                app.artr_text(),
            ),
            Self::Notification => view::snackbar(cache, app.notification()),
            Self::Tail => format!("{}</body></html>", view::STACK_CLOSE),
        }
    }
}

#[cfg(test)]
mod tests {
    use artr_app::AppEvent;
    use artr_core::{CacheOptions, Direction, TransformResult};

    use super::*;

    fn render_all(app: &App) -> String {
        let mut cache = StyleCache::new(CacheOptions::default()).unwrap();
        let mut html = prologue();
        for segment in Segment::ALL {
            html.push_str(&segment.render(app, &mut cache));
        }
        html
    }

    #[test]
    fn page_is_well_formed_document() {
        let html = render_all(&App::new());
        assert!(html.starts_with("<!DOCTYPE html><html lang=\"ja\">"));
        assert!(html.ends_with("</main></body></html>"));
        assert!(html.contains(r#"data-module="unloaded""#));
        assert!(html.contains(r#"id="raw-data""#));
        assert!(html.contains(r#"id="artr-data""#));
        assert!(!html.contains(r#"role="alert""#));
    }

    #[test]
    fn notification_segment_follows_app() {
        let mut app = App::new();
        let _ = app.handle(AppEvent::TransformCompleted {
            direction: Direction::Decode,
            result: TransformResult::failure("長さが足りません"),
        });

        let html = render_all(&app);
        assert!(html.contains(r#"role="alert""#));
        assert!(html.contains("長さが足りません"));
    }

    #[test]
    fn prologue_leaves_head_open() {
        let html = prologue();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</title>"));
        assert!(!html.contains("</head>"));
        assert!(!html.contains("class="));
    }

    #[test]
    fn tail_inserts_no_rules() {
        let mut cache = StyleCache::new(CacheOptions::default()).unwrap();
        let _ = Segment::Tail.render(&App::new(), &mut cache);
        assert!(cache.is_empty());
    }
}
