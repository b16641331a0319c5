//! View components.
//!
//! Each component returns its markup and registers the rules it uses in the
//! style cache while rendering, so the rules land in the log for the next
//! flush point. Components never emit `<style>` themselves.

use artr_app::Notification;
use artr_core::{Style, StyleCache};

/// Markup closing [`stack_open`].
pub const STACK_CLOSE: &str = "</main>";

/// Escape text for element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Document-level rules: full-height `html` and `body`, no body margin.
pub fn css_baseline(cache: &mut StyleCache) {
    cache.register(&Style::global("html").set("height", "100%").set("box-sizing", "border-box"));
    cache.register(
        &Style::global("body")
            .set("margin", "0")
            .set("height", "100%")
            .set("font-family", "\"Roboto\",\"Helvetica\",\"Arial\",sans-serif")
            .set("background-color", "#fff"),
    );
}

/// Opening tag of the vertical page layout.
///
/// Carries the module state the page was rendered with as `data-module`.
pub fn stack_open(cache: &mut StyleCache, module_state: &str) -> String {
    let class = cache.register(
        &Style::new()
            .label("Stack")
            .set("display", "flex")
            .set("flex-direction", "column")
            .set("gap", "8px")
            .set("padding", "8px")
            .set("height", "100%")
            .set("box-sizing", "border-box"),
    );
    format!(r#"<main class="{class}" data-module="{}">"#, escape_html(module_state))
}

/// Labelled multiline text field.
pub fn text_field(
    cache: &mut StyleCache,
    id: &str,
    label: &str,
    placeholder: &str,
    value: &str,
) -> String {
    let root = cache.register(
        &Style::new()
            .label("TextField")
            .set("display", "flex")
            .set("flex-direction", "column")
            .set("flex", "1 1 0")
            .set("height", "100%"),
    );
    let label_class = cache.register(
        &Style::new()
            .label("InputLabel")
            .set("font-size", "0.75rem")
            .set("color", "rgba(0,0,0,0.6)"),
    );
    let input = cache.register(
        &Style::new()
            .label("InputBase")
            .set("flex", "1 1 auto")
            .set("height", "100%")
            .set("padding", "16.5px 14px")
            .set("border", "1px solid rgba(0,0,0,0.23)")
            .set("border-radius", "4px")
            .set("font", "inherit")
            .set("resize", "none"),
    );

    format!(
        concat!(
            r#"<div class="{root}">"#,
            r#"<label class="{label_class}" for="{id}">{label}</label>"#,
            r#"<textarea class="{input}" id="{id}" name="{id}" placeholder="{placeholder}">"#,
            "{value}</textarea></div>",
        ),
        root = root,
        label_class = label_class,
        input = input,
        id = escape_html(id),
        label = escape_html(label),
        placeholder = escape_html(placeholder),
        value = escape_html(value),
    )
}

/// Contained button.
pub fn button(cache: &mut StyleCache, action: &str, label: &str) -> String {
    let class = cache.register(
        &Style::new()
            .label("Button")
            .set("padding", "6px 16px")
            .set("border", "0")
            .set("color", "#fff")
            .set("background-color", "#1976d2")
            .set("font", "inherit")
            .set("cursor", "pointer"),
    );
    format!(
        r#"<button class="{class}" type="button" data-action="{}">{}</button>"#,
        escape_html(action),
        escape_html(label)
    )
}

/// Centred group of buttons, each given as `(action, label)`.
pub fn button_group(cache: &mut StyleCache, buttons: &[(&str, &str)]) -> String {
    let class = cache.register(
        &Style::new()
            .label("ButtonGroup")
            .set("display", "inline-flex")
            .set("gap", "1px")
            .set("margin-left", "auto")
            .set("margin-right", "auto")
            .set("border-radius", "4px")
            .set("overflow", "hidden"),
    );

    let mut html = format!(r#"<div class="{class}" role="group">"#);
    for (action, label) in buttons {
        html.push_str(&button(cache, action, label));
    }
    html.push_str("</div>");
    html
}

/// Error notification with a close button. Empty when closed.
pub fn snackbar(cache: &mut StyleCache, notification: Option<&Notification>) -> String {
    let Some(notification) = notification else {
        return String::new();
    };

    let root = cache.register(
        &Style::new()
            .label("Snackbar")
            .set("position", "fixed")
            .set("left", "8px")
            .set("bottom", "8px")
            .set("display", "flex")
            .set("align-items", "center")
            .set("gap", "8px")
            .set("padding", "6px 16px")
            .set("color", "#fff")
            .set("background-color", "#323232")
            .set("border-radius", "4px"),
    );
    let close = cache.register(
        &Style::new()
            .label("IconButton")
            .set("border", "0")
            .set("background", "none")
            .set("color", "inherit")
            .set("cursor", "pointer"),
    );

    format!(
        concat!(
            r#"<div class="{root}" role="alert" data-auto-hide-ms="{ms}">"#,
            "<span>{message}</span>",
            r#"<button class="{close}" type="button" aria-label="close">&#x2715;</button>"#,
            "</div>",
        ),
        root = root,
        ms = notification.remaining.as_millis(),
        message = escape_html(&notification.message),
        close = close,
    )
}
