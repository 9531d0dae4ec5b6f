//! Prismic rich text to HTML
//!
//! A body node without a `type` is the simplified `{ text }` shape whose text
//! is already HTML and is passed through untouched. Typed nodes carry plain
//! text plus formatting spans and are rendered here.

use serde::{Deserialize, Serialize};

use super::types::{lenient, lenient_or_default};
use crate::helpers::html_escape;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RichTextNode {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub spans: Vec<Span>,
    /// Only set on `image` nodes
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub alt: Option<String>,
}

/// Formatting over `start..end`; an unknown or missing `type` renders no tag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Span {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub start: usize,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub end: usize,
    #[serde(rename = "type", default, deserialize_with = "lenient_or_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<SpanData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpanData {
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub target: Option<String>,
}

/// Render one node as an HTML fragment
pub fn render_node(node: &RichTextNode) -> String {
    let text = node.text.as_deref().unwrap_or("");

    let Some(kind) = node.kind.as_deref() else {
        return text.to_string();
    };

    let inner = render_spans(text, &node.spans);
    match kind {
        "heading1" => format!("<h1>{}</h1>", inner),
        "heading2" => format!("<h2>{}</h2>", inner),
        "heading3" => format!("<h3>{}</h3>", inner),
        "heading4" => format!("<h4>{}</h4>", inner),
        "heading5" => format!("<h5>{}</h5>", inner),
        "heading6" => format!("<h6>{}</h6>", inner),
        "list-item" => format!("<ul><li>{}</li></ul>", inner),
        "o-list-item" => format!("<ol><li>{}</li></ol>", inner),
        "preformatted" => format!("<pre>{}</pre>", inner),
        "image" => format!(
            r#"<img src="{}" alt="{}">"#,
            html_escape(node.url.as_deref().unwrap_or("")),
            html_escape(node.alt.as_deref().unwrap_or(""))
        ),
        _ => format!("<p>{}</p>", inner),
    }
}

/// Apply `strong`, `em` and `hyperlink` spans to escaped text.
///
/// Offsets are character positions; an `end` past the text is clamped to
/// its length. Overlapping spans are closed and opened in the order they
/// appear, without re-nesting.
fn render_spans(text: &str, spans: &[Span]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let spans: Vec<Span> = spans
        .iter()
        .map(|s| Span {
            end: s.end.min(chars.len()),
            ..s.clone()
        })
        .collect();
    let mut out = String::with_capacity(text.len());

    for i in 0..=chars.len() {
        for span in spans.iter().rev().filter(|s| s.end == i && s.start < s.end) {
            out.push_str(close_tag(span));
        }
        for span in spans.iter().filter(|s| s.start == i && s.start < s.end) {
            out.push_str(&open_tag(span));
        }
        if let Some(c) = chars.get(i) {
            let mut buf = [0u8; 4];
            out.push_str(&html_escape(c.encode_utf8(&mut buf)));
        }
    }

    out
}

fn open_tag(span: &Span) -> String {
    match span.kind.as_str() {
        "strong" => "<strong>".to_string(),
        "em" => "<em>".to_string(),
        "hyperlink" => {
            let data = span.data.clone().unwrap_or_default();
            let href = html_escape(data.url.as_deref().unwrap_or("#"));
            match data.target.as_deref() {
                Some(target) => format!(
                    r#"<a href="{}" target="{}" rel="noopener">"#,
                    href,
                    html_escape(target)
                ),
                None => format!(r#"<a href="{}">"#, href),
            }
        }
        _ => String::new(),
    }
}

fn close_tag(span: &Span) -> &'static str {
    match span.kind.as_str() {
        "strong" => "</strong>",
        "em" => "</em>",
        "hyperlink" => "</a>",
        _ => "",
    }
}
