//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render one attribute as ` name="value"`, escaping the value
pub fn attr(name: &str, value: &str) -> String {
    format!(r#" {}="{}""#, name, html_escape(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_attr() {
        assert_eq!(attr("theme", "photon-dark"), r#" theme="photon-dark""#);
        assert_eq!(attr("repo", r#"a"b"#), r#" repo="a&quot;b""#);
    }
}
