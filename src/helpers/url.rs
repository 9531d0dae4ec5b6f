//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters left as-is in a path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/logo.svg") // -> "/blog/logo.svg"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Route of a post detail page
pub fn post_url(config: &SiteConfig, uid: &str) -> String {
    url_for(config, &format!("post/{}", encode_segment(uid)))
}

/// Pre-rendered load-more fragment `n` of a static build (page 1 is the index)
pub fn fragment_url(config: &SiteConfig, page: usize) -> String {
    url_for(config, &format!("page/{}.html", page))
}

/// Server endpoint that performs one load-more step from `cursor`
pub fn more_url(config: &SiteConfig, cursor: &str) -> String {
    format!(
        "{}?cursor={}",
        url_for(config, "posts/more"),
        utf8_percent_encode(cursor, NON_ALPHANUMERIC)
    )
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}
