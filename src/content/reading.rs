//! Estimated reading time

use super::ContentBlock;

/// Words read per minute
pub const WORDS_PER_MINUTE: usize = 200;

/// Count whitespace-separated tokens of every heading and body fragment.
///
/// Fragments are HTML, so markup tokens are counted as words.
pub fn word_count(content: &[ContentBlock]) -> usize {
    content
        .iter()
        .map(|block| {
            block.heading.split_whitespace().count()
                + block
                    .body
                    .iter()
                    .map(|fragment| fragment.text.split_whitespace().count())
                    .sum::<usize>()
        })
        .sum()
}

/// Minutes needed to read the content, rounded up
pub fn estimate_minutes(content: &[ContentBlock]) -> usize {
    word_count(content).div_ceil(WORDS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BodyFragment;

    fn block(heading: &str, body: &[&str]) -> ContentBlock {
        ContentBlock {
            heading: heading.to_string(),
            body: body
                .iter()
                .map(|t| BodyFragment {
                    text: t.to_string(),
                })
                .collect(),
        }
    }

    fn words(n: usize) -> String {
        vec!["palavra"; n].join(" ")
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(estimate_minutes(&[]), 0);
        assert_eq!(estimate_minutes(&[block("", &[])]), 0);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(estimate_minutes(&[block("", &[&words(200)])]), 1);
        assert_eq!(estimate_minutes(&[block("", &[&words(201)])]), 2);
        assert_eq!(estimate_minutes(&[block("um", &[&words(199)])]), 1);
        assert_eq!(estimate_minutes(&[block("um dois", &[&words(199)])]), 2);
    }

    #[test]
    fn test_heading_and_body_scenario() {
        let content = vec![block("H", &["one two three"])];
        assert_eq!(word_count(&content), 4);
        assert_eq!(estimate_minutes(&content), 1);
    }

    #[test]
    fn test_markup_counts_as_words() {
        let content = vec![block("", &["<p>Hello <strong>world</strong></p>"])];
        assert_eq!(word_count(&content), 2);
        let content = vec![block("", &["<p> Hello </p>"])];
        assert_eq!(word_count(&content), 3);
    }

    #[test]
    fn test_monotonic() {
        let mut previous = 0;
        for n in (0..1000).step_by(37) {
            let minutes = estimate_minutes(&[block("", &[&words(n)])]);
            assert!(minutes >= previous);
            previous = minutes;
        }
    }
}
