//! Previous/next post resolution by publish-date ordering

use crate::cms::{ContentSource, Ordering, Query};
use crate::error::Result;

use super::AdjacentPostRef;

/// Neighbours of one post, resolved once per detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacentPosts {
    /// The post published immediately before the current one
    pub prev: Option<AdjacentPostRef>,
    /// The post published immediately after the current one
    pub next: Option<AdjacentPostRef>,
}

/// Resolve the neighbours of document `id`.
///
/// Runs two single-result queries positioned after `id`, one per publish
/// order, concurrently. Descending order yields the earlier post, ascending
/// the later one. An empty result is the edge of the timeline and maps to
/// `None`.
pub async fn resolve<S: ContentSource>(
    source: &S,
    doc_type: &str,
    id: &str,
) -> Result<AdjacentPosts> {
    let earlier = Query::by_type(doc_type)
        .page_size(1)
        .after(id)
        .ordering(Ordering::PublishedDesc);
    let later = Query::by_type(doc_type)
        .page_size(1)
        .after(id)
        .ordering(Ordering::PublishedAsc);

    let (prev, next) = tokio::join!(source.query(&earlier), source.query(&later));

    let first = |response: crate::cms::SearchResponse| {
        response
            .results
            .first()
            .map(AdjacentPostRef::from_document)
    };

    let adjacent = AdjacentPosts {
        prev: first(prev?),
        next: first(next?),
    };
    tracing::debug!(
        id,
        prev = adjacent.prev.as_ref().map(|p| p.uid.as_str()),
        next = adjacent.next.as_ref().map(|p| p.uid.as_str()),
        "resolved adjacent posts"
    );
    Ok(adjacent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::fixtures::source;

    #[tokio::test]
    async fn test_middle_post_has_both_neighbours() {
        let adjacent = resolve(&source(), "posts", "id-b").await.unwrap();
        assert_eq!(adjacent.prev.unwrap().uid, "a");
        assert_eq!(adjacent.next.unwrap().uid, "c");
    }

    #[tokio::test]
    async fn test_earliest_post() {
        let adjacent = resolve(&source(), "posts", "id-a").await.unwrap();
        assert!(adjacent.prev.is_none());
        assert_eq!(adjacent.next.unwrap().uid, "b");
    }

    #[tokio::test]
    async fn test_latest_post() {
        let adjacent = resolve(&source(), "posts", "id-c").await.unwrap();
        assert_eq!(adjacent.prev.unwrap().title, "Second");
        assert!(adjacent.next.is_none());
    }

    #[tokio::test]
    async fn test_single_post_has_no_neighbours() {
        let source = crate::cms::MemorySource::new(
            url::Url::parse("https://blog.cdn.prismic.io/api/v2").unwrap(),
            vec![crate::cms::fixtures::doc(
                "only",
                "only",
                "Only",
                "2021-01-01T00:00:00+0000",
            )],
        );
        let adjacent = resolve(&source, "posts", "only").await.unwrap();
        assert_eq!(adjacent, AdjacentPosts::default());
    }
}
