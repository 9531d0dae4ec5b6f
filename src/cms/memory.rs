//! In-memory content source backed by a JSON fixture file
//!
//! Answers the same queries as the HTTP API and hands out `next_page`
//! cursors below the configured endpoint, so pagination and cursor
//! validation behave exactly as they do against Prismic.

use std::path::Path;
use url::Url;

use super::query::{Ordering, Predicate, Query};
use super::types::{Document, SearchResponse};
use super::ContentSource;
use crate::error::{Error, Result};
use crate::helpers::parse_timestamp;

pub struct MemorySource {
    endpoint: Url,
    documents: Vec<Document>,
}

impl MemorySource {
    pub fn new(endpoint: Url, documents: Vec<Document>) -> Self {
        Self {
            endpoint,
            documents,
        }
    }

    /// Load a JSON array of documents (or a saved search response)
    pub fn load<P: AsRef<Path>>(endpoint: Url, path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let documents = match serde_json::from_str::<Vec<Document>>(&content) {
            Ok(documents) => documents,
            Err(_) => serde_json::from_str::<SearchResponse>(&content)?.results,
        };
        tracing::debug!(
            "Loaded {} documents from {:?}",
            documents.len(),
            path.as_ref()
        );
        Ok(Self::new(endpoint, documents))
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    fn matches(doc: &Document, predicate: &Predicate) -> bool {
        match predicate {
            Predicate::DocumentType(t) => doc.doc_type == *t,
            Predicate::Uid { doc_type, uid } => {
                doc.doc_type == *doc_type && doc.uid.as_deref() == Some(uid.as_str())
            }
        }
    }

    fn search(&self, query: &Query) -> Result<SearchResponse> {
        let mut hits: Vec<&Document> = self
            .documents
            .iter()
            .filter(|d| query.predicates.iter().all(|p| Self::matches(d, p)))
            .collect();

        if let Some(ordering) = query.ordering {
            // Stable sort; documents without a date sort last in either direction
            hits.sort_by(|a, b| {
                let a = a.first_publication_date.as_deref().and_then(parse_timestamp);
                let b = b.first_publication_date.as_deref().and_then(parse_timestamp);
                match (a, b, ordering) {
                    (Some(a), Some(b), Ordering::PublishedAsc) => a.cmp(&b),
                    (Some(a), Some(b), Ordering::PublishedDesc) => b.cmp(&a),
                    (Some(_), None, _) => std::cmp::Ordering::Less,
                    (None, Some(_), _) => std::cmp::Ordering::Greater,
                    (None, None, _) => std::cmp::Ordering::Equal,
                }
            });
        }

        if let Some(after) = &query.after {
            hits = match hits.iter().position(|d| d.id == *after) {
                Some(pos) => hits.split_off(pos + 1),
                None => Vec::new(),
            };
        }

        let page_size = query.page_size.max(1);
        let total_pages = hits.len().div_ceil(page_size);
        let start = query.page.saturating_sub(1) * page_size;
        let results: Vec<Document> = hits
            .into_iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        let next_page = if query.page < total_pages {
            let next = query.clone().page(query.page + 1);
            Some(next.to_url(&self.endpoint, None, None)?.to_string())
        } else {
            None
        };

        Ok(SearchResponse {
            page: query.page,
            total_pages,
            next_page,
            results,
        })
    }
}

impl ContentSource for MemorySource {
    async fn query(&self, query: &Query) -> Result<SearchResponse> {
        self.search(query)
    }

    async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<Document> {
        self.search(&Query::by_uid(doc_type, uid))?
            .results
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(uid.to_string()))
    }

    async fn fetch_page(&self, cursor: &Url) -> Result<SearchResponse> {
        self.search(&Query::from_url(cursor)?)
    }

    fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::cms::types::{PostFields, TextField};

    pub(crate) fn doc(id: &str, uid: &str, title: &str, published: &str) -> Document {
        Document {
            id: id.to_string(),
            uid: Some(uid.to_string()),
            doc_type: "posts".to_string(),
            first_publication_date: Some(published.to_string()),
            last_publication_date: None,
            data: PostFields {
                title: Some(TextField::Plain(title.to_string())),
                ..PostFields::default()
            },
        }
    }

    pub(crate) fn source() -> MemorySource {
        MemorySource::new(
            Url::parse("https://blog.cdn.prismic.io/api/v2").unwrap(),
            vec![
                doc("id-b", "b", "Second", "2021-02-01T10:00:00+0000"),
                doc("id-a", "a", "First", "2021-01-01T10:00:00+0000"),
                doc("id-c", "c", "Third", "2021-03-01T10:00:00+0000"),
            ],
        )
    }

    #[tokio::test]
    async fn test_paging_cursors() {
        let source = source();
        let first = source
            .query(&Query::by_type("posts").page_size(2))
            .await
            .unwrap();
        assert_eq!(first.results.len(), 2);
        assert_eq!(first.total_pages, 2);

        let cursor = Url::parse(first.next_page.as_deref().unwrap()).unwrap();
        assert_eq!(cursor.host_str(), Some("blog.cdn.prismic.io"));

        let second = source.fetch_page(&cursor).await.unwrap();
        assert_eq!(second.results.len(), 1);
        assert_eq!(second.results[0].id, "id-c");
        assert!(second.next_page.is_none());
    }

    #[tokio::test]
    async fn test_ordering_and_after() {
        let source = source();
        let query = Query::by_type("posts")
            .page_size(1)
            .after("id-b")
            .ordering(Ordering::PublishedAsc);
        let response = source.query(&query).await.unwrap();
        assert_eq!(response.results[0].id, "id-c");

        let query = query.ordering(Ordering::PublishedDesc);
        let response = source.query(&query).await.unwrap();
        assert_eq!(response.results[0].id, "id-a");
    }

    #[tokio::test]
    async fn test_get_by_uid() {
        let source = source();
        assert_eq!(source.get_by_uid("posts", "c").await.unwrap().id, "id-c");
        assert!(matches!(
            source.get_by_uid("posts", "missing").await,
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_load_fixture_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(
            &path,
            r#"[{"id": "1", "uid": "one", "type": "posts", "data": {"title": "One"}}]"#,
        )
        .unwrap();

        let source =
            MemorySource::load(Url::parse("https://blog.cdn.prismic.io/api/v2").unwrap(), &path)
                .unwrap();
        assert_eq!(source.documents().len(), 1);
        assert_eq!(source.documents()[0].uid.as_deref(), Some("one"));
    }
}
