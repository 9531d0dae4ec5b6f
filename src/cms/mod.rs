//! Content client adapter for the headless CMS
//!
//! [`ContentSource`] is the seam between the site and wherever documents come
//! from: the Prismic HTTP API ([`PrismicClient`]) or a JSON fixture file
//! ([`MemorySource`]).

mod memory;
mod prismic;
mod query;
mod richtext;
mod types;

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use url::Url;

pub use memory::MemorySource;
pub use prismic::PrismicClient;
pub use query::{Ordering, Predicate, Query};
pub use richtext::{render_node, RichTextNode, Span, SpanData};
pub use types::{
    ApiRef, ApiRoot, Document, ImageField, PostFields, RawBlock, SearchResponse, TextField,
};

#[cfg(test)]
pub(crate) use memory::tests as fixtures;

use crate::config::CmsConfig;
use crate::error::{Error, Result};

/// Read-only access to CMS documents
pub trait ContentSource: Send + Sync {
    /// Run a search and return one page of results
    fn query(&self, query: &Query) -> impl Future<Output = Result<SearchResponse>> + Send;

    /// Fetch the single document of `doc_type` with this uid
    fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
    ) -> impl Future<Output = Result<Document>> + Send;

    /// Follow a `next_page` cursor
    fn fetch_page(&self, cursor: &Url) -> impl Future<Output = Result<SearchResponse>> + Send;

    /// Base URL every cursor handed out by this source lives under
    fn endpoint(&self) -> &Url;

    /// Parse a cursor and check that it points at this source's CMS
    fn check_cursor(&self, cursor: &str) -> Result<Url> {
        let url = Url::parse(cursor)
            .map_err(|e| Error::invalid_cursor(format!("{}: {}", cursor, e)))?;
        let endpoint = self.endpoint();
        if url.scheme() != endpoint.scheme()
            || url.host_str() != endpoint.host_str()
            || url.port_or_known_default() != endpoint.port_or_known_default()
            || !within_path(url.path(), endpoint.path())
        {
            return Err(Error::invalid_cursor(format!(
                "cursor does not point at {}",
                endpoint
            )));
        }
        Ok(url)
    }
}

/// `path` equals `base` or lies below it, compared by whole segments
fn within_path(path: &str, base: &str) -> bool {
    let base = base.trim_end_matches('/');
    match path.strip_prefix(base) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

impl<T: ContentSource> ContentSource for &T {
    fn query(&self, query: &Query) -> impl Future<Output = Result<SearchResponse>> + Send {
        (**self).query(query)
    }

    fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
    ) -> impl Future<Output = Result<Document>> + Send {
        (**self).get_by_uid(doc_type, uid)
    }

    fn fetch_page(&self, cursor: &Url) -> impl Future<Output = Result<SearchResponse>> + Send {
        (**self).fetch_page(cursor)
    }

    fn endpoint(&self) -> &Url {
        (**self).endpoint()
    }
}

impl<T: ContentSource> ContentSource for Arc<T> {
    fn query(&self, query: &Query) -> impl Future<Output = Result<SearchResponse>> + Send {
        (**self).query(query)
    }

    fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
    ) -> impl Future<Output = Result<Document>> + Send {
        (**self).get_by_uid(doc_type, uid)
    }

    fn fetch_page(&self, cursor: &Url) -> impl Future<Output = Result<SearchResponse>> + Send {
        (**self).fetch_page(cursor)
    }

    fn endpoint(&self) -> &Url {
        (**self).endpoint()
    }
}

/// The source selected by configuration
pub enum CmsSource {
    Prismic(PrismicClient),
    Memory(MemorySource),
}

impl CmsSource {
    /// Use the fixture file when one is configured, the HTTP API otherwise
    pub fn from_config(config: &CmsConfig, fixtures: Option<&Path>) -> Result<Self> {
        match fixtures {
            Some(path) => {
                tracing::info!("Serving documents from fixture file {:?}", path);
                let endpoint = Url::parse(&config.endpoint)?;
                Ok(CmsSource::Memory(MemorySource::load(endpoint, path)?))
            }
            None => {
                tracing::info!("Using CMS at {}", config.endpoint);
                Ok(CmsSource::Prismic(PrismicClient::new(config)?))
            }
        }
    }
}

impl ContentSource for CmsSource {
    async fn query(&self, query: &Query) -> Result<SearchResponse> {
        match self {
            CmsSource::Prismic(c) => c.query(query).await,
            CmsSource::Memory(m) => m.query(query).await,
        }
    }

    async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<Document> {
        match self {
            CmsSource::Prismic(c) => c.get_by_uid(doc_type, uid).await,
            CmsSource::Memory(m) => m.get_by_uid(doc_type, uid).await,
        }
    }

    async fn fetch_page(&self, cursor: &Url) -> Result<SearchResponse> {
        match self {
            CmsSource::Prismic(c) => c.fetch_page(cursor).await,
            CmsSource::Memory(m) => m.fetch_page(cursor).await,
        }
    }

    fn endpoint(&self) -> &Url {
        match self {
            CmsSource::Prismic(c) => c.endpoint(),
            CmsSource::Memory(m) => m.endpoint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_cursor() {
        let source = fixtures::source();
        assert!(source
            .check_cursor("https://blog.cdn.prismic.io/api/v2/documents/search?page=2")
            .is_ok());
        assert!(matches!(
            source.check_cursor("https://evil.example.com/api/v2/documents/search"),
            Err(Error::InvalidCursor(_))
        ));
        assert!(matches!(
            source.check_cursor("http://blog.cdn.prismic.io/api/v2/documents/search"),
            Err(Error::InvalidCursor(_))
        ));
        assert!(matches!(
            source.check_cursor("https://blog.cdn.prismic.io/api/v2evil/documents/search"),
            Err(Error::InvalidCursor(_))
        ));
        assert!(matches!(
            source.check_cursor("not a url"),
            Err(Error::InvalidCursor(_))
        ));
    }

    #[test]
    fn test_within_path() {
        assert!(within_path("/api/v2", "/api/v2"));
        assert!(within_path("/api/v2/documents/search", "/api/v2/"));
        assert!(within_path("/anything", "/"));
        assert!(!within_path("/api/v2evil", "/api/v2"));
        assert!(!within_path("/api", "/api/v2"));
    }

    #[test]
    fn test_from_config_with_fixtures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(&path, "[]").unwrap();

        let source = CmsSource::from_config(&CmsConfig::default(), Some(&path)).unwrap();
        assert!(matches!(source, CmsSource::Memory(_)));
        assert_eq!(
            source.endpoint().as_str(),
            "https://spacetraveling.cdn.prismic.io/api/v2"
        );
    }
}
