//! Search queries and their URL form
//!
//! Queries travel as URLs in both directions: the HTTP client sends them and
//! the CMS hands back `next_page` cursors built the same way. The in-memory
//! source parses cursors back into a [`Query`] with [`Query::from_url`].

use url::Url;

use crate::error::{Error, Result};

/// A Prismic predicate (only `at` is needed here)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `at(document.type, "<type>")`
    DocumentType(String),
    /// `at(my.<type>.uid, "<uid>")`
    Uid { doc_type: String, uid: String },
}

impl Predicate {
    fn to_prismic(&self) -> String {
        match self {
            Predicate::DocumentType(t) => format!(r#"[at(document.type,"{}")]"#, t),
            Predicate::Uid { doc_type, uid } => {
                format!(r#"[at(my.{}.uid,"{}")]"#, doc_type, uid)
            }
        }
    }

    fn parse(s: &str) -> Option<Self> {
        let inner = s.trim().strip_prefix("at(")?.strip_suffix(')')?;
        let (path, value) = inner.split_once(',')?;
        let value = value.trim().trim_matches('"').to_string();
        let path = path.trim();

        if path == "document.type" {
            return Some(Predicate::DocumentType(value));
        }
        let doc_type = path.strip_prefix("my.")?.strip_suffix(".uid")?;
        Some(Predicate::Uid {
            doc_type: doc_type.to_string(),
            uid: value,
        })
    }
}

/// Sort order on the first publication date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    PublishedAsc,
    PublishedDesc,
}

impl Ordering {
    pub fn as_prismic(&self) -> &'static str {
        match self {
            Ordering::PublishedAsc => "[document.first_publication_date]",
            Ordering::PublishedDesc => "[document.first_publication_date desc]",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "[document.first_publication_date]" => Some(Ordering::PublishedAsc),
            "[document.first_publication_date desc]" => Some(Ordering::PublishedDesc),
            _ => None,
        }
    }
}

/// A document search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub predicates: Vec<Predicate>,
    pub page_size: usize,
    /// 1-based page number
    pub page: usize,
    /// Only return documents after this document id in the ordering
    pub after: Option<String>,
    pub ordering: Option<Ordering>,
}

impl Query {
    /// All documents of one type
    pub fn by_type(doc_type: &str) -> Self {
        Self {
            predicates: vec![Predicate::DocumentType(doc_type.to_string())],
            page_size: 20,
            page: 1,
            after: None,
            ordering: None,
        }
    }

    /// The single document with this uid
    pub fn by_uid(doc_type: &str, uid: &str) -> Self {
        Self {
            predicates: vec![Predicate::Uid {
                doc_type: doc_type.to_string(),
                uid: uid.to_string(),
            }],
            page_size: 1,
            page: 1,
            after: None,
            ordering: None,
        }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn after(mut self, id: &str) -> Self {
        self.after = Some(id.to_string());
        self
    }

    pub fn ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = Some(ordering);
        self
    }

    /// The `q` parameter, e.g. `[[at(document.type,"posts")]]`
    pub fn q(&self) -> String {
        let inner: String = self.predicates.iter().map(Predicate::to_prismic).collect();
        format!("[{}]", inner)
    }

    /// Build the search URL below `endpoint`.
    ///
    /// `reference` and `access_token` are only attached when present.
    pub fn to_url(
        &self,
        endpoint: &Url,
        reference: Option<&str>,
        access_token: Option<&str>,
    ) -> Result<Url> {
        let base = format!("{}/documents/search", endpoint.as_str().trim_end_matches('/'));
        let mut url = Url::parse(&base)?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(reference) = reference {
                pairs.append_pair("ref", reference);
            }
            pairs.append_pair("q", &self.q());
            pairs.append_pair("pageSize", &self.page_size.to_string());
            if self.page > 1 {
                pairs.append_pair("page", &self.page.to_string());
            }
            if let Some(after) = &self.after {
                pairs.append_pair("after", after);
            }
            if let Some(ordering) = self.ordering {
                pairs.append_pair("orderings", ordering.as_prismic());
            }
            if let Some(token) = access_token {
                pairs.append_pair("access_token", token);
            }
        }
        Ok(url)
    }

    /// Parse a search URL produced by [`Query::to_url`]
    pub fn from_url(url: &Url) -> Result<Self> {
        let mut query = Query {
            predicates: Vec::new(),
            page_size: 20,
            page: 1,
            after: None,
            ordering: None,
        };

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "q" => {
                    let inner = value
                        .trim()
                        .strip_prefix('[')
                        .and_then(|v| v.strip_suffix(']'))
                        .ok_or_else(|| Error::invalid_cursor(format!("bad q: {}", value)))?;
                    for part in inner.split("][") {
                        let part = part.trim_start_matches('[').trim_end_matches(']');
                        let predicate = Predicate::parse(part).ok_or_else(|| {
                            Error::invalid_cursor(format!("unsupported predicate: {}", part))
                        })?;
                        query.predicates.push(predicate);
                    }
                }
                "pageSize" => query.page_size = parse_number(&value)?.max(1),
                "page" => query.page = parse_number(&value)?.max(1),
                "after" => query.after = Some(value.into_owned()),
                "orderings" => query.ordering = Ordering::parse(&value),
                _ => {}
            }
        }

        if query.predicates.is_empty() {
            return Err(Error::invalid_cursor("missing q parameter"));
        }
        Ok(query)
    }
}

fn parse_number(value: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| Error::invalid_cursor(format!("not a number: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Url {
        Url::parse("https://blog.cdn.prismic.io/api/v2").unwrap()
    }

    #[test]
    fn test_q_parameter() {
        assert_eq!(Query::by_type("posts").q(), r#"[[at(document.type,"posts")]]"#);
        assert_eq!(
            Query::by_uid("posts", "hello").q(),
            r#"[[at(my.posts.uid,"hello")]]"#
        );
    }

    #[test]
    fn test_to_url() {
        let url = Query::by_type("posts")
            .page_size(1)
            .after("YF0x")
            .ordering(Ordering::PublishedDesc)
            .to_url(&endpoint(), Some("M1"), None)
            .unwrap();

        assert_eq!(url.path(), "/api/v2/documents/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("ref".to_string(), "M1".to_string())));
        assert!(pairs.contains(&("pageSize".to_string(), "1".to_string())));
        assert!(pairs.contains(&("after".to_string(), "YF0x".to_string())));
        assert!(pairs.contains(&(
            "orderings".to_string(),
            "[document.first_publication_date desc]".to_string()
        )));
        assert!(!pairs.iter().any(|(k, _)| k == "access_token"));
    }

    #[test]
    fn test_url_round_trip() {
        let query = Query::by_type("posts")
            .page_size(2)
            .page(3)
            .ordering(Ordering::PublishedAsc);
        let url = query.to_url(&endpoint(), None, Some("secret")).unwrap();
        assert_eq!(Query::from_url(&url).unwrap(), query);
    }

    #[test]
    fn test_from_url_rejects_missing_q() {
        let url = Url::parse("https://blog.cdn.prismic.io/api/v2/documents/search?page=2").unwrap();
        assert!(matches!(
            Query::from_url(&url),
            Err(Error::InvalidCursor(_))
        ));
    }
}
