//! Post view models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A list entry on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub first_publication_date: Option<DateTime<Utc>>,
}

/// Everything a post detail page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    /// Document id, used to position adjacent-post queries
    pub id: String,
    pub uid: String,
    pub title: String,
    pub author: String,
    pub banner_url: String,
    pub first_publication_date: Option<DateTime<Utc>>,
    pub last_publication_date: Option<DateTime<Utc>>,
    pub content: Vec<ContentBlock>,
}

/// A titled section of the post body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub heading: String,
    pub body: Vec<BodyFragment>,
}

/// One rich text fragment.
///
/// `text` is HTML from the CMS and is rendered without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyFragment {
    pub text: String,
}

/// Link to the previous or next post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacentPostRef {
    pub uid: String,
    pub title: String,
}
