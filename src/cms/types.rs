//! Wire schema of the Prismic REST API
//!
//! Every optional field is declared as `Option` and read through [`lenient`],
//! so `null`, a missing key and a value of the wrong shape all become `None`.
//! Defaults are filled in once, by the mapper in [`crate::content`], never by
//! callers reading these records.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use super::richtext::{self, RichTextNode};

/// Deserialize an optional field, dropping values of the wrong shape
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`] for fields whose absence is their default value
pub(crate) fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// API root returned by `GET {endpoint}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRoot {
    pub refs: Vec<ApiRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiRef {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}

impl ApiRoot {
    pub fn master_ref(&self) -> Option<&str> {
        self.refs
            .iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference.as_str())
    }
}

/// One page of search results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub total_pages: usize,
    #[serde(default)]
    pub next_page: Option<String>,
    pub results: Vec<Document>,
}

/// A raw CMS document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub uid: Option<String>,
    #[serde(rename = "type", default)]
    pub doc_type: String,
    #[serde(default, deserialize_with = "lenient")]
    pub first_publication_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_publication_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub data: PostFields,
}

/// The custom fields of a `posts` document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostFields {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<TextField>,
    #[serde(default, deserialize_with = "lenient")]
    pub subtitle: Option<TextField>,
    #[serde(default, deserialize_with = "lenient")]
    pub author: Option<TextField>,
    #[serde(default, deserialize_with = "lenient")]
    pub banner: Option<ImageField>,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<Vec<RawBlock>>,
}

/// A text field delivered either as a key-text string or as rich text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    Plain(String),
    Rich(Vec<RichTextNode>),
}

impl TextField {
    /// Plain text of the field; rich text nodes are joined with a space
    pub fn as_text(&self) -> String {
        match self {
            TextField::Plain(s) => s.clone(),
            TextField::Rich(nodes) => nodes
                .iter()
                .filter_map(|n| n.text.as_deref())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageField {
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub alt: Option<String>,
}

/// One entry of the `content` group field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBlock {
    #[serde(default, deserialize_with = "lenient")]
    pub heading: Option<TextField>,
    #[serde(default, deserialize_with = "lenient")]
    pub body: Option<Vec<RichTextNode>>,
}

impl RawBlock {
    /// HTML fragments of the body, in source order
    pub fn body_html(&self) -> Vec<String> {
        self.body
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(richtext::render_node)
            .collect()
    }
}
