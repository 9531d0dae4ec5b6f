//! Raw CMS documents to view models
//!
//! The only place defaults are filled in: a missing or `null` field becomes an
//! empty string, `None` or an empty list, never an error.

use crate::cms::{Document, TextField};
use crate::helpers::parse_timestamp;

use super::{AdjacentPostRef, BodyFragment, ContentBlock, PostDetail, PostSummary};

fn text(field: &Option<TextField>) -> String {
    field.as_ref().map(TextField::as_text).unwrap_or_default()
}

impl PostSummary {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            uid: doc.uid.clone().unwrap_or_default(),
            title: text(&doc.data.title),
            subtitle: text(&doc.data.subtitle),
            author: text(&doc.data.author),
            first_publication_date: doc
                .first_publication_date
                .as_deref()
                .and_then(parse_timestamp),
        }
    }
}

impl PostDetail {
    pub fn from_document(doc: &Document) -> Self {
        let content = doc
            .data
            .content
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|block| ContentBlock {
                heading: text(&block.heading),
                body: block
                    .body_html()
                    .into_iter()
                    .map(|text| BodyFragment { text })
                    .collect(),
            })
            .collect();

        Self {
            id: doc.id.clone(),
            uid: doc.uid.clone().unwrap_or_default(),
            title: text(&doc.data.title),
            author: text(&doc.data.author),
            banner_url: doc
                .data
                .banner
                .as_ref()
                .and_then(|b| b.url.clone())
                .unwrap_or_default(),
            first_publication_date: doc
                .first_publication_date
                .as_deref()
                .and_then(parse_timestamp),
            last_publication_date: doc
                .last_publication_date
                .as_deref()
                .and_then(parse_timestamp),
            content,
        }
    }
}

impl AdjacentPostRef {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            uid: doc.uid.clone().unwrap_or_default(),
            title: text(&doc.data.title),
        }
    }
}
