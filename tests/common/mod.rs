#![allow(dead_code)]

use serde_json::json;
use spacetraveling::cms::{Document, MemorySource};
use spacetraveling::config::SiteConfig;
use url::Url;

pub const ENDPOINT: &str = "https://blog.cdn.prismic.io/api/v2";

/// Three posts, oldest first
pub fn documents() -> Vec<Document> {
    serde_json::from_value(json!([
        {
            "id": "id-hooks",
            "uid": "como-utilizar-hooks",
            "type": "posts",
            "first_publication_date": "2021-03-15T19:25:28+0000",
            "last_publication_date": "2021-03-25T19:27:35+0000",
            "data": {
                "title": "Como utilizar Hooks",
                "subtitle": "Pensando em sincronização",
                "author": "Joseph Oliveira",
                "banner": { "url": "https://images.prismic.io/banner.png" },
                "content": [
                    {
                        "heading": "Proin et varius",
                        "body": [
                            { "type": "paragraph", "text": "Lorem ipsum dolor sit amet", "spans": [] }
                        ]
                    }
                ]
            }
        },
        {
            "id": "id-cra",
            "uid": "criando-um-app-cra-do-zero",
            "type": "posts",
            "first_publication_date": "2021-03-19T12:31:08+0000",
            "data": {
                "title": "Criando um app CRA do zero",
                "author": "Danilo Vieira",
                "content": []
            }
        },
        {
            "id": "id-rust",
            "uid": "rust-sem-medo",
            "type": "posts",
            "first_publication_date": "2021-04-02T09:10:00+0000",
            "data": {
                "title": "Rust sem medo",
                "subtitle": null,
                "author": "Marina Costa",
                "banner": null
            }
        }
    ]))
    .expect("fixture documents")
}

pub fn source() -> MemorySource {
    MemorySource::new(Url::parse(ENDPOINT).expect("endpoint"), documents())
}

pub fn config() -> SiteConfig {
    let mut config = SiteConfig {
        timezone: "UTC".to_string(),
        ..SiteConfig::default()
    };
    config.cms.endpoint = ENDPOINT.to_string();
    config
}

/// Value of the first `data-next` attribute in `html`
pub fn data_next(html: &str) -> Option<String> {
    let start = html.find("data-next=\"")? + "data-next=\"".len();
    let end = html[start..].find('"')? + start;
    Some(html[start..end].to_string())
}
