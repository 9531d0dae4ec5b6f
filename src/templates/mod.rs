//! Built-in spacetraveling templates using the Tera template engine
//!
//! All templates are embedded in the binary. Autoescaping stays on; the
//! fields that carry trusted HTML (body fragments, the comment script) and
//! the URLs built by [`crate::helpers`] are marked `safe` in the templates.

use chrono::{DateTime, Locale, Utc};
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{
    estimate_minutes, AdjacentPostRef, ContentBlock, PostDetail, PostSummary,
};
use crate::error::{Error, Result};
use crate::helpers::{format_date, locale_for, post_url, url_for};

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("spacetraveling/layout.html")),
            ("index.html", include_str!("spacetraveling/index.html")),
            ("post.html", include_str!("spacetraveling/post.html")),
            ("fragment.html", include_str!("spacetraveling/fragment.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("spacetraveling/partials/header.html"),
            ),
            (
                "partials/post_item.html",
                include_str!("spacetraveling/partials/post_item.html"),
            ),
            (
                "partials/load_more.html",
                include_str!("spacetraveling/partials/load_more.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Home page: the first page of posts and the load-more button
    pub fn index(
        &self,
        site: &SiteData,
        posts: &[PostItemData],
        next_url: &str,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("posts", posts);
        context.insert("next_url", next_url);
        self.render("index.html", &context)
    }

    /// One load-more step: a bare list of entries, no layout
    pub fn fragment(&self, posts: &[PostItemData], next_url: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("posts", posts);
        context.insert("next_url", next_url);
        self.render("fragment.html", &context)
    }

    /// Post detail page
    pub fn post(&self, site: &SiteData, post: &PostPageData) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("post", post);
        self.render("post.html", &context)
    }
}

/// Date display settings taken from the site configuration
#[derive(Debug, Clone)]
pub struct DisplayFormat {
    tz: chrono_tz::Tz,
    locale: Locale,
    date_format: String,
    edited_format: String,
}

impl DisplayFormat {
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            tz: config.tz().map_err(|e| Error::config(e.to_string()))?,
            locale: locale_for(&config.language),
            date_format: config.date_format.clone(),
            edited_format: config.edited_format.clone(),
        })
    }

    /// Publication date for lists and headers; empty when unknown
    pub fn date(&self, date: Option<&DateTime<Utc>>) -> String {
        date.map(|d| format_date(d, &self.tz, &self.date_format, self.locale))
            .unwrap_or_default()
    }

    /// The "edited at" notice; empty when unknown
    pub fn edited(&self, date: Option<&DateTime<Utc>>) -> String {
        date.map(|d| format_date(d, &self.tz, &self.edited_format, self.locale))
            .unwrap_or_default()
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub language: String,
    pub root: String,
    pub logo: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            language: config.language.clone(),
            root: url_for(config, ""),
            logo: url_for(config, &config.logo),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostItemData {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
    pub path: String,
}

impl PostItemData {
    pub fn new(summary: &PostSummary, config: &SiteConfig, format: &DisplayFormat) -> Self {
        Self {
            uid: summary.uid.clone(),
            title: summary.title.clone(),
            subtitle: summary.subtitle.clone(),
            author: summary.author.clone(),
            date: format.date(summary.first_publication_date.as_ref()),
            path: post_url(config, &summary.uid),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub path: String,
}

impl NavPost {
    pub fn new(post: &AdjacentPostRef, config: &SiteConfig) -> Self {
        Self {
            title: post.title.clone(),
            path: post_url(config, &post.uid),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub title: String,
    pub author: String,
    pub banner_url: String,
    pub date: String,
    pub edited: String,
    pub reading_time: usize,
    pub content: Vec<ContentBlock>,
    pub prev_post: Option<NavPost>,
    pub next_post: Option<NavPost>,
    pub comments_mount: String,
    pub comments: String,
}

impl PostPageData {
    pub fn new(post: &PostDetail, format: &DisplayFormat) -> Self {
        Self {
            title: post.title.clone(),
            author: post.author.clone(),
            banner_url: post.banner_url.clone(),
            date: format.date(post.first_publication_date.as_ref()),
            edited: format.edited(post.last_publication_date.as_ref()),
            reading_time: estimate_minutes(&post.content),
            content: post.content.clone(),
            prev_post: None,
            next_post: None,
            comments_mount: String::new(),
            comments: String::new(),
        }
    }
}
