//! Page assembly shared by static generation and the server
//!
//! A [`PageBuilder`] turns CMS documents into finished HTML: it maps them to
//! view models, formats dates, estimates reading time, resolves adjacent
//! posts and mounts the comment widget around the post render.

use crate::cms::{ContentSource, Query};
use crate::comments::CommentMounts;
use crate::config::SiteConfig;
use crate::content::{adjacent, PostDetail, PostSummary};
use crate::error::Result;
use crate::templates::{
    DisplayFormat, NavPost, PostItemData, PostPageData, SiteData, TemplateRenderer,
};

pub struct PageBuilder<S> {
    config: SiteConfig,
    source: S,
    renderer: TemplateRenderer,
    format: DisplayFormat,
    site_data: SiteData,
}

impl<S: ContentSource> PageBuilder<S> {
    pub fn new(config: &SiteConfig, source: S) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            source,
            renderer: TemplateRenderer::new()?,
            format: DisplayFormat::from_config(config)?,
            site_data: SiteData::from_config(config),
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// First page of the post list
    pub fn list_query(&self) -> Query {
        Query::by_type(&self.config.cms.document_type).page_size(self.config.cms.page_size)
    }

    fn items(&self, posts: &[PostSummary]) -> Vec<PostItemData> {
        posts
            .iter()
            .map(|p| PostItemData::new(p, &self.config, &self.format))
            .collect()
    }

    /// Home page with `posts`; `next_url` is empty when nothing follows
    pub fn index_html(&self, posts: &[PostSummary], next_url: &str) -> Result<String> {
        self.renderer.index(&self.site_data, &self.items(posts), next_url)
    }

    /// Load-more fragment with `posts`; `next_url` is empty when nothing follows
    pub fn fragment_html(&self, posts: &[PostSummary], next_url: &str) -> Result<String> {
        self.renderer.fragment(&self.items(posts), next_url)
    }

    /// Fetch and render the detail page of post `uid`.
    ///
    /// Returns [`crate::Error::NotFound`] when the CMS has no such post.
    pub async fn post_html(&self, uid: &str) -> Result<String> {
        let cms = &self.config.cms;
        let document = self.source.get_by_uid(&cms.document_type, uid).await?;
        let detail = PostDetail::from_document(&document);
        let neighbours = adjacent::resolve(&self.source, &cms.document_type, &detail.id).await?;

        let mut page = PostPageData::new(&detail, &self.format);
        page.prev_post = neighbours
            .prev
            .as_ref()
            .map(|p| NavPost::new(p, &self.config));
        page.next_post = neighbours
            .next
            .as_ref()
            .map(|p| NavPost::new(p, &self.config));

        let comments = &self.config.comments;
        page.comments_mount = comments.mount_point.clone();

        let mut mounts = CommentMounts::new();
        let handle = if comments.enable {
            Some(mounts.attach(&comments.mount_point, comments)?)
        } else {
            None
        };
        page.comments = mounts.html(&comments.mount_point);

        let html = self.renderer.post(&self.site_data, &page);
        if let Some(handle) = handle {
            mounts.detach(handle);
        }
        html
    }
}
