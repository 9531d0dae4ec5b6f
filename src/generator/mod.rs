//! Generator module - writes the static site using the built-in templates
//!
//! Output layout under the public directory:
//! - `index.html`: the first page of posts
//! - `page/{n}.html`: load-more fragments for pages 2..N
//! - `post/{uid}/index.html`: one detail page per post
//! - everything under the static directory, copied verbatim

mod pages;

pub use pages::PageBuilder;

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::cms::ContentSource;
use crate::content::PostSummary;
use crate::error::{Error, Result};
use crate::helpers::fragment_url;
use crate::pagination::{LoadOutcome, PaginationController};
use crate::Site;

/// What one generation run produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateStats {
    pub list_pages: usize,
    pub posts: usize,
    pub skipped: usize,
    pub assets: usize,
}

/// Static site generator
pub struct Generator<'a, S> {
    site: &'a Site,
    pages: PageBuilder<S>,
}

impl<'a, S: ContentSource> Generator<'a, S> {
    /// Create a new generator
    pub fn new(site: &'a Site, source: S) -> Result<Self> {
        Ok(Self {
            site,
            pages: PageBuilder::new(&site.config, source)?,
        })
    }

    /// Generate the entire site
    pub async fn generate(&self) -> Result<GenerateStats> {
        // Ensure public directory exists
        fs::create_dir_all(&self.site.public_dir)?;

        let mut stats = GenerateStats {
            assets: self.copy_static_assets()?,
            ..GenerateStats::default()
        };

        let list_pages = self.fetch_all_pages().await?;
        stats.list_pages = list_pages.len();
        self.write_list_pages(&list_pages)?;

        for summary in list_pages.iter().flatten() {
            if self.write_post_page(summary).await? {
                stats.posts += 1;
            } else {
                stats.skipped += 1;
            }
        }

        tracing::info!(
            "Generated {} list pages and {} posts ({} skipped)",
            stats.list_pages,
            stats.posts,
            stats.skipped
        );
        Ok(stats)
    }

    /// Walk the post list to the end, one entry per CMS page
    async fn fetch_all_pages(&self) -> Result<Vec<Vec<PostSummary>>> {
        let controller =
            PaginationController::start(self.pages.source(), &self.pages.list_query()).await?;
        let mut pages = vec![controller.snapshot().await.into_posts()];

        while let LoadOutcome::Appended(posts) = controller.load_more().await? {
            pages.push(posts);
        }
        Ok(pages)
    }

    /// Write the index and the load-more fragments that chain from it
    fn write_list_pages(&self, pages: &[Vec<PostSummary>]) -> Result<()> {
        let config = &self.site.config;

        for (i, posts) in pages.iter().enumerate() {
            let page_num = i + 1;
            let next_url = if page_num < pages.len() {
                fragment_url(config, page_num + 1)
            } else {
                String::new()
            };

            let (output_path, html) = if page_num == 1 {
                (
                    self.site.public_dir.join("index.html"),
                    self.pages.index_html(posts, &next_url)?,
                )
            } else {
                (
                    self.site
                        .public_dir
                        .join("page")
                        .join(format!("{}.html", page_num)),
                    self.pages.fragment_html(posts, &next_url)?,
                )
            };

            write_file(&output_path, &html)?;
            tracing::debug!("Generated list page {}", page_num);
        }

        Ok(())
    }

    /// Render one detail page; `false` if the post was skipped
    async fn write_post_page(&self, summary: &PostSummary) -> Result<bool> {
        let uid = summary.uid.as_str();
        if !is_safe_segment(uid) {
            tracing::warn!("Skipping post with unusable uid {:?}", uid);
            return Ok(false);
        }

        let html = match self.pages.post_html(uid).await {
            Ok(html) => html,
            Err(Error::NotFound(_)) => {
                tracing::warn!("Post '{}' disappeared from the CMS, skipping", uid);
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        let output_path = self
            .site
            .public_dir
            .join("post")
            .join(uid)
            .join("index.html");
        write_file(&output_path, &html)?;
        tracing::debug!("Generated post: {}", uid);
        Ok(true)
    }

    /// Copy static assets (logo, styles, images) to public directory
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_file() {
                let relative = path
                    .strip_prefix(static_dir)
                    .map_err(std::io::Error::other)?;
                let dest = self.site.public_dir.join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }

                fs::copy(path, &dest)?;
                copied += 1;
            }
        }

        Ok(copied)
    }
}

fn write_file(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;
    Ok(())
}

/// A uid usable as a single output directory name
fn is_safe_segment(uid: &str) -> bool {
    !uid.is_empty() && uid != "." && uid != ".." && !uid.contains(['/', '\\'])
}
