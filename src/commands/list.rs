//! List site content

use anyhow::Result;

use crate::cms::{ContentSource, Query};
use crate::pagination::{LoadOutcome, PaginationController};
use crate::Site;

/// List content of the given type straight from the CMS
pub async fn run(site: &Site, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let source = site.source()?;
            let lines = post_lines(site, &source).await?;
            println!("Posts ({}):", lines.len());
            for line in lines {
                println!("  {}", line);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post", content_type);
        }
    }

    Ok(())
}

/// One `date - title [uid]` line per post, in list order
async fn post_lines<S: ContentSource>(site: &Site, source: &S) -> Result<Vec<String>> {
    let cms = &site.config.cms;
    let query = Query::by_type(&cms.document_type).page_size(cms.page_size.max(20));
    let controller = PaginationController::start(source, &query).await?;
    while let LoadOutcome::Appended(_) = controller.load_more().await? {}

    Ok(controller
        .into_state()
        .into_posts()
        .iter()
        .map(|post| {
            let date = post
                .first_publication_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "----------".to_string());
            format!("{} - {} [{}]", date, post.title, post.uid)
        })
        .collect())
}
