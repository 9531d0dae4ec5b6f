//! On-demand server with a revalidating render cache
//!
//! Routes:
//! - `GET /`: home page with the first page of posts
//! - `GET /post/:uid`: post detail page, 404 for an unknown uid
//! - `GET /posts/more?cursor=`: one load-more step as an HTML fragment
//! - anything else: files from the static directory

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cache::RenderCache;
use crate::cms::ContentSource;
use crate::generator::PageBuilder;
use crate::helpers::more_url;
use crate::pagination::{LoadOutcome, PaginationController};
use crate::Site;

/// Server state
struct ServerState<S> {
    pages: PageBuilder<S>,
    cache: RenderCache,
}

#[derive(Debug, Deserialize)]
struct MoreParams {
    cursor: String,
}

/// Build the application router
pub fn router<S>(pages: PageBuilder<S>, static_dir: PathBuf, revalidate: Duration) -> Router
where
    S: ContentSource + 'static,
{
    let state = Arc::new(ServerState {
        pages,
        cache: RenderCache::new(revalidate),
    });

    Router::new()
        .route("/", get(index_handler::<S>))
        .route("/post/:uid", get(post_handler::<S>))
        .route("/posts/more", get(more_handler::<S>))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16, open: bool) -> Result<()> {
    let pages = PageBuilder::new(&site.config, site.source()?)?;
    let revalidate = Duration::from_secs(site.config.server.revalidate_secs);
    let app = router(pages, site.static_dir.clone(), revalidate);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    // Open browser if requested
    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler<S: ContentSource>(
    State(state): State<Arc<ServerState<S>>>,
) -> crate::Result<Html<String>> {
    if let Some(html) = state.cache.get("/").await {
        return Ok(Html(html));
    }

    let pages = &state.pages;
    let controller = PaginationController::start(pages.source(), &pages.list_query()).await?;
    let first = controller.into_state();
    let next_url = first
        .next_page()
        .map(|cursor| more_url(pages.config(), cursor))
        .unwrap_or_default();

    let html = pages.index_html(first.posts(), &next_url)?;
    state.cache.insert("/", html.clone()).await;
    Ok(Html(html))
}

async fn post_handler<S: ContentSource>(
    State(state): State<Arc<ServerState<S>>>,
    Path(uid): Path<String>,
) -> crate::Result<Html<String>> {
    let route = format!("/post/{}", uid);
    if let Some(html) = state.cache.get(&route).await {
        return Ok(Html(html));
    }

    let html = state.pages.post_html(&uid).await?;
    state.cache.insert(&route, html.clone()).await;
    Ok(Html(html))
}

/// One stateless load-more transition from the cursor in the query string
async fn more_handler<S: ContentSource>(
    State(state): State<Arc<ServerState<S>>>,
    Query(params): Query<MoreParams>,
) -> crate::Result<Html<String>> {
    let pages = &state.pages;
    let controller = PaginationController::resume(pages.source(), params.cursor);

    let html = match controller.load_more().await? {
        LoadOutcome::Appended(posts) => {
            let next_url = controller
                .into_state()
                .next_page()
                .map(|cursor| more_url(pages.config(), cursor))
                .unwrap_or_default();
            pages.fragment_html(&posts, &next_url)?
        }
        LoadOutcome::Exhausted | LoadOutcome::Busy => pages.fragment_html(&[], "")?,
    };
    Ok(Html(html))
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
