//! Render cache for the server
//!
//! Rendered pages are kept for a revalidation window. A stale entry is
//! treated as missing and gets re-rendered on the next request.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// A rendered page and when it was rendered
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub html: String,
    pub rendered_at: Instant,
}

/// Route-keyed cache of rendered HTML
#[derive(Debug)]
pub struct RenderCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    revalidate: Duration,
}

impl RenderCache {
    pub fn new(revalidate: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            revalidate,
        }
    }

    /// The cached page for `route`, if still fresh
    pub async fn get(&self, route: &str) -> Option<String> {
        let entries = self.entries.read().await;
        let entry = entries.get(route)?;
        if entry.rendered_at.elapsed() < self.revalidate {
            tracing::debug!(route, "render cache hit");
            Some(entry.html.clone())
        } else {
            tracing::debug!(route, "render cache entry is stale");
            None
        }
    }

    pub async fn insert(&self, route: &str, html: String) {
        self.entries.write().await.insert(
            route.to_string(),
            CacheEntry {
                html,
                rendered_at: Instant::now(),
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
