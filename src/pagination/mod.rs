//! "Load more" pagination over the post list
//!
//! A [`PaginationController`] is either Loadable (it holds a `next_page`
//! cursor) or Exhausted (it does not). Each [`PaginationController::load_more`]
//! fetches the page at the cursor, appends its posts after the ones already
//! loaded and replaces the cursor. Exhausted is final.

use tokio::sync::Mutex;

use crate::cms::{ContentSource, Query, SearchResponse};
use crate::content::PostSummary;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStatus {
    Loadable,
    Exhausted,
}

/// Posts loaded so far and the cursor of the following page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    posts: Vec<PostSummary>,
    next_page: Option<String>,
}

impl PaginationState {
    /// State after the first page has been fetched
    pub fn first_page(response: SearchResponse) -> Self {
        let mut state = Self::default();
        state.append(response);
        state
    }

    /// A session with nothing loaded yet that continues from `cursor`
    pub fn resume(cursor: impl Into<String>) -> Self {
        Self {
            posts: Vec::new(),
            next_page: Some(cursor.into()),
        }
    }

    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    pub fn status(&self) -> PaginationStatus {
        match self.next_page {
            Some(_) => PaginationStatus::Loadable,
            None => PaginationStatus::Exhausted,
        }
    }

    pub fn into_posts(self) -> Vec<PostSummary> {
        self.posts
    }

    /// Map and append one page, returning how many posts were added
    fn append(&mut self, response: SearchResponse) -> usize {
        let before = self.posts.len();
        self.posts
            .extend(response.results.iter().map(PostSummary::from_document));
        self.next_page = response.next_page.filter(|p| !p.is_empty());
        self.posts.len() - before
    }
}

/// Result of one load-more trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was fetched; these posts were appended
    Appended(Vec<PostSummary>),
    /// There is no next page; nothing changed
    Exhausted,
    /// Another load was still in flight; this trigger was dropped
    Busy,
}

/// Drives a [`PaginationState`] against a content source.
///
/// The state lock doubles as the in-flight guard: it is held for the whole
/// fetch, and an overlapping trigger that cannot take it returns
/// [`LoadOutcome::Busy`] instead of appending a second copy of the page.
pub struct PaginationController<S> {
    source: S,
    state: Mutex<PaginationState>,
}

impl<S: ContentSource> PaginationController<S> {
    pub fn new(source: S, state: PaginationState) -> Self {
        Self {
            source,
            state: Mutex::new(state),
        }
    }

    /// Fetch the first page of `query` and start a session from it
    pub async fn start(source: S, query: &Query) -> Result<Self> {
        let response = source.query(query).await?;
        tracing::debug!(
            results = response.results.len(),
            has_next = response.next_page.is_some(),
            "fetched first page"
        );
        Ok(Self::new(source, PaginationState::first_page(response)))
    }

    /// Continue a session from a `next_page` cursor
    pub fn resume(source: S, cursor: impl Into<String>) -> Self {
        Self::new(source, PaginationState::resume(cursor))
    }

    /// Fetch the next page and append it.
    ///
    /// On error the state is left exactly as it was.
    pub async fn load_more(&self) -> Result<LoadOutcome> {
        let Ok(mut state) = self.state.try_lock() else {
            tracing::debug!("load more ignored, a fetch is already in flight");
            return Ok(LoadOutcome::Busy);
        };

        let Some(cursor) = state.next_page.clone() else {
            return Ok(LoadOutcome::Exhausted);
        };

        let url = self.source.check_cursor(&cursor)?;
        let response = self.source.fetch_page(&url).await?;

        let before = state.posts.len();
        let added = state.append(response);
        tracing::debug!(added, total = state.posts.len(), "appended page");
        Ok(LoadOutcome::Appended(state.posts[before..].to_vec()))
    }

    /// A copy of the current state
    pub async fn snapshot(&self) -> PaginationState {
        self.state.lock().await.clone()
    }

    pub async fn status(&self) -> PaginationStatus {
        self.state.lock().await.status()
    }

    pub fn into_state(self) -> PaginationState {
        self.state.into_inner()
    }
}
