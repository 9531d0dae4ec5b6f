//! HTTP client for the Prismic REST API v2

use serde::de::DeserializeOwned;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use url::Url;

use super::query::Query;
use super::types::{ApiRoot, Document, SearchResponse};
use super::ContentSource;
use crate::config::CmsConfig;
use crate::error::{Error, Result};

/// How long a fetched master ref is reused before asking the API root again
const REF_TTL: Duration = Duration::from_secs(5);

/// Base delay of the exponential retry backoff
const RETRY_BASE_DELAY: Duration = Duration::from_millis(200);

/// Upper bound of a single backoff delay
const RETRY_MAX_DELAY: Duration = Duration::from_secs(10);

/// Delay before retry number `attempt` (1-based), doubling up to the cap
fn retry_delay(attempt: u32) -> Duration {
    2u32.checked_pow(attempt.saturating_sub(1))
        .and_then(|factor| RETRY_BASE_DELAY.checked_mul(factor))
        .map_or(RETRY_MAX_DELAY, |delay| delay.min(RETRY_MAX_DELAY))
}

pub struct PrismicClient {
    client: reqwest::Client,
    endpoint: Url,
    access_token: Option<String>,
    max_retries: u32,
    master_ref: Mutex<Option<(String, Instant)>>,
}

impl PrismicClient {
    pub fn new(config: &CmsConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            access_token: config.access_token.clone(),
            max_retries: config.max_retries,
            master_ref: Mutex::new(None),
        })
    }

    /// The master ref, refreshed from the API root once [`REF_TTL`] has passed
    async fn master_ref(&self) -> Result<String> {
        if let Ok(cached) = self.master_ref.lock() {
            if let Some((reference, fetched_at)) = cached.as_ref() {
                if fetched_at.elapsed() < REF_TTL {
                    return Ok(reference.clone());
                }
            }
        }

        let mut url = self.endpoint.clone();
        if let Some(token) = &self.access_token {
            url.query_pairs_mut().append_pair("access_token", token);
        }
        let root: ApiRoot = self.get_json(&url).await?;
        let reference = root
            .master_ref()
            .ok_or_else(|| Error::config("CMS API root has no master ref"))?
            .to_string();

        if let Ok(mut cached) = self.master_ref.lock() {
            *cached = Some((reference.clone(), Instant::now()));
        }
        Ok(reference)
    }

    /// GET a JSON document, retrying transient failures with backoff
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let mut attempt = 0;
        loop {
            match self.try_get_json(url).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = retry_delay(attempt);
                    tracing::warn!(
                        path = url.path(),
                        attempt,
                        "CMS request failed, retrying in {:?}: {}",
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn try_get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        tracing::debug!(path = url.path(), "GET");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                path: url.path().to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl ContentSource for PrismicClient {
    async fn query(&self, query: &Query) -> Result<SearchResponse> {
        let reference = self.master_ref().await?;
        let url = query.to_url(
            &self.endpoint,
            Some(&reference),
            self.access_token.as_deref(),
        )?;
        self.get_json(&url).await
    }

    async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<Document> {
        let response = self.query(&Query::by_uid(doc_type, uid)).await?;
        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(uid.to_string()))
    }

    async fn fetch_page(&self, cursor: &Url) -> Result<SearchResponse> {
        // next_page URLs from Prismic already carry ref and access_token
        self.get_json(cursor).await
    }

    fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}
