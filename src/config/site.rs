//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `cms.access_token`
pub const ACCESS_TOKEN_ENV: &str = "PRISMIC_ACCESS_TOKEN";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,
    pub timezone: String,
    pub logo: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,
    pub static_dir: String,

    // Date format (date-fns style tokens)
    pub date_format: String,
    pub edited_format: String,

    #[serde(default)]
    pub cms: CmsConfig,
    #[serde(default)]
    pub comments: CommentConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Spacetraveling".to_string(),
            language: "pt-BR".to_string(),
            timezone: "America/Sao_Paulo".to_string(),
            logo: "/logo.svg".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            date_format: "dd MMM yyyy".to_string(),
            edited_format: "'* editado em' dd MMM yyyy', às' HH:mm".to_string(),

            cms: CmsConfig::default(),
            comments: CommentConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Apply overrides taken from the process environment
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
            if !token.is_empty() {
                tracing::debug!("Using access token from {}", ACCESS_TOKEN_ENV);
                self.cms.access_token = Some(token);
            }
        }
    }

    /// Parse the configured display timezone
    pub fn tz(&self) -> Result<chrono_tz::Tz> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|e| anyhow::anyhow!("Invalid timezone '{}': {}", self.timezone, e))
    }

    /// Resolve the fixtures path against the site directory
    pub fn fixtures_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.cms.fixtures.as_ref().map(|p| base_dir.join(p))
    }
}

/// Headless CMS connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Prismic API v2 endpoint, e.g. `https://my-repo.cdn.prismic.io/api/v2`
    pub endpoint: String,
    pub access_token: Option<String>,
    pub document_type: String,
    pub page_size: usize,
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// JSON array of documents served instead of the HTTP API
    pub fixtures: Option<String>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://spacetraveling.cdn.prismic.io/api/v2".to_string(),
            access_token: None,
            document_type: "posts".to_string(),
            page_size: 1,
            timeout_secs: 10,
            max_retries: 2,
            fixtures: None,
        }
    }
}

/// utterances comment widget settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentConfig {
    pub enable: bool,
    pub src: String,
    pub repo: String,
    pub issue_term: String,
    pub theme: String,
    pub crossorigin: String,
    pub mount_point: String,
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            enable: true,
            src: "https://utteranc.es/client.js".to_string(),
            repo: "hrafaelalves/spacetraveling-comments".to_string(),
            issue_term: "pathname".to_string(),
            theme: "photon-dark".to_string(),
            crossorigin: "anonymous".to_string(),
            mount_point: "comments".to_string(),
        }
    }
}

/// Settings used only by `server`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Seconds a rendered page stays fresh in the render cache
    pub revalidate_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            revalidate_secs: 60 * 60 * 24,
        }
    }
}
