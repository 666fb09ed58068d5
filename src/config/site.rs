//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,

    // Date / reading time
    pub date_format: String,
    pub words_per_minute: u64,

    // Remote content
    #[serde(default)]
    pub cms: CmsConfig,

    // Comment widget
    #[serde(default)]
    pub comments: CommentsConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Octavo".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),

            date_format: "%-d %b %Y".to_string(),
            words_per_minute: 200,

            cms: CmsConfig::default(),
            comments: CommentsConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Headless CMS API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Base URL of the CMS HTTP API
    pub api_endpoint: String,
    /// Document type queried for the post list
    pub document_type: String,
    /// Page size for post list queries
    pub page_size: usize,
    /// Access token, if the repository is private
    pub access_token: Option<String>,
    /// Environment variable consulted for the access token
    /// when `access_token` is not set in the config file
    pub access_token_env: String,
    /// Seconds before cached CMS responses are considered stale
    pub revalidate: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            api_endpoint: String::new(),
            document_type: "posts".to_string(),
            page_size: 10,
            access_token: None,
            access_token_env: "OCTAVO_CMS_TOKEN".to_string(),
            revalidate: 60 * 60 * 24,
        }
    }
}

impl CmsConfig {
    /// Resolve the access token: config file first, then environment
    pub fn resolve_access_token(&self) -> Option<String> {
        self.access_token
            .clone()
            .or_else(|| std::env::var(&self.access_token_env).ok())
    }
}

/// Third-party comment widget configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    pub enable: bool,
    /// Widget client script URL
    pub script_url: String,
    /// Repository backing the comment threads
    pub repo: String,
    /// How comment threads are matched to pages
    pub issue_term: String,
    /// Label applied to created threads
    pub label: String,
    /// Widget color theme
    pub theme: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            enable: false,
            script_url: "https://utteranc.es/client.js".to_string(),
            repo: String::new(),
            issue_term: "pathname".to_string(),
            label: String::new(),
            theme: "github-dark".to_string(),
        }
    }
}
