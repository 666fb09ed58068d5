//! octavo: a static blog generator driven by a headless CMS
//!
//! This crate fetches post documents from a headless CMS API, normalizes
//! them into a stable internal shape, and renders a paginated post list
//! plus individual post pages as static HTML.

pub mod cache;
pub mod cms;
pub mod commands;
pub mod comments;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod pagination;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main octavo application
#[derive(Clone)]
pub struct Octavo {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Octavo {
    /// Create a new octavo instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
        })
    }

    /// Build a CMS client from the site configuration
    pub fn cms_client(&self) -> Result<cms::CmsClient> {
        cms::CmsClient::new(&self.config.cms)
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self, false).await
    }

    /// Clean the public directory and cache
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
