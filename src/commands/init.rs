//! Initialize a new octavo site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Octavo;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("_config.yml already exists in {:?}", target_dir);
    }

    // Create default _config.yml
    let config_content = r#"# Octavo Configuration

# Site
title: Octavo
subtitle: ''
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
public_dir: public

# Date / reading time
date_format: '%-d %b %Y'
words_per_minute: 200

# Remote content
cms:
  # Base URL of the headless CMS HTTP API, e.g.
  # https://your-repo.cdn.prismic.io/api/v2
  api_endpoint: ''
  document_type: posts
  page_size: 10
  # Token can also come from the environment
  access_token:
  access_token_env: OCTAVO_CMS_TOKEN
  # Seconds before cached CMS responses are refetched
  revalidate: 86400

# Comment widget
comments:
  enable: false
  script_url: https://utteranc.es/client.js
  repo: ''
  issue_term: pathname
  label: ''
  theme: github-dark
"#;

    fs::write(&config_path, config_content)?;
    tracing::info!("Wrote {:?}", config_path);

    Ok(())
}

/// Run the init command with an existing octavo instance
pub fn run(octavo: &Octavo) -> Result<()> {
    init_site(&octavo.base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_init_writes_parseable_config() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let config = SiteConfig::load(dir.path().join("_config.yml")).unwrap();
        assert_eq!(config.title, "Octavo");
        assert_eq!(config.cms.page_size, 10);
        assert_eq!(config.cms.revalidate, 86400);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
