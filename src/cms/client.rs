//! HTTP client for the headless CMS API
//!
//! The client is constructed explicitly from configuration and injected
//! where needed; there is no ambient singleton. Queries go through the
//! repository's search endpoint after resolving the current master ref,
//! and pagination cursors returned by the API are fetched as-is.

use serde::Deserialize;
use thiserror::Error;

use super::document::{Document, SearchResponse};
use crate::config::CmsConfig;

/// Errors from CMS requests
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("cms api_endpoint is not configured")]
    MissingEndpoint,

    #[error("CMS request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CMS returned status {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("malformed CMS response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("CMS API exposes no master ref")]
    NoMasterRef,

    #[error("no document of type {doc_type} with uid {uid}")]
    NotFound { doc_type: String, uid: String },
}

/// A query predicate in the CMS's bracketed query syntax
#[derive(Debug, Clone)]
pub struct Predicate {
    path: String,
    value: String,
}

impl Predicate {
    /// Match documents whose field at `path` equals `value`
    pub fn at(path: &str, value: &str) -> Self {
        Self {
            path: path.to_string(),
            value: value.to_string(),
        }
    }

    /// Render as the `q` query parameter value
    pub fn to_query(&self) -> String {
        format!("[[at({},\"{}\")]]", self.path, self.value)
    }
}

/// Options for a search query
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub page_size: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

/// A ref entry in the API root response
#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(default, rename = "isMasterRef")]
    is_master_ref: bool,
}

/// The API root response; only refs are of interest here
#[derive(Debug, Deserialize)]
struct ApiInfo {
    #[serde(default)]
    refs: Vec<ApiRef>,
}

/// Client for the CMS HTTP API
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    api_endpoint: String,
    access_token: Option<String>,
}

impl CmsClient {
    /// Create a client from configuration
    pub fn new(config: &CmsConfig) -> anyhow::Result<Self> {
        if config.api_endpoint.is_empty() {
            return Err(CmsError::MissingEndpoint.into());
        }

        Ok(Self {
            http: reqwest::Client::new(),
            api_endpoint: config.api_endpoint.trim_end_matches('/').to_string(),
            access_token: config.resolve_access_token(),
        })
    }

    /// Resolve the repository's current master ref from the API root
    async fn master_ref(&self) -> Result<String, CmsError> {
        let mut request = self.http.get(&self.api_endpoint);
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status {
                status,
                url: self.api_endpoint.clone(),
            });
        }

        let info: ApiInfo = serde_json::from_str(&response.text().await?)?;
        info.refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or(CmsError::NoMasterRef)
    }

    /// Query documents matching a predicate, returning one page of results
    pub async fn query(
        &self,
        predicate: &Predicate,
        options: &QueryOptions,
    ) -> Result<SearchResponse, CmsError> {
        let master_ref = self.master_ref().await?;
        let url = format!("{}/documents/search", self.api_endpoint);

        let mut request = self.http.get(&url).query(&[
            ("ref", master_ref.as_str()),
            ("q", predicate.to_query().as_str()),
            ("pageSize", options.page_size.to_string().as_str()),
        ]);
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status { status, url });
        }

        Ok(serde_json::from_str(&response.text().await?)?)
    }

    /// Fetch a single document by type and uid
    pub async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<Document, CmsError> {
        let predicate = Predicate::at(&format!("my.{}.uid", doc_type), uid);
        let options = QueryOptions { page_size: 1 };

        let response = self.query(&predicate, &options).await?;
        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| CmsError::NotFound {
                doc_type: doc_type.to_string(),
                uid: uid.to_string(),
            })
    }

    /// Fetch an opaque pagination cursor URL returning the same envelope shape
    pub async fn fetch_page(&self, url: &str) -> Result<SearchResponse, CmsError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(serde_json::from_str(&response.text().await?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_query_syntax() {
        let predicate = Predicate::at("document.type", "posts");
        assert_eq!(predicate.to_query(), r#"[[at(document.type,"posts")]]"#);

        let by_uid = Predicate::at("my.posts.uid", "my-first-post");
        assert_eq!(by_uid.to_query(), r#"[[at(my.posts.uid,"my-first-post")]]"#);
    }

    #[test]
    fn test_missing_endpoint_is_rejected() {
        let config = CmsConfig::default();
        assert!(CmsClient::new(&config).is_err());
    }

    #[test]
    fn test_endpoint_trailing_slash_is_trimmed() {
        let config = CmsConfig {
            api_endpoint: "https://example.cdn.prismic.io/api/v2/".to_string(),
            ..CmsConfig::default()
        };
        let client = CmsClient::new(&config).unwrap();
        assert_eq!(client.api_endpoint, "https://example.cdn.prismic.io/api/v2");
    }
}
