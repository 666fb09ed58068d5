//! Normalized post models
//!
//! These are the stable internal shapes that remote CMS documents are
//! projected into. Instances are immutable once mapped.

use serde::{Deserialize, Serialize};

/// A blog post as shown in the post list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// URL-friendly unique name (the post slug)
    pub uid: String,

    /// First publication date (ISO 8601), if published
    pub first_publication_date: Option<String>,

    /// List-view fields
    pub data: PostData,
}

/// List-view fields of a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// A fully loaded post as shown on its own page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetail {
    pub uid: String,
    pub first_publication_date: Option<String>,
    pub data: PostDetailData,
}

/// Detail-view fields of a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetailData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner: Banner,
    pub content: Vec<ContentBlock>,
}

/// Banner image of a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub url: String,
}

/// A section of post body content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub heading: String,
    pub body: Vec<RichTextSpan>,
}

/// One block of the CMS's rich-text format
///
/// `spans` carries the markup annotations as an opaque structured value;
/// only `text` is interpreted by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextSpan {
    pub text: String,

    pub spans: serde_json::Value,

    #[serde(rename = "type")]
    pub kind: String,
}
