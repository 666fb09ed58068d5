//! Content mapper - projects raw CMS documents into normalized post shapes
//!
//! Mapping is a pure field-by-field projection. A document whose `data`
//! payload is missing a required sub-field fails the whole call; the CMS
//! contractually guarantees these fields, so there is no defaulting.

use serde_json::Value;
use thiserror::Error;

use super::post::{Banner, ContentBlock, Post, PostData, PostDetail, PostDetailData, RichTextSpan};
use crate::cms::Document;

/// Errors from projecting a CMS document
#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    #[error("document {id} is missing required field {field}")]
    MissingField { id: String, field: String },
}

/// Map one page of raw documents into list-view posts, preserving order
///
/// Duplicate uids are not filtered; a misbehaving CMS shows through.
pub fn map_results(documents: &[Document]) -> Result<Vec<Post>, MapError> {
    documents.iter().map(map_post).collect()
}

/// Map a single raw document into a list-view post
pub fn map_post(document: &Document) -> Result<Post, MapError> {
    Ok(Post {
        uid: required_uid(document)?,
        first_publication_date: document.first_publication_date.clone(),
        data: PostData {
            title: str_field(document, "title")?,
            subtitle: str_field(document, "subtitle")?,
            author: str_field(document, "author")?,
        },
    })
}

/// Map a single raw document into a detail-view post
pub fn map_post_detail(document: &Document) -> Result<PostDetail, MapError> {
    let banner_url = document
        .data
        .get("banner")
        .and_then(|banner| banner.get("url"))
        .and_then(Value::as_str)
        .ok_or_else(|| missing(document, "data.banner.url"))?
        .to_string();

    let blocks = document
        .data
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| missing(document, "data.content"))?;

    let content = blocks
        .iter()
        .enumerate()
        .map(|(index, block)| map_content_block(document, index, block))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PostDetail {
        uid: required_uid(document)?,
        first_publication_date: document.first_publication_date.clone(),
        data: PostDetailData {
            title: str_field(document, "title")?,
            subtitle: str_field(document, "subtitle")?,
            author: str_field(document, "author")?,
            banner: Banner { url: banner_url },
            content,
        },
    })
}

/// Map one entry of the `data.content` array
fn map_content_block(
    document: &Document,
    index: usize,
    block: &Value,
) -> Result<ContentBlock, MapError> {
    let heading = block
        .get("heading")
        .and_then(Value::as_str)
        .ok_or_else(|| missing(document, &format!("data.content[{}].heading", index)))?
        .to_string();

    let body = block
        .get("body")
        .and_then(Value::as_array)
        .ok_or_else(|| missing(document, &format!("data.content[{}].body", index)))?;

    let body = body
        .iter()
        .enumerate()
        .map(|(span_index, span)| {
            let path = format!("data.content[{}].body[{}]", index, span_index);
            Ok(RichTextSpan {
                text: span
                    .get("text")
                    .and_then(Value::as_str)
                    .ok_or_else(|| missing(document, &format!("{}.text", path)))?
                    .to_string(),
                // Markup annotations pass through untouched
                spans: span.get("spans").cloned().unwrap_or(Value::Null),
                kind: span
                    .get("type")
                    .and_then(Value::as_str)
                    .ok_or_else(|| missing(document, &format!("{}.type", path)))?
                    .to_string(),
            })
        })
        .collect::<Result<Vec<_>, MapError>>()?;

    Ok(ContentBlock { heading, body })
}

fn required_uid(document: &Document) -> Result<String, MapError> {
    document
        .uid
        .clone()
        .ok_or_else(|| missing(document, "uid"))
}

fn str_field(document: &Document, field: &str) -> Result<String, MapError> {
    document
        .data
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| missing(document, &format!("data.{}", field)))
}

fn missing(document: &Document, field: &str) -> MapError {
    MapError::MissingField {
        id: document.id.clone(),
        field: field.to_string(),
    }
}
