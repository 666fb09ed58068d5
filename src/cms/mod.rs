//! Headless CMS client and wire types

mod client;
mod document;

pub use client::{CmsClient, CmsError, Predicate, QueryOptions};
pub use document::{Document, SearchResponse};
