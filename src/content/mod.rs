//! Content module - normalized post shapes and the content mapper

mod mapper;
mod post;
pub mod richtext;

pub use mapper::{map_post_detail, map_results, MapError};
pub use post::{Banner, ContentBlock, Post, PostData, PostDetail, PostDetailData, RichTextSpan};
