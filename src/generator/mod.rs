//! Generator module - renders the post list and post pages to static HTML
//!
//! The generator is pure rendering: it takes documents already fetched from
//! the CMS, projects them through the content mapper and writes the output
//! tree. Malformed documents fail generation; there is no partial page.

use anyhow::{Context as _, Result};
use std::fs;
use std::path::PathBuf;
use tera::Context;

use crate::cms::Document;
use crate::comments;
use crate::content::{self, Post, PostDetail};
use crate::helpers;
use crate::templates::{BlockData, ConfigData, PostItemData, PostPageData, TemplateRenderer};
use crate::Octavo;

/// Renders the site from fetched CMS documents
pub struct Generator<'a> {
    octavo: &'a Octavo,
    templates: TemplateRenderer,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(octavo: &'a Octavo) -> Result<Self> {
        Ok(Self {
            octavo,
            templates: TemplateRenderer::new()?,
        })
    }

    /// Render the whole site
    ///
    /// `next_cursor` is the opaque next-page URL of the initial list query;
    /// the index page embeds it to drive client-side "load more" fetching.
    pub fn generate(&self, documents: &[Document], next_cursor: Option<&str>) -> Result<()> {
        fs::create_dir_all(&self.octavo.public_dir)?;

        let posts = content::map_results(documents)?;
        self.generate_index(&posts, next_cursor)?;

        for document in documents {
            let detail = content::map_post_detail(document)?;
            self.generate_post(&detail)?;
        }

        self.generate_not_found()?;

        tracing::info!("Rendered index and {} post pages", documents.len());
        Ok(())
    }

    /// Render the paginated post list
    fn generate_index(&self, posts: &[Post], next_cursor: Option<&str>) -> Result<()> {
        // The static index carries only the first page; later pages arrive
        // through the cursor
        let page: Vec<PostItemData> = posts
            .iter()
            .take(self.octavo.config.cms.page_size)
            .map(|post| PostItemData {
                uid: post.uid.clone(),
                title: post.data.title.clone(),
                subtitle: post.data.subtitle.clone(),
                author: post.data.author.clone(),
                date: post.first_publication_date.clone(),
            })
            .collect();

        let mut context = self.base_context();
        context.insert("posts", &page);
        context.insert("next_cursor", &next_cursor);

        let html = self.templates.render("index.html", &context)?;
        self.write_page(self.octavo.public_dir.join("index.html"), &html)
    }

    /// Render one post page at `post/<uid>/index.html`
    fn generate_post(&self, detail: &PostDetail) -> Result<()> {
        let config = &self.octavo.config;

        let blocks: Vec<BlockData> = detail
            .data
            .content
            .iter()
            .enumerate()
            .map(|(index, block)| BlockData {
                index,
                heading: block.heading.clone(),
                paragraphs: block.body.iter().map(|span| span.text.clone()).collect(),
            })
            .collect();

        let page = PostPageData {
            uid: detail.uid.clone(),
            title: detail.data.title.clone(),
            subtitle: detail.data.subtitle.clone(),
            author: detail.data.author.clone(),
            date: detail.first_publication_date.clone(),
            banner_url: detail.data.banner.url.clone(),
            reading_time: helpers::reading_time::estimate(
                &detail.data.content,
                config.words_per_minute,
            ),
            blocks,
        };

        let mut context = self.base_context();
        context.insert("post", &page);
        context.insert(
            "comments",
            &comments::embed(&config.comments).unwrap_or_default(),
        );

        let html = self.templates.render("post.html", &context)?;
        let path = self
            .octavo
            .public_dir
            .join("post")
            .join(&detail.uid)
            .join("index.html");
        self.write_page(path, &html)
    }

    /// Render the not-found page served for unknown slugs
    fn generate_not_found(&self) -> Result<()> {
        let context = self.base_context();
        let html = self.templates.render("404.html", &context)?;
        self.write_page(self.octavo.public_dir.join("404.html"), &html)
    }

    fn base_context(&self) -> Context {
        let config = &self.octavo.config;
        let mut context = Context::new();
        context.insert(
            "config",
            &ConfigData {
                title: config.title.clone(),
                subtitle: config.subtitle.clone(),
                description: config.description.clone(),
                author: config.author.clone(),
                language: config.language.clone(),
                root: config.root.clone(),
                date_format: config.date_format.clone(),
            },
        );
        context
    }

    fn write_page(&self, path: PathBuf, html: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, html).with_context(|| format!("writing {:?}", path))?;
        tracing::debug!("Wrote {:?}", path);
        Ok(())
    }
}
