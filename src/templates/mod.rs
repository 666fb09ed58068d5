//! Built-in theme templates using the Tera template engine
//!
//! All templates are embedded directly in the binary; the generated site
//! needs no theme directory on disk.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers;

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Autoescaping stays off; the generator emits trusted HTML
        // fragments (comment embed, load-more script) into the context
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("octavo/layout.html")),
            ("index.html", include_str!("octavo/index.html")),
            ("post.html", include_str!("octavo/post.html")),
            ("404.html", include_str!("octavo/404.html")),
        ])?;

        tera.register_filter("format_date", format_date_filter);
        tera.register_filter("escape_html", escape_html_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: format an ISO date string for display
fn format_date_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("format_date", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("format_date", "format", String, val),
        None => "%-d %b %Y".to_string(),
    };

    Ok(tera::Value::String(helpers::date::format_date(&s, &format)))
}

/// Tera filter: escape HTML special characters
fn escape_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("escape_html", "value", String, value);
    let escaped = s
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;");
    Ok(tera::Value::String(escaped))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub root: String,
    pub date_format: String,
}

/// One entry of the post list
#[derive(Debug, Clone, Serialize)]
pub struct PostItemData {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    /// Raw ISO date; templates format it
    pub date: Option<String>,
}

/// A fully rendered post page
#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: Option<String>,
    pub banner_url: String,
    pub reading_time: u64,
    pub blocks: Vec<BlockData>,
}

/// A content block, keyed by its index within the post
#[derive(Debug, Clone, Serialize)]
pub struct BlockData {
    pub index: usize,
    pub heading: String,
    pub paragraphs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_compile() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_render_404() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert(
            "config",
            &ConfigData {
                title: "Octavo".to_string(),
                subtitle: String::new(),
                description: String::new(),
                author: String::new(),
                language: "en".to_string(),
                root: "/".to_string(),
                date_format: "%-d %b %Y".to_string(),
            },
        );

        let html = renderer.render("404.html", &context).unwrap();
        assert!(html.contains("Not found"));
    }

    #[test]
    fn test_format_date_filter() {
        let value = tera::Value::String("2021-03-15T10:00:00+0000".to_string());
        let result = format_date_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(result, tera::Value::String("15 mar 2021".to_string()));
    }
}
