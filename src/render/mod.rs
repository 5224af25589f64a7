//! Renderer module — trait-based format dispatch.

pub mod comment;
pub mod json;
pub mod markdown;

use crate::document::Document;
use anyhow::{anyhow, Result};
use jsdoc_tags::{AnchorRenderer, LinkRenderer};

/// Trait for rendering a Document into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &Document) -> String;
    fn file_extension(&self) -> &str;

    /// How inline `{@link}` markers in tag text come out in this format.
    fn links(&self) -> &dyn LinkRenderer {
        &AnchorRenderer
    }
}

/// Create a renderer for the given format name.
///
/// `indent` only affects the comment format.
pub fn create_renderer(format: &str, indent: usize) -> Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "comment" | "jsdoc" => Ok(Box::new(comment::CommentRenderer { indent })),
        _ => Err(anyhow!(
            "unknown format: {}. Use json, markdown, or comment",
            format
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_formats() {
        assert_eq!(create_renderer("json", 0).unwrap().file_extension(), "json");
        assert_eq!(create_renderer("md", 0).unwrap().file_extension(), "md");
        assert_eq!(create_renderer("comment", 2).unwrap().file_extension(), "js");
    }

    #[test]
    fn unknown_format() {
        let err = create_renderer("xml", 0).err().unwrap();
        assert!(err.to_string().contains("unknown format: xml"));
    }
}
