//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the Document directly: `{ "source", "comments": [{ "text", "tags" }] }`.
//! Tag keys keep registry order.

use crate::document::Document;
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &Document) -> String {
        match serde_json::to_string_pretty(doc) {
            Ok(mut out) => {
                out.push('\n');
                out
            }
            Err(e) => {
                tracing::error!(source = %doc.source, "failed to serialize document: {}", e);
                String::new()
            }
        }
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
