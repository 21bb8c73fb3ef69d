//! JSON dump of the column model

use crate::codegen::ExtractionResult;
use crate::error::RenderError;
use crate::formats::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Column model as pretty-printed JSON"
    }

    fn extension(&self) -> Option<&str> {
        Some("json")
    }

    fn render(&self, result: &ExtractionResult) -> Result<String, RenderError> {
        serde_json::to_string_pretty(result).map_err(|e| RenderError::Serialization(e.to_string()))
    }

    fn format(&self, mut rendered: String) -> Result<String, RenderError> {
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        Ok(rendered)
    }
}
