//! Renderer registry
//!
//! Each output format implements [Renderer] and is registered by name with a
//! [RendererRegistry].

use std::collections::HashMap;

use crate::codegen::ExtractionResult;
use crate::error::RenderError;

/// An output format for the column model
pub trait Renderer: Send + Sync {
    /// The name of this format (e.g., "go", "json")
    fn name(&self) -> &str;

    /// Produce the unformatted output text
    fn render(&self, result: &ExtractionResult) -> Result<String, RenderError>;

    /// Bring rendered text into canonical layout. Runs after [Renderer::render].
    fn format(&self, rendered: String) -> Result<String, RenderError> {
        Ok(rendered)
    }

    /// File extension for generated files; `None` keeps the input's extension
    fn extension(&self) -> Option<&str> {
        None
    }

    fn description(&self) -> &str {
        ""
    }
}

pub struct RendererRegistry {
    renderers: HashMap<String, Box<dyn Renderer>>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        RendererRegistry {
            renderers: HashMap::new(),
        }
    }

    /// Register a renderer, replacing any with the same name
    pub fn register<R: Renderer + 'static>(&mut self, renderer: R) {
        self.renderers
            .insert(renderer.name().to_string(), Box::new(renderer));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Renderer, RenderError> {
        self.renderers
            .get(name)
            .map(|r| r.as_ref())
            .ok_or_else(|| RenderError::NotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    /// Render and format with the named renderer
    pub fn render(&self, result: &ExtractionResult, name: &str) -> Result<String, RenderError> {
        let renderer = self.get(name)?;
        renderer.format(renderer.render(result)?)
    }

    /// Registered renderers as `(name, description)`, sorted by name
    pub fn list_formats(&self) -> Vec<(String, String)> {
        let mut formats: Vec<_> = self
            .renderers
            .values()
            .map(|r| (r.name().to_string(), r.description().to_string()))
            .collect();
        formats.sort();
        formats
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::GoRenderer);
        registry.register(super::JsonRenderer);
        registry
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
