//! Output renderers
//!
//! A renderer turns an [ExtractionResult](crate::codegen::ExtractionResult)
//! into the text of the companion file. Renderers are looked up by name in a
//! [RendererRegistry]; the driver receives the chosen instance explicitly.

pub mod go;
pub mod json;
pub mod registry;

pub use go::GoRenderer;
pub use json::JsonRenderer;
pub use registry::{Renderer, RendererRegistry};
