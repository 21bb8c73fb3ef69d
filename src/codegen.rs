//! Code generation driver
//!
//! Turns a parsed [Extraction](crate::golang::extract::Extraction) into the
//! column model, hands that to a [Renderer](crate::formats::Renderer) and
//! writes the result next to the input file.

pub mod driver;
pub mod model;

pub use driver::{generate, output_path, run, GenerateRequest, RunOptions};
pub use model::{ExtractionResult, Field, StructColumn};
