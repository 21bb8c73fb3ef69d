//! # tagcol
//!
//! Generates Go column-name lookups from struct field tags.
//!
//! Given a Go file such as
//!
//! ```text
//! type User struct {
//!     ID   int    `db:"id"`
//!     Name string `db:"nickname"`
//! }
//! ```
//!
//! `tagcol` writes a companion file declaring `UserColumns` whose members hold
//! `"id"` and `"nickname"`, so queries can refer to `UserColumns.Name` instead
//! of a hand-maintained string.
//!
//! The pipeline is:
//!     - [golang::lexer]: logos tokens plus Go's automatic semicolons
//!     - [golang::parser]: chumsky grammar for the declaration skeleton
//!     - [golang::extract]: visitor capturing the requested structs
//!     - [tags]: `key:"value"` tag lookup
//!     - [codegen]: tag resolution and the file-to-file driver
//!     - [formats]: renderers, with [golang::format] laying out Go output

pub mod codegen;
pub mod config;
pub mod error;
pub mod formats;
pub mod golang;
pub mod tags;

pub use codegen::{generate, run, ExtractionResult, GenerateRequest, RunOptions};
pub use error::{CodegenError, RenderError};
pub use formats::{Renderer, RendererRegistry};
pub use golang::extract::RequestedTypes;
