//! Generation pipeline: extract, resolve, render, format, write

use std::fs;
use std::path::{Path, PathBuf};

use crate::codegen::model::ExtractionResult;
use crate::error::CodegenError;
use crate::formats::Renderer;
use crate::golang::extract::{extract, RequestedTypes};

/// Input of one in-memory generation
#[derive(Debug, Clone)]
pub struct GenerateRequest<'a> {
    /// Name used in diagnostics
    pub filename: &'a str,
    pub source: &'a str,
    pub requested: &'a RequestedTypes,
    pub tag_key: &'a str,
}

/// Generate the companion file text for `request`
pub fn generate(request: &GenerateRequest<'_>, renderer: &dyn Renderer) -> Result<String, CodegenError> {
    let extraction = extract(request.source, request.requested)
        .map_err(|e| CodegenError::parse(request.filename, e))?;

    let missing = extraction.not_found();
    if !missing.is_empty() {
        tracing::debug!(names = ?missing, "requested structs not declared in {}", request.filename);
    }

    let result = ExtractionResult::resolve(&extraction, request.tag_key)?;
    let rendered = renderer.render(&result)?;
    Ok(renderer.format(rendered)?)
}

/// Derive `<dir>/<stem>_<suffix>.<ext>` from the input path.
///
/// `extension` overrides the input's own extension. An input without one
/// yields `<dir>/<stem>_<suffix>`.
pub fn output_path(input: &Path, suffix: &str, extension: Option<&str>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{stem}_{suffix}");

    let ext = extension
        .map(str::to_string)
        .or_else(|| input.extension().map(|e| e.to_string_lossy().into_owned()));
    if let Some(ext) = ext {
        name.push('.');
        name.push_str(&ext);
    }

    input.with_file_name(name)
}

/// Options for a file-to-file run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub path: PathBuf,
    pub requested: RequestedTypes,
    pub tag_key: String,
    pub suffix: String,
}

/// Read `options.path`, generate, and write the companion file.
/// Returns the path written. An empty request is an error and writes nothing.
pub fn run(options: &RunOptions, renderer: &dyn Renderer) -> Result<PathBuf, CodegenError> {
    if options.requested.is_empty() {
        return Err(CodegenError::NothingRequested);
    }

    let source = fs::read_to_string(&options.path).map_err(|source| CodegenError::Io {
        action: "failed to read",
        path: options.path.clone(),
        source,
    })?;

    let filename = options.path.display().to_string();
    let generated = generate(
        &GenerateRequest {
            filename: &filename,
            source: &source,
            requested: &options.requested,
            tag_key: &options.tag_key,
        },
        renderer,
    )?;

    let target = output_path(&options.path, &options.suffix, renderer.extension());
    fs::write(&target, generated).map_err(|source| CodegenError::Io {
        action: "failed to write",
        path: target.clone(),
        source,
    })?;

    tracing::info!(path = %target.display(), format = renderer.name(), "generated");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{GoRenderer, JsonRenderer};

    #[test]
    fn test_output_path_keeps_directory_and_extension() {
        assert_eq!(
            output_path(Path::new("/x/y/user.go"), "column", None),
            PathBuf::from("/x/y/user_column.go")
        );
        assert_eq!(
            output_path(Path::new("model.go"), "cols", None),
            PathBuf::from("model_cols.go")
        );
    }

    #[test]
    fn test_output_path_without_extension() {
        assert_eq!(
            output_path(Path::new("dir/user"), "column", None),
            PathBuf::from("dir/user_column")
        );
    }

    #[test]
    fn test_output_path_renderer_extension() {
        assert_eq!(
            output_path(Path::new("dir/user.go"), "column", JsonRenderer.extension()),
            PathBuf::from("dir/user_column.json")
        );
    }

    #[test]
    fn test_generate_reports_file_on_parse_error() {
        let requested = RequestedTypes::new(["T"]);
        let request = GenerateRequest {
            filename: "broken.go",
            source: "package p\ntype T struct {\n",
            requested: &requested,
            tag_key: "db",
        };
        let err = generate(&request, &GoRenderer).unwrap_err();
        assert!(matches!(err, CodegenError::Parse { ref file, .. } if file == "broken.go"));
    }

    #[test]
    fn test_run_rejects_empty_request() {
        let options = RunOptions {
            path: PathBuf::from("unused.go"),
            requested: RequestedTypes::from_csv(" , "),
            tag_key: "db".to_string(),
            suffix: "column".to_string(),
        };
        assert!(matches!(
            run(&options, &GoRenderer),
            Err(CodegenError::NothingRequested)
        ));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let requested = RequestedTypes::new(["B", "A"]);
        let source = "package p\ntype A struct { X int `db:\"x\"` }\ntype B struct { Y int `db:\"y\"` }\n";
        let request = GenerateRequest {
            filename: "p.go",
            source,
            requested: &requested,
            tag_key: "db",
        };
        let first = generate(&request, &GoRenderer).unwrap();
        let second = generate(&request, &GoRenderer).unwrap();
        assert_eq!(first, second);
    }
}
