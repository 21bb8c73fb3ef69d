//! Column model handed to renderers

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::CodegenError;
use crate::golang::extract::{Extraction, RawStruct};
use crate::tags;

/// One struct field and the value its tag holds under the chosen key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub tag_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructColumn {
    pub name: String,
    pub fields: Vec<Field>,
}

/// Everything a renderer needs to emit the companion file.
///
/// Structures are keyed by name, so iteration is alphabetical regardless of
/// declaration or request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub package_name: String,
    pub structures: BTreeMap<String, StructColumn>,
}

impl ExtractionResult {
    /// Resolve every field tag under `tag_key`.
    ///
    /// Fails on the first field whose tag lacks the key or maps it to an
    /// empty value. Requested names that were not found simply have no entry.
    pub fn resolve(extraction: &Extraction, tag_key: &str) -> Result<Self, CodegenError> {
        let structures = extraction
            .found()
            .map(|raw| {
                let column = resolve_struct(raw, tag_key)?;
                Ok((column.name.clone(), column))
            })
            .collect::<Result<BTreeMap<_, _>, CodegenError>>()?;

        Ok(ExtractionResult {
            package_name: extraction.package_name.clone(),
            structures,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}

fn resolve_struct(raw: &RawStruct, tag_key: &str) -> Result<StructColumn, CodegenError> {
    let mut fields = Vec::with_capacity(raw.fields.len());
    for field in &raw.fields {
        let value = field
            .tag
            .as_deref()
            .and_then(|tag| tags::lookup(tag, tag_key))
            .filter(|value| !value.is_empty())
            .ok_or_else(|| CodegenError::MissingTag {
                key: tag_key.to_string(),
                structure: raw.name.clone(),
                field: field.name.clone(),
            })?;
        fields.push(Field {
            name: field.name.clone(),
            tag_value: value,
        });
    }

    Ok(StructColumn {
        name: raw.name.clone(),
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::golang::extract::{extract, RequestedTypes};

    fn resolve(source: &str, names: &[&str], key: &str) -> Result<ExtractionResult, CodegenError> {
        let extraction = extract(source, &RequestedTypes::new(names.iter().copied())).unwrap();
        ExtractionResult::resolve(&extraction, key)
    }

    #[test]
    fn test_structures_are_sorted_by_name() {
        let source = "package p\ntype Zed struct { A int `db:\"a\"` }\ntype Alpha struct { B int `db:\"b\"` }\n";
        let result = resolve(source, &["Zed", "Alpha"], "db").unwrap();
        let names: Vec<&str> = result.structures.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Alpha", "Zed"]);
    }

    #[test]
    fn test_resolves_selected_key() {
        let source = "package p\ntype T struct { ID int `db:\"id\" json:\"json_id\"` }\n";
        let result = resolve(source, &["T"], "json").unwrap();
        assert_eq!(
            result.structures["T"].fields,
            vec![Field {
                name: "ID".to_string(),
                tag_value: "json_id".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_key_names_struct_and_field() {
        let source = "package p\ntype T struct {\n\tID int `db:\"id\"`\n\tName string `json:\"name\"`\n}\n";
        let err = resolve(source, &["T"], "db").unwrap_err();
        match err {
            CodegenError::MissingTag { key, structure, field } => {
                assert_eq!((key.as_str(), structure.as_str(), field.as_str()), ("db", "T", "Name"));
            }
            other => panic!("expected MissingTag, got {other:?}"),
        }
    }

    #[test]
    fn test_untagged_and_empty_values_are_missing() {
        assert!(resolve("package p\ntype T struct { ID int }\n", &["T"], "db").is_err());
        assert!(resolve("package p\ntype T struct { ID int `db:\"\"` }\n", &["T"], "db").is_err());
    }

    #[test]
    fn test_not_found_names_have_no_entry() {
        let result = resolve("package p\ntype T struct { ID int `db:\"id\"` }\n", &["Ghost"], "db").unwrap();
        assert!(result.is_empty());
        assert_eq!(result.package_name, "p");
    }

    #[test]
    fn test_struct_without_fields_is_kept() {
        let result = resolve("package p\ntype Empty struct{}\n", &["Empty"], "db").unwrap();
        assert!(result.structures["Empty"].fields.is_empty());
    }
}
