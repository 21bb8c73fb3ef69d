//! Struct extraction
//!
//! Walks the declaration tree and captures the field lists of requested
//! struct types. Capture is driven by a two-state machine fed by the
//! [Visitor] events of [SourceFile::accept]:
//!
//!     Idle --type name--> AwaitingBody(name) --struct body--> Idle (capture if requested)
//!                                            --other body---> Idle
//!
//! Requested names that never show up are reported as
//! [StructLookup::NotFound]; that is not an error.

use serde::Serialize;
use std::collections::HashMap;
use std::ops::Range;

use crate::golang::ast::{FieldDecl, Ident, SourceFile, StructType, TypeSpec, Visitor};
use crate::golang::parser::{parse, ParseError};

/// Ordered, de-duplicated set of type names to extract
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestedTypes {
    names: Vec<String>,
}

impl RequestedTypes {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut requested = RequestedTypes::default();
        for name in names {
            let name = name.into();
            if !requested.contains(&name) {
                requested.names.push(name);
            }
        }
        requested
    }

    /// Parse a comma separated list such as `User, Person`
    pub fn from_csv(list: &str) -> Self {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty()),
        )
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A struct field as declared: its first name and raw tag literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawField {
    pub name: String,
    /// Tag literal with its delimiters, `None` when the field has no tag
    pub tag: Option<String>,
    #[serde(skip)]
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawStruct {
    pub name: String,
    pub fields: Vec<RawField>,
}

/// Outcome of looking up one requested name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StructLookup {
    Found(RawStruct),
    NotFound,
}

impl StructLookup {
    pub fn as_found(&self) -> Option<&RawStruct> {
        match self {
            StructLookup::Found(raw) => Some(raw),
            StructLookup::NotFound => None,
        }
    }
}

/// Everything the extractor learned from one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub package_name: String,
    /// One entry per requested name, in request order
    pub lookups: Vec<(String, StructLookup)>,
}

impl Extraction {
    pub fn get(&self, name: &str) -> Option<&StructLookup> {
        self.lookups
            .iter()
            .find(|(requested, _)| requested == name)
            .map(|(_, lookup)| lookup)
    }

    pub fn is_found(&self, name: &str) -> bool {
        self.get(name).and_then(StructLookup::as_found).is_some()
    }

    /// Structs that were found, in request order
    pub fn found(&self) -> impl Iterator<Item = &RawStruct> {
        self.lookups
            .iter()
            .filter_map(|(_, lookup)| lookup.as_found())
    }

    /// Requested names with no struct declaration in the file
    pub fn not_found(&self) -> Vec<&str> {
        self.lookups
            .iter()
            .filter(|(_, lookup)| matches!(lookup, StructLookup::NotFound))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum WalkState {
    Idle,
    AwaitingBody(String),
}

/// Visitor collecting the requested struct bodies
pub struct StructCollector<'a> {
    requested: &'a RequestedTypes,
    state: WalkState,
    captured: HashMap<String, RawStruct>,
}

impl<'a> StructCollector<'a> {
    pub fn new(requested: &'a RequestedTypes) -> Self {
        Self {
            requested,
            state: WalkState::Idle,
            captured: HashMap::new(),
        }
    }

    /// Resolve every requested name against what was captured
    pub fn finish(mut self) -> Vec<(String, StructLookup)> {
        self.requested
            .iter()
            .map(|name| {
                let lookup = match self.captured.remove(name) {
                    Some(raw) => StructLookup::Found(raw),
                    None => StructLookup::NotFound,
                };
                (name.to_string(), lookup)
            })
            .collect()
    }
}

impl Visitor for StructCollector<'_> {
    fn visit_type_name(&mut self, name: &Ident) {
        self.state = WalkState::AwaitingBody(name.name.clone());
    }

    fn visit_struct(&mut self, body: &StructType) {
        let state = std::mem::replace(&mut self.state, WalkState::Idle);
        let WalkState::AwaitingBody(name) = state else {
            return;
        };
        if !self.requested.contains(&name) {
            return;
        }

        tracing::debug!(name = %name, fields = body.fields.len(), "captured struct");
        let fields = body
            .fields
            .iter()
            .filter_map(|field| raw_field(&name, field))
            .collect();
        // A later declaration of the same name replaces the earlier one
        self.captured
            .insert(name.clone(), RawStruct { name, fields });
    }

    fn visit_other_type(&mut self) {
        self.state = WalkState::Idle;
    }

    fn leave_type_decl(&mut self, _specs: &[TypeSpec]) {
        self.state = WalkState::Idle;
    }
}

fn raw_field(struct_name: &str, field: &FieldDecl) -> Option<RawField> {
    match field {
        FieldDecl::Named { names, tag } => {
            let first = names.first()?;
            if first.name == "_" {
                tracing::warn!(structure = struct_name, "skipping blank field");
                return None;
            }
            if names.len() > 1 {
                tracing::debug!(
                    structure = struct_name,
                    field = %first.name,
                    "only the first name of a multi-name field is used"
                );
            }
            Some(RawField {
                name: first.name.clone(),
                tag: tag.as_ref().map(|t| t.raw.clone()),
                span: first.span.clone(),
            })
        }
        FieldDecl::Embedded { type_name, .. } => {
            tracing::warn!(
                structure = struct_name,
                embedded = %type_name.name,
                "skipping embedded field"
            );
            None
        }
    }
}

/// Collect requested structs from an already parsed file
pub fn collect(file: &SourceFile, requested: &RequestedTypes) -> Extraction {
    let mut collector = StructCollector::new(requested);
    file.accept(&mut collector);

    Extraction {
        package_name: file.package.name.clone(),
        lookups: collector.finish(),
    }
}

/// Parse `source` and collect the requested structs
pub fn extract(source: &str, requested: &RequestedTypes) -> Result<Extraction, ParseError> {
    let file = parse(source)?;
    Ok(collect(&file, requested))
}
