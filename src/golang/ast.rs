//! Declaration tree for Go source files
//!
//! Not a full Go AST. The parser keeps the package
//! clause, type declarations and struct bodies; function bodies, var/const
//! initializers, imports and non-struct type expressions are consumed as
//! balanced token groups and survive only as placeholders.

use std::ops::Range;

/// An identifier with its byte span in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Range<usize>,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A parsed source file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub package: Ident,
    pub decls: Vec<Decl>,
}

/// A top-level declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Import,
    /// `type X ...` or a parenthesized group of specs
    Type(Vec<TypeSpec>),
    /// `func`, `var` or `const`
    Other,
}

/// One `Name [TypeParams] [=] Type` entry of a type declaration
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: Ident,
    pub body: TypeBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeBody {
    Struct(StructType),
    /// Any other type expression (interfaces, aliases, func types, ...)
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub fields: Vec<FieldDecl>,
}

/// A field tag exactly as written, delimiters included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub raw: String,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldDecl {
    /// `A, B Type "tag"`
    Named { names: Vec<Ident>, tag: Option<Tag> },
    /// `Base`, `*pkg.Base`
    Embedded { type_name: Ident, tag: Option<Tag> },
}

impl FieldDecl {
    pub fn tag(&self) -> Option<&Tag> {
        match self {
            FieldDecl::Named { tag, .. } | FieldDecl::Embedded { tag, .. } => tag.as_ref(),
        }
    }
}

impl SourceFile {
    /// All type specs in declaration order, grouped or not
    pub fn type_specs(&self) -> impl Iterator<Item = &TypeSpec> {
        self.decls.iter().flat_map(|decl| match decl {
            Decl::Type(specs) => specs.as_slice(),
            Decl::Import | Decl::Other => &[][..],
        })
    }
}

/// Visitor over type declarations
///
/// `accept` reports each type spec as its name followed by exactly one body
/// event, wrapped in `visit_type_decl`/`leave_type_decl` per declaration.
pub trait Visitor {
    fn visit_type_decl(&mut self, _specs: &[TypeSpec]) {}
    fn leave_type_decl(&mut self, _specs: &[TypeSpec]) {}

    fn visit_type_name(&mut self, _name: &Ident) {}
    fn visit_struct(&mut self, _body: &StructType) {}
    fn visit_other_type(&mut self) {}
}

impl SourceFile {
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        for decl in &self.decls {
            if let Decl::Type(specs) = decl {
                visitor.visit_type_decl(specs);
                for spec in specs {
                    visitor.visit_type_name(&spec.name);
                    match &spec.body {
                        TypeBody::Struct(body) => visitor.visit_struct(body),
                        TypeBody::Other => visitor.visit_other_type(),
                    }
                }
                visitor.leave_type_decl(specs);
            }
        }
    }
}
