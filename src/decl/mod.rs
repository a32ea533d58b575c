//! Declaration facades - the simplified, stable view over model nodes
//!
//! A facade wraps exactly one model node and exposes its kind, name,
//! visibility, and children. Facades are created and owned by a
//! [`crate::unit::CompilationUnit`]; they record the node and unit they
//! belong to as plain lookup keys, never as owning pointers.

pub mod kind;
pub mod facade;

pub use facade::{
    ClassDecl, ConstructorDecl, DeclId, Declaration, FieldDecl, MethodDecl, ParameterDecl,
    PrimitiveDecl, SourceClassDecl, SourceConstructorDecl, SourceFieldDecl, SourceMethodDecl,
    SourceParameterDecl, TypeParameterDecl, TypeReferenceDecl, VoidDecl,
};
pub use kind::{DeclKind, PrimitiveKind, Visibility};
