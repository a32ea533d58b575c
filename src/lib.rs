//! # Declave - Declaration Facades for JVM-Style Type Models
//!
//! Declave wraps an in-memory JVM-style type model in stable, simplified
//! declaration facades for downstream tooling (code generators, signature
//! renderers, editors).
//!
//! Declave provides:
//! - A model arena holding the typed object graph for one compilation unit
//! - Identity-memoized declaration facades: one facade per model node
//! - Exhaustive classification over the known node variants, with explicit
//!   absence for the unsupported ones
//! - Signature rendering with generics substitution
//! - A JSON model loader and a CLI for inspecting units

pub mod model;
pub mod decl;
pub mod unit;
pub mod render;
pub mod output;
pub mod config;


// Re-exports for convenient access
pub use model::{Model, Node, NodeId};
pub use decl::{DeclId, DeclKind, Declaration, PrimitiveKind, Visibility};
pub use unit::{CompilationUnit, UnitId};

/// Result type alias for Declave operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Declave operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("Invalid model: {0}")]
    Model(String),

    #[error("Model document error: {0}")]
    Document(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Type not found in unit: {0}")]
    UnknownType(String),
}
