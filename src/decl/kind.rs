//! Closed enumerations of the facade layer
//!
//! Three fixed tables live here:
//! - `Visibility`: the facade-side visibility, mapped 1:1 from the model's
//!   four values with no fallback arm
//! - `PrimitiveKind`: the eight canonical primitive kinds, looked up by
//!   name; unknown names yield absence, never a fabricated kind
//! - `DeclKind`: one tag per facade variant, for filtering and display

use crate::model::JvmVisibility;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Visibility of a declaration as seen by facade consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Package-private (no modifier)
    Default,
    Private,
    Protected,
    Public,
}

impl Visibility {
    /// Get the string representation of the visibility
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Default => "default",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
        }
    }

    /// Get all visibilities
    pub fn all() -> &'static [Visibility] {
        &[
            Visibility::Default,
            Visibility::Private,
            Visibility::Protected,
            Visibility::Public,
        ]
    }

    /// Rendered modifier keyword; the default visibility renders as nothing
    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Default => "",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
        }
    }
}

impl From<JvmVisibility> for Visibility {
    fn from(v: JvmVisibility) -> Self {
        match v {
            JvmVisibility::Default => Visibility::Default,
            JvmVisibility::Private => Visibility::Private,
            JvmVisibility::Protected => Visibility::Protected,
            JvmVisibility::Public => Visibility::Public,
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of a primitive type facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Int,
    Char,
    Double,
    Long,
    Short,
    Float,
    Byte,
}

impl PrimitiveKind {
    /// Look up a kind by canonical primitive name.
    ///
    /// Unrecognized names (including `"void"`, which classifies through its
    /// own path) yield `None`.
    pub fn from_name(name: &str) -> Option<PrimitiveKind> {
        match name {
            "boolean" => Some(PrimitiveKind::Boolean),
            "int" => Some(PrimitiveKind::Int),
            "char" => Some(PrimitiveKind::Char),
            "double" => Some(PrimitiveKind::Double),
            "long" => Some(PrimitiveKind::Long),
            "short" => Some(PrimitiveKind::Short),
            "float" => Some(PrimitiveKind::Float),
            "byte" => Some(PrimitiveKind::Byte),
            _ => None,
        }
    }

    /// Get the canonical primitive name
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Byte => "byte",
        }
    }

    /// Get all primitive kinds
    pub fn all() -> &'static [PrimitiveKind] {
        &[
            PrimitiveKind::Boolean,
            PrimitiveKind::Int,
            PrimitiveKind::Char,
            PrimitiveKind::Double,
            PrimitiveKind::Long,
            PrimitiveKind::Short,
            PrimitiveKind::Float,
            PrimitiveKind::Byte,
        ]
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tag identifying the concrete variant of a [`crate::decl::Declaration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    /// Generated class declaration
    Class,
    TypeParameter,
    Primitive,
    Void,
    Field,
    Method,
    Constructor,
    Parameter,
    TypeReference,
    /// Source-realm class declaration
    SourceClass,
    SourceMethod,
    SourceConstructor,
    SourceField,
    SourceParameter,
}

impl DeclKind {
    /// Get the string representation of the declaration kind
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKind::Class => "class",
            DeclKind::TypeParameter => "type_parameter",
            DeclKind::Primitive => "primitive",
            DeclKind::Void => "void",
            DeclKind::Field => "field",
            DeclKind::Method => "method",
            DeclKind::Constructor => "constructor",
            DeclKind::Parameter => "parameter",
            DeclKind::TypeReference => "type_reference",
            DeclKind::SourceClass => "source_class",
            DeclKind::SourceMethod => "source_method",
            DeclKind::SourceConstructor => "source_constructor",
            DeclKind::SourceField => "source_field",
            DeclKind::SourceParameter => "source_parameter",
        }
    }

    /// Get all declaration kinds
    pub fn all() -> &'static [DeclKind] {
        &[
            DeclKind::Class,
            DeclKind::TypeParameter,
            DeclKind::Primitive,
            DeclKind::Void,
            DeclKind::Field,
            DeclKind::Method,
            DeclKind::Constructor,
            DeclKind::Parameter,
            DeclKind::TypeReference,
            DeclKind::SourceClass,
            DeclKind::SourceMethod,
            DeclKind::SourceConstructor,
            DeclKind::SourceField,
            DeclKind::SourceParameter,
        ]
    }

    /// Whether this kind belongs to the source realm
    pub fn is_source(&self) -> bool {
        matches!(
            self,
            DeclKind::SourceClass
                | DeclKind::SourceMethod
                | DeclKind::SourceConstructor
                | DeclKind::SourceField
                | DeclKind::SourceParameter
        )
    }
}

impl FromStr for DeclKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "class" => Ok(DeclKind::Class),
            "type_parameter" | "typeparam" => Ok(DeclKind::TypeParameter),
            "primitive" => Ok(DeclKind::Primitive),
            "void" => Ok(DeclKind::Void),
            "field" => Ok(DeclKind::Field),
            "method" => Ok(DeclKind::Method),
            "constructor" | "ctor" => Ok(DeclKind::Constructor),
            "parameter" | "param" => Ok(DeclKind::Parameter),
            "type_reference" | "typeref" => Ok(DeclKind::TypeReference),
            "source_class" => Ok(DeclKind::SourceClass),
            "source_method" => Ok(DeclKind::SourceMethod),
            "source_constructor" => Ok(DeclKind::SourceConstructor),
            "source_field" => Ok(DeclKind::SourceField),
            "source_parameter" => Ok(DeclKind::SourceParameter),
            _ => Err(crate::Error::Model(format!("Unknown declaration kind: {}", s))),
        }
    }
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_mapping_is_total() {
        // Every model visibility maps to exactly one facade value.
        let mapped: Vec<Visibility> = JvmVisibility::all()
            .iter()
            .map(|v| Visibility::from(*v))
            .collect();
        assert_eq!(
            mapped,
            vec![
                Visibility::Default,
                Visibility::Private,
                Visibility::Protected,
                Visibility::Public,
            ]
        );
    }

    #[test]
    fn test_primitive_kind_table_is_total_over_known_names() {
        for kind in PrimitiveKind::all() {
            assert_eq!(PrimitiveKind::from_name(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn test_primitive_kind_rejects_unknown_names() {
        assert_eq!(PrimitiveKind::from_name("void"), None);
        assert_eq!(PrimitiveKind::from_name("Integer"), None);
        assert_eq!(PrimitiveKind::from_name(""), None);
    }

    #[test]
    fn test_decl_kind_roundtrip() {
        for kind in DeclKind::all() {
            let parsed: DeclKind = kind.as_str().parse().unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn test_decl_kind_aliases() {
        assert_eq!(DeclKind::from_str("ctor").unwrap(), DeclKind::Constructor);
        assert_eq!(DeclKind::from_str("typeref").unwrap(), DeclKind::TypeReference);
        assert!(DeclKind::from_str("widget").is_err());
    }
}
