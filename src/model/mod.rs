//! JVM-style type model - the typed object graph being wrapped
//!
//! The model holds every node of one compilation unit in an append-only
//! arena. Nodes reference each other by [`NodeId`]; node identity *is* the
//! arena index. The facade layer never mutates the model - it only reads
//! through a shared borrow.
//!
//! Two node realms coexist in one unit:
//! - Generated realm: the JVM types derived for the unit (declared types,
//!   operations, fields, ...)
//! - Source realm: the declarations as written (source types, functions, ...)

pub mod loader;

pub use loader::{from_json, load_model};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unique identifier for a model node - the stable identity key used by
/// the facade cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Visibility as recorded in the JVM model (the foreign 4-valued enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JvmVisibility {
    /// Package-private (no modifier)
    Default,
    Private,
    Protected,
    Public,
}

impl JvmVisibility {
    /// Get the string representation of the visibility
    pub fn as_str(&self) -> &'static str {
        match self {
            JvmVisibility::Default => "default",
            JvmVisibility::Private => "private",
            JvmVisibility::Protected => "protected",
            JvmVisibility::Public => "public",
        }
    }

    /// Get all model visibilities
    pub fn all() -> &'static [JvmVisibility] {
        &[
            JvmVisibility::Default,
            JvmVisibility::Private,
            JvmVisibility::Protected,
            JvmVisibility::Public,
        ]
    }
}

impl std::fmt::Display for JvmVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flavor of a declared type, in either realm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredKind {
    Class,
    Interface,
    Annotation,
    Enumeration,
}

impl DeclaredKind {
    /// Get the string representation of the declared kind
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclaredKind::Class => "class",
            DeclaredKind::Interface => "interface",
            DeclaredKind::Annotation => "annotation",
            DeclaredKind::Enumeration => "enumeration",
        }
    }

    /// Get all declared kinds
    pub fn all() -> &'static [DeclaredKind] {
        &[
            DeclaredKind::Class,
            DeclaredKind::Interface,
            DeclaredKind::Annotation,
            DeclaredKind::Enumeration,
        ]
    }
}

impl FromStr for DeclaredKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "class" => Ok(DeclaredKind::Class),
            "interface" => Ok(DeclaredKind::Interface),
            "annotation" => Ok(DeclaredKind::Annotation),
            "enumeration" | "enum" => Ok(DeclaredKind::Enumeration),
            _ => Err(crate::Error::Model(format!("Unknown declared kind: {}", s))),
        }
    }
}

impl std::fmt::Display for DeclaredKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A generated declared type (class, interface, annotation, enumeration).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclaredTypeNode {
    /// Simple name (no package)
    pub simple_name: String,
    /// Fully qualified name
    pub qualified_name: String,
    /// Flavor of the type
    pub kind: DeclaredKind,
    pub visibility: JvmVisibility,
    /// Type parameter nodes
    #[serde(default)]
    pub type_parameters: Vec<NodeId>,
    /// Member nodes (nested types, operations, constructors, fields)
    #[serde(default)]
    pub members: Vec<NodeId>,
    /// Type reference to the extended class, if any
    #[serde(default)]
    pub extended_class: Option<NodeId>,
    /// Type references to implemented interfaces
    #[serde(default)]
    pub implemented_interfaces: Vec<NodeId>,
}

/// A type parameter declared on a type or an executable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeParameterNode {
    pub name: String,
    /// Type references bounding this parameter from above
    #[serde(default)]
    pub upper_bounds: Vec<NodeId>,
}

/// A primitive type, identified by its canonical name (e.g. `"int"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimitiveNode {
    pub name: String,
}

/// A generated field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldNode {
    pub name: String,
    pub visibility: JvmVisibility,
    /// Type reference of the field type
    pub field_type: NodeId,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_final: bool,
}

/// A generated operation (method).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationNode {
    pub name: String,
    pub visibility: JvmVisibility,
    /// Type reference of the return type; absent means `void`
    #[serde(default)]
    pub return_type: Option<NodeId>,
    /// Formal parameter nodes
    #[serde(default)]
    pub parameters: Vec<NodeId>,
    /// Type parameter nodes
    #[serde(default)]
    pub type_parameters: Vec<NodeId>,
    /// Type references of the declared exceptions
    #[serde(default)]
    pub exceptions: Vec<NodeId>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
}

/// A generated constructor. Carries the simple name of its declaring type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstructorNode {
    pub name: String,
    pub visibility: JvmVisibility,
    #[serde(default)]
    pub parameters: Vec<NodeId>,
    #[serde(default)]
    pub exceptions: Vec<NodeId>,
}

/// A formal parameter of an operation or constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormalParameterNode {
    pub name: String,
    /// Type reference of the parameter type
    pub parameter_type: NodeId,
    /// The executable this parameter belongs to, when known
    #[serde(default)]
    pub container: Option<NodeId>,
}

/// A reference to a type, possibly with type arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeReferenceNode {
    /// Simple name of the referenced type
    pub name: String,
    /// The referenced type node, when resolved within this unit
    #[serde(default)]
    pub target: Option<NodeId>,
    /// Type reference nodes for the type arguments
    #[serde(default)]
    pub arguments: Vec<NodeId>,
}

/// A source-realm type declaration as written in the unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceTypeNode {
    pub name: String,
    pub kind: DeclaredKind,
    #[serde(default)]
    pub members: Vec<NodeId>,
}

/// A source-realm function declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFunctionNode {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<NodeId>,
    /// Type reference of the declared return type, when written
    #[serde(default)]
    pub return_type: Option<NodeId>,
    #[serde(default)]
    pub type_parameters: Vec<NodeId>,
}

/// A source-realm constructor declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConstructorNode {
    #[serde(default)]
    pub parameters: Vec<NodeId>,
}

/// A source-realm field declaration. The type may be omitted and inferred.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFieldNode {
    pub name: String,
    #[serde(default)]
    pub field_type: Option<NodeId>,
}

/// A source-realm parameter declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceParameterNode {
    pub name: String,
    #[serde(default)]
    pub parameter_type: Option<NodeId>,
}

/// A node in the typed object graph.
///
/// The variant set is closed: classification in the facade layer matches
/// exhaustively over it, and anything a variant does not support surfaces
/// as explicit absence there, not as an error here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    DeclaredType(DeclaredTypeNode),
    TypeParameter(TypeParameterNode),
    Primitive(PrimitiveNode),
    Void,
    Field(FieldNode),
    Operation(OperationNode),
    Constructor(ConstructorNode),
    FormalParameter(FormalParameterNode),
    TypeReference(TypeReferenceNode),
    SourceType(SourceTypeNode),
    SourceFunction(SourceFunctionNode),
    SourceConstructor(SourceConstructorNode),
    SourceField(SourceFieldNode),
    SourceParameter(SourceParameterNode),
}

impl Node {
    /// Variant name for diagnostics and listings
    pub fn variant_name(&self) -> &'static str {
        match self {
            Node::DeclaredType(_) => "declared_type",
            Node::TypeParameter(_) => "type_parameter",
            Node::Primitive(_) => "primitive",
            Node::Void => "void",
            Node::Field(_) => "field",
            Node::Operation(_) => "operation",
            Node::Constructor(_) => "constructor",
            Node::FormalParameter(_) => "formal_parameter",
            Node::TypeReference(_) => "type_reference",
            Node::SourceType(_) => "source_type",
            Node::SourceFunction(_) => "source_function",
            Node::SourceConstructor(_) => "source_constructor",
            Node::SourceField(_) => "source_field",
            Node::SourceParameter(_) => "source_parameter",
        }
    }

    /// Every node id this node references
    pub fn references(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        match self {
            Node::DeclaredType(d) => {
                out.extend(&d.type_parameters);
                out.extend(&d.members);
                out.extend(d.extended_class);
                out.extend(&d.implemented_interfaces);
            }
            Node::TypeParameter(t) => out.extend(&t.upper_bounds),
            Node::Primitive(_) | Node::Void => {}
            Node::Field(f) => out.push(f.field_type),
            Node::Operation(o) => {
                out.extend(o.return_type);
                out.extend(&o.parameters);
                out.extend(&o.type_parameters);
                out.extend(&o.exceptions);
            }
            Node::Constructor(c) => {
                out.extend(&c.parameters);
                out.extend(&c.exceptions);
            }
            Node::FormalParameter(p) => {
                out.push(p.parameter_type);
                out.extend(p.container);
            }
            Node::TypeReference(r) => {
                out.extend(r.target);
                out.extend(&r.arguments);
            }
            Node::SourceType(t) => out.extend(&t.members),
            Node::SourceFunction(f) => {
                out.extend(&f.parameters);
                out.extend(f.return_type);
                out.extend(&f.type_parameters);
            }
            Node::SourceConstructor(c) => out.extend(&c.parameters),
            Node::SourceField(f) => out.extend(f.field_type),
            Node::SourceParameter(p) => out.extend(p.parameter_type),
        }
        out
    }
}

/// The typed object graph for one compilation unit.
///
/// Append-only: nodes are added during model construction and never removed
/// or replaced, so a [`NodeId`] stays valid for the life of the model.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Model {
    /// Package the unit lives in
    #[serde(default)]
    package_name: String,
    /// All nodes, addressed by arena index
    #[serde(default)]
    nodes: Vec<Node>,
    /// Source-realm type declarations of the unit, in declaration order
    #[serde(default)]
    source_types: Vec<NodeId>,
    /// Resource contents: every top-level node derived for the unit,
    /// including the generated declared types
    #[serde(default)]
    contents: Vec<NodeId>,
}

impl Model {
    /// Create an empty model for a package
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            ..Self::default()
        }
    }

    /// Add a node to the arena and return its id
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Register a node as a source-realm type declaration of the unit
    pub fn add_source_type(&mut self, id: NodeId) {
        self.source_types.push(id);
    }

    /// Register a node as top-level resource content of the unit
    pub fn add_content(&mut self, id: NodeId) {
        self.contents.push(id);
    }

    /// Get a node by id
    ///
    /// Panics if the id does not belong to this model; ids handed out by
    /// [`Model::add_node`] or a validated loader are always in range.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    /// Get a node by id without panicking on foreign ids
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Package name of the unit
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Source-realm type declarations of the unit
    pub fn source_types(&self) -> &[NodeId] {
        &self.source_types
    }

    /// Top-level resource contents of the unit
    pub fn contents(&self) -> &[NodeId] {
        &self.contents
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes with their ids
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_retrieve_node() {
        let mut model = Model::new("com.example");
        let id = model.add_node(Node::Primitive(PrimitiveNode {
            name: "int".to_string(),
        }));

        match model.node(id) {
            Node::Primitive(p) => assert_eq!(p.name, "int"),
            other => panic!("unexpected node: {:?}", other),
        }
        assert_eq!(model.len(), 1);
        assert_eq!(model.package_name(), "com.example");
    }

    #[test]
    fn test_get_rejects_foreign_id() {
        let model = Model::new("com.example");
        assert!(model.get(NodeId(7)).is_none());
    }

    #[test]
    fn test_references_cover_operation_edges() {
        let mut model = Model::new("com.example");
        let ret = model.add_node(Node::TypeReference(TypeReferenceNode {
            name: "String".to_string(),
            target: None,
            arguments: vec![],
        }));
        let param_type = model.add_node(Node::TypeReference(TypeReferenceNode {
            name: "int".to_string(),
            target: None,
            arguments: vec![],
        }));
        let param = model.add_node(Node::FormalParameter(FormalParameterNode {
            name: "count".to_string(),
            parameter_type: param_type,
            container: None,
        }));
        let op = model.add_node(Node::Operation(OperationNode {
            name: "render".to_string(),
            visibility: JvmVisibility::Public,
            return_type: Some(ret),
            parameters: vec![param],
            type_parameters: vec![],
            exceptions: vec![],
            is_static: false,
            is_abstract: false,
        }));

        let refs = model.node(op).references();
        assert!(refs.contains(&ret));
        assert!(refs.contains(&param));
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn test_source_and_content_registration() {
        let mut model = Model::new("com.example");
        let src = model.add_node(Node::SourceType(SourceTypeNode {
            name: "Greeter".to_string(),
            kind: DeclaredKind::Class,
            members: vec![],
        }));
        let generated = model.add_node(Node::DeclaredType(DeclaredTypeNode {
            simple_name: "Greeter".to_string(),
            qualified_name: "com.example.Greeter".to_string(),
            kind: DeclaredKind::Class,
            visibility: JvmVisibility::Public,
            type_parameters: vec![],
            members: vec![],
            extended_class: None,
            implemented_interfaces: vec![],
        }));
        model.add_source_type(src);
        model.add_content(generated);

        assert_eq!(model.source_types(), &[src]);
        assert_eq!(model.contents(), &[generated]);
    }
}
