//! Concrete facade types
//!
//! Each facade snapshots its delegate's data at creation time and keeps the
//! delegate [`NodeId`] plus the owning [`UnitId`] as plain keys. The model
//! is borrowed immutably for the whole life of a unit, so the snapshot is
//! observably identical to reading through the delegate.

use crate::decl::kind::{DeclKind, PrimitiveKind, Visibility};
use crate::model::{
    ConstructorNode, DeclaredTypeNode, FieldNode, FormalParameterNode, NodeId, OperationNode,
    PrimitiveNode, SourceConstructorNode, SourceFieldNode, SourceFunctionNode, SourceParameterNode,
    SourceTypeNode, TypeParameterNode, TypeReferenceNode,
};
use crate::unit::UnitId;

/// Identifier of a facade within its owning unit.
///
/// Two resolutions of the same node in the same unit return equal ids -
/// id equality is facade identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId(pub u32);

/// Facade over a generated class declaration.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    node: NodeId,
    unit: UnitId,
    data: DeclaredTypeNode,
}

impl ClassDecl {
    pub(crate) fn new(node: NodeId, unit: UnitId, data: DeclaredTypeNode) -> Self {
        Self { node, unit, data }
    }

    pub fn simple_name(&self) -> &str {
        &self.data.simple_name
    }

    pub fn qualified_name(&self) -> &str {
        &self.data.qualified_name
    }

    pub fn visibility(&self) -> Visibility {
        self.data.visibility.into()
    }

    pub fn type_parameters(&self) -> &[NodeId] {
        &self.data.type_parameters
    }

    /// Member nodes in declaration order; classify them through the unit
    pub fn members(&self) -> &[NodeId] {
        &self.data.members
    }

    pub fn extended_class(&self) -> Option<NodeId> {
        self.data.extended_class
    }

    pub fn implemented_interfaces(&self) -> &[NodeId] {
        &self.data.implemented_interfaces
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }
}

/// Facade over a type parameter. Shared by both realms.
#[derive(Debug, Clone)]
pub struct TypeParameterDecl {
    node: NodeId,
    unit: UnitId,
    data: TypeParameterNode,
}

impl TypeParameterDecl {
    pub(crate) fn new(node: NodeId, unit: UnitId, data: TypeParameterNode) -> Self {
        Self { node, unit, data }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn upper_bounds(&self) -> &[NodeId] {
        &self.data.upper_bounds
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }
}

/// Facade over a primitive type.
#[derive(Debug, Clone)]
pub struct PrimitiveDecl {
    node: NodeId,
    unit: UnitId,
    data: PrimitiveNode,
}

impl PrimitiveDecl {
    pub(crate) fn new(node: NodeId, unit: UnitId, data: PrimitiveNode) -> Self {
        Self { node, unit, data }
    }

    /// Canonical name of the primitive, read from the delegate
    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Kind looked up from the fixed name table; a name outside the eight
    /// known primitives yields `None`
    pub fn kind(&self) -> Option<PrimitiveKind> {
        PrimitiveKind::from_name(&self.data.name)
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }
}

/// Facade over the void type.
#[derive(Debug, Clone)]
pub struct VoidDecl {
    node: NodeId,
    unit: UnitId,
}

impl VoidDecl {
    pub(crate) fn new(node: NodeId, unit: UnitId) -> Self {
        Self { node, unit }
    }

    pub fn name(&self) -> &'static str {
        "void"
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }
}

/// Facade over a generated field.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    node: NodeId,
    unit: UnitId,
    data: FieldNode,
}

impl FieldDecl {
    pub(crate) fn new(node: NodeId, unit: UnitId, data: FieldNode) -> Self {
        Self { node, unit, data }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn visibility(&self) -> Visibility {
        self.data.visibility.into()
    }

    /// Type reference node of the field type
    pub fn field_type(&self) -> NodeId {
        self.data.field_type
    }

    pub fn is_static(&self) -> bool {
        self.data.is_static
    }

    pub fn is_final(&self) -> bool {
        self.data.is_final
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }
}

/// Facade over a generated method.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    node: NodeId,
    unit: UnitId,
    data: OperationNode,
}

impl MethodDecl {
    pub(crate) fn new(node: NodeId, unit: UnitId, data: OperationNode) -> Self {
        Self { node, unit, data }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn visibility(&self) -> Visibility {
        self.data.visibility.into()
    }

    /// Type reference node of the return type; `None` means void
    pub fn return_type(&self) -> Option<NodeId> {
        self.data.return_type
    }

    pub fn parameters(&self) -> &[NodeId] {
        &self.data.parameters
    }

    pub fn type_parameters(&self) -> &[NodeId] {
        &self.data.type_parameters
    }

    pub fn exceptions(&self) -> &[NodeId] {
        &self.data.exceptions
    }

    pub fn is_static(&self) -> bool {
        self.data.is_static
    }

    pub fn is_abstract(&self) -> bool {
        self.data.is_abstract
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }
}

/// Facade over a generated constructor.
#[derive(Debug, Clone)]
pub struct ConstructorDecl {
    node: NodeId,
    unit: UnitId,
    data: ConstructorNode,
}

impl ConstructorDecl {
    pub(crate) fn new(node: NodeId, unit: UnitId, data: ConstructorNode) -> Self {
        Self { node, unit, data }
    }

    /// Simple name of the declaring type
    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn visibility(&self) -> Visibility {
        self.data.visibility.into()
    }

    pub fn parameters(&self) -> &[NodeId] {
        &self.data.parameters
    }

    pub fn exceptions(&self) -> &[NodeId] {
        &self.data.exceptions
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }
}

/// Facade over a formal parameter.
#[derive(Debug, Clone)]
pub struct ParameterDecl {
    node: NodeId,
    unit: UnitId,
    data: FormalParameterNode,
}

impl ParameterDecl {
    pub(crate) fn new(node: NodeId, unit: UnitId, data: FormalParameterNode) -> Self {
        Self { node, unit, data }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Type reference node of the parameter type
    pub fn parameter_type(&self) -> NodeId {
        self.data.parameter_type
    }

    /// The executable declaring this parameter, when recorded
    pub fn container(&self) -> Option<NodeId> {
        self.data.container
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }
}

/// Facade over a type reference.
#[derive(Debug, Clone)]
pub struct TypeReferenceDecl {
    node: NodeId,
    unit: UnitId,
    data: TypeReferenceNode,
}

impl TypeReferenceDecl {
    pub(crate) fn new(node: NodeId, unit: UnitId, data: TypeReferenceNode) -> Self {
        Self { node, unit, data }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// The referenced type node, when resolved within the unit
    pub fn target(&self) -> Option<NodeId> {
        self.data.target
    }

    pub fn arguments(&self) -> &[NodeId] {
        &self.data.arguments
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }
}

/// Facade over a source-realm class declaration.
#[derive(Debug, Clone)]
pub struct SourceClassDecl {
    node: NodeId,
    unit: UnitId,
    data: SourceTypeNode,
}

impl SourceClassDecl {
    pub(crate) fn new(node: NodeId, unit: UnitId, data: SourceTypeNode) -> Self {
        Self { node, unit, data }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn members(&self) -> &[NodeId] {
        &self.data.members
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }
}

/// Facade over a source-realm function declaration.
#[derive(Debug, Clone)]
pub struct SourceMethodDecl {
    node: NodeId,
    unit: UnitId,
    data: SourceFunctionNode,
}

impl SourceMethodDecl {
    pub(crate) fn new(node: NodeId, unit: UnitId, data: SourceFunctionNode) -> Self {
        Self { node, unit, data }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn parameters(&self) -> &[NodeId] {
        &self.data.parameters
    }

    /// Declared return type, when written in source
    pub fn return_type(&self) -> Option<NodeId> {
        self.data.return_type
    }

    pub fn type_parameters(&self) -> &[NodeId] {
        &self.data.type_parameters
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }
}

/// Facade over a source-realm constructor declaration.
#[derive(Debug, Clone)]
pub struct SourceConstructorDecl {
    node: NodeId,
    unit: UnitId,
    data: SourceConstructorNode,
}

impl SourceConstructorDecl {
    pub(crate) fn new(node: NodeId, unit: UnitId, data: SourceConstructorNode) -> Self {
        Self { node, unit, data }
    }

    pub fn parameters(&self) -> &[NodeId] {
        &self.data.parameters
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }
}

/// Facade over a source-realm field declaration.
#[derive(Debug, Clone)]
pub struct SourceFieldDecl {
    node: NodeId,
    unit: UnitId,
    data: SourceFieldNode,
}

impl SourceFieldDecl {
    pub(crate) fn new(node: NodeId, unit: UnitId, data: SourceFieldNode) -> Self {
        Self { node, unit, data }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Declared field type, when written in source
    pub fn field_type(&self) -> Option<NodeId> {
        self.data.field_type
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }
}

/// Facade over a source-realm parameter declaration.
#[derive(Debug, Clone)]
pub struct SourceParameterDecl {
    node: NodeId,
    unit: UnitId,
    data: SourceParameterNode,
}

impl SourceParameterDecl {
    pub(crate) fn new(node: NodeId, unit: UnitId, data: SourceParameterNode) -> Self {
        Self { node, unit, data }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn parameter_type(&self) -> Option<NodeId> {
        self.data.parameter_type
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }
}

/// A declaration facade - one variant per supported node classification.
#[derive(Debug, Clone)]
pub enum Declaration {
    Class(ClassDecl),
    TypeParameter(TypeParameterDecl),
    Primitive(PrimitiveDecl),
    Void(VoidDecl),
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Parameter(ParameterDecl),
    TypeReference(TypeReferenceDecl),
    SourceClass(SourceClassDecl),
    SourceMethod(SourceMethodDecl),
    SourceConstructor(SourceConstructorDecl),
    SourceField(SourceFieldDecl),
    SourceParameter(SourceParameterDecl),
}

impl Declaration {
    /// Tag of the concrete variant
    pub fn kind(&self) -> DeclKind {
        match self {
            Declaration::Class(_) => DeclKind::Class,
            Declaration::TypeParameter(_) => DeclKind::TypeParameter,
            Declaration::Primitive(_) => DeclKind::Primitive,
            Declaration::Void(_) => DeclKind::Void,
            Declaration::Field(_) => DeclKind::Field,
            Declaration::Method(_) => DeclKind::Method,
            Declaration::Constructor(_) => DeclKind::Constructor,
            Declaration::Parameter(_) => DeclKind::Parameter,
            Declaration::TypeReference(_) => DeclKind::TypeReference,
            Declaration::SourceClass(_) => DeclKind::SourceClass,
            Declaration::SourceMethod(_) => DeclKind::SourceMethod,
            Declaration::SourceConstructor(_) => DeclKind::SourceConstructor,
            Declaration::SourceField(_) => DeclKind::SourceField,
            Declaration::SourceParameter(_) => DeclKind::SourceParameter,
        }
    }

    /// Display name of the declaration.
    ///
    /// Source constructors have no declared name and render as `new`.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Class(d) => d.simple_name(),
            Declaration::TypeParameter(d) => d.name(),
            Declaration::Primitive(d) => d.name(),
            Declaration::Void(d) => d.name(),
            Declaration::Field(d) => d.name(),
            Declaration::Method(d) => d.name(),
            Declaration::Constructor(d) => d.name(),
            Declaration::Parameter(d) => d.name(),
            Declaration::TypeReference(d) => d.name(),
            Declaration::SourceClass(d) => d.name(),
            Declaration::SourceMethod(d) => d.name(),
            Declaration::SourceConstructor(_) => "new",
            Declaration::SourceField(d) => d.name(),
            Declaration::SourceParameter(d) => d.name(),
        }
    }

    /// Visibility, for the variants that carry one
    pub fn visibility(&self) -> Option<Visibility> {
        match self {
            Declaration::Class(d) => Some(d.visibility()),
            Declaration::Field(d) => Some(d.visibility()),
            Declaration::Method(d) => Some(d.visibility()),
            Declaration::Constructor(d) => Some(d.visibility()),
            _ => None,
        }
    }

    /// Delegate node of this facade
    pub fn node(&self) -> NodeId {
        match self {
            Declaration::Class(d) => d.node(),
            Declaration::TypeParameter(d) => d.node(),
            Declaration::Primitive(d) => d.node(),
            Declaration::Void(d) => d.node(),
            Declaration::Field(d) => d.node(),
            Declaration::Method(d) => d.node(),
            Declaration::Constructor(d) => d.node(),
            Declaration::Parameter(d) => d.node(),
            Declaration::TypeReference(d) => d.node(),
            Declaration::SourceClass(d) => d.node(),
            Declaration::SourceMethod(d) => d.node(),
            Declaration::SourceConstructor(d) => d.node(),
            Declaration::SourceField(d) => d.node(),
            Declaration::SourceParameter(d) => d.node(),
        }
    }

    /// Unit that produced and owns this facade
    pub fn unit(&self) -> UnitId {
        match self {
            Declaration::Class(d) => d.unit(),
            Declaration::TypeParameter(d) => d.unit(),
            Declaration::Primitive(d) => d.unit(),
            Declaration::Void(d) => d.unit(),
            Declaration::Field(d) => d.unit(),
            Declaration::Method(d) => d.unit(),
            Declaration::Constructor(d) => d.unit(),
            Declaration::Parameter(d) => d.unit(),
            Declaration::TypeReference(d) => d.unit(),
            Declaration::SourceClass(d) => d.unit(),
            Declaration::SourceMethod(d) => d.unit(),
            Declaration::SourceConstructor(d) => d.unit(),
            Declaration::SourceField(d) => d.unit(),
            Declaration::SourceParameter(d) => d.unit(),
        }
    }

    pub fn as_class(&self) -> Option<&ClassDecl> {
        match self {
            Declaration::Class(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_source_class(&self) -> Option<&SourceClassDecl> {
        match self {
            Declaration::SourceClass(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodDecl> {
        match self {
            Declaration::Method(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldDecl> {
        match self {
            Declaration::Field(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_primitive(&self) -> Option<&PrimitiveDecl> {
        match self {
            Declaration::Primitive(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_type_reference(&self) -> Option<&TypeReferenceDecl> {
        match self {
            Declaration::TypeReference(d) => Some(d),
            _ => None,
        }
    }
}
