//! Compilation unit - the identity-memoizing facade registry
//!
//! One `CompilationUnit` is created per processed unit and discarded with
//! it. The unit borrows the model for its whole lifetime, owns every facade
//! it creates, and memoizes classification by node identity: resolving the
//! same node twice returns the same [`DeclId`] without rebuilding anything.
//! Absence is memoized too - a node classified as unsupported stays
//! unsupported for the life of the unit.
//!
//! Classification is synchronous and single-threaded; concurrent use means
//! one unit per thread.

use std::collections::HashMap;

use crate::decl::{
    ClassDecl, ConstructorDecl, DeclId, DeclKind, Declaration, FieldDecl, MethodDecl,
    ParameterDecl, PrimitiveDecl, SourceClassDecl, SourceConstructorDecl, SourceFieldDecl,
    SourceMethodDecl, SourceParameterDecl, TypeParameterDecl, TypeReferenceDecl, VoidDecl,
};
use crate::model::{DeclaredKind, Model, Node, NodeId};
use crate::{Error, Result};

/// Identifier of a compilation unit. Facades carry it as a plain lookup
/// key back to the registry that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId(pub u32);

/// Facade registry for one compilation unit.
pub struct CompilationUnit<'m> {
    id: UnitId,
    model: &'m Model,
    /// Identity cache: node → resolved facade, present or absent
    cache: HashMap<NodeId, Option<DeclId>>,
    /// Facade arena; a `DeclId` indexes into it
    decls: Vec<Declaration>,
}

impl<'m> CompilationUnit<'m> {
    /// Create a registry over a model
    pub fn new(id: UnitId, model: &'m Model) -> Self {
        Self {
            id,
            model,
            cache: HashMap::new(),
            decls: Vec::new(),
        }
    }

    /// Id of this unit
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// The model this unit reads from
    pub fn model(&self) -> &'m Model {
        self.model
    }

    /// Package name of the unit
    pub fn package_name(&self) -> &str {
        self.model.package_name()
    }

    /// Documentation comment of the unit.
    ///
    /// Intentionally unimplemented; callers get a distinguishable error
    /// instead of a silently empty value.
    pub fn doc_comment(&self) -> Result<String> {
        Err(Error::Unsupported("compilation unit doc comment"))
    }

    /// Get a facade owned by this unit
    pub fn declaration(&self, id: DeclId) -> &Declaration {
        &self.decls[id.0 as usize]
    }

    /// Iterate over every facade created so far, with its id
    pub fn declarations(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclId(i as u32), d))
    }

    /// Number of facades created so far
    pub fn declaration_count(&self) -> usize {
        self.decls.len()
    }

    /// Resolve a node through the identity cache.
    ///
    /// On a cache hit the stored result is returned and the factory is not
    /// invoked. On a miss the factory builds the facade (or decides on
    /// absence), the outcome is stored under the node key, and returned.
    /// The factory receives the unit so it can attach the unit id and
    /// recurse into other resolutions.
    pub fn resolve<F>(&mut self, node: NodeId, factory: F) -> Option<DeclId>
    where
        F: FnOnce(&mut Self) -> Option<Declaration>,
    {
        if let Some(cached) = self.cache.get(&node) {
            return *cached;
        }
        let resolved = factory(self).map(|decl| {
            let id = DeclId(self.decls.len() as u32);
            tracing::debug!("facade {} created for node {}", decl.kind(), node.0);
            self.decls.push(decl);
            id
        });
        self.cache.insert(node, resolved);
        resolved
    }

    /// Classify any node over the full variant set.
    ///
    /// Routes to the matching specific operation; node variants without a
    /// supported facade resolve to `None`. Absence is an expected outcome,
    /// not an error.
    pub fn classify(&mut self, node: NodeId) -> Option<DeclId> {
        let model = self.model;
        match model.get(node)? {
            Node::DeclaredType(_) | Node::TypeParameter(_) | Node::Primitive(_) | Node::Void => {
                self.to_type(node)
            }
            Node::Field(_) | Node::Operation(_) | Node::Constructor(_) => {
                self.to_member_declaration(node)
            }
            Node::FormalParameter(_) => self.to_parameter_declaration(node),
            Node::TypeReference(_) => self.to_type_reference(node),
            Node::SourceType(_) => self.to_source_type_declaration(node),
            Node::SourceFunction(_) | Node::SourceConstructor(_) | Node::SourceField(_) => {
                self.to_source_member_declaration(node)
            }
            Node::SourceParameter(_) => self.to_source_parameter_declaration(node),
        }
    }

    /// Resolve a node as a type: declared type, type parameter, primitive,
    /// or void. Anything else yields absence.
    pub fn to_type(&mut self, node: NodeId) -> Option<DeclId> {
        let model = self.model;
        match model.get(node)? {
            Node::DeclaredType(_) => self.to_type_declaration(node),
            Node::TypeParameter(_) => self.to_type_parameter_declaration(node),
            Node::Void => self.resolve(node, |unit| {
                Some(Declaration::Void(VoidDecl::new(node, unit.id)))
            }),
            Node::Primitive(p) => self.resolve(node, |unit| {
                Some(Declaration::Primitive(PrimitiveDecl::new(
                    node,
                    unit.id,
                    p.clone(),
                )))
            }),
            _ => None,
        }
    }

    /// Resolve a declared type node to its type declaration facade.
    ///
    /// Only class-flavored types are supported; interface, annotation, and
    /// enumeration flavors resolve to a memoized absence.
    pub fn to_type_declaration(&mut self, node: NodeId) -> Option<DeclId> {
        let model = self.model;
        match model.get(node)? {
            Node::DeclaredType(d) => self.resolve(node, |unit| match d.kind {
                DeclaredKind::Class => {
                    Some(Declaration::Class(ClassDecl::new(node, unit.id, d.clone())))
                }
                DeclaredKind::Interface
                | DeclaredKind::Annotation
                | DeclaredKind::Enumeration => None,
            }),
            _ => None,
        }
    }

    /// Resolve a type parameter node
    pub fn to_type_parameter_declaration(&mut self, node: NodeId) -> Option<DeclId> {
        let model = self.model;
        match model.get(node)? {
            Node::TypeParameter(t) => self.resolve(node, |unit| {
                Some(Declaration::TypeParameter(TypeParameterDecl::new(
                    node,
                    unit.id,
                    t.clone(),
                )))
            }),
            _ => None,
        }
    }

    /// Resolve a formal parameter node
    pub fn to_parameter_declaration(&mut self, node: NodeId) -> Option<DeclId> {
        let model = self.model;
        match model.get(node)? {
            Node::FormalParameter(p) => self.resolve(node, |unit| {
                Some(Declaration::Parameter(ParameterDecl::new(
                    node,
                    unit.id,
                    p.clone(),
                )))
            }),
            _ => None,
        }
    }

    /// Resolve a member node: nested declared type, method, constructor,
    /// or field
    pub fn to_member_declaration(&mut self, node: NodeId) -> Option<DeclId> {
        let model = self.model;
        match model.get(node)? {
            Node::DeclaredType(_) => self.to_type_declaration(node),
            Node::Operation(o) => self.resolve(node, |unit| {
                Some(Declaration::Method(MethodDecl::new(node, unit.id, o.clone())))
            }),
            Node::Constructor(c) => self.resolve(node, |unit| {
                Some(Declaration::Constructor(ConstructorDecl::new(
                    node,
                    unit.id,
                    c.clone(),
                )))
            }),
            Node::Field(f) => self.resolve(node, |unit| {
                Some(Declaration::Field(FieldDecl::new(node, unit.id, f.clone())))
            }),
            _ => None,
        }
    }

    /// Resolve a type reference node
    pub fn to_type_reference(&mut self, node: NodeId) -> Option<DeclId> {
        let model = self.model;
        match model.get(node)? {
            Node::TypeReference(r) => self.resolve(node, |unit| {
                Some(Declaration::TypeReference(TypeReferenceDecl::new(
                    node,
                    unit.id,
                    r.clone(),
                )))
            }),
            _ => None,
        }
    }

    /// Resolve a source-realm type declaration.
    ///
    /// Only class-flavored source types are supported; the other flavors
    /// resolve to a memoized absence.
    pub fn to_source_type_declaration(&mut self, node: NodeId) -> Option<DeclId> {
        let model = self.model;
        match model.get(node)? {
            Node::SourceType(t) => self.resolve(node, |unit| match t.kind {
                DeclaredKind::Class => Some(Declaration::SourceClass(SourceClassDecl::new(
                    node,
                    unit.id,
                    t.clone(),
                ))),
                DeclaredKind::Interface
                | DeclaredKind::Annotation
                | DeclaredKind::Enumeration => None,
            }),
            _ => None,
        }
    }

    /// Resolve a source-realm member node: nested source type, function,
    /// constructor, or field
    pub fn to_source_member_declaration(&mut self, node: NodeId) -> Option<DeclId> {
        let model = self.model;
        match model.get(node)? {
            Node::SourceType(_) => self.to_source_type_declaration(node),
            Node::SourceFunction(f) => self.resolve(node, |unit| {
                Some(Declaration::SourceMethod(SourceMethodDecl::new(
                    node,
                    unit.id,
                    f.clone(),
                )))
            }),
            Node::SourceConstructor(c) => self.resolve(node, |unit| {
                Some(Declaration::SourceConstructor(SourceConstructorDecl::new(
                    node,
                    unit.id,
                    c.clone(),
                )))
            }),
            Node::SourceField(f) => self.resolve(node, |unit| {
                Some(Declaration::SourceField(SourceFieldDecl::new(
                    node,
                    unit.id,
                    f.clone(),
                )))
            }),
            _ => None,
        }
    }

    /// Resolve a source-realm parameter node
    pub fn to_source_parameter_declaration(&mut self, node: NodeId) -> Option<DeclId> {
        let model = self.model;
        match model.get(node)? {
            Node::SourceParameter(p) => self.resolve(node, |unit| {
                Some(Declaration::SourceParameter(SourceParameterDecl::new(
                    node,
                    unit.id,
                    p.clone(),
                )))
            }),
            _ => None,
        }
    }

    /// Every resolvable source-realm type declaration of the unit
    pub fn source_type_declarations(&mut self) -> Vec<DeclId> {
        let nodes: Vec<NodeId> = self.model.source_types().to_vec();
        nodes
            .into_iter()
            .filter_map(|n| self.to_source_type_declaration(n))
            .collect()
    }

    /// Source-realm class declarations of the unit
    pub fn source_class_declarations(&mut self) -> Vec<DeclId> {
        self.source_type_declarations()
            .into_iter()
            .filter(|id| self.declaration(*id).kind() == DeclKind::SourceClass)
            .collect()
    }

    /// Every resolvable generated type declaration in the unit's resource
    /// contents
    pub fn generated_type_declarations(&mut self) -> Vec<DeclId> {
        let nodes: Vec<NodeId> = self
            .model
            .contents()
            .iter()
            .copied()
            .filter(|n| matches!(self.model.get(*n), Some(Node::DeclaredType(_))))
            .collect();
        nodes
            .into_iter()
            .filter_map(|n| self.to_type_declaration(n))
            .collect()
    }

    /// Generated class declarations in the unit's resource contents
    pub fn generated_class_declarations(&mut self) -> Vec<DeclId> {
        self.generated_type_declarations()
            .into_iter()
            .filter(|id| self.declaration(*id).kind() == DeclKind::Class)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{PrimitiveKind, Visibility};
    use crate::model::{
        ConstructorNode, DeclaredTypeNode, FieldNode, FormalParameterNode, JvmVisibility,
        OperationNode, PrimitiveNode, SourceFieldNode, SourceFunctionNode, SourceParameterNode,
        SourceTypeNode, TypeParameterNode, TypeReferenceNode,
    };

    struct Fixture {
        model: Model,
        int_node: NodeId,
        void_node: NodeId,
        int_ref: NodeId,
        class_node: NodeId,
        iface_node: NodeId,
        annotation_node: NodeId,
        enum_node: NodeId,
        type_param: NodeId,
        field_node: NodeId,
        method_node: NodeId,
        ctor_node: NodeId,
        param_node: NodeId,
        source_class: NodeId,
        source_iface: NodeId,
        source_fn: NodeId,
        source_field: NodeId,
        source_param: NodeId,
    }

    fn declared(name: &str, kind: DeclaredKind, members: Vec<NodeId>) -> DeclaredTypeNode {
        DeclaredTypeNode {
            simple_name: name.to_string(),
            qualified_name: format!("com.example.{}", name),
            kind,
            visibility: JvmVisibility::Public,
            type_parameters: vec![],
            members,
            extended_class: None,
            implemented_interfaces: vec![],
        }
    }

    fn fixture() -> Fixture {
        let mut model = Model::new("com.example");

        let int_node = model.add_node(Node::Primitive(PrimitiveNode {
            name: "int".to_string(),
        }));
        let void_node = model.add_node(Node::Void);
        let int_ref = model.add_node(Node::TypeReference(TypeReferenceNode {
            name: "int".to_string(),
            target: Some(int_node),
            arguments: vec![],
        }));

        let type_param = model.add_node(Node::TypeParameter(TypeParameterNode {
            name: "T".to_string(),
            upper_bounds: vec![],
        }));
        let field_node = model.add_node(Node::Field(FieldNode {
            name: "count".to_string(),
            visibility: JvmVisibility::Private,
            field_type: int_ref,
            is_static: false,
            is_final: false,
        }));
        let param_node = model.add_node(Node::FormalParameter(FormalParameterNode {
            name: "delta".to_string(),
            parameter_type: int_ref,
            container: None,
        }));
        let method_node = model.add_node(Node::Operation(OperationNode {
            name: "increment".to_string(),
            visibility: JvmVisibility::Public,
            return_type: Some(int_ref),
            parameters: vec![param_node],
            type_parameters: vec![],
            exceptions: vec![],
            is_static: false,
            is_abstract: false,
        }));
        let ctor_node = model.add_node(Node::Constructor(ConstructorNode {
            name: "Counter".to_string(),
            visibility: JvmVisibility::Public,
            parameters: vec![],
            exceptions: vec![],
        }));

        let class_node = model.add_node(Node::DeclaredType(declared(
            "Counter",
            DeclaredKind::Class,
            vec![field_node, method_node, ctor_node],
        )));
        let iface_node = model.add_node(Node::DeclaredType(declared(
            "Countable",
            DeclaredKind::Interface,
            vec![],
        )));
        let annotation_node = model.add_node(Node::DeclaredType(declared(
            "Counted",
            DeclaredKind::Annotation,
            vec![],
        )));
        let enum_node = model.add_node(Node::DeclaredType(declared(
            "Direction",
            DeclaredKind::Enumeration,
            vec![],
        )));

        let source_param = model.add_node(Node::SourceParameter(SourceParameterNode {
            name: "delta".to_string(),
            parameter_type: Some(int_ref),
        }));
        let source_fn = model.add_node(Node::SourceFunction(SourceFunctionNode {
            name: "increment".to_string(),
            parameters: vec![source_param],
            return_type: Some(int_ref),
            type_parameters: vec![],
        }));
        let source_field = model.add_node(Node::SourceField(SourceFieldNode {
            name: "count".to_string(),
            field_type: None,
        }));
        let source_class = model.add_node(Node::SourceType(SourceTypeNode {
            name: "Counter".to_string(),
            kind: DeclaredKind::Class,
            members: vec![source_field, source_fn],
        }));
        let source_iface = model.add_node(Node::SourceType(SourceTypeNode {
            name: "Countable".to_string(),
            kind: DeclaredKind::Interface,
            members: vec![],
        }));

        model.add_source_type(source_class);
        model.add_source_type(source_iface);
        model.add_content(class_node);
        model.add_content(iface_node);
        model.add_content(annotation_node);
        model.add_content(enum_node);

        Fixture {
            model,
            int_node,
            void_node,
            int_ref,
            class_node,
            iface_node,
            annotation_node,
            enum_node,
            type_param,
            field_node,
            method_node,
            ctor_node,
            param_node,
            source_class,
            source_iface,
            source_fn,
            source_field,
            source_param,
        }
    }

    #[test]
    fn test_classify_is_idempotent() {
        let fx = fixture();
        let mut unit = CompilationUnit::new(UnitId(0), &fx.model);

        let first = unit.classify(fx.class_node).unwrap();
        let second = unit.classify(fx.class_node).unwrap();
        assert_eq!(first, second);
        assert_eq!(unit.declaration_count(), 1);
    }

    #[test]
    fn test_resolve_skips_factory_on_hit() {
        let fx = fixture();
        let mut unit = CompilationUnit::new(UnitId(0), &fx.model);
        let mut calls = 0;

        let first = unit.to_type(fx.int_node);
        let second = unit.resolve(fx.int_node, |_| {
            calls += 1;
            None
        });
        assert_eq!(calls, 0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_classification_covers_supported_variants() {
        let fx = fixture();
        let mut unit = CompilationUnit::new(UnitId(0), &fx.model);

        let cases = [
            (fx.class_node, DeclKind::Class),
            (fx.type_param, DeclKind::TypeParameter),
            (fx.int_node, DeclKind::Primitive),
            (fx.void_node, DeclKind::Void),
            (fx.field_node, DeclKind::Field),
            (fx.method_node, DeclKind::Method),
            (fx.ctor_node, DeclKind::Constructor),
            (fx.param_node, DeclKind::Parameter),
            (fx.int_ref, DeclKind::TypeReference),
            (fx.source_class, DeclKind::SourceClass),
            (fx.source_fn, DeclKind::SourceMethod),
            (fx.source_field, DeclKind::SourceField),
            (fx.source_param, DeclKind::SourceParameter),
        ];
        for (node, expected) in cases {
            let id = unit.classify(node).unwrap();
            assert_eq!(unit.declaration(id).kind(), expected, "node {:?}", node);
        }
    }

    #[test]
    fn test_excluded_flavors_resolve_to_absence() {
        let fx = fixture();
        let mut unit = CompilationUnit::new(UnitId(0), &fx.model);

        assert_eq!(unit.to_type_declaration(fx.iface_node), None);
        assert_eq!(unit.to_type_declaration(fx.annotation_node), None);
        assert_eq!(unit.to_type_declaration(fx.enum_node), None);
        assert_eq!(unit.to_source_type_declaration(fx.source_iface), None);
    }

    #[test]
    fn test_absence_is_memoized() {
        let fx = fixture();
        let mut unit = CompilationUnit::new(UnitId(0), &fx.model);

        assert_eq!(unit.to_type_declaration(fx.iface_node), None);
        // The absence is cached: a later resolve cannot revive the node.
        let revived = unit.resolve(fx.iface_node, |u| {
            Some(Declaration::Void(VoidDecl::new(fx.iface_node, u.id)))
        });
        assert_eq!(revived, None);
    }

    #[test]
    fn test_wrong_variant_yields_absence_without_caching() {
        let fx = fixture();
        let mut unit = CompilationUnit::new(UnitId(0), &fx.model);

        // A field is not a type; the miss must not poison later lookups.
        assert_eq!(unit.to_type(fx.field_node), None);
        let id = unit.to_member_declaration(fx.field_node).unwrap();
        assert_eq!(unit.declaration(id).kind(), DeclKind::Field);
    }

    #[test]
    fn test_member_and_type_paths_share_the_facade() {
        let fx = fixture();
        let mut unit = CompilationUnit::new(UnitId(0), &fx.model);

        let via_type = unit.to_type(fx.class_node).unwrap();
        let via_member = unit.to_member_declaration(fx.class_node).unwrap();
        let via_decl = unit.to_type_declaration(fx.class_node).unwrap();
        assert_eq!(via_type, via_member);
        assert_eq!(via_member, via_decl);
    }

    #[test]
    fn test_primitive_kind_and_void_path() {
        let fx = fixture();
        let mut unit = CompilationUnit::new(UnitId(0), &fx.model);

        let int_id = unit.to_type(fx.int_node).unwrap();
        let prim = unit.declaration(int_id).as_primitive().unwrap();
        assert_eq!(prim.kind(), Some(PrimitiveKind::Int));

        // Void classifies through its own path, never as a primitive.
        let void_id = unit.to_type(fx.void_node).unwrap();
        assert_eq!(unit.declaration(void_id).kind(), DeclKind::Void);
    }

    #[test]
    fn test_unit_level_queries() {
        let fx = fixture();
        let mut unit = CompilationUnit::new(UnitId(0), &fx.model);

        assert_eq!(unit.package_name(), "com.example");

        // The source interface is dropped; only the class survives.
        let source = unit.source_type_declarations();
        assert_eq!(source.len(), 1);
        assert_eq!(unit.source_class_declarations(), source);

        // Interface, annotation, and enumeration contents are dropped.
        let generated = unit.generated_type_declarations();
        assert_eq!(generated.len(), 1);
        let class = unit.declaration(generated[0]).as_class().unwrap();
        assert_eq!(class.simple_name(), "Counter");
        assert_eq!(unit.generated_class_declarations(), generated);
    }

    #[test]
    fn test_facades_record_their_unit() {
        let fx = fixture();
        let mut unit = CompilationUnit::new(UnitId(7), &fx.model);

        let id = unit.classify(fx.method_node).unwrap();
        assert_eq!(unit.declaration(id).unit(), UnitId(7));
        assert_eq!(unit.declaration(id).node(), fx.method_node);
    }

    #[test]
    fn test_doc_comment_is_unsupported() {
        let fx = fixture();
        let unit = CompilationUnit::new(UnitId(0), &fx.model);
        assert!(matches!(unit.doc_comment(), Err(Error::Unsupported(_))));
    }

    #[test]
    fn test_foreign_node_id_is_absent() {
        let fx = fixture();
        let mut unit = CompilationUnit::new(UnitId(0), &fx.model);
        assert_eq!(unit.classify(NodeId(9999)), None);
    }

    #[test]
    fn test_two_units_do_not_share_facades() {
        let fx = fixture();
        let mut first = CompilationUnit::new(UnitId(0), &fx.model);
        let mut second = CompilationUnit::new(UnitId(1), &fx.model);

        let a = first.classify(fx.class_node).unwrap();
        let b = second.classify(fx.class_node).unwrap();
        assert_eq!(first.declaration(a).unit(), UnitId(0));
        assert_eq!(second.declaration(b).unit(), UnitId(1));
    }

    #[test]
    fn test_visibility_reaches_the_facade() {
        let fx = fixture();
        let mut unit = CompilationUnit::new(UnitId(0), &fx.model);

        let id = unit.classify(fx.field_node).unwrap();
        assert_eq!(
            unit.declaration(id).visibility(),
            Some(Visibility::Private)
        );
    }
}
