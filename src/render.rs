//! Signature rendering
//!
//! Produces one-line, human-readable signatures for declaration facades,
//! plus generics substitution: once a signature is rendered, bound type
//! parameters can be replaced by their concrete arguments using
//! word-boundary matching, so `T` is rewritten inside `List<T>` but left
//! alone inside `Tuple`.

use std::collections::HashMap;

use regex::{NoExpand, Regex};

use crate::decl::Declaration;
use crate::model::{Model, Node, NodeId};

/// Where the type goes in a rendered signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureStyle {
    /// `int increment(int delta)`
    #[default]
    TypeFirst,
    /// `increment(int delta) : int`
    TypeAtEnd,
}

/// Renders signatures for the facades of one model.
pub struct SignatureRenderer<'m> {
    model: &'m Model,
}

impl<'m> SignatureRenderer<'m> {
    pub fn new(model: &'m Model) -> Self {
        Self { model }
    }

    /// Render a signature in the default type-first style
    pub fn signature(&self, decl: &Declaration) -> String {
        self.styled_signature(decl, SignatureStyle::TypeFirst)
    }

    /// Render a signature in the given style
    pub fn styled_signature(&self, decl: &Declaration, style: SignatureStyle) -> String {
        match decl {
            Declaration::Class(d) => d.simple_name().to_string(),
            Declaration::SourceClass(d) => d.name().to_string(),
            Declaration::TypeParameter(d) => {
                let bounds: Vec<String> = d
                    .upper_bounds()
                    .iter()
                    .map(|b| self.type_name(*b))
                    .collect();
                if bounds.is_empty() {
                    d.name().to_string()
                } else {
                    format!("{} extends {}", d.name(), bounds.join(" & "))
                }
            }
            Declaration::Primitive(d) => d.name().to_string(),
            Declaration::Void(d) => d.name().to_string(),
            Declaration::TypeReference(d) => self.type_name(d.node()),
            Declaration::Method(d) => {
                let return_type = d
                    .return_type()
                    .map(|r| self.type_name(r))
                    .unwrap_or_else(|| "void".to_string());
                let core = format!(
                    "{}{}{}",
                    d.name(),
                    self.parameter_list(d.parameters()),
                    self.throws_clause(d.exceptions())
                );
                join_with_type(&core, &return_type, style)
            }
            Declaration::Constructor(d) => format!(
                "{}{}{}",
                d.name(),
                self.parameter_list(d.parameters()),
                self.throws_clause(d.exceptions())
            ),
            Declaration::Field(d) => {
                join_with_type(d.name(), &self.type_name(d.field_type()), style)
            }
            Declaration::Parameter(d) => {
                let mut core = d.name().to_string();
                if let Some(container) = d.container() {
                    let container_sig = self.simple_signature(container);
                    if !container_sig.is_empty() {
                        core = format!("{} - {}", core, container_sig);
                    }
                }
                join_with_type(&core, &self.type_name(d.parameter_type()), style)
            }
            Declaration::SourceMethod(d) => {
                let core = format!("{}{}", d.name(), self.parameter_list(d.parameters()));
                match d.return_type() {
                    Some(r) => join_with_type(&core, &self.type_name(r), style),
                    None => core,
                }
            }
            Declaration::SourceConstructor(d) => {
                format!("new{}", self.parameter_list(d.parameters()))
            }
            Declaration::SourceField(d) => match d.field_type() {
                Some(t) => join_with_type(d.name(), &self.type_name(t), style),
                None => d.name().to_string(),
            },
            Declaration::SourceParameter(d) => match d.parameter_type() {
                Some(t) => join_with_type(d.name(), &self.type_name(t), style),
                None => d.name().to_string(),
            },
        }
    }

    /// Render a signature and substitute the given generics bindings
    pub fn resolved_signature(
        &self,
        decl: &Declaration,
        bindings: &[(String, String)],
        style: SignatureStyle,
    ) -> String {
        replace_generics(&self.styled_signature(decl, style), bindings)
    }

    /// Display name of a type-shaped node, with type arguments rendered
    /// recursively (`Map<String, List<T>>`)
    pub fn type_name(&self, node: NodeId) -> String {
        match self.model.get(node) {
            Some(Node::TypeReference(r)) => {
                if r.arguments.is_empty() {
                    r.name.clone()
                } else {
                    let args: Vec<String> =
                        r.arguments.iter().map(|a| self.type_name(*a)).collect();
                    format!("{}<{}>", r.name, args.join(", "))
                }
            }
            Some(Node::DeclaredType(d)) => d.simple_name.clone(),
            Some(Node::TypeParameter(t)) => t.name.clone(),
            Some(Node::Primitive(p)) => p.name.clone(),
            Some(Node::Void) => "void".to_string(),
            _ => String::new(),
        }
    }

    /// `(int delta, String name)` - parameter nodes of either realm
    fn parameter_list(&self, parameters: &[NodeId]) -> String {
        let rendered: Vec<String> = parameters
            .iter()
            .filter_map(|p| match self.model.get(*p) {
                Some(Node::FormalParameter(fp)) => {
                    Some(format!("{} {}", self.type_name(fp.parameter_type), fp.name))
                }
                Some(Node::SourceParameter(sp)) => Some(match sp.parameter_type {
                    Some(t) => format!("{} {}", self.type_name(t), sp.name),
                    None => sp.name.clone(),
                }),
                _ => None,
            })
            .collect();
        format!("({})", rendered.join(", "))
    }

    /// ` throws IOException, TimeoutException` - empty without exceptions
    fn throws_clause(&self, exceptions: &[NodeId]) -> String {
        if exceptions.is_empty() {
            return String::new();
        }
        let names: Vec<String> = exceptions.iter().map(|e| self.type_name(*e)).collect();
        format!(" throws {}", names.join(", "))
    }

    /// Short signature of a parameter's declaring executable
    fn simple_signature(&self, container: NodeId) -> String {
        match self.model.get(container) {
            Some(Node::Operation(o)) => {
                format!("{}{}", o.name, self.parameter_list(&o.parameters))
            }
            Some(Node::Constructor(c)) => {
                format!("{}{}", c.name, self.parameter_list(&c.parameters))
            }
            _ => String::new(),
        }
    }
}

fn join_with_type(core: &str, type_name: &str, style: SignatureStyle) -> String {
    match style {
        SignatureStyle::TypeFirst => format!("{} {}", type_name, core),
        SignatureStyle::TypeAtEnd => format!("{} : {}", core, type_name),
    }
}

/// Substitute bound type-parameter names inside a rendered signature.
///
/// Each binding replaces whole-word occurrences only; replacement text is
/// taken literally.
pub fn replace_generics(input: &str, bindings: &[(String, String)]) -> String {
    let mut output = input.to_string();
    for (parameter, argument) in bindings {
        if parameter.is_empty() {
            continue;
        }
        let pattern = format!(r"\b{}\b", regex::escape(parameter));
        if let Ok(re) = Regex::new(&pattern) {
            output = re.replace_all(&output, NoExpand(argument)).into_owned();
        }
    }
    output
}

/// Pair up a declaration's type parameters with the arguments bound in a
/// call context. Parameters without a binding are skipped - they stay
/// unresolved in the rendered signature.
pub fn bound_pairs(
    model: &Model,
    type_parameters: &[NodeId],
    context: &HashMap<String, String>,
) -> Vec<(String, String)> {
    type_parameters
        .iter()
        .filter_map(|tp| match model.get(*tp) {
            Some(Node::TypeParameter(t)) => context
                .get(&t.name)
                .map(|bound| (t.name.clone(), bound.clone())),
            _ => None,
        })
        .collect()
}
