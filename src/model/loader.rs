//! JSON model loader
//!
//! Deserializes a model document into a validated [`Model`]. Documents are
//! plain JSON: a package name, a node array (each entry tagged with its
//! `node` variant), and index lists for source types and resource contents.
//! Every cross-reference is checked on load so downstream code can trust
//! node ids without re-validating.

use super::{Model, NodeId};
use crate::{Error, Result};
use std::path::Path;

/// Load a model document from a file
pub fn load_model(path: &Path) -> Result<Model> {
    let contents = std::fs::read_to_string(path)?;
    from_json(&contents)
}

/// Parse a model document from a JSON string
pub fn from_json(text: &str) -> Result<Model> {
    let model: Model = serde_json::from_str(text)?;
    validate(&model)?;
    Ok(model)
}

/// Check that every node reference points inside the arena
fn validate(model: &Model) -> Result<()> {
    let check = |id: NodeId, context: &str| -> Result<()> {
        if model.get(id).is_none() {
            return Err(Error::Model(format!(
                "{} references node {} but the model has {} nodes",
                context,
                id.0,
                model.len()
            )));
        }
        Ok(())
    };

    for (id, node) in model.iter() {
        for referenced in node.references() {
            check(
                referenced,
                &format!("{} node {}", node.variant_name(), id.0),
            )?;
        }
    }
    for &id in model.source_types() {
        check(id, "source type list")?;
    }
    for &id in model.contents() {
        check(id, "resource contents")?;
    }
    Ok(())
}
