//! Schema merging.
//!
//! Two compiled trees combine into a new one; neither operand changes.
//! Mappings merge key by key, `And` and `Or` concatenate their children and
//! every other pairing is a [`SchemaError`].
//!
//! Mapping rules, with `a` the left operand and `b` the right one:
//!
//! - exact keys are united; on a collision `b`'s node replaces `a`'s,
//! - type keys are united; a pattern declared by both sides must carry
//!   equal nodes,
//! - the result is required if either side is, and skips unknown keys only
//!   if both do,
//! - at most one side may declare a default.
//!
//! # Example
//!
//! ```
//! use dataschema_core::{MapDefinition, Schema, Value, ValueKind};
//!
//! let base = Schema::new(MapDefinition::new().key("host", ValueKind::String)).unwrap();
//! let overlay = Schema::new(MapDefinition::new().key("port", ValueKind::Int)).unwrap();
//! let merged = (&base + &overlay).unwrap();
//!
//! let data = Value::map([("host", Value::from("localhost")), ("port", Value::Int(80))]);
//! assert_eq!(merged.validate(&data).unwrap(), data);
//! assert!(base.validate(&data).is_err());
//! ```

use tracing::debug;

use crate::{MapNode, Node, NodeKind, SchemaError};

impl Node {
    /// Merges `other` into a copy of `self`.
    ///
    /// The message and description of `self` win; `other`'s are used when
    /// `self` has none. The result carries no paths until it is attached.
    pub fn merge(&self, other: &Node) -> Result<Node, SchemaError> {
        let kind = match (self.kind(), other.kind()) {
            (NodeKind::Map(a), NodeKind::Map(b)) => NodeKind::Map(merge_maps(a, b)?),
            (NodeKind::And(a), NodeKind::And(b)) => NodeKind::And(concat(a, b)),
            (NodeKind::Or(a), NodeKind::Or(b)) => NodeKind::Or(concat(a, b)),
            _ => {
                return Err(SchemaError::IncompatibleMerge {
                    left: operand_label(self),
                    right: operand_label(other),
                });
            }
        };

        let mut merged = Node::from_kind(kind);
        if let Some(message) = self.message().or(other.message()) {
            merged.set_message(message.to_string());
        }
        if let Some(description) = self.description().or(other.description()) {
            merged.set_description(description.to_string());
        }
        merged.detach();

        debug!(
            left = %operand_label(self),
            right = %operand_label(other),
            kind = merged.name(),
            "Merged nodes"
        );
        Ok(merged)
    }
}

fn merge_maps(a: &MapNode, b: &MapNode) -> Result<MapNode, SchemaError> {
    let mut keys = a.keys.clone();
    keys.extend(b.keys.iter().map(|(key, node)| (key.clone(), node.clone())));

    let mut type_keys = a.type_keys.clone();
    for (kind, node) in &b.type_keys {
        match type_keys.iter().find(|(existing, _)| existing == kind) {
            Some((_, existing)) if existing == node => {}
            Some(_) => return Err(SchemaError::DuplicateTypeKey(*kind)),
            None => type_keys.push((*kind, node.clone())),
        }
    }

    if a.default.is_some() && b.default.is_some() {
        return Err(SchemaError::ConflictingDefaults);
    }
    let default = a.default.clone().or_else(|| b.default.clone());

    Ok(MapNode::new(
        keys,
        type_keys,
        a.required || b.required,
        default,
        a.skip_unknown_keys && b.skip_unknown_keys,
    ))
}

fn concat(a: &[Node], b: &[Node]) -> Vec<Node> {
    a.iter().chain(b).cloned().collect()
}

fn operand_label(node: &Node) -> String {
    if node.path().is_empty() {
        node.name().to_string()
    } else {
        node.path().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Compiler, Definition, Map, MapDefinition, Value, ValueKind, ValueNode};

    fn compile(definition: impl Into<Definition>) -> Node {
        Compiler::new().resolve(definition).unwrap()
    }

    fn map_of(node: &Node) -> &MapNode {
        match node.kind() {
            NodeKind::Map(map) => map,
            other => panic!("expected a mapping node, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_keys_union_right_wins() {
        let a = compile(
            MapDefinition::new()
                .key("a", ValueKind::Int)
                .key("shared", ValueKind::Int),
        );
        let b = compile(
            MapDefinition::new()
                .key("b", ValueKind::Bool)
                .key("shared", ValueKind::String),
        );
        let merged = a.merge(&b).unwrap();
        let map = map_of(&merged);
        assert_eq!(map.keys().count(), 3);
        assert_eq!(map.key("shared"), Some(&Node::from(ValueNode::string())));
    }

    #[test]
    fn test_type_keys_equal_nodes_merge() {
        let a = compile(MapDefinition::new().type_key(ValueKind::String, ValueKind::Int));
        let b = compile(
            MapDefinition::new()
                .type_key(ValueKind::String, ValueKind::Int)
                .type_key(ValueKind::Int, ValueKind::Bool),
        );
        let merged = a.merge(&b).unwrap();
        let kinds: Vec<_> = map_of(&merged)
            .type_keys()
            .iter()
            .map(|(kind, _)| *kind)
            .collect();
        assert_eq!(kinds, vec![ValueKind::Int, ValueKind::String]);
    }

    #[test]
    fn test_type_keys_different_nodes_fail() {
        let a = compile(MapDefinition::new().type_key(ValueKind::String, ValueKind::Int));
        let b = compile(MapDefinition::new().type_key(ValueKind::String, ValueKind::Bool));
        assert_eq!(
            a.merge(&b),
            Err(SchemaError::DuplicateTypeKey(ValueKind::String))
        );
    }

    #[test]
    fn test_flags_and_defaults() {
        let default = Map::from([(Value::from("a"), Value::Int(1))]);
        let a = compile(
            MapDefinition::new()
                .key("a", ValueKind::Int)
                .optional()
                .skip_unknown_keys(true)
                .default(default.clone()),
        );
        let b = compile(MapDefinition::new().key("b", ValueKind::Int).skip_unknown_keys(false));
        let merged = a.merge(&b).unwrap();
        let map = map_of(&merged);
        assert!(map.is_required());
        assert!(!map.skips_unknown_keys());
        assert_eq!(map.default_value(), Some(&default));

        assert_eq!(a.merge(&a), Err(SchemaError::ConflictingDefaults));
    }

    #[test]
    fn test_and_or_concatenate() {
        let a = compile(Definition::or([ValueKind::Int]));
        let b = compile(Definition::or([ValueKind::String]));
        let merged = a.merge(&b).unwrap();
        assert!(matches!(merged.kind(), NodeKind::Or(children) if children.len() == 2));

        let a = compile(Definition::and([ValueKind::Int]));
        let b = compile(Definition::and([ValueKind::Any]));
        let merged = a.merge(&b).unwrap();
        assert!(matches!(merged.kind(), NodeKind::And(children) if children.len() == 2));
    }

    #[test]
    fn test_incompatible_kinds_fail() {
        let and = compile(Definition::and([ValueKind::Int]));
        let or = compile(Definition::or([ValueKind::Int]));
        assert_eq!(
            and.merge(&or),
            Err(SchemaError::IncompatibleMerge {
                left: "And".into(),
                right: "Or".into()
            })
        );
        assert!(compile(ValueKind::Int).merge(&compile(ValueKind::Int)).is_err());
    }

    #[test]
    fn test_message_from_left_then_right() {
        let a = compile(Definition::or([ValueKind::Int]));
        let b = compile(Definition::or([ValueKind::String]).with_message("right"));
        assert_eq!(a.merge(&b).unwrap().message(), Some("right"));
        assert_eq!(b.merge(&a).unwrap().message(), Some("right"));
    }

    #[test]
    fn test_operands_are_unchanged() {
        let a = compile(MapDefinition::new().key("a", ValueKind::Int));
        let b = compile(MapDefinition::new().key("b", ValueKind::Int));
        let before = (a.clone(), b.clone());
        let _ = a.merge(&b).unwrap();
        assert_eq!((a, b), before);
    }
}
