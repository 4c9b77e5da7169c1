//! Mapping ("Dict") nodes.
//!
//! A mapping node validates exact keys first, then hands each remaining entry
//! to the first type-key pattern whose kind matches the entry's key. Type
//! keys are kept most-specific first (booleans before integers before
//! numbers before any), ties in declaration order.

use std::collections::BTreeMap;

use serde_json::json;

use crate::node::to_json;
use crate::{Map, Node, NodeKind, SchemaOptions, ValidationError, Value, ValueKind};

/// Compiled mapping node.
///
/// Built by the [`Compiler`](crate::Compiler) from a
/// [`MapDefinition`](crate::MapDefinition); merging two mapping nodes with
/// [`Node::merge`] creates a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct MapNode {
    pub(crate) keys: BTreeMap<Value, Node>,
    pub(crate) type_keys: Vec<(ValueKind, Node)>,
    pub(crate) required: bool,
    pub(crate) default: Option<Map>,
    pub(crate) skip_unknown_keys: bool,
}

impl MapNode {
    pub(crate) fn new(
        keys: BTreeMap<Value, Node>,
        mut type_keys: Vec<(ValueKind, Node)>,
        required: bool,
        default: Option<Map>,
        skip_unknown_keys: bool,
    ) -> Self {
        // Stable: equally specific patterns keep declaration order.
        type_keys.sort_by_key(|(kind, _)| std::cmp::Reverse(kind.specificity()));
        Self {
            keys,
            type_keys,
            required,
            default,
            skip_unknown_keys,
        }
    }

    /// Node registered for the exact key `key`.
    pub fn key(&self, key: impl Into<Value>) -> Option<&Node> {
        self.keys.get(&key.into())
    }

    /// Exact keys and their nodes, in key order.
    pub fn keys(&self) -> impl Iterator<Item = (&Value, &Node)> {
        self.keys.iter()
    }

    /// Type-key patterns in matching order.
    pub fn type_keys(&self) -> &[(ValueKind, Node)] {
        &self.type_keys
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Map> {
        self.default.as_ref()
    }

    pub fn skips_unknown_keys(&self) -> bool {
        self.skip_unknown_keys
    }

    pub(crate) fn attach_children(&mut self, path: &str) {
        for (key, node) in &mut self.keys {
            node.attach(Some(&format!("{path}:{}", key.label())));
        }
        for (kind, node) in &mut self.type_keys {
            node.attach(Some(&format!("{path}:<{kind}>")));
        }
    }

    pub(crate) fn detach_children(&mut self) {
        self.keys.values_mut().for_each(Node::detach);
        self.type_keys.iter_mut().for_each(|(_, node)| node.detach());
    }

    pub(crate) fn validate(
        &self,
        node: &Node,
        value: &Value,
        options: &SchemaOptions,
    ) -> Result<Value, ValidationError> {
        let input = match value {
            Value::Null => {
                if let Some(default) = &self.default {
                    return Ok(Value::Map(default.clone()));
                }
                if self.required {
                    return Err(node.reject(ValidationError::Required {
                        path: node.path().to_string(),
                    }));
                }
                return Ok(Value::Null);
            }
            Value::Map(map) => map,
            other => {
                return Err(node.reject(ValidationError::TypeMismatch {
                    path: node.path().to_string(),
                    expected: ValueKind::Map,
                    actual: other.kind(),
                    value: other.clone(),
                }));
            }
        };

        let mut remaining = input.clone();
        let mut result = Map::new();

        for (key, child) in &self.keys {
            let item = remaining.remove(key).unwrap_or(Value::Null);
            result.insert(key.clone(), child.validate_with(&item, options)?);
        }

        let mut unknown = Vec::new();
        for (key, item) in remaining {
            let pattern = self
                .type_keys
                .iter()
                .find(|(kind, _)| kind.accepts(&key, options.bool_is_int));
            match pattern {
                Some((_, child)) => {
                    let validated = child.validate_with(&item, options)?;
                    result.insert(key, validated);
                }
                None => unknown.push(key),
            }
        }

        if !unknown.is_empty() && !self.skip_unknown_keys {
            return Err(node.reject(ValidationError::UnknownKeys {
                path: node.path().to_string(),
                keys: unknown,
            }));
        }

        Ok(Value::Map(result))
    }

    pub(crate) fn describe_into(&self, out: &mut serde_json::Map<String, serde_json::Value>) {
        out.insert("required".into(), json!(self.required));
        out.insert("skip_unknown_keys".into(), json!(self.skip_unknown_keys));
        out.insert(
            "default".into(),
            self.default
                .as_ref()
                .map_or(serde_json::Value::Null, |map| to_json(&Value::Map(map.clone()))),
        );

        let keys: serde_json::Map<_, _> = self
            .keys
            .iter()
            .map(|(key, node)| (key.label(), node.describe()))
            .collect();
        out.insert("keys".into(), serde_json::Value::Object(keys));

        let type_keys: Vec<_> = self
            .type_keys
            .iter()
            .map(|(kind, node)| json!({ "key_type": kind, "node": node.describe() }))
            .collect();
        out.insert("type_keys".into(), json!(type_keys));
    }
}

impl From<MapNode> for Node {
    fn from(value: MapNode) -> Self {
        Node::from_kind(NodeKind::Map(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Compiler, MapDefinition, ValueNode};

    fn compile(definition: MapDefinition) -> Node {
        let mut node = Compiler::new().resolve(definition).unwrap();
        node.attach(Some("testbase"));
        node
    }

    #[test]
    fn test_exact_keys_and_missing_optional_key() {
        let node = compile(MapDefinition::new().key("a", ValueKind::Int));
        let input = Value::map([("a", 1)]);
        assert_eq!(node.validate(&input).unwrap(), input);

        let node = compile(MapDefinition::new().key("a", ValueNode::int().optional()));
        assert_eq!(
            node.validate(&Value::map(Vec::<(Value, Value)>::new()))
                .unwrap(),
            Value::map([("a", Value::Null)])
        );
    }

    #[test]
    fn test_non_map_input_is_rejected() {
        let node = compile(MapDefinition::new().key("a", ValueKind::Int));
        let err = node.validate(&Value::Int(1)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TypeMismatch {
                expected: ValueKind::Map,
                actual: ValueKind::Int,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_keys_rejected_or_dropped() {
        let input = Value::map([("a", 1), ("b", 2)]);

        let strict = compile(MapDefinition::new().key("a", ValueKind::Int));
        let err = strict.validate(&input).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownKeys {
                path: "testbase -> Dict".into(),
                keys: vec![Value::from("b")],
            }
        );

        let lenient = compile(
            MapDefinition::new()
                .key("a", ValueKind::Int)
                .skip_unknown_keys(true),
        );
        assert_eq!(lenient.validate(&input).unwrap(), Value::map([("a", 1)]));
    }

    #[test]
    fn test_null_input_uses_default_or_required() {
        let default = Map::from([(Value::from("a"), Value::Int(1))]);
        let node = compile(
            MapDefinition::new()
                .key("a", ValueKind::Int)
                .default(default.clone()),
        );
        assert_eq!(node.validate(&Value::Null).unwrap(), Value::Map(default));

        let required = compile(MapDefinition::new().key("a", ValueKind::Int));
        assert!(required.validate(&Value::Null).is_err());

        let optional = compile(MapDefinition::new().key("a", ValueKind::Int).optional());
        assert_eq!(optional.validate(&Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_type_keys_validate_remaining_entries() {
        let node = compile(MapDefinition::new().type_key(ValueKind::String, ValueKind::Int));
        let input = Value::map([("a", 1), ("b", 2)]);
        assert_eq!(node.validate(&input).unwrap(), input);
        assert!(node.validate(&Value::map([("a", "x")])).is_err());
        assert!(node.validate(&Value::map([(1, 1)])).is_err());
    }

    #[test]
    fn test_type_keys_sorted_most_specific_first() {
        let node = compile(
            MapDefinition::new()
                .type_key(ValueKind::Any, ValueKind::String)
                .type_key(ValueKind::Number, ValueKind::Float)
                .type_key(ValueKind::Int, ValueKind::Bool),
        );
        let NodeKind::Map(map) = node.kind() else {
            panic!("expected a mapping node");
        };
        let order: Vec<_> = map.type_keys().iter().map(|(kind, _)| *kind).collect();
        assert_eq!(order, vec![ValueKind::Int, ValueKind::Number, ValueKind::Any]);

        let input = Value::map([
            (Value::Int(1), Value::Bool(true)),
            (Value::Float(1.5), Value::Float(2.0)),
            (Value::from("k"), Value::from("v")),
        ]);
        assert_eq!(node.validate(&input).unwrap(), input);
    }

    #[test]
    fn test_exact_key_wins_over_type_key() {
        let node = compile(
            MapDefinition::new()
                .key("a", ValueKind::Int)
                .type_key(ValueKind::String, ValueKind::String),
        );
        let input = Value::map([("a", Value::Int(1)), ("b", Value::from("x"))]);
        assert_eq!(node.validate(&input).unwrap(), input);
        assert!(node.validate(&Value::map([("a", "x")])).is_err());
    }

    #[test]
    fn test_child_paths_include_key() {
        let node = compile(
            MapDefinition::new()
                .key("a", ValueKind::Int)
                .type_key(ValueKind::String, ValueKind::Int),
        );
        let NodeKind::Map(map) = node.kind() else {
            panic!("expected a mapping node");
        };
        assert_eq!(map.key("a").unwrap().path(), "testbase -> Dict:a -> Int");
        assert_eq!(
            map.type_keys()[0].1.path(),
            "testbase -> Dict:<string> -> Int"
        );
    }

    #[test]
    fn test_input_is_not_mutated() {
        let node = compile(
            MapDefinition::new()
                .key("a", ValueKind::Int)
                .key("b", ValueKind::Bool)
                .key("c", ValueNode::int().default(4)),
        );
        let input = Value::map([("a", Value::Int(1)), ("b", Value::Bool(true))]);
        let before = input.clone();
        let output = node.validate(&input).unwrap();
        assert_eq!(input, before);
        assert_eq!(
            output,
            Value::map([
                ("a", Value::Int(1)),
                ("b", Value::Bool(true)),
                ("c", Value::Int(4)),
            ])
        );
    }
}
