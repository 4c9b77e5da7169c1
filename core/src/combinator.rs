//! Conjunction and disjunction of nodes.
//!
//! `And` threads a value through its children, so a converting or defaulting
//! child feeds the next one. `Or` returns the first child's success and keeps
//! every branch failure otherwise.

use tracing::trace;

use crate::{Node, SchemaOptions, ValidationError, Value};

/// Runs every child in order, each on the previous child's output.
///
/// An empty conjunction returns the value unchanged.
pub(crate) fn validate_all(
    children: &[Node],
    value: &Value,
    options: &SchemaOptions,
) -> Result<Value, ValidationError> {
    children
        .iter()
        .try_fold(value.clone(), |current, child| {
            child.validate_with(&current, options)
        })
}

/// Returns the first child's successful output.
///
/// An empty disjunction accepts nothing.
pub(crate) fn validate_any(
    node: &Node,
    children: &[Node],
    value: &Value,
    options: &SchemaOptions,
) -> Result<Value, ValidationError> {
    let mut attempts = Vec::with_capacity(children.len());
    for child in children {
        match child.validate_with(value, options) {
            Ok(validated) => return Ok(validated),
            Err(err) => {
                trace!(path = %child.path(), error = %err, "Or branch rejected value");
                attempts.push(err);
            }
        }
    }

    Err(node.reject(ValidationError::NoMatch {
        path: node.path().to_string(),
        value: value.clone(),
        attempts,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeKind, ValueNode};

    fn and(children: Vec<Node>) -> Node {
        let mut node = Node::from_kind(NodeKind::And(children));
        node.attach(Some("testbase"));
        node
    }

    fn or(children: Vec<Node>) -> Node {
        let mut node = Node::from_kind(NodeKind::Or(children));
        node.attach(Some("testbase"));
        node
    }

    #[test]
    fn test_and_threads_defaults_through_children() {
        let node = and(vec![
            ValueNode::int().default(1).into(),
            Node::literal(1),
        ]);
        assert_eq!(node.validate(&Value::Null).unwrap(), Value::Int(1));
        assert!(node.validate(&Value::Int(2)).is_err());
    }

    #[test]
    fn test_empty_and_passes_value_through() {
        let node = and(vec![]);
        assert_eq!(node.validate(&Value::from("x")).unwrap(), Value::from("x"));
    }

    #[test]
    fn test_or_returns_first_match() {
        let node = or(vec![ValueNode::int().into(), ValueNode::string().into()]);
        assert_eq!(node.validate(&Value::Int(1)).unwrap(), Value::Int(1));
        assert_eq!(node.validate(&Value::from("a")).unwrap(), Value::from("a"));
        assert!(node.validate(&Value::Float(1.5)).is_err());
    }

    #[test]
    fn test_or_keeps_every_branch_failure() {
        let node = or(vec![ValueNode::int().into(), ValueNode::string().into()]);
        let err = node.validate(&Value::Bool(true)).unwrap_err();
        let ValidationError::NoMatch { path, attempts, .. } = err else {
            panic!("expected NoMatch");
        };
        assert_eq!(path, "testbase -> Or");
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].path(), "testbase -> Or -> Int");
        assert_eq!(attempts[1].path(), "testbase -> Or -> String");
    }

    #[test]
    fn test_empty_or_rejects_everything() {
        let node = or(vec![]);
        assert!(node.validate(&Value::Null).is_err());
        assert!(node.validate(&Value::Int(0)).is_err());
    }

    #[test]
    fn test_or_message_override() {
        let mut node = Node::from_kind(NodeKind::Or(vec![ValueNode::int().into()]))
            .with_message("Failing test");
        node.attach(Some("Schema"));
        let err = node.validate(&Value::from("x")).unwrap_err();
        assert_eq!(err.to_string(), "Failing test");
        assert_eq!(err.path(), "Schema -> Or");
    }
}
