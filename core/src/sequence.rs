//! Homogeneous sequence ("List") nodes.

use crate::{Node, NodeKind, SchemaOptions, ValidationError, Value, ValueKind};

/// Validates every element of a list against one element node.
///
/// Null is not a list: a `List` node always rejects it. Wrap the node in an
/// `Or` with a null literal when a list may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    element: Box<Node>,
}

impl ListNode {
    pub(crate) fn new(element: Node) -> Self {
        Self {
            element: Box::new(element),
        }
    }

    /// The node every element is validated against.
    pub fn element(&self) -> &Node {
        &self.element
    }

    pub(crate) fn element_mut(&mut self) -> &mut Node {
        &mut self.element
    }

    pub(crate) fn validate(
        &self,
        node: &Node,
        value: &Value,
        options: &SchemaOptions,
    ) -> Result<Value, ValidationError> {
        let Value::List(items) = value else {
            return Err(node.reject(ValidationError::TypeMismatch {
                path: node.path().to_string(),
                expected: ValueKind::List,
                actual: value.kind(),
                value: value.clone(),
            }));
        };

        items
            .iter()
            .map(|item| self.element.validate_with(item, options))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    }
}

impl From<ListNode> for Node {
    fn from(value: ListNode) -> Self {
        Node::from_kind(NodeKind::List(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueNode;

    fn list_of(element: impl Into<Node>) -> Node {
        let mut node = Node::from(ListNode::new(element.into()));
        node.attach(Some("testbase"));
        node
    }

    #[test]
    fn test_validates_each_element() {
        let node = list_of(ValueNode::int());
        let input = Value::list([1, 2, 3]);
        assert_eq!(node.validate(&input).unwrap(), input);
        assert_eq!(
            node.validate(&Value::List(vec![])).unwrap(),
            Value::List(vec![])
        );
    }

    #[test]
    fn test_element_failure_carries_element_path() {
        let node = list_of(ValueNode::int());
        let err = node
            .validate(&Value::List(vec![Value::Int(1), Value::from("2")]))
            .unwrap_err();
        assert_eq!(err.path(), "testbase -> List -> Int");
    }

    #[test]
    fn test_defaults_apply_to_null_elements() {
        let node = list_of(ValueNode::int().default(0));
        let input = Value::List(vec![Value::Int(5), Value::Null]);
        assert_eq!(node.validate(&input).unwrap(), Value::list([5, 0]));
    }

    #[test]
    fn test_null_and_non_list_are_rejected() {
        let node = list_of(ValueNode::int());
        assert!(matches!(
            node.validate(&Value::Null),
            Err(ValidationError::TypeMismatch {
                expected: ValueKind::List,
                actual: ValueKind::Null,
                ..
            })
        ));
        assert!(node.validate(&Value::from("123")).is_err());
        assert!(node.validate(&Value::map([("a", 1)])).is_err());
    }
}
