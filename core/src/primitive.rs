//! Primitive value nodes.
//!
//! A [`ValueNode`] checks the runtime kind of a scalar (or of any value, for
//! [`ValueKind::Any`]) and owns the required/default semantics that every
//! other node defers to.

use serde_json::json;

use crate::node::to_json;
use crate::{Node, NodeKind, SchemaOptions, ValidationError, Value, ValueKind};

/// Type check with required/default handling.
///
/// Null (or a missing mapping key) resolves to the default first; a
/// remaining null fails only when the node is required.
///
/// # Examples
///
/// ```
/// use dataschema_core::{Node, Value, ValueNode};
///
/// let debug = Node::from(ValueNode::boolean().default(false));
/// assert_eq!(debug.validate(&Value::Null).unwrap(), Value::Bool(false));
///
/// let port = Node::from(ValueNode::int().optional());
/// assert_eq!(port.validate(&Value::Null).unwrap(), Value::Null);
/// assert!(port.validate(&Value::from("8080")).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValueNode {
    kind: ValueKind,
    required: bool,
    default: Option<Value>,
}

impl ValueNode {
    /// Creates a required node without default for `kind`.
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            required: true,
            default: None,
        }
    }

    /// Accepts any non-null value.
    pub fn object() -> Self {
        Self::new(ValueKind::Any)
    }

    pub fn boolean() -> Self {
        Self::new(ValueKind::Bool)
    }

    pub fn int() -> Self {
        Self::new(ValueKind::Int)
    }

    pub fn float() -> Self {
        Self::new(ValueKind::Float)
    }

    /// Accepts [`Value::Decimal`] only; parse strings with [`Convert::to_decimal`](crate::Convert::to_decimal).
    pub fn decimal() -> Self {
        Self::new(ValueKind::Decimal)
    }

    /// Accepts integers, floats and decimals.
    pub fn number() -> Self {
        Self::new(ValueKind::Number)
    }

    pub fn string() -> Self {
        Self::new(ValueKind::String)
    }

    pub fn bytes() -> Self {
        Self::new(ValueKind::Bytes)
    }

    /// Sets whether null is rejected after defaulting.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Shorthand for `required(false)`.
    pub fn optional(self) -> Self {
        self.required(false)
    }

    /// Sets the value used when the input is null. A null default clears it.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.default = (!value.is_null()).then_some(value);
        self
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub(crate) fn name(&self) -> &'static str {
        match self.kind {
            ValueKind::Any => "Object",
            ValueKind::Null => "Null",
            ValueKind::Bool => "Bool",
            ValueKind::Int => "Int",
            ValueKind::Float => "Float",
            ValueKind::Decimal => "Decimal",
            ValueKind::Number => "Number",
            ValueKind::String => "String",
            ValueKind::Bytes => "Bytes",
            ValueKind::List => "Sequence",
            ValueKind::Map => "Mapping",
        }
    }

    pub(crate) fn validate(
        &self,
        node: &Node,
        value: &Value,
        options: &SchemaOptions,
    ) -> Result<Value, ValidationError> {
        let value = match (value, &self.default) {
            (Value::Null, Some(default)) => default.clone(),
            (value, _) => value.clone(),
        };

        if value.is_null() {
            if self.required {
                return Err(node.reject(ValidationError::Required {
                    path: node.path().to_string(),
                }));
            }
            return Ok(Value::Null);
        }

        if !self.kind.accepts(&value, options.bool_is_int) {
            return Err(node.reject(ValidationError::TypeMismatch {
                path: node.path().to_string(),
                expected: self.kind,
                actual: value.kind(),
                value,
            }));
        }

        Ok(value)
    }

    pub(crate) fn describe_into(&self, out: &mut serde_json::Map<String, serde_json::Value>) {
        out.insert("value_type".into(), json!(self.kind));
        out.insert("required".into(), json!(self.required));
        out.insert(
            "default".into(),
            self.default.as_ref().map_or(serde_json::Value::Null, to_json),
        );
    }
}

impl From<ValueNode> for Node {
    fn from(value: ValueNode) -> Self {
        Node::from_kind(NodeKind::Value(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attached(value: ValueNode) -> Node {
        let mut node = Node::from(value);
        node.attach(Some("testbase"));
        node
    }

    #[test]
    fn test_required_and_default_matrix() {
        let null = Value::Null;
        assert!(attached(ValueNode::int()).validate(&null).is_err());
        assert_eq!(
            attached(ValueNode::int().optional()).validate(&null).unwrap(),
            Value::Null
        );
        assert_eq!(
            attached(ValueNode::int().optional().default(1))
                .validate(&null)
                .unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            attached(ValueNode::int().required(true).default(1))
                .validate(&null)
                .unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            attached(ValueNode::int().optional().default(Value::Null))
                .validate(&null)
                .unwrap(),
            Value::Null
        );
        assert!(
            attached(ValueNode::int().default(Value::Null))
                .validate(&null)
                .is_err()
        );
    }

    #[test]
    fn test_required_error_names_path() {
        let err = attached(ValueNode::int()).validate(&Value::Null).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                path: "testbase -> Int".into()
            }
        );
    }

    #[test]
    fn test_type_mismatch_reports_expected_and_actual() {
        let err = attached(ValueNode::int())
            .validate(&Value::from("1"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"testbase -> Int expected int but got string (value: "1")"#
        );
    }

    #[test]
    fn test_bool_is_not_int_unless_enabled() {
        let node = attached(ValueNode::int());
        assert!(node.validate(&Value::Bool(true)).is_err());

        let lenient = SchemaOptions { bool_is_int: true };
        assert_eq!(
            node.validate_with(&Value::Bool(false), &lenient).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_bool_rejects_int() {
        let node = attached(ValueNode::boolean());
        assert_eq!(node.validate(&Value::Bool(true)).unwrap(), Value::Bool(true));
        assert!(node.validate(&Value::Int(1)).is_err());
        assert!(node.validate(&Value::from("true")).is_err());
    }

    #[test]
    fn test_object_accepts_anything_but_null() {
        let node = attached(ValueNode::object());
        assert!(node.validate(&Value::Bool(true)).is_ok());
        assert!(node.validate(&Value::Int(1)).is_ok());
        assert!(node.validate(&Value::from("t")).is_ok());
        assert!(node.validate(&Value::Null).is_err());
        assert_eq!(
            attached(ValueNode::object().optional())
                .validate(&Value::Null)
                .unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_string_and_bytes_are_distinct() {
        assert!(attached(ValueNode::string()).validate(&Value::from("a")).is_ok());
        assert!(
            attached(ValueNode::string())
                .validate(&Value::Bytes(b"a".to_vec()))
                .is_err()
        );
        assert!(
            attached(ValueNode::bytes())
                .validate(&Value::Bytes(b"test".to_vec()))
                .is_ok()
        );
        assert!(attached(ValueNode::bytes()).validate(&Value::from("test")).is_err());
    }

    #[test]
    fn test_number_accepts_int_and_float() {
        let node = attached(ValueNode::number());
        assert!(node.validate(&Value::Int(1)).is_ok());
        assert!(node.validate(&Value::Float(1.5)).is_ok());
        assert!(node.validate(&Value::from("1")).is_err());
    }

    #[test]
    fn test_decimal_accepts_only_decimals() {
        let price = rust_decimal::Decimal::new(820, 2);
        let node = attached(ValueNode::decimal());
        assert_eq!(node.validate(&Value::Decimal(price)).unwrap(), Value::Decimal(price));
        assert!(node.validate(&Value::Float(8.2)).is_err());
        assert!(node.validate(&Value::from("8.20")).is_err());
        assert!(attached(ValueNode::number()).validate(&Value::Decimal(price)).is_ok());
    }

    #[test]
    fn test_describe_reports_metadata() {
        let view = attached(ValueNode::boolean().default(false)).describe();
        assert_eq!(view["class"], "Bool");
        assert_eq!(view["value_type"], "bool");
        assert_eq!(view["required"], true);
        assert_eq!(view["default"], false);
    }
}
