//! Compiled schema nodes.
//!
//! A [`Node`] is one element of a compiled schema tree. The variant in
//! [`NodeKind`] decides how it validates; the shared fields carry the
//! diagnostic path, an optional message override and a description.

use serde_json::json;

use crate::combinator;
use crate::decorator::Constraint;
use crate::{Convert, ListNode, MapNode, SchemaOptions, ValidationError, Value, ValueNode};

/// What a node validates.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Exact match against a literal value.
    Literal(Value),
    /// Runtime type check with required/default handling.
    Value(ValueNode),
    /// Keyed mapping with exact and type-pattern keys.
    Map(MapNode),
    /// Homogeneous sequence.
    List(ListNode),
    /// Every child in order, each fed the previous child's output.
    And(Vec<Node>),
    /// First child that accepts the value.
    Or(Vec<Node>),
    /// Secondary constraint, optionally applied to a wrapped node's output.
    Decorator {
        /// Node validated before the constraint, if any.
        base: Option<Box<Node>>,
        /// The constraint itself.
        constraint: Constraint,
    },
    /// String parsed into another kind.
    Convert(Convert),
}

/// A compiled schema element.
///
/// Nodes are usually produced by the [`Compiler`](crate::Compiler) and owned
/// by a [`Schema`](crate::Schema), which assigns every path in the tree. A
/// node that was never attached keeps an empty path.
///
/// Equality ignores paths: two nodes are equal when they validate the same
/// way.
///
/// # Examples
///
/// ```
/// use dataschema_core::{Node, Value, ValueNode};
///
/// let node = Node::from(ValueNode::int().default(3));
/// assert_eq!(node.validate(&Value::Null).unwrap(), Value::Int(3));
/// assert_eq!(node.path(), "");
/// ```
#[derive(Debug, Clone)]
pub struct Node {
    path: String,
    message: Option<String>,
    description: Option<String>,
    kind: NodeKind,
}

impl Node {
    pub(crate) fn from_kind(kind: NodeKind) -> Self {
        Self {
            path: String::new(),
            message: None,
            description: None,
            kind,
        }
    }

    /// Creates a node that only accepts `value`.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::from_kind(NodeKind::Literal(value.into()))
    }

    /// Replaces generated failure messages of this node (not its children).
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a description, shown by [`describe`](Node::describe).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    pub(crate) fn set_description(&mut self, description: String) {
        self.description = Some(description);
    }

    /// Diagnostic path, e.g. `Schema -> Dict:name -> String`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Class name used as this node's path segment.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Literal(_) => "Value",
            NodeKind::Value(value) => value.name(),
            NodeKind::Map(_) => "Dict",
            NodeKind::List(_) => "List",
            NodeKind::And(_) => "And",
            NodeKind::Or(_) => "Or",
            NodeKind::Decorator { constraint, .. } => constraint.name(),
            NodeKind::Convert(convert) => convert.name(),
        }
    }

    /// Assigns paths to this node and, top-down, to all of its children.
    ///
    /// The node's path becomes `<parent> -> <name>`, or just `<name>` without
    /// a parent. Any previously assigned paths are overwritten.
    pub fn attach(&mut self, parent: Option<&str>) {
        let segment = match &self.kind {
            NodeKind::Literal(value) => format!("<Value [{value}]>"),
            _ => self.name().to_string(),
        };
        self.path = match parent {
            Some(parent) if !parent.is_empty() => format!("{parent} -> {segment}"),
            _ => segment,
        };

        let path = self.path.clone();
        match &mut self.kind {
            NodeKind::Map(map) => map.attach_children(&path),
            NodeKind::List(list) => list.element_mut().attach(Some(&path)),
            NodeKind::And(children) | NodeKind::Or(children) => {
                for child in children {
                    child.attach(Some(&path));
                }
            }
            NodeKind::Decorator {
                base: Some(base), ..
            } => base.attach(Some(&path)),
            _ => {}
        }
    }

    /// Clears the paths of this node and all of its children.
    pub(crate) fn detach(&mut self) {
        self.path.clear();
        match &mut self.kind {
            NodeKind::Map(map) => map.detach_children(),
            NodeKind::List(list) => list.element_mut().detach(),
            NodeKind::And(children) | NodeKind::Or(children) => {
                children.iter_mut().for_each(Node::detach);
            }
            NodeKind::Decorator {
                base: Some(base), ..
            } => base.detach(),
            _ => {}
        }
    }

    /// Validates `value` with default [`SchemaOptions`].
    ///
    /// The input is only borrowed; the result is a new, possibly defaulted
    /// value.
    pub fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        self.validate_with(value, &SchemaOptions::default())
    }

    /// Validates `value` under the given options.
    pub fn validate_with(
        &self,
        value: &Value,
        options: &SchemaOptions,
    ) -> Result<Value, ValidationError> {
        match &self.kind {
            NodeKind::Literal(expected) => {
                if !value.literal_eq(expected) {
                    return Err(self.reject(ValidationError::LiteralMismatch {
                        path: self.path.clone(),
                        expected: expected.clone(),
                        actual: value.clone(),
                    }));
                }
                Ok(value.clone())
            }
            NodeKind::Value(node) => node.validate(self, value, options),
            NodeKind::Map(map) => map.validate(self, value, options),
            NodeKind::List(list) => list.validate(self, value, options),
            NodeKind::And(children) => combinator::validate_all(children, value, options),
            NodeKind::Or(children) => combinator::validate_any(self, children, value, options),
            NodeKind::Decorator { base, constraint } => {
                let value = match base {
                    Some(base) => base.validate_with(value, options)?,
                    None => value.clone(),
                };
                constraint.check(self, value, options)
            }
            NodeKind::Convert(convert) => convert.validate(self, value, options),
        }
    }

    /// Applies this node's message override to one of its own failures.
    pub(crate) fn reject(&self, error: ValidationError) -> ValidationError {
        match &self.message {
            Some(message) => ValidationError::Custom {
                path: self.path.clone(),
                message: message.clone(),
            },
            None => error,
        }
    }

    /// Read-only structured view of the compiled tree.
    ///
    /// Every node reports `class`, `path` and `desc`; kind-specific fields
    /// (required, default, children, bounds, ...) follow.
    ///
    /// # Examples
    ///
    /// ```
    /// use dataschema_core::{Schema, ValueKind};
    ///
    /// let schema = Schema::new(ValueKind::Int).unwrap();
    /// let view = schema.root().describe();
    /// assert_eq!(view["class"], "Int");
    /// assert_eq!(view["path"], "Schema -> Int");
    /// assert_eq!(view["required"], true);
    /// ```
    pub fn describe(&self) -> serde_json::Value {
        let mut out = serde_json::Map::new();
        out.insert("class".into(), json!(self.name()));
        out.insert("path".into(), json!(self.path));
        out.insert("desc".into(), json!(self.description));
        if let Some(message) = &self.message {
            out.insert("msg".into(), json!(message));
        }

        match &self.kind {
            NodeKind::Literal(value) => {
                out.insert("expected_value".into(), to_json(value));
            }
            NodeKind::Value(node) => node.describe_into(&mut out),
            NodeKind::Map(map) => map.describe_into(&mut out),
            NodeKind::List(list) => {
                out.insert("element".into(), list.element().describe());
            }
            NodeKind::And(children) | NodeKind::Or(children) => {
                let children: Vec<_> = children.iter().map(Node::describe).collect();
                out.insert("children".into(), json!(children));
            }
            NodeKind::Decorator { base, constraint } => {
                constraint.describe_into(&mut out);
                if let Some(base) = base {
                    out.insert("wrapped".into(), base.describe());
                }
            }
            NodeKind::Convert(convert) => convert.describe_into(&mut out),
        }

        serde_json::Value::Object(out)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.message == other.message
            && self.description == other.description
    }
}

/// Renders a data value for the describe view.
///
/// Mappings whose keys JSON can't represent fall back to the display form.
pub(crate) fn to_json(value: &Value) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|_| json!(value.to_string()))
}
