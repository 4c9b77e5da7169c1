//! The compiled, validating schema.

use std::fmt;
use std::ops::Add;

use serde_json::json;
use tracing::debug;

use crate::{Compiler, Definition, Node, SchemaError, SchemaOptions, ValidationError, Value};

const ROOT: &str = "Schema";

/// A compiled definition plus the options it validates under.
///
/// The tree is read-only after construction, so one schema can validate from
/// many threads at once.
///
/// # Examples
///
/// ```
/// use dataschema_core::{Decorate, MapDefinition, Range, Schema, Value, ValueKind, ValueNode};
///
/// let schema = Schema::new(
///     MapDefinition::new()
///         .key("name", ValueKind::String)
///         .key("version", Range::min(1).wrap(ValueKind::Int))
///         .key("debug", ValueNode::boolean().default(false)),
/// )
/// .unwrap();
///
/// let config = Value::map([("name", Value::from("svc")), ("version", Value::Int(2))]);
/// assert_eq!(
///     schema.validate(&config).unwrap(),
///     Value::map([
///         ("name", Value::from("svc")),
///         ("version", Value::Int(2)),
///         ("debug", Value::Bool(false)),
///     ])
/// );
///
/// let err = schema.validate(&Value::map([("version", 0)])).unwrap_err();
/// assert_eq!(err.path(), "Schema -> Dict:name -> String");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    root: Node,
    options: SchemaOptions,
}

impl Schema {
    /// Compiles `definition` with the builtin registry and default options.
    pub fn new(definition: impl Into<Definition>) -> Result<Self, SchemaError> {
        Compiler::new().schema(definition)
    }

    /// Compiles `definition` with the builtin registry.
    pub fn with_options(
        definition: impl Into<Definition>,
        options: SchemaOptions,
    ) -> Result<Self, SchemaError> {
        Compiler::with_options(options).schema(definition)
    }

    pub(crate) fn from_root(mut root: Node, options: SchemaOptions) -> Self {
        root.attach(Some(ROOT));
        debug!(root = root.path(), ?options, "Compiled schema");
        Self { root, options }
    }

    /// Validates `value`, returning a new value with defaults filled in.
    pub fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        self.root.validate_with(value, &self.options)
    }

    /// Combines two schemas; see [`Node::merge`] for the rules.
    ///
    /// The merged schema uses the stricter options of the two.
    pub fn merge(&self, other: &Schema) -> Result<Schema, SchemaError> {
        let root = self.root.merge(&other.root)?;
        Ok(Self::from_root(root, self.options.strictest(other.options)))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub(crate) fn into_root(self) -> Node {
        self.root
    }

    pub fn options(&self) -> SchemaOptions {
        self.options
    }

    /// Structured view of the whole tree.
    pub fn describe(&self) -> serde_json::Value {
        json!({
            "name": ROOT,
            "options": self.options,
            "definition": self.root.describe(),
        })
    }
}

/// Pretty-printed [`describe`](Schema::describe) output.
impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string_pretty(&self.describe()).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl Add for Schema {
    type Output = Result<Schema, SchemaError>;

    fn add(self, other: Schema) -> Self::Output {
        self.merge(&other)
    }
}

impl Add<&Schema> for &Schema {
    type Output = Result<Schema, SchemaError>;

    fn add(self, other: &Schema) -> Self::Output {
        self.merge(other)
    }
}
