//! Uncompiled schema definitions.
//!
//! A [`Definition`] is what callers write; the [`Compiler`](crate::Compiler)
//! turns it into a [`Node`] tree. Most things convert into a definition:
//! type markers ([`ValueKind`]), literals (`"on"`, `1`, `true`), already
//! compiled nodes, whole schemas and data [`Value`]s, where a mapping value
//! becomes a mapping definition with exact keys and a list value becomes a
//! sequence definition.

use crate::{Constraint, Map, Node, Schema, SchemaError, Value, ValueKind};

/// Raw schema description.
///
/// # Examples
///
/// ```
/// use dataschema_core::{Definition, MapDefinition, Schema, Value, ValueKind};
///
/// let definition = MapDefinition::new()
///     .key("mode", Definition::or(["fast", "safe"]))
///     .key("tags", Definition::sequence([ValueKind::String]));
/// let schema = Schema::new(definition).unwrap();
///
/// let data = Value::map([
///     ("mode", Value::from("fast")),
///     ("tags", Value::list(["a", "b"])),
/// ]);
/// assert_eq!(schema.validate(&data).unwrap(), data);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub(crate) shape: Shape,
    pub(crate) message: Option<String>,
    pub(crate) description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Shape {
    Node(Box<Node>),
    Type(ValueKind),
    Literal(Value),
    Map(MapDefinition),
    /// Sequence form; valid only with exactly one element definition.
    List(Vec<Definition>),
    And(Vec<Definition>),
    Or(Vec<Definition>),
    Decorated(Constraint, Option<Box<Definition>>),
}

impl Definition {
    fn from_shape(shape: Shape) -> Self {
        Self {
            shape,
            message: None,
            description: None,
        }
    }

    /// Accepts exactly `value`.
    ///
    /// Unlike `Definition::from(value)`, mappings and lists are compared as
    /// a whole instead of being read as nested definitions.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::from_shape(Shape::Literal(value.into()))
    }

    /// Homogeneous list whose elements satisfy `element`.
    pub fn list(element: impl Into<Definition>) -> Self {
        Self::from_shape(Shape::List(vec![element.into()]))
    }

    /// Sequence form of a list definition.
    ///
    /// Compiling fails with [`SchemaError::InvalidListDefinition`] unless
    /// exactly one element definition is given.
    pub fn sequence<D: Into<Definition>>(elements: impl IntoIterator<Item = D>) -> Self {
        Self::from_shape(Shape::List(elements.into_iter().map(Into::into).collect()))
    }

    /// Every definition must accept the value, each seeing the previous output.
    pub fn and<D: Into<Definition>>(children: impl IntoIterator<Item = D>) -> Self {
        Self::from_shape(Shape::And(children.into_iter().map(Into::into).collect()))
    }

    /// The first definition that accepts the value wins.
    pub fn or<D: Into<Definition>>(children: impl IntoIterator<Item = D>) -> Self {
        Self::from_shape(Shape::Or(children.into_iter().map(Into::into).collect()))
    }

    /// A constraint, optionally applied to the output of `base`.
    pub fn decorated(constraint: impl Into<Constraint>, base: Option<Definition>) -> Self {
        Self::from_shape(Shape::Decorated(constraint.into(), base.map(Box::new)))
    }

    /// Replaces the generated messages of the compiled node's own failures.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Shorthand for `Definition::and([self, other])`.
    pub fn and_then(self, other: impl Into<Definition>) -> Self {
        Self::and([self, other.into()])
    }
}

/// Key of a mapping definition.
#[derive(Debug, Clone, PartialEq)]
pub enum MapKey {
    /// Matches one key by equality.
    Exact(Value),
    /// Matches every remaining key of the given kind.
    Type(ValueKind),
}

/// Builder for mapping definitions.
///
/// Mappings are required by default, have no default and reject keys that
/// neither an exact key nor a type key accounts for.
///
/// # Examples
///
/// ```
/// use dataschema_core::{MapDefinition, Schema, Value, ValueKind, ValueNode};
///
/// let labels = MapDefinition::new()
///     .key("name", ValueKind::String)
///     .type_key(ValueKind::String, ValueNode::string().optional());
/// let schema = Schema::new(labels).unwrap();
///
/// let data = Value::map([("name", "web"), ("tier", "frontend")]);
/// assert_eq!(schema.validate(&data).unwrap(), data);
/// assert!(schema.validate(&Value::map([("name", 1)])).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MapDefinition {
    pub(crate) entries: Vec<(MapKey, Definition)>,
    pub(crate) required: bool,
    pub(crate) default: Option<Map>,
    pub(crate) skip_unknown_keys: bool,
}

impl Default for MapDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl MapDefinition {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            required: true,
            default: None,
            skip_unknown_keys: false,
        }
    }

    /// Adds an exact key.
    pub fn key(mut self, key: impl Into<Value>, definition: impl Into<Definition>) -> Self {
        self.entries
            .push((MapKey::Exact(key.into()), definition.into()));
        self
    }

    /// Adds a type-key pattern for remaining keys of `kind`.
    pub fn type_key(mut self, kind: ValueKind, definition: impl Into<Definition>) -> Self {
        self.entries.push((MapKey::Type(kind), definition.into()));
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn optional(self) -> Self {
        self.required(false)
    }

    /// Mapping returned when the input is null. An empty default still
    /// counts as a default.
    pub fn default(mut self, default: Map) -> Self {
        self.default = Some(default);
        self
    }

    /// Drops unmatched keys from the output instead of failing.
    pub fn skip_unknown_keys(mut self, skip: bool) -> Self {
        self.skip_unknown_keys = skip;
        self
    }

    pub fn entries(&self) -> &[(MapKey, Definition)] {
        &self.entries
    }

    /// Fails on a key declared twice.
    pub(crate) fn check_duplicates(&self) -> Result<(), SchemaError> {
        for (index, (key, _)) in self.entries.iter().enumerate() {
            if self.entries[..index].iter().any(|(seen, _)| seen == key) {
                let label = match key {
                    MapKey::Exact(value) => value.label(),
                    MapKey::Type(kind) => format!("<{kind}>"),
                };
                return Err(SchemaError::DuplicateKey(label));
            }
        }
        Ok(())
    }
}

impl From<Node> for Definition {
    fn from(value: Node) -> Self {
        Self::from_shape(Shape::Node(Box::new(value)))
    }
}

impl From<crate::ValueNode> for Definition {
    fn from(value: crate::ValueNode) -> Self {
        Node::from(value).into()
    }
}

impl From<crate::Convert> for Definition {
    fn from(value: crate::Convert) -> Self {
        Node::from(value).into()
    }
}

/// Reuses the root of an existing schema.
impl From<Schema> for Definition {
    fn from(value: Schema) -> Self {
        value.into_root().into()
    }
}

impl From<&Schema> for Definition {
    fn from(value: &Schema) -> Self {
        value.root().clone().into()
    }
}

impl From<ValueKind> for Definition {
    fn from(value: ValueKind) -> Self {
        Self::from_shape(Shape::Type(value))
    }
}

impl From<MapDefinition> for Definition {
    fn from(value: MapDefinition) -> Self {
        Self::from_shape(Shape::Map(value))
    }
}

impl From<Constraint> for Definition {
    fn from(value: Constraint) -> Self {
        Self::decorated(value, None)
    }
}

impl From<Vec<Definition>> for Definition {
    fn from(value: Vec<Definition>) -> Self {
        Self::from_shape(Shape::List(value))
    }
}

/// Reads a data value as a definition.
///
/// Mappings become exact-key mapping definitions, lists become sequence
/// definitions and every other value becomes a literal.
impl From<Value> for Definition {
    fn from(value: Value) -> Self {
        match value {
            Value::Map(map) => map
                .into_iter()
                .fold(MapDefinition::new(), |definition, (key, value)| {
                    definition.key(key, value)
                })
                .into(),
            Value::List(items) => Self::sequence(items),
            other => Self::literal(other),
        }
    }
}

macro_rules! literal_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Definition {
                fn from(value: $ty) -> Self {
                    Self::literal(value)
                }
            }
        )*
    };
}

literal_from!(bool, i32, i64, f64, rust_decimal::Decimal, &str, String);
