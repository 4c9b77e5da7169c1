//! Definition-to-node compilation.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::definition::Shape;
use crate::{
    Definition, ListNode, MapDefinition, MapKey, MapNode, Node, NodeKind, Schema, SchemaError,
    SchemaOptions, TypeRegistry, ValueKind,
};

/// Resolves definitions against a type registry.
///
/// A default compiler shares the builtin registry; registering a constructor
/// gives the compiler its own copy.
///
/// # Examples
///
/// ```
/// use dataschema_core::{Compiler, SchemaError, Value, ValueKind, ValueNode};
///
/// let mut compiler = Compiler::new();
/// assert_eq!(
///     compiler.schema(ValueKind::Number).unwrap_err(),
///     SchemaError::UnknownType(ValueKind::Number)
/// );
///
/// compiler.register(ValueKind::Number, || ValueNode::number().into());
/// let schema = compiler.schema(ValueKind::Number).unwrap();
/// assert!(schema.validate(&Value::Float(0.5)).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Compiler {
    registry: Arc<TypeRegistry>,
    options: SchemaOptions,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self::with_options(SchemaOptions::default())
    }

    /// Compiler whose schemas validate under `options`.
    pub fn with_options(options: SchemaOptions) -> Self {
        Self {
            registry: TypeRegistry::shared(),
            options,
        }
    }

    /// Compiler over a custom registry.
    pub fn with_registry(registry: TypeRegistry, options: SchemaOptions) -> Self {
        Self {
            registry: Arc::new(registry),
            options,
        }
    }

    /// Registers a constructor for bare `kind` markers in this compiler only.
    pub fn register<F>(&mut self, kind: ValueKind, constructor: F) -> &mut Self
    where
        F: Fn() -> Node + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.registry).register(kind, constructor);
        self
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn options(&self) -> SchemaOptions {
        self.options
    }

    /// Compiles `definition` into a node tree.
    pub fn resolve(&self, definition: impl Into<Definition>) -> Result<Node, SchemaError> {
        self.resolve_definition(definition.into())
    }

    /// Compiles `definition` into a schema carrying this compiler's options.
    pub fn schema(&self, definition: impl Into<Definition>) -> Result<Schema, SchemaError> {
        let root = self.resolve(definition)?;
        Ok(Schema::from_root(root, self.options))
    }

    fn resolve_definition(&self, definition: Definition) -> Result<Node, SchemaError> {
        let Definition {
            shape,
            message,
            description,
        } = definition;

        let mut node = match shape {
            Shape::Node(node) => *node,
            Shape::Type(kind) => self
                .registry
                .construct(kind)
                .ok_or(SchemaError::UnknownType(kind))?,
            Shape::Literal(value) => Node::literal(value),
            Shape::Map(map) => self.resolve_map(map)?,
            Shape::List(mut elements) => {
                if elements.len() != 1 {
                    return Err(SchemaError::InvalidListDefinition(elements.len()));
                }
                let element = elements.remove(0);
                ListNode::new(self.resolve_definition(element)?).into()
            }
            Shape::And(children) => Node::from_kind(NodeKind::And(self.resolve_all(children)?)),
            Shape::Or(children) => Node::from_kind(NodeKind::Or(self.resolve_all(children)?)),
            Shape::Decorated(constraint, base) => {
                constraint.check_bounds()?;
                let base = base
                    .map(|base| self.resolve_definition(*base).map(Box::new))
                    .transpose()?;
                Node::from_kind(NodeKind::Decorator { base, constraint })
            }
        };

        if let Some(message) = message {
            node.set_message(message);
        }
        if let Some(description) = description {
            node.set_description(description);
        }
        Ok(node)
    }

    fn resolve_all(&self, definitions: Vec<Definition>) -> Result<Vec<Node>, SchemaError> {
        definitions
            .into_iter()
            .map(|definition| self.resolve_definition(definition))
            .collect()
    }

    fn resolve_map(&self, map: MapDefinition) -> Result<Node, SchemaError> {
        map.check_duplicates()?;

        let mut keys = BTreeMap::new();
        let mut type_keys = Vec::new();
        for (key, definition) in map.entries {
            let node = self.resolve_definition(definition)?;
            match key {
                MapKey::Exact(value) => {
                    keys.insert(value, node);
                }
                MapKey::Type(kind) => type_keys.push((kind, node)),
            }
        }

        Ok(MapNode::new(
            keys,
            type_keys,
            map.required,
            map.default,
            map.skip_unknown_keys,
        )
        .into())
    }
}
