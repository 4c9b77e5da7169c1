//! Constructors for bare type markers.
//!
//! Writing `ValueKind::Int` in a definition means "a required integer node".
//! The [`TypeRegistry`] maps each marker to the closure that builds that
//! node. The builtin registry is created once per process and shared; a
//! [`Compiler`](crate::Compiler) copies it on first change.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use tracing::debug;

use crate::{Node, ValueKind, ValueNode};

type Constructor = Arc<dyn Fn() -> Node + Send + Sync>;

static BUILTIN: LazyLock<Arc<TypeRegistry>> = LazyLock::new(|| Arc::new(TypeRegistry::builtin()));

/// Marker-to-constructor table.
///
/// # Examples
///
/// ```
/// use dataschema_core::{TypeRegistry, ValueKind};
///
/// let registry = TypeRegistry::builtin();
/// assert!(registry.contains(ValueKind::Int));
/// assert!(!registry.contains(ValueKind::Number));
/// ```
#[derive(Clone, Default)]
pub struct TypeRegistry {
    constructors: HashMap<ValueKind, Constructor>,
}

impl TypeRegistry {
    /// Empty registry; every marker is unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `Any`, `Bool`, `Int`, `Float`, `String` and `Bytes`.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for kind in [
            ValueKind::Any,
            ValueKind::Bool,
            ValueKind::Int,
            ValueKind::Float,
            ValueKind::String,
            ValueKind::Bytes,
        ] {
            registry.register(kind, move || ValueNode::new(kind).into());
        }
        registry
    }

    /// The process-wide builtin registry.
    pub(crate) fn shared() -> Arc<TypeRegistry> {
        Arc::clone(&BUILTIN)
    }

    /// Registers (or replaces) the constructor for `kind`.
    pub fn register<F>(&mut self, kind: ValueKind, constructor: F)
    where
        F: Fn() -> Node + Send + Sync + 'static,
    {
        debug!(kind = %kind, "Registering type constructor");
        self.constructors.insert(kind, Arc::new(constructor));
    }

    pub fn contains(&self, kind: ValueKind) -> bool {
        self.constructors.contains_key(&kind)
    }

    /// Builds a fresh node for `kind`, if a constructor is registered.
    pub fn construct(&self, kind: ValueKind) -> Option<Node> {
        self.constructors.get(&kind).map(|constructor| constructor())
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.constructors.keys().collect();
        kinds.sort();
        f.debug_struct("TypeRegistry").field("kinds", &kinds).finish()
    }
}
