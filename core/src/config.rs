//! Compatibility options applied while validating.
//!
//! Options are serializable so hosts can keep them next to their own
//! configuration.
//!
//! # Example YAML
//!
//! ```yaml
//! bool_is_int: true
//! ```

use serde::{Deserialize, Serialize};

/// Switches that change how values are matched against kinds.
///
/// # Examples
///
/// ```
/// use dataschema_core::{Schema, SchemaOptions, Value, ValueKind};
///
/// let strict = Schema::new(ValueKind::Int).unwrap();
/// assert!(strict.validate(&Value::Bool(true)).is_err());
///
/// let lenient = Schema::with_options(ValueKind::Int, SchemaOptions { bool_is_int: true }).unwrap();
/// assert_eq!(lenient.validate(&Value::Bool(true)).unwrap(), Value::Bool(true));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaOptions {
    /// Treat booleans as integers: `Int` nodes accept them, `Int` type keys
    /// match boolean keys, and ranges order them as 0 and 1.
    pub bool_is_int: bool,
}

impl SchemaOptions {
    /// Combines two option sets, keeping the stricter setting of each.
    pub fn strictest(self, other: SchemaOptions) -> SchemaOptions {
        SchemaOptions {
            bool_is_int: self.bool_is_int && other.bool_is_int,
        }
    }
}
