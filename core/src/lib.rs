//! Declarative data validation.
//!
//! Describe the shape of nested data once, compile it into a [`Schema`], then
//! validate values against it. Validation returns a new value with defaults
//! filled in; the input is never modified.
//!
//! - [`Definition`] / [`MapDefinition`]: raw, uncompiled schema descriptions.
//!   Type markers ([`ValueKind`]), literals and nested mappings convert into
//!   definitions.
//! - [`Compiler`]: resolves definitions into [`Node`] trees using a
//!   [`TypeRegistry`] of constructors for bare type markers.
//! - [`Node`]: a compiled element, one of literal, [`ValueNode`], [`MapNode`],
//!   [`ListNode`], `And`/`Or`, a decorator ([`Range`], [`Length`],
//!   [`Regex`], [`Call`], [`Check`], [`IsPath`]) or a [`Convert`]er.
//! - [`Schema`]: a rooted, path-annotated tree plus [`SchemaOptions`].
//!   Schemas merge with `+`.
//!
//! Compile and merge problems are [`SchemaError`]s; data problems are
//! [`ValidationError`]s carrying the path of the rejecting node.
//!
//! # Example
//!
//! ```
//! use dataschema_core::*;
//!
//! let schema = Schema::new(
//!     MapDefinition::new()
//!         .key("name", ValueKind::String)
//!         .key("version", Definition::from(ValueKind::Int).and_then(Range::min(1)))
//!         .key("debug", ValueNode::boolean().default(false))
//!         .key("mode", Definition::or(["fast", "safe"]).with_message("mode is fast or safe"))
//!         .key("tags", Definition::list(ValueKind::String).and_then(Length::not_empty()))
//!         .key(
//!             "limits",
//!             MapDefinition::new()
//!                 .type_key(ValueKind::String, ValueKind::Int)
//!                 .default(Map::new()),
//!         ),
//! )
//! .unwrap();
//!
//! let data = Value::map([
//!     ("name", Value::from("svc")),
//!     ("version", Value::Int(2)),
//!     ("mode", Value::from("fast")),
//!     ("tags", Value::list(["web"])),
//! ]);
//! let validated = schema.validate(&data).unwrap();
//! assert_eq!(validated.get("debug"), Some(&Value::Bool(false)));
//! assert_eq!(validated.get("limits"), Some(&Value::Map(Map::new())));
//!
//! let err = schema
//!     .validate(&Value::map([
//!         ("name", Value::from("svc")),
//!         ("version", Value::Int(2)),
//!         ("mode", Value::from("slow")),
//!         ("tags", Value::list(["web"])),
//!     ]))
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "mode is fast or safe");
//! assert_eq!(err.path(), "Schema -> Dict:mode -> Or");
//! ```

mod combinator;
mod compiler;
mod config;
mod convert;
mod decorator;
mod definition;
mod error;
mod mapping;
mod merge;
mod node;
mod primitive;
mod registry;
mod schema;
mod sequence;
mod types;

pub use compiler::Compiler;
pub use config::SchemaOptions;
pub use convert::Convert;
pub use decorator::{Call, Check, Constraint, Decorate, IsPath, Length, Range, Regex, RegexFlags};
pub use definition::{Definition, MapDefinition, MapKey};
pub use error::{Error, Result, SchemaError, ValidationError};
pub use mapping::MapNode;
pub use node::{Node, NodeKind};
pub use primitive::ValueNode;
pub use registry::TypeRegistry;
pub use schema::Schema;
pub use sequence::ListNode;
pub use types::{Map, Value, ValueKind};

pub use rust_decimal::Decimal;
