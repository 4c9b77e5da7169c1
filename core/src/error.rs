//! Error types for schema compilation and data validation.
//!
//! Two tiers: [`SchemaError`] reports a malformed or unmergeable definition
//! and is only produced while compiling or merging. [`ValidationError`]
//! reports data that does not satisfy a compiled schema and is only produced
//! by `validate`. [`Error`] wraps both for hosts that do both in one place.

use thiserror::Error;

use crate::{Value, ValueKind};

/// The definition could not be compiled or merged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// A bare type marker has no registered node constructor.
    #[error("schema can't resolve type `{0}` to a node; no constructor is registered")]
    UnknownType(ValueKind),

    /// A sequence definition must hold exactly one element definition.
    #[error("list definition must have exactly one element definition, got {0}")]
    InvalidListDefinition(usize),

    /// The same key appears twice in one mapping definition.
    #[error("mapping definition declares key `{0}` more than once")]
    DuplicateKey(String),

    /// A regex pattern failed to compile.
    #[error("invalid regex `{pattern}`: {reason}")]
    InvalidRegex {
        /// The offending pattern.
        pattern: String,
        /// Compiler error from the regex engine.
        reason: String,
    },

    /// A range or length constraint whose bounds admit no value.
    #[error("{constraint} bounds can never be satisfied: min {min} is above max {max}")]
    EmptyBounds {
        /// Constraint name.
        constraint: &'static str,
        /// Lower bound as written.
        min: String,
        /// Upper bound as written.
        max: String,
    },

    /// A string conversion was requested into an unsupported kind.
    #[error("can't convert strings into `{0}`; supported targets are int, float, decimal and bool")]
    UnsupportedConversion(ValueKind),

    /// Two nodes of incompatible kinds were merged.
    #[error("can't merge {left} with {right}")]
    IncompatibleMerge {
        /// Name of the left operand.
        left: String,
        /// Name of the right operand.
        right: String,
    },

    /// Both mappings declare the same type-key pattern with different nodes.
    #[error("can't merge mappings: type key `{0}` is declared by both sides")]
    DuplicateTypeKey(ValueKind),

    /// Both mappings declare a default.
    #[error("can't merge mappings: both sides declare a default")]
    ConflictingDefaults,
}

/// The data does not satisfy the schema.
///
/// Every variant carries the path of the node that rejected the value; see
/// [`path`](ValidationError::path).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A node's custom message replaced the generated one.
    #[error("{message}")]
    Custom {
        /// Path of the rejecting node.
        path: String,
        /// Caller-supplied message.
        message: String,
    },

    /// Null (or a missing key) where a value is required.
    #[error("{path} is required, but validated value was null")]
    Required {
        /// Path of the rejecting node.
        path: String,
    },

    /// The runtime type of the value is not accepted.
    #[error("{path} expected {expected} but got {actual} (value: {value})")]
    TypeMismatch {
        /// Path of the rejecting node.
        path: String,
        /// Expected kind.
        expected: ValueKind,
        /// Kind of the rejected value.
        actual: ValueKind,
        /// The rejected value.
        value: Value,
    },

    /// The value differs from the literal the schema requires.
    #[error("{path} expected {expected} but got {actual}")]
    LiteralMismatch {
        /// Path of the rejecting node.
        path: String,
        /// The literal from the definition.
        expected: Value,
        /// The rejected value.
        actual: Value,
    },

    /// A mapping holds keys no exact or type key accounts for.
    #[error("{path} does not allow unknown keys, found: {}", format_keys(.keys))]
    UnknownKeys {
        /// Path of the rejecting node.
        path: String,
        /// Leftover keys.
        keys: Vec<Value>,
    },

    /// Value is below the lower range bound.
    #[error("{path}: value {value} < min {min}")]
    BelowMinimum {
        /// Path of the rejecting node.
        path: String,
        /// The rejected value.
        value: Value,
        /// Lower bound.
        min: Value,
    },

    /// Value is above the upper range bound.
    #[error("{path}: value {value} > max {max}")]
    AboveMaximum {
        /// Path of the rejecting node.
        path: String,
        /// The rejected value.
        value: Value,
        /// Upper bound.
        max: Value,
    },

    /// Value can't be ordered against a range bound.
    #[error("{path}: value {value} can't be compared with bound {bound}")]
    NotComparable {
        /// Path of the rejecting node.
        path: String,
        /// The rejected value.
        value: Value,
        /// The bound it was compared against.
        bound: Value,
    },

    /// Value has no length.
    #[error("{path}: value {value} has no length")]
    NotMeasurable {
        /// Path of the rejecting node.
        path: String,
        /// The rejected value.
        value: Value,
    },

    /// Length is outside the accepted bounds.
    #[error("{path}: length {length} is not {expected}")]
    InvalidLength {
        /// Path of the rejecting node.
        path: String,
        /// Measured length.
        length: usize,
        /// Human-readable bound description, e.g. `at least 1`.
        expected: String,
    },

    /// Value does not match the pattern from its start.
    #[error("{path}: value {value} did not match regex `{pattern}`")]
    PatternMismatch {
        /// Path of the rejecting node.
        path: String,
        /// The rejected value.
        value: Value,
        /// Source pattern.
        pattern: String,
    },

    /// A host function returned an error.
    #[error("{path} failed while calling host function: {reason}")]
    CallFailed {
        /// Path of the rejecting node.
        path: String,
        /// Error reported by the function.
        reason: String,
    },

    /// A host predicate returned `false`.
    #[error("{path}: check returned false for {value}")]
    CheckFailed {
        /// Path of the rejecting node.
        path: String,
        /// The rejected value.
        value: Value,
    },

    /// The value is not an existing filesystem path.
    #[error("{path}: path {value} does not exist")]
    PathNotFound {
        /// Path of the rejecting node.
        path: String,
        /// The rejected value.
        value: Value,
    },

    /// A string could not be converted into the target kind.
    #[error("{path}: can't convert {value} into {target}")]
    ConversionFailed {
        /// Path of the rejecting node.
        path: String,
        /// The rejected value.
        value: Value,
        /// Target kind.
        target: ValueKind,
    },

    /// No alternative of an Or node accepted the value.
    #[error("{path} found no alternative that validates {value} ({} tried)", .attempts.len())]
    NoMatch {
        /// Path of the rejecting node.
        path: String,
        /// The rejected value.
        value: Value,
        /// Failure of each alternative, in order.
        attempts: Vec<ValidationError>,
    },
}

impl ValidationError {
    /// Path of the node that rejected the value.
    pub fn path(&self) -> &str {
        match self {
            ValidationError::Custom { path, .. }
            | ValidationError::Required { path }
            | ValidationError::TypeMismatch { path, .. }
            | ValidationError::LiteralMismatch { path, .. }
            | ValidationError::UnknownKeys { path, .. }
            | ValidationError::BelowMinimum { path, .. }
            | ValidationError::AboveMaximum { path, .. }
            | ValidationError::NotComparable { path, .. }
            | ValidationError::NotMeasurable { path, .. }
            | ValidationError::InvalidLength { path, .. }
            | ValidationError::PatternMismatch { path, .. }
            | ValidationError::CallFailed { path, .. }
            | ValidationError::CheckFailed { path, .. }
            | ValidationError::PathNotFound { path, .. }
            | ValidationError::ConversionFailed { path, .. }
            | ValidationError::NoMatch { path, .. } => path,
        }
    }

    /// Human-readable message; same as `Display`.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

fn format_keys(keys: &[Value]) -> String {
    keys.iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Either kind of failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Compile or merge failure.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Convenience alias for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
