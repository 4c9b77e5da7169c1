//! Secondary constraints layered on top of a node.
//!
//! A decorator either wraps a base definition, in which case the base runs
//! first and the constraint sees its output, or stands alone and sees the raw
//! value. Wrap a type check (`Range::min(1).wrap(ValueKind::Int)`) so the
//! constraint only sees values of the right type; every constraint still
//! fails cleanly when it doesn't.

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::node::to_json;
use crate::{Definition, Node, SchemaError, SchemaOptions, ValidationError, Value, ValueKind};

/// One secondary constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Range(Range),
    Length(Length),
    Regex(Regex),
    Call(Call),
    Check(Check),
    IsPath(IsPath),
}

impl Constraint {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Constraint::Range(_) => "Range",
            Constraint::Length(length) if length.is_not_empty() => "NotEmpty",
            Constraint::Length(_) => "Length",
            Constraint::Regex(_) => "Regex",
            Constraint::Call(_) => "Call",
            Constraint::Check(_) => "Check",
            Constraint::IsPath(_) => "IsPath",
        }
    }

    pub(crate) fn check(
        &self,
        node: &Node,
        value: Value,
        options: &SchemaOptions,
    ) -> Result<Value, ValidationError> {
        let result = match self {
            Constraint::Range(range) => range.check(node.path(), value, options),
            Constraint::Length(length) => length.check(node.path(), value),
            Constraint::Regex(regex) => regex.check(node.path(), value),
            Constraint::Call(call) => call.check(node.path(), value),
            Constraint::Check(check) => check.check(node.path(), value),
            Constraint::IsPath(_) => IsPath::check(node.path(), value),
        };
        result.map_err(|err| node.reject(err))
    }

    /// Rejects bounds that no value could satisfy.
    pub(crate) fn check_bounds(&self) -> Result<(), SchemaError> {
        let empty = |min: String, max: String| {
            Err(SchemaError::EmptyBounds {
                constraint: self.name(),
                min,
                max,
            })
        };
        match self {
            Constraint::Range(Range {
                min: Some(min),
                max: Some(max),
            }) => match min.compare(max, true) {
                Some(Ordering::Less | Ordering::Equal) => Ok(()),
                _ => empty(min.to_string(), max.to_string()),
            },
            Constraint::Length(Length {
                min: Some(min),
                max: Some(max),
                ..
            }) if min > max => empty(min.to_string(), max.to_string()),
            _ => Ok(()),
        }
    }

    pub(crate) fn describe_into(&self, out: &mut serde_json::Map<String, serde_json::Value>) {
        match self {
            Constraint::Range(range) => {
                out.insert("min".into(), range.min.as_ref().map_or(json!(null), to_json));
                out.insert("max".into(), range.max.as_ref().map_or(json!(null), to_json));
            }
            Constraint::Length(length) => {
                out.insert("min".into(), json!(length.min));
                out.insert("max".into(), json!(length.max));
                out.insert("exact".into(), json!(length.exact));
            }
            Constraint::Regex(regex) => {
                out.insert("pattern".into(), json!(regex.pattern));
                out.insert("flags".into(), json!(regex.flags.names()));
            }
            Constraint::Call(_) | Constraint::Check(_) | Constraint::IsPath(_) => {}
        }
    }
}

/// Attaches a constraint to a base definition.
///
/// # Examples
///
/// ```
/// use dataschema_core::{Decorate, Range, Schema, Value, ValueKind};
///
/// let schema = Schema::new(Range::min(1).wrap(ValueKind::Int)).unwrap();
/// assert!(schema.validate(&Value::Int(2)).is_ok());
/// assert!(schema.validate(&Value::Int(0)).is_err());
/// assert!(schema.validate(&Value::from("2")).is_err());
/// ```
pub trait Decorate: Into<Constraint> + Sized {
    /// Validates with `base` first, then checks this constraint on its output.
    fn wrap(self, base: impl Into<Definition>) -> Definition {
        Definition::decorated(self, Some(base.into()))
    }
}

impl<T: Into<Constraint>> Decorate for T {}

macro_rules! constraint_from {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Constraint {
                fn from(value: $ty) -> Self {
                    Constraint::$ty(value)
                }
            }

            impl From<$ty> for Definition {
                fn from(value: $ty) -> Self {
                    Definition::decorated(value, None)
                }
            }
        )*
    };
}

constraint_from!(Range, Length, Regex, Call, Check, IsPath);

/// Inclusive bounds. Null passes through unchanged.
///
/// Integers and floats compare with each other; strings, byte strings and
/// lists only with their own kind. Booleans count as 0 and 1 under
/// [`SchemaOptions::bool_is_int`].
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    min: Option<Value>,
    max: Option<Value>,
}

impl Range {
    /// Both bounds are optional; a null bound is absent.
    pub fn new(min: impl Into<Value>, max: impl Into<Value>) -> Self {
        let bound = |value: Value| (!value.is_null()).then_some(value);
        Self {
            min: bound(min.into()),
            max: bound(max.into()),
        }
    }

    /// Lower bound only.
    pub fn min(min: impl Into<Value>) -> Self {
        Self::new(min, Value::Null)
    }

    /// Upper bound only.
    pub fn max(max: impl Into<Value>) -> Self {
        Self::new(Value::Null, max)
    }

    /// Both bounds. Compiling fails with [`SchemaError::EmptyBounds`] when
    /// `min > max` or the bounds can't be compared.
    pub fn between(min: impl Into<Value>, max: impl Into<Value>) -> Self {
        Self::new(min, max)
    }

    pub fn lower(&self) -> Option<&Value> {
        self.min.as_ref()
    }

    pub fn upper(&self) -> Option<&Value> {
        self.max.as_ref()
    }

    fn check(
        &self,
        path: &str,
        value: Value,
        options: &SchemaOptions,
    ) -> Result<Value, ValidationError> {
        if value.is_null() {
            return Ok(value);
        }

        if let Some(min) = &self.min {
            if order(path, &value, min, options)?.is_lt() {
                return Err(ValidationError::BelowMinimum {
                    path: path.to_string(),
                    value,
                    min: min.clone(),
                });
            }
        }
        if let Some(max) = &self.max {
            if order(path, &value, max, options)?.is_gt() {
                return Err(ValidationError::AboveMaximum {
                    path: path.to_string(),
                    value,
                    max: max.clone(),
                });
            }
        }
        Ok(value)
    }
}

fn order(
    path: &str,
    value: &Value,
    bound: &Value,
    options: &SchemaOptions,
) -> Result<Ordering, ValidationError> {
    value
        .compare(bound, options.bool_is_int)
        .ok_or_else(|| ValidationError::NotComparable {
            path: path.to_string(),
            value: value.clone(),
            bound: bound.clone(),
        })
}

/// Length bounds for strings (in characters), byte strings, lists and
/// mappings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Length {
    min: Option<usize>,
    max: Option<usize>,
    exact: Option<usize>,
}

impl Length {
    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            ..Self::default()
        }
    }

    pub fn max(max: usize) -> Self {
        Self {
            max: Some(max),
            ..Self::default()
        }
    }

    pub fn exact(exact: usize) -> Self {
        Self {
            exact: Some(exact),
            ..Self::default()
        }
    }

    /// Compiling fails with [`SchemaError::EmptyBounds`] when `min > max`.
    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            exact: None,
        }
    }

    /// At least one element or character.
    pub fn not_empty() -> Self {
        Self::min(1)
    }

    fn is_not_empty(&self) -> bool {
        *self == Self::not_empty()
    }

    fn measure(value: &Value) -> Option<usize> {
        match value {
            Value::String(s) => Some(s.chars().count()),
            Value::Bytes(b) => Some(b.len()),
            Value::List(items) => Some(items.len()),
            Value::Map(map) => Some(map.len()),
            _ => None,
        }
    }

    fn check(&self, path: &str, value: Value) -> Result<Value, ValidationError> {
        let Some(length) = Self::measure(&value) else {
            return Err(ValidationError::NotMeasurable {
                path: path.to_string(),
                value,
            });
        };

        let violation = match (self.exact, self.min, self.max) {
            (Some(exact), _, _) if length != exact => Some(format!("exactly {exact}")),
            (_, Some(min), _) if length < min => Some(format!("at least {min}")),
            (_, _, Some(max)) if length > max => Some(format!("at most {max}")),
            _ => None,
        };

        match violation {
            Some(expected) => Err(ValidationError::InvalidLength {
                path: path.to_string(),
                length,
                expected,
            }),
            None => Ok(value),
        }
    }
}

/// Options for [`Regex::with_flags`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexFlags {
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries.
    pub multi_line: bool,
    /// `.` matches `\n`.
    pub dot_matches_new_line: bool,
    /// Verbose mode: whitespace and `#` comments in the pattern are ignored.
    pub ignore_whitespace: bool,
}

impl RegexFlags {
    fn names(&self) -> Vec<&'static str> {
        [
            (self.case_insensitive, "case_insensitive"),
            (self.multi_line, "multi_line"),
            (self.dot_matches_new_line, "dot_matches_new_line"),
            (self.ignore_whitespace, "ignore_whitespace"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect()
    }
}

/// String that matches a pattern from its first character.
///
/// The match is anchored at the start only; add `$` to the pattern to
/// require a full match.
///
/// # Examples
///
/// ```
/// use dataschema_core::{Regex, Schema, Value};
///
/// let schema = Schema::new(Regex::new(r"\d+").unwrap()).unwrap();
/// assert!(schema.validate(&Value::from("123abc")).is_ok());
/// assert!(schema.validate(&Value::from("abc123")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    flags: RegexFlags,
    compiled: regex::Regex,
}

impl Regex {
    pub fn new(pattern: impl Into<String>) -> Result<Self, SchemaError> {
        Self::with_flags(pattern, RegexFlags::default())
    }

    /// Compiles `pattern`; an invalid pattern is a [`SchemaError::InvalidRegex`].
    pub fn with_flags(pattern: impl Into<String>, flags: RegexFlags) -> Result<Self, SchemaError> {
        let pattern = pattern.into();
        let compiled = regex::RegexBuilder::new(&pattern)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_matches_new_line)
            .ignore_whitespace(flags.ignore_whitespace)
            .build()
            .map_err(|err| SchemaError::InvalidRegex {
                pattern: pattern.clone(),
                reason: err.to_string(),
            })?;
        Ok(Self {
            pattern,
            flags,
            compiled,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn flags(&self) -> RegexFlags {
        self.flags
    }

    fn check(&self, path: &str, value: Value) -> Result<Value, ValidationError> {
        let Some(text) = value.as_str() else {
            return Err(ValidationError::TypeMismatch {
                path: path.to_string(),
                expected: ValueKind::String,
                actual: value.kind(),
                value,
            });
        };
        // Leftmost-first search: a match at 0 exists iff the first match starts there.
        if !self.compiled.find(text).is_some_and(|m| m.start() == 0) {
            return Err(ValidationError::PatternMismatch {
                path: path.to_string(),
                value,
                pattern: self.pattern.clone(),
            });
        }
        Ok(value)
    }
}

impl PartialEq for Regex {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.flags == other.flags
    }
}

type HostFn = dyn Fn(&Value) -> Result<Value, String> + Send + Sync;

/// Runs a host function and uses its return value as the validated output.
///
/// # Examples
///
/// ```
/// use dataschema_core::{Call, Decorate, Schema, Value, ValueKind};
///
/// let upper = Call::new(|v: &Value| match v.as_str() {
///     Some(s) => Ok(Value::from(s.to_uppercase())),
///     None => Err("not a string"),
/// });
/// let schema = Schema::new(upper.wrap(ValueKind::String)).unwrap();
/// assert_eq!(schema.validate(&Value::from("abc")).unwrap(), Value::from("ABC"));
/// ```
#[derive(Clone)]
pub struct Call {
    function: Arc<HostFn>,
}

impl Call {
    pub fn new<F, E>(function: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self {
            function: Arc::new(move |value| function(value).map_err(|err| err.to_string())),
        }
    }

    fn check(&self, path: &str, value: Value) -> Result<Value, ValidationError> {
        (self.function)(&value).map_err(|reason| ValidationError::CallFailed {
            path: path.to_string(),
            reason,
        })
    }
}

impl fmt::Debug for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call").finish_non_exhaustive()
    }
}

/// Two calls are equal only when they share the same function.
impl PartialEq for Call {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.function, &other.function)
    }
}

/// Boolean gate; the original value passes when the predicate holds.
#[derive(Clone)]
pub struct Check {
    predicate: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Check {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    fn check(&self, path: &str, value: Value) -> Result<Value, ValidationError> {
        if (self.predicate)(&value) {
            Ok(value)
        } else {
            Err(ValidationError::CheckFailed {
                path: path.to_string(),
                value,
            })
        }
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check").finish_non_exhaustive()
    }
}

impl PartialEq for Check {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.predicate, &other.predicate)
    }
}

/// String naming an existing file or directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsPath;

impl IsPath {
    pub fn new() -> Self {
        IsPath
    }

    fn check(path: &str, value: Value) -> Result<Value, ValidationError> {
        let Some(candidate) = value.as_str() else {
            return Err(ValidationError::TypeMismatch {
                path: path.to_string(),
                expected: ValueKind::String,
                actual: value.kind(),
                value,
            });
        };
        if !Path::new(candidate).exists() {
            return Err(ValidationError::PathNotFound {
                path: path.to_string(),
                value,
            });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Compiler, ValueNode};

    fn compile(definition: impl Into<Definition>) -> Node {
        let mut node = Compiler::new().resolve(definition).unwrap();
        node.attach(Some("testbase"));
        node
    }

    #[test]
    fn test_range_is_exact_for_large_integers() {
        let node = compile(Range::max(9_007_199_254_740_992.0).wrap(ValueKind::Int));
        assert!(node.validate(&Value::Int(9_007_199_254_740_992)).is_ok());
        assert!(matches!(
            node.validate(&Value::Int(9_007_199_254_740_993)),
            Err(ValidationError::AboveMaximum { .. })
        ));
    }

    #[test]
    fn test_inverted_bounds_fail_to_compile() {
        let err = Compiler::new()
            .resolve(Range::between(10, 1).wrap(ValueKind::Int))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::EmptyBounds {
                constraint: "Range",
                min: "10".into(),
                max: "1".into(),
            }
        );
        assert!(matches!(
            Compiler::new().resolve(Range::between("a", 1)),
            Err(SchemaError::EmptyBounds { .. })
        ));
        assert!(matches!(
            Compiler::new().resolve(Length::between(3, 2).wrap(ValueKind::String)),
            Err(SchemaError::EmptyBounds { constraint: "Length", .. })
        ));
        assert!(Compiler::new().resolve(Range::between(1, 1.0)).is_ok());
        assert!(Compiler::new().resolve(Length::between(2, 2)).is_ok());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let node = compile(Range::between(1, 3));
        assert!(node.validate(&Value::Int(1)).is_ok());
        assert!(node.validate(&Value::Int(3)).is_ok());
        assert!(matches!(
            node.validate(&Value::Int(0)),
            Err(ValidationError::BelowMinimum { .. })
        ));
        assert!(matches!(
            node.validate(&Value::Int(4)),
            Err(ValidationError::AboveMaximum { .. })
        ));
    }

    #[test]
    fn test_range_passes_null_and_mixes_numbers() {
        let node = compile(Range::min(1));
        assert_eq!(node.validate(&Value::Null).unwrap(), Value::Null);
        assert!(node.validate(&Value::Float(1.5)).is_ok());
        assert!(node.validate(&Value::Float(0.5)).is_err());

        let upper = compile(Range::max(2.5));
        assert!(upper.validate(&Value::Int(2)).is_ok());
        assert!(upper.validate(&Value::Int(3)).is_err());
    }

    #[test]
    fn test_range_on_unorderable_value_fails_cleanly() {
        let node = compile(Range::min(1));
        let err = node.validate(&Value::from("abc")).unwrap_err();
        assert!(matches!(err, ValidationError::NotComparable { .. }));
        assert_eq!(err.path(), "testbase -> Range");
    }

    #[test]
    fn test_range_orders_bools_only_when_enabled() {
        let node = compile(Range::min(1));
        assert!(node.validate(&Value::Bool(true)).is_err());
        let lenient = SchemaOptions { bool_is_int: true };
        assert!(node.validate_with(&Value::Bool(true), &lenient).is_ok());
        assert!(node.validate_with(&Value::Bool(false), &lenient).is_err());
    }

    #[test]
    fn test_range_wrapped_type_check_runs_first() {
        let node = compile(Range::min(1).wrap(ValueKind::Int));
        assert!(matches!(
            node.validate(&Value::from("5")),
            Err(ValidationError::TypeMismatch { .. })
        ));
        assert_eq!(node.path(), "testbase -> Range");
    }

    #[test]
    fn test_length_measures_strings_in_chars() {
        let node = compile(Length::between(2, 3));
        assert!(node.validate(&Value::from("äö")).is_ok());
        assert!(node.validate(&Value::Bytes(vec![1, 2, 3])).is_ok());
        assert!(node.validate(&Value::list([1])).is_err());
        let err = node.validate(&Value::from("abcd")).unwrap_err();
        assert_eq!(err.to_string(), "testbase -> Length: length 4 is not at most 3");
    }

    #[test]
    fn test_length_exact_and_not_empty() {
        let exact = compile(Length::exact(2));
        assert!(exact.validate(&Value::map([("a", 1), ("b", 2)])).is_ok());
        assert!(exact.validate(&Value::map([("a", 1)])).is_err());

        let not_empty = compile(Length::not_empty());
        assert_eq!(not_empty.name(), "NotEmpty");
        assert!(not_empty.validate(&Value::from("")).is_err());
        assert!(matches!(
            not_empty.validate(&Value::Int(5)),
            Err(ValidationError::NotMeasurable { .. })
        ));
    }

    #[test]
    fn test_regex_matches_from_start() {
        let node = compile(Regex::new(r"[a-z]+").unwrap());
        assert!(node.validate(&Value::from("abc123")).is_ok());
        assert!(matches!(
            node.validate(&Value::from("1abc")),
            Err(ValidationError::PatternMismatch { .. })
        ));
        assert!(matches!(
            node.validate(&Value::Int(1)),
            Err(ValidationError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_regex_alternation_stays_anchored() {
        let node = compile(Regex::new("a|b").unwrap());
        assert!(node.validate(&Value::from("b")).is_ok());
        assert!(node.validate(&Value::from("xb")).is_err());
    }

    #[test]
    fn test_unbalanced_group_cannot_escape_anchor() {
        let err = Regex::new("a)|(b").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidRegex { ref pattern, .. } if pattern == "a)|(b"));

        let node = compile(Regex::new("(a)|(b)").unwrap());
        assert!(node.validate(&Value::from("b")).is_ok());
        assert!(node.validate(&Value::from("xb")).is_err());
    }

    #[test]
    fn test_multi_line_caret_does_not_match_later_lines() {
        let flags = RegexFlags {
            multi_line: true,
            ..RegexFlags::default()
        };
        let node = compile(Regex::with_flags("^b", flags).unwrap());
        assert!(node.validate(&Value::from("b\nx")).is_ok());
        assert!(node.validate(&Value::from("x\nb")).is_err());
    }

    #[test]
    fn test_regex_flags() {
        let flags = RegexFlags {
            case_insensitive: true,
            ..RegexFlags::default()
        };
        let node = compile(Regex::with_flags("abc", flags).unwrap());
        assert!(node.validate(&Value::from("ABC")).is_ok());

        let verbose = RegexFlags {
            ignore_whitespace: true,
            ..RegexFlags::default()
        };
        let node = compile(Regex::with_flags(r"\d+ \s* # digits", verbose).unwrap());
        assert!(node.validate(&Value::from("42")).is_ok());
    }

    #[test]
    fn test_invalid_regex_is_schema_error() {
        let err = Regex::new("(unclosed").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidRegex { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_call_replaces_value_and_reports_failure() {
        let double = Call::new(|value: &Value| match value.as_i64() {
            Some(i) => Ok(Value::Int(i * 2)),
            None => Err(format!("{value} is not an integer")),
        });
        let node = compile(double.wrap(ValueNode::int()));
        assert_eq!(node.validate(&Value::Int(21)).unwrap(), Value::Int(42));

        let standalone = compile(Call::new(|_: &Value| Err::<Value, _>("boom")));
        let err = standalone.validate(&Value::Int(1)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::CallFailed {
                path: "testbase -> Call".into(),
                reason: "boom".into()
            }
        );
    }

    #[test]
    fn test_check_gates_original_value() {
        let even = Check::new(|value: &Value| value.as_i64().is_some_and(|i| i % 2 == 0));
        let node = compile(even.wrap(ValueKind::Int));
        assert_eq!(node.validate(&Value::Int(4)).unwrap(), Value::Int(4));
        assert!(matches!(
            node.validate(&Value::Int(3)),
            Err(ValidationError::CheckFailed { .. })
        ));
    }

    #[test]
    fn test_is_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.yaml");
        std::fs::write(&file, "a: 1").unwrap();

        let node = compile(IsPath::new());
        let existing = Value::from(file.to_string_lossy().into_owned());
        assert!(node.validate(&existing).is_ok());
        assert!(node.validate(&Value::from(dir.path().to_string_lossy().into_owned())).is_ok());

        let missing = Value::from(dir.path().join("nope").to_string_lossy().into_owned());
        assert!(matches!(
            node.validate(&missing),
            Err(ValidationError::PathNotFound { .. })
        ));
        assert!(node.validate(&Value::Int(1)).is_err());
    }

    #[test]
    fn test_decorator_message_override() {
        let node = compile(Definition::from(Range::min(10)).with_message("too small"));
        let err = node.validate(&Value::Int(1)).unwrap_err();
        assert_eq!(err.to_string(), "too small");
    }

    #[test]
    fn test_describe_range() {
        let view = compile(Range::between(1, 5)).describe();
        assert_eq!(view["class"], "Range");
        assert_eq!(view["min"], 1);
        assert_eq!(view["max"], 5);
        assert!(view.get("wrapped").is_none());
    }
}
