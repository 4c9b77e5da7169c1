//! String converters.
//!
//! A converter is a string value node that parses its validated string into
//! another kind. Null handling (required/default) happens on the string side,
//! so a default is written in its unparsed form.

use rust_decimal::Decimal;
use serde_json::json;

use crate::{Node, NodeKind, SchemaError, SchemaOptions, ValidationError, Value, ValueKind, ValueNode};

/// Parses a string into an integer, float, decimal or boolean.
///
/// Surrounding whitespace is ignored. Decimals accept plain (`-8.20`) and
/// scientific (`1.5e3`) notation and keep their scale. Booleans accept
/// `true`/`false`, `yes`/`no`, `on`/`off` and `1`/`0` in any case.
///
/// # Examples
///
/// ```
/// use dataschema_core::{Convert, Schema, Value};
///
/// let port = Schema::new(Convert::to_int().default("8080")).unwrap();
/// assert_eq!(port.validate(&Value::from(" 443 ")).unwrap(), Value::Int(443));
/// assert_eq!(port.validate(&Value::Null).unwrap(), Value::Int(8080));
/// assert!(port.validate(&Value::from("http")).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Convert {
    source: ValueNode,
    target: ValueKind,
}

impl Convert {
    /// Converter into `target`; only int, float, decimal and bool are supported.
    pub fn new(target: ValueKind) -> Result<Self, SchemaError> {
        match target {
            ValueKind::Int | ValueKind::Float | ValueKind::Decimal | ValueKind::Bool => Ok(Self {
                source: ValueNode::string(),
                target,
            }),
            other => Err(SchemaError::UnsupportedConversion(other)),
        }
    }

    pub fn to_int() -> Self {
        Self::with_target(ValueKind::Int)
    }

    pub fn to_float() -> Self {
        Self::with_target(ValueKind::Float)
    }

    pub fn to_decimal() -> Self {
        Self::with_target(ValueKind::Decimal)
    }

    pub fn to_bool() -> Self {
        Self::with_target(ValueKind::Bool)
    }

    fn with_target(target: ValueKind) -> Self {
        Self {
            source: ValueNode::string(),
            target,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.source = self.source.required(required);
        self
    }

    pub fn optional(self) -> Self {
        self.required(false)
    }

    /// Unparsed string used when the input is null.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.source = self.source.default(value);
        self
    }

    pub fn target(&self) -> ValueKind {
        self.target
    }

    pub(crate) fn name(&self) -> &'static str {
        match self.target {
            ValueKind::Int => "AsInt",
            ValueKind::Float => "AsFloat",
            ValueKind::Decimal => "AsDecimal",
            _ => "AsBool",
        }
    }

    pub(crate) fn validate(
        &self,
        node: &Node,
        value: &Value,
        options: &SchemaOptions,
    ) -> Result<Value, ValidationError> {
        let value = self.source.validate(node, value, options)?;
        let Some(text) = value.as_str() else {
            return Ok(value);
        };

        self.parse(text.trim()).ok_or_else(|| {
            node.reject(ValidationError::ConversionFailed {
                path: node.path().to_string(),
                value: value.clone(),
                target: self.target,
            })
        })
    }

    fn parse(&self, text: &str) -> Option<Value> {
        match self.target {
            ValueKind::Int => text.parse::<i64>().ok().map(Value::Int),
            ValueKind::Float => text
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::Float),
            ValueKind::Decimal => text
                .parse::<Decimal>()
                .or_else(|_| Decimal::from_scientific(text))
                .ok()
                .map(Value::Decimal),
            _ => match text.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(Value::Bool(true)),
                "false" | "no" | "off" | "0" => Some(Value::Bool(false)),
                _ => None,
            },
        }
    }

    pub(crate) fn describe_into(&self, out: &mut serde_json::Map<String, serde_json::Value>) {
        self.source.describe_into(out);
        out.insert("target".into(), json!(self.target));
    }
}

impl From<Convert> for Node {
    fn from(value: Convert) -> Self {
        Node::from_kind(NodeKind::Convert(value))
    }
}
