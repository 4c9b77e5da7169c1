//! Value model shared by definitions, nodes and validated data.
//!
//! [`Value`] is the dynamic data tree that schemas validate. Mappings use
//! arbitrary [`Value`] keys (not only strings) so type-keyed mappings such as
//! `{int: string}` can be expressed for data that comes from YAML or is built
//! by the host program. [`ValueKind`] names the runtime type of a value and
//! doubles as the primitive type marker in schema definitions.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Mapping payload of [`Value::Map`].
pub type Map = BTreeMap<Value, Value>;

/// A dynamically typed data value.
///
/// Values are totally ordered (floats via [`f64::total_cmp`]) so they can be
/// used as mapping keys. Equality is strict: `Int(1)` and `Float(1.0)` are
/// different values, as are `Bool(true)` and `Int(1)`.
///
/// # Examples
///
/// ```
/// use dataschema_core::{Value, ValueKind};
///
/// let value = Value::map([("name", Value::from("svc")), ("version", Value::from(2))]);
/// assert_eq!(value.kind(), ValueKind::Map);
/// assert_eq!(value.get("version"), Some(&Value::Int(2)));
///
/// let from_json = Value::from(serde_json::json!({"name": "svc", "version": 2}));
/// assert_eq!(from_json, value);
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent or explicit null.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Exact decimal number.
    Decimal(Decimal),
    /// UTF-8 string.
    String(String),
    /// Raw byte string.
    Bytes(Vec<u8>),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Mapping with arbitrary keys.
    Map(Map),
}

impl Value {
    /// Builds a [`Value::Map`] from key/value pairs.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a [`Value::List`] from items.
    pub fn list<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns the runtime kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::String(_) => ValueKind::String,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` when this value is a mapping.
    pub fn get(&self, key: impl Into<Value>) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(&key.into()))
    }

    /// Renders the value for use inside a diagnostic path.
    ///
    /// Strings are shown without quotes; everything else uses `Display`.
    pub fn label(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Orders two values for range checks.
    ///
    /// Numbers compare across int/float, strings, byte strings and lists
    /// compare among themselves. Booleans count as 0/1 only when
    /// `bool_is_int` is set. Returns `None` for pairs without an ordering.
    pub(crate) fn compare(&self, other: &Value, bool_is_int: bool) -> Option<Ordering> {
        let numeric = |value: &Value| match value {
            Value::Bool(b) if bool_is_int => Some(Value::Int(i64::from(*b))),
            Value::Int(_) | Value::Float(_) | Value::Decimal(_) => Some(value.clone()),
            _ => None,
        };

        if let (Some(a), Some(b)) = (numeric(self), numeric(other)) {
            return match (a, b) {
                (Value::Int(a), Value::Int(b)) => Some(a.cmp(&b)),
                (Value::Float(a), Value::Float(b)) => a.partial_cmp(&b),
                (Value::Decimal(a), Value::Decimal(b)) => Some(a.cmp(&b)),
                (Value::Int(i), Value::Float(f)) => int_cmp_float(i, f),
                (Value::Float(f), Value::Int(i)) => int_cmp_float(i, f).map(Ordering::reverse),
                (Value::Int(i), Value::Decimal(d)) => Some(Decimal::from(i).cmp(&d)),
                (Value::Decimal(d), Value::Int(i)) => Some(d.cmp(&Decimal::from(i))),
                (Value::Decimal(d), Value::Float(f)) => decimal_cmp_float(d, f),
                (Value::Float(f), Value::Decimal(d)) => {
                    decimal_cmp_float(d, f).map(Ordering::reverse)
                }
                _ => None,
            };
        }

        match (self, other) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Bytes(a), Value::Bytes(b)) => Some(a.cmp(b)),
            (Value::List(a), Value::List(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Equality as a literal schema node sees it.
    ///
    /// Like `==` except that floats compare by IEEE rules: `0.0` equals
    /// `-0.0` and NaN equals nothing. `==` on [`Value`] keeps the total
    /// order so values stay usable as mapping keys.
    pub(crate) fn literal_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.literal_eq(y))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka.literal_eq(kb) && va.literal_eq(vb))
            }
            (a, b) => a == b,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) => 2,
            Value::Float(_) => 3,
            Value::Decimal(_) => 4,
            Value::String(_) => 5,
            Value::Bytes(_) => 6,
            Value::List(_) => 7,
            Value::Map(_) => 8,
        }
    }
}

/// Exact ordering of an integer against a float; `None` for NaN.
fn int_cmp_float(i: i64, f: f64) -> Option<Ordering> {
    // 2^63 is the first float above i64::MAX; -2^63 is i64::MIN exactly.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() {
        return None;
    }
    if f >= LIMIT {
        return Some(Ordering::Less);
    }
    if f < -LIMIT {
        return Some(Ordering::Greater);
    }
    let whole = f.trunc();
    Some(i.cmp(&(whole as i64)).then_with(|| {
        let fraction = f - whole;
        if fraction > 0.0 {
            Ordering::Less
        } else if fraction < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }))
}

/// Ordering of a decimal against a float, exact wherever the float fits.
fn decimal_cmp_float(d: Decimal, f: f64) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    match Decimal::from_f64_retain(f) {
        Some(converted) => Some(d.cmp(&converted)),
        None if f > 0.0 => Some(Ordering::Less),
        None => Some(Ordering::Greater),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => a.cmp(b),
            (Value::Map(a), Value::Map(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Bytes(bytes) => write!(f, "b{:?}", String::from_utf8_lossy(bytes)),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (Value::String(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Decimal(d) => serializer.collect_str(d),
            Value::String(s) => serializer.serialize_str(s),
            Value::Bytes(bytes) => serializer.serialize_bytes(bytes),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any data value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> Result<Value, E> {
        Ok(Value::Int(i))
    }

    fn visit_u64<E: de::Error>(self, u: u64) -> Result<Value, E> {
        Ok(i64::try_from(u).map_or(Value::Float(u as f64), Value::Int))
    }

    fn visit_f64<E: de::Error>(self, x: f64) -> Result<Value, E> {
        Ok(Value::Float(x))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_bytes<E: de::Error>(self, bytes: &[u8]) -> Result<Value, E> {
        Ok(Value::Bytes(bytes.to_vec()))
    }

    fn visit_byte_buf<E: de::Error>(self, bytes: Vec<u8>) -> Result<Value, E> {
        Ok(Value::Bytes(bytes))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = Map::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Runtime type of a [`Value`], also used as a primitive type marker.
///
/// Kinds form a hierarchy rooted at [`Any`](ValueKind::Any):
///
/// ```text
/// Any ─┬─ Number ─┬─ Int ── (Bool, with bool_is_int)
///      │          ├─ Float
///      │          └─ Decimal
///      ├─ Bool
///      ├─ String, Bytes, List, Map, Null
/// ```
///
/// A value matches a kind when its own kind is that kind or one of its
/// descendants.
///
/// # Examples
///
/// ```
/// use dataschema_core::{Value, ValueKind};
///
/// assert!(ValueKind::Number.accepts(&Value::Int(3), false));
/// assert!(ValueKind::Any.accepts(&Value::from("x"), false));
/// assert!(!ValueKind::Int.accepts(&Value::Bool(true), false));
/// assert!(ValueKind::Int.accepts(&Value::Bool(true), true));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Any value (the root of the hierarchy).
    Any,
    /// The null value.
    Null,
    /// Booleans.
    Bool,
    /// Integers.
    Int,
    /// Floats.
    Float,
    /// Exact decimals.
    Decimal,
    /// Integers, floats and decimals.
    Number,
    /// Strings.
    String,
    /// Byte strings.
    Bytes,
    /// Sequences.
    List,
    /// Mappings.
    Map,
}

impl ValueKind {
    /// Returns the direct supertype of this kind.
    pub fn parent(self, bool_is_int: bool) -> Option<ValueKind> {
        match self {
            ValueKind::Any => None,
            ValueKind::Bool if bool_is_int => Some(ValueKind::Int),
            ValueKind::Int | ValueKind::Float | ValueKind::Decimal => Some(ValueKind::Number),
            _ => Some(ValueKind::Any),
        }
    }

    /// Returns `true` if `self` is `other` or one of its descendants.
    pub fn is_subtype_of(self, other: ValueKind, bool_is_int: bool) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent(bool_is_int);
        }
        false
    }

    /// Returns `true` if `value` is an instance of this kind.
    pub fn accepts(self, value: &Value, bool_is_int: bool) -> bool {
        value.kind().is_subtype_of(self, bool_is_int)
    }

    /// Depth in the widest hierarchy (booleans under integers).
    ///
    /// Deeper kinds are more specific; type-keyed mappings try them first.
    pub fn specificity(self) -> usize {
        let mut depth = 0;
        let mut current = self.parent(true);
        while let Some(kind) = current {
            depth += 1;
            current = kind.parent(true);
        }
        depth
    }

    /// Lowercase type name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Any => "any",
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Decimal => "decimal",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Bytes => "bytes",
            ValueKind::List => "list",
            ValueKind::Map => "map",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
