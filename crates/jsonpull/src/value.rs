//! In-memory JSON values produced by the tree builder.
//!
//! [`Value`] keeps integers and doubles apart, mirroring the
//! [`Event::ValueInt`](crate::Event::ValueInt) /
//! [`Event::ValueDouble`](crate::Event::ValueDouble) split of the tokenizer.
use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt::Write as _;

/// Object members, ordered by key.
pub type Map = BTreeMap<String, Value>;
/// Array elements.
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259].
///
/// # Examples
///
/// ```
/// use jsonpull::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::Array(vec![Value::Int(1), Value::Null]));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":[1,null]}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// `true` or `false`
    Bool(bool),
    /// A number without fraction or exponent that fits in an `i64`.
    Int(i64),
    /// Any other number.
    Double(f64),
    /// A string, escapes resolved.
    String(String),
    /// An array.
    Array(Array),
    /// An object; a repeated key keeps its last value.
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for [`Value::Int`] and [`Value::Double`].
    ///
    /// ```
    /// use jsonpull::Value;
    ///
    /// assert!(Value::Int(42).is_number());
    /// assert!(Value::Double(0.5).is_number());
    /// assert!(!Value::Null.is_number());
    /// ```
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(..) | Self::Double(..))
    }

    /// Returns `true` if the value is an array node.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is an object node.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Returns `true` for arrays and objects, the nodes a
    /// [`TreeNavigator`](crate::TreeNavigator) can descend into.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.is_array() || self.is_object()
    }

    /// The text of a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The value of an integer; doubles are not converted.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The numeric value as a double; integers are converted.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Double(n) => Some(*n),
            _ => None,
        }
    }

    /// Looks up a member of an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Looks up an element of an array.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Self::Array(items) => items.get(index),
            _ => None,
        }
    }
}

/// Writes `src` as the body of a JSON string literal.
pub(crate) fn write_escaped_string<W: core::fmt::Write>(src: &str, f: &mut W) -> core::fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            // Unicode line separators trip up pre-2019 JSON parsers.
            '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04X}", u32::from(c))?,
            c if c.is_control() && u32::from(c) <= 0xFFFF => write!(f, "\\u{:04X}", u32::from(c))?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Int(n) => write!(f, "{n}"),
            // Integral doubles keep a fraction so they read back as doubles.
            Value::Double(n) if n.is_finite() => {
                let text = alloc::string::ToString::to_string(n);
                f.write_str(&text)?;
                if !text.contains('.') {
                    f.write_str(".0")?;
                }
                Ok(())
            }
            // Non-finite doubles never come out of the tokenizer.
            Value::Double(_) => f.write_str("null"),
            Value::String(s) => {
                f.write_char('"')?;
                write_escaped_string(s, f)?;
                f.write_char('"')
            }
            Value::Array(arr) => {
                f.write_char('[')?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_char(']')
            }
            Value::Object(map) => {
                f.write_char('{')?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    f.write_char('"')?;
                    write_escaped_string(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_char('}')
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::*;

    #[test]
    fn display_is_compact_json() {
        let mut map = Map::new();
        map.insert("b".into(), Value::Double(2.5));
        map.insert("a".into(), Value::Array(vec![Value::Int(-1), Value::Bool(true)]));
        assert_eq!(Value::Object(map).to_string(), r#"{"a":[-1,true],"b":2.5}"#);
    }

    #[test]
    fn integral_doubles_keep_a_fraction() {
        assert_eq!(Value::Double(3.0).to_string(), "3.0");
        assert_eq!(Value::Double(1e20).to_string(), "100000000000000000000.0");
        assert_eq!(Value::Double(-0.25).to_string(), "-0.25");
    }

    #[test]
    fn strings_are_escaped() {
        let v = Value::from("q\"b\\n\n\u{1}\u{2028}é");
        assert_eq!(v.to_string(), r#""q\"b\\n\n\u0001\u2028é""#);
    }

    #[test]
    fn accessors() {
        let v = Value::Array(vec![Value::Int(3), Value::from("s")]);
        assert_eq!(v.get_index(0).and_then(Value::as_f64), Some(3.0));
        assert_eq!(v.get_index(1).and_then(Value::as_str), Some("s"));
        assert_eq!(v.get("x"), None);
        assert!(v.is_container());
        assert!(!Value::Int(1).is_container());
    }
}
