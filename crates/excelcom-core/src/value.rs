//! Host values and their tagged wire representation
//!
//! The grid boundary speaks a closed set of tagged values. [`HostValue`] is
//! the same set as seen by application code; [`encode`] and [`decode`] map
//! between the two without loss.

use std::any::{type_name, Any};
use std::fmt;

use chrono::NaiveDateTime;

use crate::error::{Error, Result};

/// How a text value should be transported.
///
/// Strings with anything outside `[A-Za-z0-9 ]` travel as rich text so the
/// transport keeps symbols and non-ASCII characters intact. Decoding treats
/// both kinds the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TextKind {
    #[default]
    Plain,
    Rich,
}

/// A text payload with its transport hint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WireText {
    pub kind: TextKind,
    pub value: String,
}

impl WireText {
    /// Wrap a string, choosing the kind from its content
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let kind = if contains_special_characters(&value) {
            TextKind::Rich
        } else {
            TextKind::Plain
        };
        Self { kind, value }
    }
}

/// A tagged value as exchanged with the grid
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "value")
)]
pub enum WireValue {
    Text(WireText),
    Integer32(i32),
    Float32(f32),
    Float64(f64),
    Integer64(i64),
    Date(NaiveDateTime),
    Integer16(i16),
    Boolean(bool),
    Byte(u8),
    #[default]
    Null,
}

impl WireValue {
    /// Plain or rich text, depending on the content
    pub fn text(value: impl Into<String>) -> Self {
        WireValue::Text(WireText::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }

    /// The tag name, for diagnostics
    pub fn tag(&self) -> &'static str {
        match self {
            WireValue::Text(WireText {
                kind: TextKind::Plain,
                ..
            }) => "text",
            WireValue::Text(WireText {
                kind: TextKind::Rich,
                ..
            }) => "rich-text",
            WireValue::Integer32(_) => "int32",
            WireValue::Float32(_) => "float32",
            WireValue::Float64(_) => "float64",
            WireValue::Integer64(_) => "int64",
            WireValue::Date(_) => "date",
            WireValue::Integer16(_) => "int16",
            WireValue::Boolean(_) => "bool",
            WireValue::Byte(_) => "byte",
            WireValue::Null => "null",
        }
    }
}

/// An application-side cell value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HostValue {
    String(String),
    I32(i32),
    F32(f32),
    F64(f64),
    I64(i64),
    Date(NaiveDateTime),
    I16(i16),
    Bool(bool),
    U8(u8),
    /// Absence of a value (empty cell)
    #[default]
    Null,
}

impl HostValue {
    pub fn is_null(&self) -> bool {
        matches!(self, HostValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value widened to f64, if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HostValue::I32(n) => Some(*n as f64),
            HostValue::F32(n) => Some(*n as f64),
            HostValue::F64(n) => Some(*n),
            HostValue::I64(n) => Some(*n as f64),
            HostValue::I16(n) => Some(*n as f64),
            HostValue::U8(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HostValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Convert a dynamically typed value, failing for types outside the
    /// supported set.
    ///
    /// ```
    /// use excelcom_core::HostValue;
    ///
    /// assert_eq!(HostValue::from_any(&7i16).unwrap(), HostValue::I16(7));
    /// assert!(HostValue::from_any(&'x').is_err());
    /// ```
    pub fn from_any<T: Any>(value: &T) -> Result<Self> {
        let any = value as &dyn Any;

        let host = if let Some(v) = any.downcast_ref::<HostValue>() {
            v.clone()
        } else if let Some(s) = any.downcast_ref::<String>() {
            HostValue::String(s.clone())
        } else if let Some(s) = any.downcast_ref::<&str>() {
            HostValue::String((*s).to_string())
        } else if let Some(n) = any.downcast_ref::<i32>() {
            HostValue::I32(*n)
        } else if let Some(n) = any.downcast_ref::<f32>() {
            HostValue::F32(*n)
        } else if let Some(n) = any.downcast_ref::<f64>() {
            HostValue::F64(*n)
        } else if let Some(n) = any.downcast_ref::<i64>() {
            HostValue::I64(*n)
        } else if let Some(d) = any.downcast_ref::<NaiveDateTime>() {
            HostValue::Date(*d)
        } else if let Some(n) = any.downcast_ref::<i16>() {
            HostValue::I16(*n)
        } else if let Some(b) = any.downcast_ref::<bool>() {
            HostValue::Bool(*b)
        } else if let Some(n) = any.downcast_ref::<u8>() {
            HostValue::U8(*n)
        } else if any.is::<()>() {
            HostValue::Null
        } else {
            return Err(Error::UnsupportedType(type_name::<T>()));
        };

        Ok(host)
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::String(s) => write!(f, "{s}"),
            HostValue::I32(n) => write!(f, "{n}"),
            HostValue::F32(n) => write!(f, "{n}"),
            HostValue::F64(n) => write!(f, "{n}"),
            HostValue::I64(n) => write!(f, "{n}"),
            HostValue::Date(d) => write!(f, "{d}"),
            HostValue::I16(n) => write!(f, "{n}"),
            HostValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            HostValue::U8(n) => write!(f, "{n}"),
            HostValue::Null => write!(f, "<empty>"),
        }
    }
}

/// Encode a host value for the wire
pub fn encode(value: &HostValue) -> WireValue {
    match value {
        HostValue::String(s) => WireValue::text(s.as_str()),
        HostValue::I32(n) => WireValue::Integer32(*n),
        HostValue::F32(n) => WireValue::Float32(*n),
        HostValue::F64(n) => WireValue::Float64(*n),
        HostValue::I64(n) => WireValue::Integer64(*n),
        HostValue::Date(d) => WireValue::Date(*d),
        HostValue::I16(n) => WireValue::Integer16(*n),
        HostValue::Bool(b) => WireValue::Boolean(*b),
        HostValue::U8(n) => WireValue::Byte(*n),
        HostValue::Null => WireValue::Null,
    }
}

/// Encode any value of a supported type; other types fail with
/// `UnsupportedType` naming the type.
pub fn encode_any<T: Any>(value: &T) -> Result<WireValue> {
    HostValue::from_any(value).map(|host| encode(&host))
}

/// Decode a wire value. Both text kinds decode to a string.
pub fn decode(value: WireValue) -> HostValue {
    match value {
        WireValue::Text(text) => HostValue::String(text.value),
        WireValue::Integer32(n) => HostValue::I32(n),
        WireValue::Float32(n) => HostValue::F32(n),
        WireValue::Float64(n) => HostValue::F64(n),
        WireValue::Integer64(n) => HostValue::I64(n),
        WireValue::Date(d) => HostValue::Date(d),
        WireValue::Integer16(n) => HostValue::I16(n),
        WireValue::Boolean(b) => HostValue::Bool(b),
        WireValue::Byte(n) => HostValue::U8(n),
        WireValue::Null => HostValue::Null,
    }
}

/// True if the string has any character other than ASCII letters, digits
/// and spaces
pub fn contains_special_characters(s: &str) -> bool {
    s.chars().any(|c| !(c.is_ascii_alphanumeric() || c == ' '))
}

impl From<&HostValue> for WireValue {
    fn from(value: &HostValue) -> Self {
        encode(value)
    }
}

impl From<HostValue> for WireValue {
    fn from(value: HostValue) -> Self {
        encode(&value)
    }
}

impl From<WireValue> for HostValue {
    fn from(value: WireValue) -> Self {
        decode(value)
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::String(s.to_string())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::String(s)
    }
}

impl From<i32> for HostValue {
    fn from(n: i32) -> Self {
        HostValue::I32(n)
    }
}

impl From<f32> for HostValue {
    fn from(n: f32) -> Self {
        HostValue::F32(n)
    }
}

impl From<f64> for HostValue {
    fn from(n: f64) -> Self {
        HostValue::F64(n)
    }
}

impl From<i64> for HostValue {
    fn from(n: i64) -> Self {
        HostValue::I64(n)
    }
}

impl From<NaiveDateTime> for HostValue {
    fn from(d: NaiveDateTime) -> Self {
        HostValue::Date(d)
    }
}

impl From<i16> for HostValue {
    fn from(n: i16) -> Self {
        HostValue::I16(n)
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Bool(b)
    }
}

impl From<u8> for HostValue {
    fn from(n: u8) -> Self {
        HostValue::U8(n)
    }
}

impl From<()> for HostValue {
    fn from(_: ()) -> Self {
        HostValue::Null
    }
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(HostValue::Null)
    }
}
