//! Protocol types for talking to a grid automation bridge.
//!
//! The protocol is JSON over a byte stream: one JSON object per line in each
//! direction. Every request carries an id; the bridge answers each request
//! with exactly one response carrying the same id.

use std::fmt;

use excelcom_core::{CellHandle, CellPosition, FindQuery, RawGridValue, SearchDirection};
use serde::{Deserialize, Serialize};

/// A command sent from the client to the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Monotonically increasing request ID for correlating responses.
    pub id: u64,
    /// The command to execute.
    #[serde(flatten)]
    pub command: Command,
}

/// Commands the client can send to the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params")]
pub enum Command {
    /// Read the value of a range token or `"UsedRange"`.
    GetRangeValue { sheet: SheetRef, range: String },

    /// Write a scalar (broadcast to every cell) or a column-major array.
    SetRangeValue {
        sheet: SheetRef,
        range: String,
        value: RawGridValue,
    },

    /// Run Find over a range. Answered with a `Match`.
    Find { sheet: SheetRef, query: FindQuery },

    /// Continue the last Find from a previous match. Answered with a `Match`.
    FindNext {
        sheet: SheetRef,
        range: String,
        after: CellPosition,
        direction: SearchDirection,
    },
}

impl Command {
    /// Command name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetRangeValue { .. } => "GetRangeValue",
            Command::SetRangeValue { .. } => "SetRangeValue",
            Command::Find { .. } => "Find",
            Command::FindNext { .. } => "FindNext",
        }
    }
}

/// Reference to a worksheet, by 0-based index or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SheetRef {
    Index(u32),
    Name(String),
}

impl Default for SheetRef {
    fn default() -> Self {
        SheetRef::Index(0)
    }
}

impl From<u32> for SheetRef {
    fn from(index: u32) -> Self {
        SheetRef::Index(index)
    }
}

impl From<&str> for SheetRef {
    fn from(name: &str) -> Self {
        SheetRef::Name(name.to_string())
    }
}

impl From<String> for SheetRef {
    fn from(name: String) -> Self {
        SheetRef::Name(name)
    }
}

impl fmt::Display for SheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetRef::Index(i) => write!(f, "#{i}"),
            SheetRef::Name(name) => write!(f, "{name}"),
        }
    }
}

/// A response sent from the bridge back to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// The request ID this response corresponds to.
    pub id: u64,
    /// The result of the command.
    #[serde(flatten)]
    pub result: ResponseResult,
}

impl Response {
    pub fn ok(id: u64, data: Option<ResponseData>) -> Self {
        Self {
            id,
            result: ResponseResult::Ok { data },
        }
    }

    pub fn error(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            result: ResponseResult::Error {
                message: message.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ResponseResult {
    #[serde(rename = "ok")]
    Ok {
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<ResponseData>,
    },
    #[serde(rename = "error")]
    Error { message: String },
}

/// Data returned in successful responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    /// Value of a range.
    Value { value: RawGridValue },
    /// Outcome of a Find or FindNext; `None` when nothing matched.
    Match { cell: Option<CellHandle> },
}

/// Encode a message as one line of JSON, including the trailing newline.
pub fn to_line<T: Serialize>(message: &T) -> serde_json::Result<String> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    Ok(line)
}

/// Decode one line of JSON; surrounding whitespace is ignored.
pub fn from_line<'a, T: Deserialize<'a>>(line: &'a str) -> serde_json::Result<T> {
    serde_json::from_str(line.trim())
}
