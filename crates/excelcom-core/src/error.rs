//! Error types for excelcom-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing ranges or marshalling values.
///
/// All of these are deterministic given their inputs; retrying is pointless.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed range token or column letters
    #[error("Unknown range format: {0}")]
    InvalidFormat(String),

    /// Column or row index outside the grid limits
    #[error("{kind} index {index} is out of range (1 to {max})")]
    OutOfRange {
        kind: &'static str,
        index: u64,
        max: u64,
    },

    /// Letter run longer than 3 characters or row number above 1,048,576
    #[error("range too big: {0}")]
    RangeTooLarge(String),

    /// Begin of range lies after its end
    #[error("begin of range is bigger than its end: {0}")]
    InvalidRangeOrder(String),

    /// Host value has no wire representation
    #[error("unknown type when creating wire value: {0}")]
    UnsupportedType(&'static str),

    /// Matrix shape is inconsistent with itself or with the target range
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A single cell was required but a multi-cell range was given
    #[error("expected a single cell, got range {0}")]
    NotASingleCell(String),

    /// The search start cell is not inside the searched range
    #[error("search start {after} lies outside range {range}")]
    AfterOutsideRange { after: String, range: String },
}

impl Error {
    pub(crate) fn column_out_of_range(index: u64) -> Self {
        Error::OutOfRange {
            kind: "column",
            index,
            max: crate::MAX_COLS as u64,
        }
    }

    pub(crate) fn row_out_of_range(index: u64) -> Self {
        Error::OutOfRange {
            kind: "row",
            index,
            max: crate::MAX_ROWS as u64,
        }
    }
}

/// Failure of a worksheet or search operation.
///
/// Engine errors are wrapped as-is; errors raised by the grid collaborator are
/// passed through untouched so callers can decide whether to retry.
#[derive(Debug, Error)]
pub enum SheetError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Engine(#[from] Error),

    #[error(transparent)]
    Backend(E),
}

impl<E> SheetError<E>
where
    E: std::error::Error + 'static,
{
    /// The engine error, if this failure was not raised by the backend
    pub fn as_engine(&self) -> Option<&Error> {
        match self {
            SheetError::Engine(e) => Some(e),
            SheetError::Backend(_) => None,
        }
    }

    /// The backend error, if the collaborator failed
    pub fn as_backend(&self) -> Option<&E> {
        match self {
            SheetError::Engine(_) => None,
            SheetError::Backend(e) => Some(e),
        }
    }
}
