//! # excelcom-core
//!
//! Coordinate and value marshalling for spreadsheet automation.
//!
//! The grid application itself is reached through a [`GridBackend`]; this
//! crate owns everything that happens on our side of that boundary:
//! - [`alphabet`] - column numbers to letters ("AA" = 27) and back
//! - [`range`] - range tokens ("A1", "B2:D10") to zero-based bounds and back
//! - [`matrix`] - row-major application matrices vs. column-major grid arrays
//! - [`value`] - host values to tagged [`WireValue`]s and back
//! - [`search`] - repeatable Find/FindNext with cycle detection
//! - [`sheet`] - worksheet level content and search operations
//!
//! ## Example
//!
//! ```rust
//! use excelcom_core::{range_size, RangeAddress};
//!
//! let bounds = range_size("A1:C2").unwrap();
//! assert_eq!((bounds.row_count(), bounds.column_count()), (2, 3));
//!
//! let range: RangeAddress = "AA10:CB20".parse().unwrap();
//! assert_eq!(range.from_column(), 26);
//! assert_eq!(range.to_token(), "AA10:CB20");
//! ```

pub mod alphabet;
pub mod backend;
pub mod error;
pub mod matrix;
pub mod range;
pub mod search;
pub mod sheet;
pub mod value;

// Re-exports for convenience
pub use alphabet::ColumnIndex;
pub use backend::{CellHandle, FindQuery, GridBackend};
pub use error::{Error, Result, SheetError};
pub use matrix::{normalize_ragged, transpose, Matrix, RawGridValue};
pub use range::{
    format_cell, format_range, parse_cell, parse_range, range_size, CellPosition, RangeAddress,
    RangeBounds,
};
pub use search::{
    LookAt, LookIn, SearchCursor, SearchDirection, SearchOptions, SearchOrder, SearchScope,
};
pub use sheet::Worksheet;
pub use value::{HostValue, TextKind, WireText, WireValue};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u32 = 16_384;

/// Longest column name the grid can produce ("XFD")
pub const MAX_COLUMN_LETTERS: usize = 3;
