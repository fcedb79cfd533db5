//! Range tokens ("A1", "AA10:CB20") and zero-based bounds
//!
//! Tokens use 1-based rows and lettered columns; everything behind the parser
//! is zero-based. A single-cell token is the degenerate range where begin and
//! end coincide.

use std::fmt;
use std::str::FromStr;

use crate::alphabet::{self, column_letters};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_COLUMN_LETTERS, MAX_ROWS};

/// Shape of a range: how many rows and columns it spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeBounds {
    row_count: u32,
    column_count: u32,
}

impl RangeBounds {
    pub(crate) fn new(row_count: u32, column_count: u32) -> Self {
        debug_assert!(row_count >= 1 && column_count >= 1);
        Self {
            row_count,
            column_count,
        }
    }

    /// Number of rows (at least 1)
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Number of columns (at least 1)
    pub fn column_count(&self) -> u32 {
        self.column_count
    }

    /// Whether the range is a single cell
    pub fn is_unary(&self) -> bool {
        self.row_count == 1 && self.column_count == 1
    }

    /// Total number of cells
    pub fn cell_count(&self) -> u64 {
        self.row_count as u64 * self.column_count as u64
    }
}

/// A zero-based cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellPosition {
    /// Row index (0-based)
    pub row: u32,
    /// Column index (0-based, A=0)
    pub column: u32,
}

impl CellPosition {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Format as an A1-style token
    pub fn to_token(&self) -> String {
        format_cell(self.row, self.column)
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_token())
    }
}

/// A validated rectangular range, zero-based and inclusive on both ends
///
/// Invariants: `from_row <= to_row`, `from_column <= to_column`, and every
/// coordinate lies inside the grid (rows < 1,048,576, columns < 16,384).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeAddress {
    from_row: u32,
    from_column: u32,
    to_row: u32,
    to_column: u32,
}

impl RangeAddress {
    /// Create a range from zero-based bounds.
    ///
    /// Fails with `OutOfRange` for coordinates beyond the grid and with
    /// `InvalidRangeOrder` when a begin coordinate lies after its end. Begin and
    /// end are never swapped silently.
    pub fn new(from_row: u32, from_column: u32, to_row: u32, to_column: u32) -> Result<Self> {
        for row in [from_row, to_row] {
            if row >= MAX_ROWS {
                return Err(Error::row_out_of_range(row as u64 + 1));
            }
        }
        for column in [from_column, to_column] {
            if column >= MAX_COLS {
                return Err(Error::column_out_of_range(column as u64 + 1));
            }
        }
        if from_row > to_row || from_column > to_column {
            return Err(Error::InvalidRangeOrder(format_range(
                from_row,
                from_column,
                to_row,
                to_column,
            )));
        }

        Ok(Self {
            from_row,
            from_column,
            to_row,
            to_column,
        })
    }

    /// Single-cell range
    pub fn unary(row: u32, column: u32) -> Result<Self> {
        Self::new(row, column, row, column)
    }

    /// Range spanning two positions (begin must not lie after end)
    pub fn between(from: CellPosition, to: CellPosition) -> Result<Self> {
        Self::new(from.row, from.column, to.row, to.column)
    }

    pub fn from_row(&self) -> u32 {
        self.from_row
    }

    pub fn from_column(&self) -> u32 {
        self.from_column
    }

    pub fn to_row(&self) -> u32 {
        self.to_row
    }

    pub fn to_column(&self) -> u32 {
        self.to_column
    }

    /// Top-left cell
    pub fn start(&self) -> CellPosition {
        CellPosition::new(self.from_row, self.from_column)
    }

    /// Bottom-right cell
    pub fn end(&self) -> CellPosition {
        CellPosition::new(self.to_row, self.to_column)
    }

    /// Shape of the range
    pub fn bounds(&self) -> RangeBounds {
        RangeBounds::new(
            self.to_row - self.from_row + 1,
            self.to_column - self.from_column + 1,
        )
    }

    /// Whether the range is a single cell
    pub fn is_unary(&self) -> bool {
        self.from_row == self.to_row && self.from_column == self.to_column
    }

    /// Check if a cell is within this range
    pub fn contains(&self, position: CellPosition) -> bool {
        position.row >= self.from_row
            && position.row <= self.to_row
            && position.column >= self.from_column
            && position.column <= self.to_column
    }

    /// Format as "A1" for a single cell or "A1:B10" otherwise
    pub fn to_token(&self) -> String {
        if self.is_unary() {
            format_cell(self.from_row, self.from_column)
        } else {
            format_range(self.from_row, self.from_column, self.to_row, self.to_column)
        }
    }
}

impl fmt::Display for RangeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_token())
    }
}

impl FromStr for RangeAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_range(s)
    }
}

/// Report the shape of a range token.
///
/// A token without `:` is a single cell and reports `{1, 1}` without being
/// decoded. Two-part tokens are fully validated.
///
/// ```
/// use excelcom_core::range_size;
///
/// let bounds = range_size("AA1:AC3").unwrap();
/// assert_eq!((bounds.row_count(), bounds.column_count()), (3, 3));
/// assert!(range_size("A2:B5:C6").is_err());
/// ```
pub fn range_size(token: &str) -> Result<RangeBounds> {
    match split_token(token)?.as_slice() {
        [_] => Ok(RangeBounds::new(1, 1)),
        [from, to] => Ok(parse_span(token, from, to)?.bounds()),
        _ => Err(Error::InvalidFormat(token.to_string())),
    }
}

/// Decode a range token into absolute zero-based bounds.
pub fn parse_range(token: &str) -> Result<RangeAddress> {
    match split_token(token)?.as_slice() {
        [cell] => {
            let position = CellToken::split(token, cell)?.check_size(token)?.decode()?;
            RangeAddress::unary(position.row, position.column)
        }
        [from, to] => parse_span(token, from, to),
        _ => Err(Error::InvalidFormat(token.to_string())),
    }
}

/// Decode a single-cell token.
///
/// A two-part token is accepted when both parts name the same cell ("B2:B2");
/// any larger shape fails with `NotASingleCell`.
pub fn parse_cell(token: &str) -> Result<CellPosition> {
    match split_token(token)?.as_slice() {
        [cell] => CellToken::split(token, cell)?.check_size(token)?.decode(),
        [from, to] => {
            let range = parse_span(token, from, to)?;
            if !range.is_unary() {
                return Err(Error::NotASingleCell(token.to_string()));
            }
            Ok(range.start())
        }
        _ => Err(Error::InvalidFormat(token.to_string())),
    }
}

/// Format a zero-based cell coordinate as an A1-style token
pub fn format_cell(row: u32, column: u32) -> String {
    format!("{}{}", column_letters(column as u64 + 1), row as u64 + 1)
}

/// Format zero-based bounds as a two-cell token ("A1:B2")
pub fn format_range(from_row: u32, from_column: u32, to_row: u32, to_column: u32) -> String {
    format!(
        "{}:{}",
        format_cell(from_row, from_column),
        format_cell(to_row, to_column)
    )
}

fn split_token(token: &str) -> Result<Vec<&str>> {
    let parts: Vec<&str> = token.split(':').collect();
    if parts.len() > 2 {
        return Err(Error::InvalidFormat(token.to_string()));
    }
    Ok(parts)
}

fn parse_span(token: &str, from: &str, to: &str) -> Result<RangeAddress> {
    let from = CellToken::split(token, from)?;
    let to = CellToken::split(token, to)?;

    let from = from.check_size(token)?;
    let to = to.check_size(token)?;

    if from.row > to.row {
        return Err(Error::InvalidRangeOrder(token.to_string()));
    }

    let from = from.decode()?;
    let to = to.decode()?;

    if from.column > to.column {
        return Err(Error::InvalidRangeOrder(token.to_string()));
    }

    RangeAddress::between(from, to)
}

/// The two runs of a cell token before validation
struct CellToken<'a> {
    letters: &'a str,
    digits: &'a str,
}

/// A cell token whose runs fit the grid limits
struct SizedCell<'a> {
    letters: &'a str,
    row: u32,
}

impl<'a> CellToken<'a> {
    /// Split "$AB$12" into its letter and digit runs
    fn split(token: &str, part: &'a str) -> Result<Self> {
        let part = part.trim();
        let bytes = part.as_bytes();
        let mut pos = 0;

        // Column absolute marker
        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let letters_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        let letters = &part[letters_start..pos];

        // Row absolute marker
        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let digits_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let digits = &part[digits_start..pos];

        if letters.is_empty() || digits.is_empty() || pos != bytes.len() {
            return Err(Error::InvalidFormat(token.to_string()));
        }

        Ok(Self { letters, digits })
    }

    fn check_size(self, token: &str) -> Result<SizedCell<'a>> {
        if self.letters.len() > MAX_COLUMN_LETTERS {
            return Err(Error::RangeTooLarge(token.to_string()));
        }

        // Anything too long for a u64 is certainly past the last row
        let row: u64 = self
            .digits
            .parse()
            .map_err(|_| Error::RangeTooLarge(token.to_string()))?;
        if row > MAX_ROWS as u64 {
            return Err(Error::RangeTooLarge(token.to_string()));
        }
        if row == 0 {
            return Err(Error::row_out_of_range(0));
        }

        Ok(SizedCell {
            letters: self.letters,
            row: row as u32,
        })
    }
}

impl SizedCell<'_> {
    fn decode(self) -> Result<CellPosition> {
        let column = alphabet::decode(self.letters)?;
        Ok(CellPosition::new(self.row - 1, column - 1))
    }
}
