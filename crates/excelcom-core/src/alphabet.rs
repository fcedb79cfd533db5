//! Column letters <-> 1-based column numbers
//!
//! Column names are a bijective base-26 numeral: A=1 .. Z=26, AA=27, and so on
//! up to XFD=16384.

use std::fmt;

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_COLUMN_LETTERS};

/// A validated 1-based column number (1..=16384)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnIndex(u16);

impl ColumnIndex {
    /// First column ("A")
    pub const FIRST: ColumnIndex = ColumnIndex(1);

    /// Last column ("XFD")
    pub const LAST: ColumnIndex = ColumnIndex(MAX_COLS as u16);

    /// Create a column index, failing with `OutOfRange` outside 1..=16384
    pub fn new(column: u32) -> Result<Self> {
        if column == 0 || column > MAX_COLS {
            return Err(Error::column_out_of_range(column as u64));
        }
        Ok(Self(column as u16))
    }

    /// Create from a zero-based column offset
    pub fn from_zero_based(column: u32) -> Result<Self> {
        Self::new(column.saturating_add(1))
    }

    /// The 1-based column number
    pub fn get(self) -> u32 {
        self.0 as u32
    }

    /// The 0-based column offset
    pub fn zero_based(self) -> u32 {
        self.0 as u32 - 1
    }

    /// Column name, e.g. `27` -> `"AA"`
    pub fn letters(self) -> String {
        column_letters(self.0 as u64)
    }
}

impl fmt::Display for ColumnIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters())
    }
}

/// Letters for any 1-based column number, without checking the grid limit.
///
/// Repeatedly takes `(n - 1) % 26` as the next letter from the right and
/// divides by 26 until nothing is left.
pub(crate) fn column_letters(column: u64) -> String {
    let mut letters = Vec::with_capacity(MAX_COLUMN_LETTERS);
    let mut n = column;

    while n > 0 {
        let modulo = (n - 1) % 26;
        letters.push(b'A' + modulo as u8);
        n = (n - modulo) / 26;
    }

    letters.iter().rev().map(|&b| b as char).collect()
}

/// Convert a 1-based column number to its letters.
///
/// ```
/// use excelcom_core::alphabet::encode;
///
/// assert_eq!(encode(1).unwrap(), "A");
/// assert_eq!(encode(27).unwrap(), "AA");
/// assert!(encode(0).is_err());
/// ```
pub fn encode(column: u32) -> Result<String> {
    ColumnIndex::new(column).map(ColumnIndex::letters)
}

/// Convert column letters (case-insensitive) to a 1-based column number.
pub fn decode(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidFormat("empty column letters".into()));
    }
    if letters.len() > MAX_COLUMN_LETTERS {
        return Err(Error::InvalidFormat(format!(
            "column '{letters}' has more than {MAX_COLUMN_LETTERS} letters"
        )));
    }

    let mut column: u32 = 0;
    for c in letters.chars() {
        column = column * 26 + position_in_alphabet(c)?;
    }

    if column > MAX_COLS {
        return Err(Error::InvalidFormat(format!(
            "column '{letters}' is beyond the last column"
        )));
    }

    Ok(column)
}

/// Position of an ASCII letter in the alphabet: 'a' and 'A' are 1, 'z' is 26.
pub fn position_in_alphabet(c: char) -> Result<u32> {
    if !c.is_ascii_alphabetic() {
        return Err(Error::InvalidFormat(format!("invalid column letter '{c}'")));
    }
    Ok(c.to_ascii_uppercase() as u32 - 'A' as u32 + 1)
}
