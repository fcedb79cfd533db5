//! Row-major matrices and the column-major grid boundary
//!
//! Application code thinks in rows: `matrix[row][column]`. The grid engine
//! stores two-dimensional values column first. [`Matrix::into_grid`] and
//! [`Matrix::from_grid`] are the only places that flip between the two, and
//! each flips exactly once.

use crate::error::{Error, Result};
use crate::range::RangeBounds;
use crate::value::WireValue;

/// A value read from or written to the grid
///
/// `Array` is column-major: the outer index is the column, the inner index
/// the row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum RawGridValue {
    Scalar(WireValue),
    Array(Vec<Vec<WireValue>>),
}

/// A rectangular, row-major matrix
///
/// Every row has the same number of cells. A matrix without columns has no
/// rows either.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: Vec<Vec<T>>,
    columns: usize,
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            columns: 0,
        }
    }
}

impl<T: Default> Matrix<T> {
    /// Build a matrix from rows, padding short rows with `T::default()` (Null)
    /// up to the widest row.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let rows = normalize_ragged(rows);
        let columns = rows.first().map_or(0, Vec::len);
        if columns == 0 {
            return Self::default();
        }
        Self { rows, columns }
    }
}

impl<T: Clone> Matrix<T> {
    /// A matrix of the given shape with every cell set to `value`
    pub fn filled(bounds: RangeBounds, value: T) -> Self {
        let columns = bounds.column_count() as usize;
        let rows = (0..bounds.row_count())
            .map(|_| vec![value.clone(); columns])
            .collect();
        Self { rows, columns }
    }
}

impl<T> Matrix<T> {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the matrix has exactly the shape of `bounds`
    pub fn fits(&self, bounds: RangeBounds) -> bool {
        self.row_count() == bounds.row_count() as usize
            && self.column_count() == bounds.column_count() as usize
    }

    /// Cell at a zero-based position
    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<T>> {
        self.rows
    }

    /// Swap rows and columns: `result[j][i] == self[i][j]`
    pub fn transpose(self) -> Self {
        let rows = self.rows.len();
        let columns = self.columns;
        if rows == 0 {
            return self;
        }

        Self {
            rows: flip(self.rows, columns),
            columns: rows,
        }
    }

    /// Apply `f` to every cell, keeping the shape
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Matrix<U> {
        Matrix {
            rows: self
                .rows
                .into_iter()
                .map(|row| row.into_iter().map(&mut f).collect())
                .collect(),
            columns: self.columns,
        }
    }

    /// Apply a fallible `f` to every cell; the first error aborts
    pub fn try_map<U, E>(
        self,
        mut f: impl FnMut(T) -> std::result::Result<U, E>,
    ) -> std::result::Result<Matrix<U>, E> {
        let rows = self
            .rows
            .into_iter()
            .map(|row| row.into_iter().map(&mut f).collect())
            .collect::<std::result::Result<Vec<Vec<U>>, E>>()?;
        Ok(Matrix {
            rows,
            columns: self.columns,
        })
    }
}

impl Matrix<WireValue> {
    /// Convert to the grid's column-major array
    pub fn into_grid(self) -> RawGridValue {
        RawGridValue::Array(self.transpose().rows)
    }

    /// Read a grid value into a row-major matrix.
    ///
    /// A scalar becomes a 1x1 matrix. Column arrays of unequal length are
    /// rejected with `DimensionMismatch`.
    pub fn from_grid(raw: RawGridValue) -> Result<Self> {
        match raw {
            RawGridValue::Scalar(value) => Ok(Self {
                rows: vec![vec![value]],
                columns: 1,
            }),
            RawGridValue::Array(columns) => {
                let rows = transpose(columns)?;
                Ok(Self::from_rows(rows))
            }
        }
    }
}

impl<T: Default> From<Vec<Vec<T>>> for Matrix<T> {
    fn from(rows: Vec<Vec<T>>) -> Self {
        Self::from_rows(rows)
    }
}

/// Pad every row with `T::default()` (Null) to the widest row.
///
/// Missing cells become empty cells.
pub fn normalize_ragged<T: Default>(mut rows: Vec<Vec<T>>) -> Vec<Vec<T>> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize_with(columns, T::default);
    }
    rows
}

/// Transpose a rectangular matrix given as rows.
///
/// Rows of different length fail with `DimensionMismatch`; use
/// [`normalize_ragged`] first to pad them.
pub fn transpose<T>(rows: Vec<Vec<T>>) -> Result<Vec<Vec<T>>> {
    let columns = rows.first().map_or(0, Vec::len);
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns) {
        return Err(Error::DimensionMismatch(format!(
            "row {i} has {} cells, row 0 has {columns}",
            row.len()
        )));
    }
    Ok(flip(rows, columns))
}

fn flip<T>(rows: Vec<Vec<T>>, columns: usize) -> Vec<Vec<T>> {
    let mut flipped: Vec<Vec<T>> = (0..columns)
        .map(|_| Vec::with_capacity(rows.len()))
        .collect();
    for row in rows {
        for (j, cell) in row.into_iter().enumerate() {
            flipped[j].push(cell);
        }
    }
    flipped
}
