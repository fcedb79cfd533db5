//! Worksheet level operations
//!
//! A [`Worksheet`] pairs a [`GridBackend`] with the coordinate and value
//! codecs. Every call validates its range locally, converts values, makes
//! one backend call, and converts the result back.

use std::any::Any;

use tracing::debug;

use crate::backend::{CellHandle, GridBackend};
use crate::error::{Error, SheetError};
use crate::matrix::{Matrix, RawGridValue};
use crate::range::{parse_cell, parse_range, RangeAddress};
use crate::search::{self, SearchCursor, SearchOptions, USED_RANGE};
use crate::value::{decode, encode, encode_any, HostValue, WireValue};

type SheetResult<T, B> = std::result::Result<T, SheetError<<B as GridBackend>::Error>>;

/// A worksheet reached through a grid backend
#[derive(Debug)]
pub struct Worksheet<B: GridBackend> {
    backend: B,
}

impl<B: GridBackend> Worksheet<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    // === Single cells ===

    /// Read one cell. A multi-cell token fails with `NotASingleCell`.
    pub fn unary_content(&mut self, token: &str) -> SheetResult<HostValue, B> {
        let position = parse_cell(token)?;
        self.read_cell(&position.to_token())
    }

    /// Read one cell by zero-based coordinates
    pub fn unary_content_at(&mut self, row: u32, column: u32) -> SheetResult<HostValue, B> {
        let range = RangeAddress::unary(row, column)?;
        self.read_cell(&range.to_token())
    }

    /// Write one cell. A multi-cell token fails with `NotASingleCell`.
    pub fn set_unary_content(
        &mut self,
        token: &str,
        value: impl Into<HostValue>,
    ) -> SheetResult<(), B> {
        let position = parse_cell(token)?;
        self.write_value(&position.to_token(), encode(&value.into()))
    }

    pub fn set_unary_content_at(
        &mut self,
        row: u32,
        column: u32,
        value: impl Into<HostValue>,
    ) -> SheetResult<(), B> {
        let range = RangeAddress::unary(row, column)?;
        self.write_value(&range.to_token(), encode(&value.into()))
    }

    // === Matrices ===

    /// Read a range as a row-major matrix
    pub fn content(&mut self, token: &str) -> SheetResult<Matrix<HostValue>, B> {
        let range = parse_range(token)?;
        self.read_matrix(&range.to_token())
    }

    pub fn content_between(
        &mut self,
        from_row: u32,
        from_column: u32,
        to_row: u32,
        to_column: u32,
    ) -> SheetResult<Matrix<HostValue>, B> {
        let range = RangeAddress::new(from_row, from_column, to_row, to_column)?;
        self.read_matrix(&range.to_token())
    }

    /// Read every cell of the sheet's used range
    pub fn used_content(&mut self) -> SheetResult<Matrix<HostValue>, B> {
        self.read_matrix(USED_RANGE)
    }

    /// Write row-major values to a range.
    ///
    /// Short rows are padded with empty cells. The padded matrix must have
    /// exactly the shape of the range; otherwise nothing is written.
    pub fn set_content<V: Into<HostValue>>(
        &mut self,
        token: &str,
        rows: Vec<Vec<V>>,
    ) -> SheetResult<(), B> {
        let range = parse_range(token)?;
        self.write_matrix(range, Matrix::from_rows(encode_rows(rows)))
    }

    pub fn set_content_between<V: Into<HostValue>>(
        &mut self,
        from_row: u32,
        from_column: u32,
        to_row: u32,
        to_column: u32,
        rows: Vec<Vec<V>>,
    ) -> SheetResult<(), B> {
        let range = RangeAddress::new(from_row, from_column, to_row, to_column)?;
        self.write_matrix(range, Matrix::from_rows(encode_rows(rows)))
    }

    /// Write dynamically typed values to a range.
    ///
    /// The first value without a wire representation fails the whole call
    /// with `UnsupportedType`; nothing is written.
    pub fn set_content_any<T: Any>(
        &mut self,
        token: &str,
        rows: &[Vec<T>],
    ) -> SheetResult<(), B> {
        let range = parse_range(token)?;
        let cells = Matrix::from_rows(
            rows.iter()
                .map(|row| row.iter().map(Some).collect())
                .collect(),
        );
        let matrix = cells.try_map(|cell| cell.map_or(Ok(WireValue::Null), encode_any))?;
        self.write_matrix(range, matrix)
    }

    /// Write one value into every cell of a range
    pub fn fill(&mut self, token: &str, value: impl Into<HostValue>) -> SheetResult<(), B> {
        let range = parse_range(token)?;
        self.write_value(&range.to_token(), encode(&value.into()))
    }

    pub fn fill_between(
        &mut self,
        from_row: u32,
        from_column: u32,
        to_row: u32,
        to_column: u32,
        value: impl Into<HostValue>,
    ) -> SheetResult<(), B> {
        let range = RangeAddress::new(from_row, from_column, to_row, to_column)?;
        self.write_value(&range.to_token(), encode(&value.into()))
    }

    // === Search ===

    /// Start a search; `None` when nothing matches
    pub fn find(&mut self, options: SearchOptions) -> SheetResult<Option<SearchCursor>, B> {
        search::find(&mut self.backend, options)
    }

    /// Search the used range for `value` with default options
    pub fn find_value(&mut self, value: impl Into<String>) -> SheetResult<Option<SearchCursor>, B> {
        self.find(SearchOptions::new(value))
    }

    /// Step an existing search to its next match
    pub fn advance(&mut self, cursor: &SearchCursor) -> SheetResult<SearchCursor, B> {
        cursor.advance(&mut self.backend)
    }

    /// Every distinct match of a search, in the order the grid visits them
    pub fn find_all(&mut self, options: SearchOptions) -> SheetResult<Vec<CellHandle>, B> {
        match self.find(options)? {
            Some(cursor) => cursor.collect_all(&mut self.backend),
            None => Ok(Vec::new()),
        }
    }

    // === Internals ===

    fn read_cell(&mut self, address: &str) -> SheetResult<HostValue, B> {
        debug!(address, "read cell");
        match self.read(address)? {
            RawGridValue::Scalar(value) => Ok(decode(value)),
            raw => {
                let matrix = Matrix::from_grid(raw)?;
                if matrix.row_count() != 1 || matrix.column_count() != 1 {
                    return Err(Error::DimensionMismatch(format!(
                        "expected one cell at {address}, got {}x{}",
                        matrix.row_count(),
                        matrix.column_count()
                    ))
                    .into());
                }
                let value = matrix.into_rows().into_iter().flatten().next();
                Ok(value.map(decode).unwrap_or_default())
            }
        }
    }

    fn read_matrix(&mut self, address: &str) -> SheetResult<Matrix<HostValue>, B> {
        let raw = self.read(address)?;
        let matrix = Matrix::from_grid(raw)?.map(decode);
        debug!(
            address,
            rows = matrix.row_count(),
            columns = matrix.column_count(),
            "read content"
        );
        Ok(matrix)
    }

    fn read(&mut self, address: &str) -> SheetResult<RawGridValue, B> {
        self.backend
            .get_matrix_value(address)
            .map_err(SheetError::Backend)
    }

    fn write_value(&mut self, address: &str, value: WireValue) -> SheetResult<(), B> {
        debug!(address, tag = value.tag(), "write value");
        self.backend
            .set_matrix_value(address, RawGridValue::Scalar(value))
            .map_err(SheetError::Backend)
    }

    fn write_matrix(
        &mut self,
        range: RangeAddress,
        matrix: Matrix<WireValue>,
    ) -> SheetResult<(), B> {
        let bounds = range.bounds();
        if !matrix.fits(bounds) {
            return Err(Error::DimensionMismatch(format!(
                "{}x{} values for range {} of {}x{} cells",
                matrix.row_count(),
                matrix.column_count(),
                range,
                bounds.row_count(),
                bounds.column_count()
            ))
            .into());
        }

        let address = range.to_token();
        debug!(
            address = %address,
            rows = matrix.row_count(),
            columns = matrix.column_count(),
            "write content"
        );
        self.backend
            .set_matrix_value(&address, matrix.into_grid())
            .map_err(SheetError::Backend)
    }
}

fn encode_rows<V: Into<HostValue>>(rows: Vec<Vec<V>>) -> Vec<Vec<WireValue>> {
    rows.into_iter()
        .map(|row| row.into_iter().map(|v| encode(&v.into())).collect())
        .collect()
}
