//! The grid collaborator
//!
//! Everything that actually touches the spreadsheet application goes through
//! [`GridBackend`]. Implementations own session state (which workbook, which
//! sheet, alerts, visibility); the engine passes every range, value and option
//! explicitly and never assumes any of it.

use crate::matrix::RawGridValue;
use crate::range::CellPosition;
use crate::search::{LookAt, LookIn, SearchDirection, SearchOrder};
use crate::value::WireValue;

/// A cell returned by the grid's find primitives
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellHandle {
    /// Zero-based location of the match
    pub position: CellPosition,
    /// Cell content at the time of the match
    pub value: WireValue,
}

impl CellHandle {
    pub fn new(position: CellPosition, value: WireValue) -> Self {
        Self { position, value }
    }

    /// A1-style token of the matched cell
    pub fn token(&self) -> String {
        self.position.to_token()
    }
}

/// Arguments of one Find step, in the order the grid expects them
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FindQuery {
    /// Range token to search, or `"UsedRange"`
    pub range: String,
    /// What to look for; may contain `*` and `?` wildcards
    pub value: String,
    /// Single cell after which the search starts; `None` lets the grid choose
    pub after: Option<String>,
    pub look_in: LookIn,
    pub look_at: LookAt,
    pub order: SearchOrder,
    pub direction: SearchDirection,
    pub match_case: bool,
    pub match_byte: bool,
}

/// Primitive operations offered by the automation layer.
///
/// Each call is one blocking round trip. Errors are the collaborator's own and
/// are handed back to callers untouched.
pub trait GridBackend {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value of a range token (or `"UsedRange"`)
    fn get_matrix_value(&mut self, address: &str) -> Result<RawGridValue, Self::Error>;

    /// Write a value to a range token
    fn set_matrix_value(&mut self, address: &str, value: RawGridValue) -> Result<(), Self::Error>;

    /// Run one Find; `None` when nothing matches
    fn step_find(&mut self, query: &FindQuery) -> Result<Option<CellHandle>, Self::Error>;

    /// Continue a search in `range` from `previous`.
    ///
    /// The grid wraps around at the end of the range, so once a first match
    /// exists this always returns a cell (possibly `previous` again).
    fn step_find_next(
        &mut self,
        range: &str,
        previous: &CellHandle,
        direction: SearchDirection,
    ) -> Result<CellHandle, Self::Error>;
}

impl<B: GridBackend + ?Sized> GridBackend for &mut B {
    type Error = B::Error;

    fn get_matrix_value(&mut self, address: &str) -> Result<RawGridValue, Self::Error> {
        (**self).get_matrix_value(address)
    }

    fn set_matrix_value(&mut self, address: &str, value: RawGridValue) -> Result<(), Self::Error> {
        (**self).set_matrix_value(address, value)
    }

    fn step_find(&mut self, query: &FindQuery) -> Result<Option<CellHandle>, Self::Error> {
        (**self).step_find(query)
    }

    fn step_find_next(
        &mut self,
        range: &str,
        previous: &CellHandle,
        direction: SearchDirection,
    ) -> Result<CellHandle, Self::Error> {
        (**self).step_find_next(range, previous, direction)
    }
}
