//! Repeatable Find/FindNext
//!
//! [`find`] issues one Find step and, on a match, hands back a
//! [`SearchCursor`]. The cursor is a plain value owned by the caller; each
//! [`SearchCursor::advance`] performs one FindNext step and returns the next
//! cursor. The grid wraps around at the end of the searched range, so callers
//! detect the end of a search by comparing positions
//! ([`SearchCursor::is_same_match`]) or use [`SearchCursor::collect_all`].

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::backend::{CellHandle, FindQuery, GridBackend};
use crate::error::{Error, Result, SheetError};
use crate::range::{parse_cell, parse_range, CellPosition, RangeAddress};
use crate::value::{decode, HostValue, WireValue};

/// Token the grid understands as "the sheet's used range"
pub const USED_RANGE: &str = "UsedRange";

/// Which part of a cell is searched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum LookIn {
    #[default]
    Formulas,
    Values,
    Notes,
}

impl LookIn {
    /// Automation constant
    pub fn code(self) -> i32 {
        match self {
            LookIn::Formulas => -4123,
            LookIn::Values => -4163,
            LookIn::Notes => -4144,
        }
    }
}

/// Whole-cell or substring matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum LookAt {
    Whole,
    #[default]
    Part,
}

impl LookAt {
    pub fn code(self) -> i32 {
        match self {
            LookAt::Whole => 1,
            LookAt::Part => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SearchOrder {
    #[default]
    ByRows,
    ByColumns,
}

impl SearchOrder {
    pub fn code(self) -> i32 {
        match self {
            SearchOrder::ByRows => 1,
            SearchOrder::ByColumns => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SearchDirection {
    #[default]
    Next,
    Previous,
}

impl SearchDirection {
    pub fn code(self) -> i32 {
        match self {
            SearchDirection::Next => 1,
            SearchDirection::Previous => 2,
        }
    }
}

/// The range a search runs over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchScope {
    /// Whatever part of the sheet holds data
    #[default]
    UsedRange,
    Range(RangeAddress),
}

impl SearchScope {
    /// Token passed to the grid: `"UsedRange"` or the formatted range
    pub fn to_token(&self) -> String {
        match self {
            SearchScope::UsedRange => USED_RANGE.to_string(),
            SearchScope::Range(range) => range.to_token(),
        }
    }

    /// The explicit range, if any
    pub fn range(&self) -> Option<&RangeAddress> {
        match self {
            SearchScope::UsedRange => None,
            SearchScope::Range(range) => Some(range),
        }
    }
}

impl From<RangeAddress> for SearchScope {
    fn from(range: RangeAddress) -> Self {
        SearchScope::Range(range)
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_token())
    }
}

impl FromStr for SearchScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim() == USED_RANGE {
            Ok(SearchScope::UsedRange)
        } else {
            parse_range(s).map(SearchScope::Range)
        }
    }
}

/// Options for a search.
///
/// Defaults: any value (`"*"`) in the used range, starting after the range's
/// top-left cell, looking at formulas, partial match, by rows, forward,
/// case-insensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub value: String,
    pub scope: SearchScope,
    /// Single-cell token after which the search starts
    pub after: Option<String>,
    pub look_in: LookIn,
    pub look_at: LookAt,
    pub order: SearchOrder,
    pub direction: SearchDirection,
    pub match_case: bool,
    pub match_byte: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            value: "*".to_string(),
            scope: SearchScope::UsedRange,
            after: None,
            look_in: LookIn::default(),
            look_at: LookAt::default(),
            order: SearchOrder::default(),
            direction: SearchDirection::default(),
            match_case: false,
            match_byte: false,
        }
    }
}

impl SearchOptions {
    /// Default options looking for `value`
    pub fn new(value: impl Into<String>) -> Self {
        Self::default().value(value)
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn scope(mut self, scope: impl Into<SearchScope>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Restrict the search to a range token
    pub fn range(self, token: &str) -> Result<Self> {
        Ok(self.scope(parse_range(token)?))
    }

    pub fn after(mut self, cell: impl Into<String>) -> Self {
        self.after = Some(cell.into());
        self
    }

    pub fn look_in(mut self, look_in: LookIn) -> Self {
        self.look_in = look_in;
        self
    }

    pub fn look_at(mut self, look_at: LookAt) -> Self {
        self.look_at = look_at;
        self
    }

    pub fn order(mut self, order: SearchOrder) -> Self {
        self.order = order;
        self
    }

    pub fn direction(mut self, direction: SearchDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn match_case(mut self, match_case: bool) -> Self {
        self.match_case = match_case;
        self
    }

    pub fn match_byte(mut self, match_byte: bool) -> Self {
        self.match_byte = match_byte;
        self
    }

    /// Resolve the start cell and build the query for one Find step.
    ///
    /// For an explicit range the start defaults to its top-left cell and must
    /// lie inside it. For the used range an unset start is left to the grid.
    pub fn to_query(&self) -> Result<FindQuery> {
        let after = match (&self.after, self.scope.range()) {
            (Some(token), range) => {
                let position = parse_cell(token)?;
                if let Some(range) = range {
                    if !range.contains(position) {
                        return Err(Error::AfterOutsideRange {
                            after: token.clone(),
                            range: range.to_token(),
                        });
                    }
                }
                Some(position.to_token())
            }
            (None, Some(range)) => Some(range.start().to_token()),
            (None, None) => None,
        };

        Ok(FindQuery {
            range: self.scope.to_token(),
            value: self.value.clone(),
            after,
            look_in: self.look_in,
            look_at: self.look_at,
            order: self.order,
            direction: self.direction,
            match_case: self.match_case,
            match_byte: self.match_byte,
        })
    }
}

/// Run one Find step.
///
/// Returns `None` when nothing matches; otherwise a cursor tracking the first
/// match.
pub fn find<B: GridBackend>(
    backend: &mut B,
    options: SearchOptions,
) -> std::result::Result<Option<SearchCursor>, SheetError<B::Error>> {
    let query = options.to_query()?;
    debug!(
        range = %query.range,
        value = %query.value,
        after = ?query.after,
        direction = ?query.direction,
        "find"
    );

    let found = backend.step_find(&query).map_err(SheetError::Backend)?;
    match found {
        Some(cell) => {
            debug!(cell = %cell.position, "first match");
            Ok(Some(SearchCursor {
                anchor: options.scope,
                last_match: cell,
                options,
            }))
        }
        None => {
            debug!("no match");
            Ok(None)
        }
    }
}

/// A search that has found at least one cell
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCursor {
    anchor: SearchScope,
    last_match: CellHandle,
    options: SearchOptions,
}

impl SearchCursor {
    /// The searched range
    pub fn anchor(&self) -> &SearchScope {
        &self.anchor
    }

    pub fn last_match(&self) -> &CellHandle {
        &self.last_match
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn position(&self) -> CellPosition {
        self.last_match.position
    }

    pub fn value(&self) -> &WireValue {
        &self.last_match.value
    }

    /// Decoded content of the matched cell
    pub fn content(&self) -> HostValue {
        decode(self.last_match.value.clone())
    }

    /// Two cursors denote the same match if they point at the same cell
    pub fn is_same_match(&self, other: &SearchCursor) -> bool {
        self.position() == other.position()
    }

    /// Step to the next match in the cursor's direction.
    ///
    /// When the grid returns the current cell again (a single match), the
    /// result is an unchanged copy of this cursor.
    pub fn advance<B: GridBackend>(
        &self,
        backend: &mut B,
    ) -> std::result::Result<SearchCursor, SheetError<B::Error>> {
        let range = self.anchor.to_token();
        debug!(
            range = %range,
            from = %self.last_match.position,
            direction = ?self.options.direction,
            "find next"
        );

        let next = backend
            .step_find_next(&range, &self.last_match, self.options.direction)
            .map_err(SheetError::Backend)?;

        if next.position == self.last_match.position {
            trace!(cell = %next.position, "find next returned the same cell");
            return Ok(self.clone());
        }

        Ok(SearchCursor {
            anchor: self.anchor,
            last_match: next,
            options: self.options.clone(),
        })
    }

    /// Walk the search until it comes back to a cell already seen and return
    /// every distinct match, starting with this one.
    pub fn collect_all<B: GridBackend>(
        &self,
        backend: &mut B,
    ) -> std::result::Result<Vec<CellHandle>, SheetError<B::Error>> {
        let mut seen = HashSet::new();
        seen.insert(self.position());
        let mut matches = vec![self.last_match.clone()];

        let mut cursor = self.clone();
        loop {
            let next = cursor.advance(backend)?;
            if !seen.insert(next.position()) {
                trace!(cell = %next.position(), count = matches.len(), "search wrapped");
                break;
            }
            matches.push(next.last_match.clone());
            cursor = next;
        }

        Ok(matches)
    }
}
