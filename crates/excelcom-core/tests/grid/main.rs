//! Worksheet and search tests against an in-memory grid.
//!
//! The grid in `common` plays the part of the spreadsheet application: it
//! stores two-dimensional values column-major and wraps Find/FindNext around
//! the searched range, so orientation and cycle handling are exercised end to
//! end without a running application.

mod content;
mod search;

// Re-export common utilities for submodules
pub use common::*;
