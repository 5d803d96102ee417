//! # sociogram-error
//!
//! Unified error handling for sociogram.
//!
//! - **ErrorKind**: what went wrong (e.g. InvalidMatrix, EmptyGraph)
//! - **Error Context**: key/value pairs locating the cause (file, sheet, cell)
//! - **Error Source**: the wrapped underlying error, if any
//!
//! ## Usage
//!
//! ```rust
//! use sociogram_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::InvalidMatrix, "cell is not 0 or 1")
//!         .with_operation("workbook::load_matrix")
//!         .with_context("sheet", "Лист1")
//!         .with_context("cell", "C4"))
//! }
//! ```
//!
//! External errors are wrapped with `set_source(err)`; later layers only
//! append context.

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using the sociogram Error
pub type Result<T> = std::result::Result<T, Error>;
