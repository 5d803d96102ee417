//! Error kinds for sociogram operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on the kind to decide whether a sheet, a file, or the whole
/// run has to be abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// Invalid configuration or parameters
    ConfigInvalid,

    /// Invalid argument passed to function
    InvalidArgument,

    // =========================================================================
    // Input errors
    // =========================================================================
    /// Matrix is not square, has bad labels, or holds values other than 0/1
    InvalidMatrix,

    /// Graph has no links at all, so link ratios are undefined
    EmptyGraph,

    /// Requested worksheet does not exist in the workbook
    SheetNotFound,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    /// Spreadsheet could not be opened or decoded
    WorkbookReadFailed,

    /// Spreadsheet could not be assembled or saved
    WorkbookWriteFailed,

    // =========================================================================
    // Output errors
    // =========================================================================
    /// Image rendering or encoding failed
    RenderFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::InvalidMatrix.to_string(), "InvalidMatrix");
        assert_eq!(ErrorKind::EmptyGraph.as_str(), "EmptyGraph");
    }
}
