use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for selection operations.
pub type SelectResult<T> = Result<T, SelectError>;

/// Error type returned across validation, decoding, and selection.
///
/// This is a single error enum; callers can map variants onto transport status
/// codes (`InvalidArgument`/`NotFound`/`PermissionDenied`/`InsufficientData`
/// are client-side faults, `SourceUnreadable` is a server-side fault).
#[derive(Debug, Error)]
pub enum SelectError {
    /// Malformed caller input (empty path, non-positive n, wrong extension,
    /// empty or oversize file).
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The referenced file does not exist.
    #[error("file does not exist: {path}", path = .path.display())]
    NotFound { path: PathBuf },

    /// The referenced file exists but cannot be opened for reading.
    #[error("no read permission for file: {path}", path = .path.display())]
    PermissionDenied { path: PathBuf },

    /// The document holds fewer qualifying numbers than requested.
    #[error("the file has {found} numbers, but the {requested}-th minimum was requested")]
    InsufficientData { found: usize, requested: usize },

    /// The decoder failed on an ostensibly valid file (corruption, unsupported
    /// internal structure). Wraps the underlying calamine error.
    #[error("failed to decode workbook {path}: {source}", path = .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
}
