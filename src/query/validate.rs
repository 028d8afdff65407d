//! Request precondition checks.
//!
//! Every check runs eagerly, in a fixed order, before any parsing is
//! attempted; the first failing check wins:
//!
//! 1. non-empty path
//! 2. positive n
//! 3. accepted extension (`.xlsx`, case-insensitive)
//! 4. file exists
//! 5. file is readable
//! 6. file is non-empty and within the size ceiling
//!
//! Only read-only filesystem metadata queries are performed; nothing is
//! parsed here.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{SelectError, SelectResult};

/// The single accepted source extension (compared case-insensitively).
pub const ACCEPTED_EXTENSION: &str = "xlsx";

/// Default source size ceiling: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Limits applied to the source file before decoding.
///
/// Use [`Default`] for common cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLimits {
    /// Maximum accepted file size in bytes.
    pub max_file_size: u64,
}

impl Default for SourceLimits {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Validate the request's structural preconditions.
///
/// Checks run in the fixed order documented at module level; the first
/// failure is returned and later checks do not run.
pub fn validate_source(path: &str, n: i64, limits: &SourceLimits) -> SelectResult<()> {
    if path.trim().is_empty() {
        return Err(SelectError::InvalidArgument {
            message: "path to file cannot be empty".to_string(),
        });
    }

    if n <= 0 {
        return Err(SelectError::InvalidArgument {
            message: format!("number N should be positive, got {n}"),
        });
    }

    validate_extension(path)?;

    let file = Path::new(path);
    let meta = match fs::metadata(file) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SelectError::NotFound {
                path: file.to_path_buf(),
            });
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            return Err(SelectError::PermissionDenied {
                path: file.to_path_buf(),
            });
        }
        Err(e) => return Err(SelectError::from_io(file, e)),
    };

    validate_readable(file)?;
    validate_size(file, meta.len(), limits)
}

fn validate_extension(path: &str) -> SelectResult<()> {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    if !ext.eq_ignore_ascii_case(ACCEPTED_EXTENSION) {
        return Err(SelectError::InvalidArgument {
            message: format!(
                "invalid file format: expected .{ACCEPTED_EXTENSION}, got '{path}'"
            ),
        });
    }
    Ok(())
}

/// Readability check: a short-lived open, closed immediately. The decoder
/// re-opens the file for the actual read.
fn validate_readable(file: &Path) -> SelectResult<()> {
    match fs::File::open(file) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            Err(SelectError::PermissionDenied {
                path: file.to_path_buf(),
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(SelectError::NotFound {
            path: file.to_path_buf(),
        }),
        Err(e) => Err(SelectError::from_io(file, e)),
    }
}

fn validate_size(file: &Path, len: u64, limits: &SourceLimits) -> SelectResult<()> {
    if len == 0 {
        return Err(SelectError::InvalidArgument {
            message: format!("file is empty: {}", file.display()),
        });
    }

    if len > limits.max_file_size {
        return Err(SelectError::InvalidArgument {
            message: format!(
                "file too large: maximum size {} bytes, actual {} bytes",
                limits.max_file_size, len
            ),
        });
    }
    Ok(())
}

impl SelectError {
    /// Wrap an unexpected filesystem error from the validation phase.
    fn from_io(path: &Path, e: io::Error) -> Self {
        SelectError::SourceUnreadable {
            path: path.to_path_buf(),
            source: calamine::Error::Io(e),
        }
    }
}
