//! The caller-facing query pipeline.
//!
//! Most callers should use [`find_nth_min_from_path`] (from [`unified`]),
//! which:
//!
//! - validates the request preconditions ([`validate`])
//! - decodes the first sheet of the workbook via calamine ([`decode`])
//! - runs the streaming selection ([`crate::select`])
//! - optionally reports success/failure/alerts to a [`QueryObserver`]

pub mod decode;
pub mod observability;
pub mod unified;
pub mod validate;

pub use observability::{
    CompositeObserver, FileObserver, QueryContext, QueryObserver, QuerySeverity, QueryStats,
    StdErrObserver,
};
pub use unified::{find_nth_min_from_path, QueryOptions, QueryRequest};
pub use validate::{validate_source, SourceLimits, ACCEPTED_EXTENSION, DEFAULT_MAX_FILE_SIZE};
