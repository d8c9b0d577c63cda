//! Structured errors: a message, an optional wrapped cause, and ordered
//! key/value attributes, rendered either as a single flat line or as a
//! nested, type-preserving log record.
//!
//! The flat form reads left to right with the cause bracketed:
//!
//! ```
//! use serr::StructuredError;
//!
//! let err = StructuredError::wrap(
//!     "failed to fetch user",
//!     StructuredError::new("database connection failed"),
//! )
//! .with("user_id", "123")
//! .with("retry_count", 3);
//!
//! assert_eq!(
//!     err.to_string(),
//!     "failed to fetch user cause=[database connection failed] user_id=123 retry_count=3",
//! );
//! ```
//!
//! The structured form keeps attribute types and nests structured causes as
//! groups instead of flattening them; see [`StructuredError::to_record`].
//! Causes are exposed through [`std::error::Error::source`], so any generic
//! chain walker composes with these values. The [`chain`] module ships the
//! membership and typed-extraction walks.

pub mod attr;
pub mod chain;
pub mod emit;
pub mod record;
pub mod serror;

// public exports
pub use attr::{Attr, AttrValue};
pub use chain::{Chain, chain, contains, first_of};
pub use record::{Record, RecordValue, Structured};
pub use serror::{Cause, StructuredError};

/// Reserved record key for the message entry. Part of the wire contract
/// with the structured-logging sink.
pub const MESSAGE_KEY: &str = "msg";

/// Reserved record key for the wrapped cause entry. Part of the wire
/// contract with the structured-logging sink.
pub const CAUSE_KEY: &str = "cause";
