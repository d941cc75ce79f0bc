use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::{atomic, Atomic};

/// Error kinds for quiltdb operations.
///
/// Each kind describes one category of failure. Write-time failures
/// (constraint violations, duplicate ids, invalid ids) always leave the
/// collection untouched. Read-time and delete-time misses are never reported
/// through this enum; they surface as empty results or zero counts.
///
/// # Examples
///
/// ```rust,ignore
/// use quiltdb::errors::{QuiltError, ErrorKind, QuiltResult};
///
/// fn example() -> QuiltResult<()> {
///     Err(QuiltError::new("document has no name", ErrorKind::ConstraintViolation))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// A document failed a `required`, `notnull` or `type` constraint
    ConstraintViolation,
    /// An inserted document's `_id` already exists in the collection
    UniqueConstraintViolation,
    /// The supplied `_id` is not a string
    InvalidId,
    /// A query document could not be parsed into a query
    InvalidQuery,
    /// A constraint specification could not be parsed
    InvalidConstraint,
    /// A sort specification could not be parsed
    InvalidSort,
    /// A collection name is empty, too long, or contains invalid characters
    InvalidCollectionName,
    /// The operation is not valid in the current context
    InvalidOperation,
    /// Error encoding or decoding document data
    EncodingError,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ConstraintViolation => write!(f, "Constraint violation"),
            ErrorKind::UniqueConstraintViolation => write!(f, "Unique constraint violation"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::InvalidQuery => write!(f, "Invalid query"),
            ErrorKind::InvalidConstraint => write!(f, "Invalid constraint"),
            ErrorKind::InvalidSort => write!(f, "Invalid sort"),
            ErrorKind::InvalidCollectionName => write!(f, "Invalid collection name"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom quiltdb error type.
///
/// `QuiltError` encapsulates error information including the error message, kind,
/// and optional cause. It supports error chaining and backtraces for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use quiltdb::errors::{QuiltError, ErrorKind};
///
/// // Create a simple error
/// let err = QuiltError::new("_id must be a string", ErrorKind::InvalidId);
///
/// // Create an error with a cause
/// let cause = QuiltError::new("bad pattern", ErrorKind::InvalidQuery);
/// let err = QuiltError::new_with_cause("query rejected", ErrorKind::InvalidQuery, cause);
/// ```
///
/// # Type alias
///
/// The `QuiltResult<T>` type alias is equivalent to `Result<T, QuiltError>` and is
/// used throughout the codebase for operations that can fail.
#[derive(Clone)]
pub struct QuiltError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<QuiltError>>,
    backtrace: Atomic<Backtrace>,
}

impl QuiltError {
    /// Creates a new `QuiltError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        QuiltError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `QuiltError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for debugging.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: QuiltError) -> Self {
        QuiltError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&Box<QuiltError>> {
        self.cause.as_ref()
    }
}

impl Display for QuiltError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for QuiltError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for QuiltError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for quiltdb operations.
///
/// `QuiltResult<T>` is shorthand for `Result<T, QuiltError>`.
/// All fallible quiltdb operations return this type.
pub type QuiltResult<T> = Result<T, QuiltError>;

// From trait implementations for automatic error conversion
impl From<serde_json::Error> for QuiltError {
    fn from(err: serde_json::Error) -> Self {
        QuiltError::new(&format!("JSON error: {}", err), ErrorKind::EncodingError)
    }
}

impl From<regex::Error> for QuiltError {
    fn from(err: regex::Error) -> Self {
        QuiltError::new(
            &format!("Regex compilation error: {}", err),
            ErrorKind::InvalidQuery,
        )
    }
}

impl From<std::fmt::Error> for QuiltError {
    fn from(err: std::fmt::Error) -> Self {
        QuiltError::new(
            &format!("Formatting error: {}", err),
            ErrorKind::InternalError,
        )
    }
}

impl From<String> for QuiltError {
    fn from(msg: String) -> Self {
        QuiltError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for QuiltError {
    fn from(msg: &str) -> Self {
        QuiltError::new(msg, ErrorKind::InternalError)
    }
}
