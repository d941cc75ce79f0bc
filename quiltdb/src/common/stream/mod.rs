//! Lazy result streams.

mod document_cursor;

pub use document_cursor::*;
