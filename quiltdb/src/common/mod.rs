//! Common types and utilities shared across the crate.

use parking_lot::RwLock;
use std::sync::Arc;

pub mod sort_order;
pub mod stream;
pub mod value;

pub use sort_order::*;
pub use value::*;

/// Name of the document id field.
pub const DOC_ID: &str = "_id";

/// Reserved sort key referring to a document's creation timestamp.
pub const META_CREATED: &str = "$created";

/// Reserved sort key referring to a document's last update timestamp.
pub const META_UPDATED: &str = "$updated";

/// A value behind an `Arc<RwLock<..>>`, shareable across threads.
pub type Atomic<T> = Arc<RwLock<T>>;

/// Wraps a value in an [Atomic].
pub fn atomic<T>(t: T) -> Atomic<T> {
    Arc::new(RwLock::new(t))
}
