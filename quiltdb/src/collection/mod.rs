//! Document collections and their operations.
//!
//! A [QuiltCollection] is a named, ordered set of schemaless [Document]s,
//! each identified by a string `_id`. Collections are obtained from a
//! [QuiltStore](crate::store::QuiltStore) and support inserting, saving,
//! querying, counting, distinct-value extraction, and removal, plus
//! per-collection write [constraints](crate::constraint).

pub mod document;
pub mod find_options;
pub mod object_id;
pub(crate) mod operations;
pub mod quilt_collection;

pub use document::{normalize, Document};
pub use find_options::{limit_to, order_by, skip_by, FindOptions};
pub use object_id::{ObjectIdGenerator, ID_LENGTH};
pub use quilt_collection::QuiltCollection;
