#![allow(dead_code)]
//! # QuiltDB - Schemaless Document Store
//!
//! QuiltDB is a lightweight, embedded, schemaless document store written in
//! Rust. Documents are JSON-like values kept in named collections and
//! queried with query documents.
//!
//! ## Key Features
//!
//! - **Embedded**: No separate server process required
//! - **Schemaless**: Documents in one collection need not share a shape
//! - **Query Documents**: Literal matching plus `$eq`, `$noteq`, `$in`,
//!   `$notin`, `$gt`, `$gte`, `$lt`, `$lte`, `$regex`, and `$type` operators
//! - **Constraints**: Opt-in `$required`, `$notnull`, and `$type` rules per
//!   key path
//! - **Sorted Reads**: Multi-field sort with skip and limit pagination
//! - **Clean API**: PIMPL pattern provides stable, encapsulated interface
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quiltdb::collection::FindOptions;
//! use quiltdb::common::SortOrder;
//! use quiltdb::doc;
//! use quiltdb::store::QuiltStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = QuiltStore::new();
//! let things = store.collection("things")?;
//!
//! // Insert documents; ids are generated when absent
//! things.insert(doc!{ n: "hammer", kind: "tool", weight: 100 })?;
//! things.insert(doc!{ n: "crow", kind: "bird", weight: 1 })?;
//!
//! // Query with a query document
//! let light = things.find(
//!     &doc!{ weight: { "$lt": 50 } },
//!     &FindOptions::new().sort_by("weight", SortOrder::Ascending),
//! )?;
//! for document in light {
//!     println!("{}", document?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Pattern
//!
//! The store and collection handles use the **PIMPL (Pointer To
//! IMPLementation)** design pattern: every clone of a handle shares the same
//! underlying state through an `Arc`, so handles are cheap to clone and safe
//! to send across threads.
//!
//! ## Module Organization
//!
//! - [`collection`] - Documents, collections, and find options
//! - [`common`] - Values, sort specifications, and cursors
//! - [`constraint`] - Per-collection write constraints
//! - [`errors`] - Error types and result definitions
//! - [`query`] - Query documents and operators
//! - [`store`] - The top-level document store

use crate::collection::object_id::ObjectIdGenerator;
use crate::common::*;
use std::sync::LazyLock;

pub mod collection;
pub mod common;
pub mod constraint;
pub mod errors;
pub mod query;
pub mod store;

pub(crate) static ID_GENERATOR: LazyLock<ObjectIdGenerator> =
    LazyLock::new(ObjectIdGenerator::new);
