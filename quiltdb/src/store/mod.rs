//! The top-level document store.
//!
//! A [QuiltStore] owns a set of named collections. The handle is cheap to
//! clone and safe to share across threads; each collection sits behind its
//! own reader-writer lock, so operations on distinct collections never
//! contend.

use crate::collection::operations::CollectionOperations;
use crate::collection::QuiltCollection;
use crate::errors::{ErrorKind, QuiltError, QuiltResult};
use dashmap::DashMap;
use itertools::Itertools;
use parking_lot::RwLock;
use std::sync::Arc;

/// Longest accepted collection name, in characters.
pub const MAX_COLLECTION_NAME_LENGTH: usize = 100;

/// Shared state behind every [QuiltStore] and [QuiltCollection] handle.
#[derive(Debug, Default)]
pub(crate) struct StoreInner {
    collections: DashMap<String, Arc<RwLock<CollectionOperations>>>,
}

impl StoreInner {
    /// Looks up a collection without creating it.
    pub(crate) fn get(&self, name: &str) -> Option<Arc<RwLock<CollectionOperations>>> {
        self.collections.get(name).map(|entry| Arc::clone(&entry))
    }

    /// Looks up a collection, creating an empty one on first use.
    pub(crate) fn get_or_create(&self, name: &str) -> Arc<RwLock<CollectionOperations>> {
        let entry = self
            .collections
            .entry(name.to_string())
            .or_insert_with(|| {
                log::debug!("Creating collection '{}'", name);
                Arc::new(RwLock::new(CollectionOperations::new(name)))
            });
        Arc::clone(&entry)
    }
}

/// An in-memory schemaless document store.
///
/// Documents live in named collections and are queried with query documents.
/// Collections spring into existence on first write; read operations against
/// a collection that does not exist return empty results rather than errors.
///
/// ```rust,ignore
/// use quiltdb::store::QuiltStore;
/// use quiltdb::doc;
///
/// let store = QuiltStore::new();
/// let things = store.collection("things")?;
/// let id = things.insert(doc!{ n: "hammer", kind: "tool" })?;
/// let found = things.find_one(&doc!{ kind: "tool" })?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct QuiltStore {
    inner: Arc<StoreInner>,
}

impl QuiltStore {
    pub fn new() -> QuiltStore {
        QuiltStore {
            inner: Arc::new(StoreInner::default()),
        }
    }

    /// Creates an empty collection under the given name.
    ///
    /// Returns `true` if the collection was created, `false` if it already
    /// existed. Either way the collection exists afterwards.
    pub fn create_collection(&self, name: &str) -> QuiltResult<bool> {
        validate_collection_name(name)?;
        let mut created = false;
        self.inner.collections.entry(name.to_string()).or_insert_with(|| {
            created = true;
            log::debug!("Creating collection '{}'", name);
            Arc::new(RwLock::new(CollectionOperations::new(name)))
        });
        Ok(created)
    }

    /// Deletes a collection and all of its documents and constraints.
    ///
    /// Returns `true` if the collection existed.
    pub fn delete_collection(&self, name: &str) -> QuiltResult<bool> {
        validate_collection_name(name)?;
        let removed = self.inner.collections.remove(name).is_some();
        if removed {
            log::debug!("Deleted collection '{}'", name);
        }
        Ok(removed)
    }

    /// Lists the names of existing collections, sorted.
    pub fn list_collections(&self) -> Vec<String> {
        self.inner
            .collections
            .iter()
            .map(|entry| entry.key().clone())
            .sorted()
            .collect()
    }

    pub fn collection_exists(&self, name: &str) -> bool {
        self.inner.collections.contains_key(name)
    }

    /// Returns a handle on a named collection.
    ///
    /// The handle is valid whether or not the collection exists yet; the
    /// first write through it creates the collection.
    pub fn collection(&self, name: &str) -> QuiltResult<QuiltCollection> {
        validate_collection_name(name)?;
        Ok(QuiltCollection::new(name, Arc::clone(&self.inner)))
    }
}

/// Collection names are 1 to 100 characters from `[A-Za-z0-9_]`.
pub(crate) fn validate_collection_name(name: &str) -> QuiltResult<()> {
    if name.is_empty()
        || name.chars().count() > MAX_COLLECTION_NAME_LENGTH
        || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        log::error!("Invalid collection name '{}'", name);
        return Err(QuiltError::new(
            &format!(
                "Invalid collection name '{}', expected 1 to {} characters from [A-Za-z0-9_]",
                name, MAX_COLLECTION_NAME_LENGTH
            ),
            ErrorKind::InvalidCollectionName,
        ));
    }
    Ok(())
}
