use crate::collection::operations::CollectionOperations;
use crate::collection::{Document, FindOptions};
use crate::common::stream::DocumentCursor;
use crate::common::Value;
use crate::errors::QuiltResult;
use crate::query::Query;
use crate::store::StoreInner;
use parking_lot::RwLock;
use std::sync::Arc;

/// A handle on one named collection of documents.
///
/// Handles come from [QuiltStore::collection](crate::store::QuiltStore::collection)
/// and are cheap to clone; clones of one store see the same data. A handle is
/// valid before its collection exists: the first write creates the
/// collection, while reads against a missing collection return empty results.
///
/// Queries are documents; see the [query](crate::query) module for the
/// operator forms.
///
/// ```rust,ignore
/// let things = store.collection("things")?;
/// things.insert(doc!{ n: "hammer", kind: "tool", weight: 100 })?;
///
/// let light = things.find(
///     &doc!{ kind: "tool", weight: { "$lt": 500 } },
///     &FindOptions::new().sort_by("weight", SortOrder::Ascending),
/// )?;
/// for document in light {
///     println!("{}", document?);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct QuiltCollection {
    name: String,
    store: Arc<StoreInner>,
}

impl QuiltCollection {
    pub(crate) fn new(name: &str, store: Arc<StoreInner>) -> QuiltCollection {
        QuiltCollection {
            name: name.to_string(),
            store,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn for_write(&self) -> Arc<RwLock<CollectionOperations>> {
        self.store.get_or_create(&self.name)
    }

    fn for_read(&self) -> Option<Arc<RwLock<CollectionOperations>>> {
        self.store.get(&self.name)
    }

    /// Inserts a document and returns its id.
    ///
    /// A document without an `_id` gets a generated 24-character hex id; a
    /// supplied `_id` must be a unique non-empty string. The write fails if
    /// the document violates a constraint of this collection.
    pub fn insert(&self, document: Document) -> QuiltResult<String> {
        self.for_write().write().insert(document)
    }

    /// Saves a document, wholesale.
    ///
    /// If a document with the same `_id` exists it is replaced entirely, not
    /// merged, and keeps its place in insertion order. Otherwise the
    /// document is inserted. Returns the saved document's id.
    pub fn save(&self, document: Document) -> QuiltResult<String> {
        self.for_write().write().save(document)
    }

    /// Finds the documents matching a query.
    ///
    /// The cursor yields documents in insertion order unless the options
    /// carry a sort; skip and limit apply after sorting. The cursor is a
    /// snapshot: writes after `find` returns do not change what it yields.
    pub fn find(&self, query: &Document, options: &FindOptions) -> QuiltResult<DocumentCursor> {
        let query = Query::parse(query)?;
        match self.for_read() {
            Some(operations) => {
                let matched = operations.read().find(&query, options)?;
                Ok(DocumentCursor::from_documents(matched))
            }
            None => Ok(DocumentCursor::empty()),
        }
    }

    /// Finds every document in the collection.
    pub fn find_all(&self) -> QuiltResult<DocumentCursor> {
        self.find(&Document::new(), &FindOptions::new())
    }

    /// Finds the first document matching a query, in insertion order.
    pub fn find_one(&self, query: &Document) -> QuiltResult<Option<Document>> {
        let query = Query::parse(query)?;
        match self.for_read() {
            Some(operations) => Ok(operations.read().find_one(&query)),
            None => Ok(None),
        }
    }

    /// Finds one matching document under sort and skip options. Equivalent
    /// to [QuiltCollection::find] with the limit forced to 1.
    pub fn find_one_with_options(
        &self,
        query: &Document,
        options: &FindOptions,
    ) -> QuiltResult<Option<Document>> {
        let options = options.clone().limit(1);
        let mut cursor = self.find(query, &options)?;
        match cursor.next() {
            Some(document) => Ok(Some(document?)),
            None => Ok(None),
        }
    }

    /// Finds the document with the given id.
    pub fn find_one_by_id(&self, id: &str) -> QuiltResult<Option<Document>> {
        match self.for_read() {
            Some(operations) => Ok(operations.read().find_one_by_id(id)),
            None => Ok(None),
        }
    }

    /// Finds the documents with the given ids, in insertion order. Unknown
    /// ids are skipped, not errors.
    pub fn find_many_by_ids(&self, ids: &[String]) -> QuiltResult<DocumentCursor> {
        match self.for_read() {
            Some(operations) => {
                let matched = operations.read().find_many_by_ids(ids);
                Ok(DocumentCursor::from_documents(matched))
            }
            None => Ok(DocumentCursor::empty()),
        }
    }

    /// Counts the documents matching a query.
    pub fn count(&self, query: &Document) -> QuiltResult<usize> {
        let query = Query::parse(query)?;
        match self.for_read() {
            Some(operations) => Ok(operations.read().count(&query)),
            None => Ok(0),
        }
    }

    /// Collects the distinct values at a key path across matching documents,
    /// deduplicated and sorted. An explicit `null` counts as a value; a
    /// missing path does not.
    pub fn distinct(&self, path: &str, query: &Document) -> QuiltResult<Vec<Value>> {
        let query = Query::parse(query)?;
        match self.for_read() {
            Some(operations) => Ok(operations.read().distinct(path, &query)),
            None => Ok(Vec::new()),
        }
    }

    /// Removes every document matching a query. Returns how many were
    /// removed.
    pub fn remove(&self, query: &Document) -> QuiltResult<usize> {
        let query = Query::parse(query)?;
        match self.for_read() {
            Some(operations) => Ok(operations.write().remove(&query)),
            None => Ok(0),
        }
    }

    /// Removes the first document matching a query, in insertion order.
    /// Returns 1 or 0.
    pub fn remove_one(&self, query: &Document) -> QuiltResult<usize> {
        let query = Query::parse(query)?;
        match self.for_read() {
            Some(operations) => Ok(operations.write().remove_one(&query)),
            None => Ok(0),
        }
    }

    /// Removes the document with the given id. Returns 1 or 0.
    pub fn remove_one_by_id(&self, id: &str) -> QuiltResult<usize> {
        match self.for_read() {
            Some(operations) => Ok(operations.write().remove_one_by_id(id)),
            None => Ok(0),
        }
    }

    /// Removes the documents with the given ids. Returns how many existed.
    pub fn remove_many_by_ids(&self, ids: &[String]) -> QuiltResult<usize> {
        match self.for_read() {
            Some(operations) => Ok(operations.write().remove_many_by_ids(ids)),
            None => Ok(0),
        }
    }

    /// Adds the rules of a constraint specification to this collection,
    /// creating the collection if needed. Rules apply to writes from this
    /// point on; documents already stored are not re-validated. Returns
    /// `true` if at least one rule was new.
    pub fn add_constraints(&self, spec: &Document) -> QuiltResult<bool> {
        self.for_write().write().add_constraints(spec)
    }

    /// Removes the rules of a constraint specification, creating the
    /// collection if needed. Returns `true` if at least one matching rule
    /// existed.
    pub fn remove_constraints(&self, spec: &Document) -> QuiltResult<bool> {
        self.for_write().write().remove_constraints(spec)
    }

    /// Lists the active constraints in `"path:kind"` form, sorted.
    pub fn list_constraints(&self) -> QuiltResult<Vec<String>> {
        match self.for_read() {
            Some(operations) => Ok(operations.read().list_constraints()),
            None => Ok(Vec::new()),
        }
    }
}
