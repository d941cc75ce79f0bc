use crate::collection::{Document, FindOptions};
use crate::common::{SortOrder, SortSpec, Value, DOC_ID, META_CREATED, META_UPDATED};
use crate::constraint::ConstraintSet;
use crate::errors::{ErrorKind, QuiltError, QuiltResult};
use crate::query::Query;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// A document at rest, together with its write timestamps.
///
/// The timestamps live beside the document rather than inside it, so stored
/// documents round-trip unchanged. Sorting reaches them through the
/// `$created` and `$updated` sort keys.
#[derive(Debug, Clone)]
pub(crate) struct StoredDocument {
    document: Document,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

/// The single-threaded core of one collection.
///
/// Holds the documents in insertion order, keyed by id, plus the active
/// constraints. All locking happens above this type; callers serialize
/// access through the store's per-collection lock.
#[derive(Debug)]
pub(crate) struct CollectionOperations {
    name: String,
    documents: IndexMap<String, StoredDocument>,
    constraints: ConstraintSet,
}

impl CollectionOperations {
    pub(crate) fn new(name: &str) -> CollectionOperations {
        CollectionOperations {
            name: name.to_string(),
            documents: IndexMap::new(),
            constraints: ConstraintSet::new(),
        }
    }

    /// Inserts a document and returns its id.
    ///
    /// A missing `_id` is filled in with a generated one; a supplied `_id`
    /// must be a non-empty string and must not collide with a stored
    /// document. Constraints are validated before anything is stored.
    pub(crate) fn insert(&mut self, mut document: Document) -> QuiltResult<String> {
        let id = match document.id()? {
            Some(id) if id.is_empty() => {
                log::error!("Empty _id in insert into '{}'", self.name);
                return Err(QuiltError::new(
                    &format!("Document _id must not be empty in collection '{}'", self.name),
                    ErrorKind::InvalidId,
                ));
            }
            Some(id) => id.to_string(),
            None => {
                let id = crate::ID_GENERATOR.generate();
                document.put(DOC_ID, id.clone())?;
                id
            }
        };

        self.constraints.validate(&document)?;

        if self.documents.contains_key(&id) {
            log::error!("Duplicate _id '{}' in collection '{}'", id, self.name);
            return Err(QuiltError::new(
                &format!(
                    "A document with _id '{}' already exists in collection '{}'",
                    id, self.name
                ),
                ErrorKind::UniqueConstraintViolation,
            ));
        }

        let now = Utc::now();
        self.documents.insert(
            id.clone(),
            StoredDocument {
                document,
                created: now,
                updated: now,
            },
        );
        Ok(id)
    }

    /// Saves a document, replacing any stored document with the same id
    /// wholesale. The replaced document keeps its creation timestamp and its
    /// place in insertion order. A document without an id, or with an id not
    /// yet stored, is inserted instead. Returns the saved document's id.
    pub(crate) fn save(&mut self, document: Document) -> QuiltResult<String> {
        let existing_id = match document.id()? {
            Some(id) if self.documents.contains_key(id) => Some(id.to_string()),
            _ => None,
        };

        match existing_id {
            Some(id) => {
                self.constraints.validate(&document)?;
                let stored = match self.documents.get_mut(&id) {
                    Some(stored) => stored,
                    None => {
                        return Err(QuiltError::new(
                            &format!("Lost document '{}' in collection '{}'", id, self.name),
                            ErrorKind::InternalError,
                        ))
                    }
                };
                stored.document = document;
                stored.updated = Utc::now();
                Ok(id)
            }
            None => self.insert(document),
        }
    }

    /// Finds matching documents, applying sort, skip, and limit in that
    /// order. Without a sort the result keeps insertion order; with one, the
    /// sort is stable so equal keys keep insertion order among themselves.
    pub(crate) fn find(
        &self,
        query: &Query,
        options: &FindOptions,
    ) -> QuiltResult<Vec<Document>> {
        let mut matched: Vec<&StoredDocument> = self
            .documents
            .values()
            .filter(|stored| query.matches(&stored.document))
            .collect();

        if let Some(spec) = &options.sort_by {
            sort_stored(&mut matched, spec);
        }

        let skip = options.skip.unwrap_or(0) as usize;
        let limit = options.limit.map(|l| l as usize).unwrap_or(usize::MAX);

        Ok(matched
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|stored| stored.document.clone())
            .collect())
    }

    /// Finds the first matching document in insertion order.
    pub(crate) fn find_one(&self, query: &Query) -> Option<Document> {
        self.documents
            .values()
            .find(|stored| query.matches(&stored.document))
            .map(|stored| stored.document.clone())
    }

    pub(crate) fn find_one_by_id(&self, id: &str) -> Option<Document> {
        self.documents.get(id).map(|stored| stored.document.clone())
    }

    /// Finds the documents with the given ids, in collection insertion
    /// order. Unknown ids are skipped.
    pub(crate) fn find_many_by_ids(&self, ids: &[String]) -> Vec<Document> {
        self.documents
            .iter()
            .filter(|(id, _)| ids.iter().any(|wanted| wanted == *id))
            .map(|(_, stored)| stored.document.clone())
            .collect()
    }

    pub(crate) fn count(&self, query: &Query) -> usize {
        self.documents
            .values()
            .filter(|stored| query.matches(&stored.document))
            .count()
    }

    /// Collects the distinct values at a key path across matching documents.
    ///
    /// An explicit `null` is a value and appears in the result; a document on
    /// which the path does not resolve contributes nothing. Values come back
    /// deduplicated and sorted in value order.
    pub(crate) fn distinct(&self, path: &str, query: &Query) -> Vec<Value> {
        let mut values = BTreeSet::new();
        for stored in self.documents.values() {
            if !query.matches(&stored.document) {
                continue;
            }
            if let Some(value) = stored.document.resolve(path) {
                values.insert(value.clone());
            }
        }
        values.into_iter().collect()
    }

    /// Removes all matching documents and returns how many were removed.
    pub(crate) fn remove(&mut self, query: &Query) -> usize {
        let doomed: Vec<String> = self
            .documents
            .iter()
            .filter(|(_, stored)| query.matches(&stored.document))
            .map(|(id, _)| id.clone())
            .collect();
        for id in &doomed {
            self.documents.shift_remove(id);
        }
        doomed.len()
    }

    /// Removes the first matching document in insertion order. Returns 1 if
    /// a document was removed, 0 otherwise.
    pub(crate) fn remove_one(&mut self, query: &Query) -> usize {
        let doomed = self
            .documents
            .iter()
            .find(|(_, stored)| query.matches(&stored.document))
            .map(|(id, _)| id.clone());
        match doomed {
            Some(id) => {
                self.documents.shift_remove(&id);
                1
            }
            None => 0,
        }
    }

    pub(crate) fn remove_one_by_id(&mut self, id: &str) -> usize {
        match self.documents.shift_remove(id) {
            Some(_) => 1,
            None => 0,
        }
    }

    pub(crate) fn remove_many_by_ids(&mut self, ids: &[String]) -> usize {
        let mut removed = 0;
        for id in ids {
            if self.documents.shift_remove(id).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Adds the rules of a constraint specification. Rules apply to writes
    /// from this point on; documents already stored are not re-validated.
    pub(crate) fn add_constraints(&mut self, spec: &Document) -> QuiltResult<bool> {
        self.constraints.add_all(spec)
    }

    pub(crate) fn remove_constraints(&mut self, spec: &Document) -> QuiltResult<bool> {
        self.constraints.remove_all(spec)
    }

    pub(crate) fn list_constraints(&self) -> Vec<String> {
        self.constraints.list()
    }

    pub(crate) fn len(&self) -> usize {
        self.documents.len()
    }
}

/// Stable sort over matched documents by a multi-field sort specification.
fn sort_stored(matched: &mut [&StoredDocument], spec: &SortSpec) {
    matched.sort_by(|a, b| {
        for (field, order) in spec.sorting_order() {
            let ordering = compare_keys(sort_key(a, field), sort_key(b, field));
            let ordering = match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

/// The sort key of one document for one field. The `$created` and `$updated`
/// keys sort by the write timestamps; everything else resolves as a key path
/// into the document, with an unresolvable path yielding no key.
fn sort_key(stored: &StoredDocument, field: &str) -> Option<Value> {
    match field {
        META_CREATED => Some(Value::I64(stored.created.timestamp_millis())),
        META_UPDATED => Some(Value::I64(stored.updated.timestamp_millis())),
        _ => stored.document.resolve(field).cloned(),
    }
}

/// Documents without a sort key order before documents with one, so an
/// ascending sort surfaces the key-less documents first.
fn compare_keys(a: Option<Value>, b: Option<Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(&b),
    }
}
