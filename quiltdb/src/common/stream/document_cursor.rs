use crate::collection::Document;
use crate::errors::QuiltResult;

/// A lazy, forward-only stream of documents produced by a find operation.
///
/// The cursor owns its underlying result stream and yields each matching
/// document exactly once. It is not restartable: once a document has been
/// consumed it cannot be revisited, and once the stream is exhausted the
/// cursor stays empty. Dropping the cursor early releases the underlying
/// stream.
///
/// # Examples
///
/// ```rust,ignore
/// let cursor = collection.find(&query)?;
/// for doc in cursor {
///     println!("{}", doc?);
/// }
/// ```
pub struct DocumentCursor {
    underlying: Option<Box<dyn Iterator<Item = QuiltResult<Document>> + Send>>,
}

impl DocumentCursor {
    pub(crate) fn new(iter: Box<dyn Iterator<Item = QuiltResult<Document>> + Send>) -> Self {
        DocumentCursor {
            underlying: Some(iter),
        }
    }

    /// Creates a cursor over an already-materialized result set.
    pub(crate) fn from_documents(documents: Vec<Document>) -> Self {
        DocumentCursor::new(Box::new(documents.into_iter().map(Ok)))
    }

    /// An empty cursor, used for reads on collections that do not exist.
    pub(crate) fn empty() -> Self {
        DocumentCursor::new(Box::new(std::iter::empty()))
    }

    /// Consumes the cursor and collects all remaining documents, stopping at
    /// the first error.
    pub fn collect_all(self) -> QuiltResult<Vec<Document>> {
        self.collect()
    }
}

impl Iterator for DocumentCursor {
    type Item = QuiltResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(ref mut iter) = self.underlying {
            if let Some(item) = iter.next() {
                return Some(item);
            }
            // Once exhausted, drop the underlying stream.
            self.underlying = None;
        }
        None
    }
}
