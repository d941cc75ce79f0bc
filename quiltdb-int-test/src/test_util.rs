use quiltdb::collection::QuiltCollection;
use quiltdb::doc;
use quiltdb::errors::QuiltResult;
use quiltdb::store::QuiltStore;

#[ctor::ctor]
fn init_logging() {
    colog::init();
}

/// Creates a fresh store for one test.
pub fn test_store() -> QuiltStore {
    QuiltStore::new()
}

/// Inserts the standard six-document fixture: three tools, two birds, and
/// one animal, with fixed ids and weights.
pub fn insert_test_documents(collection: &QuiltCollection) -> QuiltResult<()> {
    collection.insert(doc! { _id: "hammer", n: "hammer", kind: "tool", weight: 100 })?;
    collection.insert(doc! { _id: "chisel", n: "chisel", kind: "tool", weight: 50 })?;
    collection.insert(doc! { _id: "saw", n: "saw", kind: "tool", weight: 200 })?;
    collection.insert(doc! { _id: "crow", n: "crow", kind: "bird", weight: 1 })?;
    collection.insert(doc! { _id: "owl", n: "owl", kind: "bird", weight: 2 })?;
    collection.insert(doc! { _id: "badger", n: "badger", kind: "animal", weight: 10 })?;
    Ok(())
}

/// Checks that a slice is sorted according to a comparator.
pub fn is_sorted<T, F>(items: &[T], mut in_order: F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    items.windows(2).all(|pair| in_order(&pair[0], &pair[1]))
}
