use quiltdb::collection::ID_LENGTH;
use quiltdb::common::Value;
use quiltdb::doc;
use quiltdb::errors::ErrorKind;
use quiltdb_int_test::test_util::{insert_test_documents, test_store};

#[test]
fn test_insert_generates_hex_id() {
    let store = test_store();
    let things = store.collection("things").unwrap();

    let id = things.insert(doc! { n: "hammer" }).unwrap();
    assert_eq!(id.len(), ID_LENGTH);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_uppercase()));
}

#[test]
fn test_insert_round_trip() {
    let store = test_store();
    let things = store.collection("things").unwrap();

    let id = things
        .insert(doc! { n: "hammer", kind: "tool", specs: { weight: 100, sharp: false } })
        .unwrap();

    let found = things.find_one_by_id(&id).unwrap().unwrap();
    assert_eq!(found.id().unwrap(), Some(id.as_str()));
    assert_eq!(found.get("n"), Value::from("hammer"));
    assert_eq!(found.resolve("specs.weight"), Some(&Value::from(100)));
}

#[test]
fn test_insert_keeps_supplied_string_id() {
    let store = test_store();
    let things = store.collection("things").unwrap();

    let id = things
        .insert(doc! { _id: "sarah@example.com", n: "sarah" })
        .unwrap();
    assert_eq!(id, "sarah@example.com");
}

#[test]
fn test_insert_duplicate_id_fails() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    things.insert(doc! { _id: "x1", n: "first" }).unwrap();

    let result = things.insert(doc! { _id: "x1", n: "second" });
    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err().kind(),
        &ErrorKind::UniqueConstraintViolation
    );

    // the first document is untouched
    let stored = things.find_one_by_id("x1").unwrap().unwrap();
    assert_eq!(stored.get("n"), Value::from("first"));
}

#[test]
fn test_insert_non_string_id_fails() {
    let store = test_store();
    let things = store.collection("things").unwrap();

    let result = things.insert(doc! { _id: 42, n: "hammer" });
    assert!(result.is_err());
    assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidId);
    assert_eq!(things.count(&doc! {}).unwrap(), 0);
}

#[test]
fn test_generated_ids_are_unique() {
    let store = test_store();
    let things = store.collection("things").unwrap();

    let mut ids = Vec::new();
    for i in 0..200 {
        ids.push(things.insert(doc! { n: i }).unwrap());
    }
    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
}

#[test]
fn test_fixture_inserts_cleanly() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    insert_test_documents(&things).unwrap();
    assert_eq!(things.count(&doc! {}).unwrap(), 6);
}
