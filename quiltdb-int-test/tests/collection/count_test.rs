use quiltdb::doc;
use quiltdb_int_test::test_util::{insert_test_documents, test_store};

#[test]
fn test_count_all_and_filtered() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    insert_test_documents(&things).unwrap();

    assert_eq!(things.count(&doc! {}).unwrap(), 6);
    assert_eq!(things.count(&doc! { kind: "tool" }).unwrap(), 3);
    assert_eq!(things.count(&doc! { kind: "bird" }).unwrap(), 2);
    assert_eq!(things.count(&doc! { kind: "fish" }).unwrap(), 0);
}

#[test]
fn test_count_with_operators() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    insert_test_documents(&things).unwrap();

    assert_eq!(things.count(&doc! { weight: { "$gte": 50 } }).unwrap(), 3);
    assert_eq!(
        things
            .count(&doc! { kind: { "$type": "string" } })
            .unwrap(),
        6
    );
}

#[test]
fn test_count_missing_collection_is_zero() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    assert_eq!(things.count(&doc! {}).unwrap(), 0);
}

#[test]
fn test_count_rejects_invalid_query() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    assert!(things.count(&doc! { age: { "$almost": 5 } }).is_err());
}
