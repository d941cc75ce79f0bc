use quiltdb::common::Value;
use quiltdb::doc;
use quiltdb_int_test::test_util::{insert_test_documents, test_store};

#[test]
fn test_remove_by_query() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    insert_test_documents(&things).unwrap();

    assert_eq!(things.remove(&doc! { kind: "tool" }).unwrap(), 3);
    assert_eq!(things.count(&doc! {}).unwrap(), 3);
    assert_eq!(things.remove(&doc! { kind: "tool" }).unwrap(), 0);
}

#[test]
fn test_remove_with_operator_query() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    insert_test_documents(&things).unwrap();

    assert_eq!(things.remove(&doc! { weight: { "$lt": 10 } }).unwrap(), 2);
    assert_eq!(things.count(&doc! { kind: "bird" }).unwrap(), 0);
}

#[test]
fn test_remove_one_takes_first_in_insertion_order() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    insert_test_documents(&things).unwrap();

    assert_eq!(things.remove_one(&doc! { kind: "bird" }).unwrap(), 1);
    assert!(things.find_one_by_id("crow").unwrap().is_none());
    assert!(things.find_one_by_id("owl").unwrap().is_some());
}

#[test]
fn test_remove_one_by_id_then_again() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    insert_test_documents(&things).unwrap();

    assert_eq!(things.remove_one_by_id("saw").unwrap(), 1);
    assert_eq!(things.remove_one_by_id("saw").unwrap(), 0);
    assert_eq!(things.count(&doc! {}).unwrap(), 5);
}

#[test]
fn test_remove_many_by_ids() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    insert_test_documents(&things).unwrap();

    let removed = things
        .remove_many_by_ids(&[
            "hammer".to_string(),
            "crow".to_string(),
            "missing".to_string(),
        ])
        .unwrap();
    assert_eq!(removed, 2);
    assert_eq!(things.count(&doc! {}).unwrap(), 4);
}

#[test]
fn test_remove_on_missing_collection_is_zero() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    assert_eq!(things.remove(&doc! {}).unwrap(), 0);
    assert_eq!(things.remove_one(&doc! {}).unwrap(), 0);
    assert_eq!(things.remove_one_by_id("x").unwrap(), 0);
    assert!(!store.collection_exists("things"));
}

#[test]
fn test_remove_preserves_order_of_survivors() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    insert_test_documents(&things).unwrap();

    things.remove(&doc! { kind: "tool" }).unwrap();
    let all = things.find_all().unwrap().collect_all().unwrap();
    let names: Vec<Value> = all.iter().map(|d| d.get("n")).collect();
    assert_eq!(
        names,
        vec![
            Value::from("crow"),
            Value::from("owl"),
            Value::from("badger")
        ]
    );
}
