use quiltdb::common::Value;
use quiltdb::doc;
use quiltdb_int_test::test_util::{insert_test_documents, test_store};

#[test]
fn test_save_replaces_wholesale() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    insert_test_documents(&things).unwrap();

    let id = things
        .save(doc! { _id: "chisel", n: "chisel", sharp: true })
        .unwrap();
    assert_eq!(id, "chisel");

    let stored = things.find_one_by_id("chisel").unwrap().unwrap();
    assert_eq!(stored.get("sharp"), Value::from(true));
    // replaced, not merged: the old keys are gone
    assert!(stored.resolve("kind").is_none());
    assert!(stored.resolve("weight").is_none());
    assert_eq!(things.count(&doc! {}).unwrap(), 6);
}

#[test]
fn test_save_keeps_insertion_order() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    insert_test_documents(&things).unwrap();

    things.save(doc! { _id: "hammer", n: "sledgehammer" }).unwrap();

    let all = things.find_all().unwrap().collect_all().unwrap();
    assert_eq!(all[0].get("n"), Value::from("sledgehammer"));
    assert_eq!(all[1].get("n"), Value::from("chisel"));
}

#[test]
fn test_save_without_id_inserts() {
    let store = test_store();
    let things = store.collection("things").unwrap();

    let id = things.save(doc! { n: "anvil" }).unwrap();
    assert_eq!(id.len(), 24);
    assert!(things.find_one_by_id(&id).unwrap().is_some());
}

#[test]
fn test_save_with_unknown_id_inserts() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    insert_test_documents(&things).unwrap();

    things.save(doc! { _id: "anvil", n: "anvil" }).unwrap();
    assert_eq!(things.count(&doc! {}).unwrap(), 7);
    // inserted at the end
    let all = things.find_all().unwrap().collect_all().unwrap();
    assert_eq!(all[6].get("n"), Value::from("anvil"));
}

#[test]
fn test_save_validates_constraints() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    insert_test_documents(&things).unwrap();
    things
        .add_constraints(&doc! { n: { "$required": 1 } })
        .unwrap();

    assert!(things.save(doc! { _id: "hammer", kind: "tool" }).is_err());
    // the stored document is untouched after a rejected save
    let stored = things.find_one_by_id("hammer").unwrap().unwrap();
    assert_eq!(stored.get("n"), Value::from("hammer"));
}
