use quiltdb::common::Value;
use quiltdb::doc;
use quiltdb_int_test::test_util::test_store;

#[test]
fn test_distinct_dedupes_and_sorts() {
    let store = test_store();
    let people = store.collection("people").unwrap();
    people.insert(doc! { n: "a", age: 22 }).unwrap();
    people.insert(doc! { n: "b", age: 30 }).unwrap();
    people.insert(doc! { n: "c", age: 22 }).unwrap();
    people.insert(doc! { n: "d", age: 38 }).unwrap();
    people.insert(doc! { n: "e", age: null }).unwrap();
    people.insert(doc! { n: "f" }).unwrap();

    // the explicit null counts, the absent key does not
    let ages = people.distinct("age", &doc! {}).unwrap();
    assert_eq!(
        ages,
        vec![
            Value::Null,
            Value::from(22),
            Value::from(30),
            Value::from(38)
        ]
    );
}

#[test]
fn test_distinct_with_query() {
    let store = test_store();
    let people = store.collection("people").unwrap();
    people.insert(doc! { n: "a", age: 22, city: "Leith" }).unwrap();
    people.insert(doc! { n: "b", age: 30, city: "Leith" }).unwrap();
    people.insert(doc! { n: "c", age: 40, city: "Hull" }).unwrap();

    let ages = people
        .distinct("age", &doc! { city: "Leith" })
        .unwrap();
    assert_eq!(ages, vec![Value::from(22), Value::from(30)]);
}

#[test]
fn test_distinct_nested_path() {
    let store = test_store();
    let people = store.collection("people").unwrap();
    people
        .insert(doc! { n: "a", address: { city: "Leith" } })
        .unwrap();
    people
        .insert(doc! { n: "b", address: { city: "Hull" } })
        .unwrap();
    people
        .insert(doc! { n: "c", address: { city: "Leith" } })
        .unwrap();

    let cities = people.distinct("address.city", &doc! {}).unwrap();
    assert_eq!(cities, vec![Value::from("Hull"), Value::from("Leith")]);
}

#[test]
fn test_distinct_missing_collection_is_empty() {
    let store = test_store();
    let people = store.collection("people").unwrap();
    assert!(people.distinct("age", &doc! {}).unwrap().is_empty());
}

#[test]
fn test_distinct_equates_numeric_variants() {
    let store = test_store();
    let numbers = store.collection("numbers").unwrap();
    numbers.insert(doc! { v: 1 }).unwrap();
    numbers.insert(doc! { v: 1.0 }).unwrap();
    numbers.insert(doc! { v: 1.5 }).unwrap();

    let values = numbers.distinct("v", &doc! {}).unwrap();
    assert_eq!(values.len(), 2);
}
