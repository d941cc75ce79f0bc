use quiltdb::collection::{Document, FindOptions};
use quiltdb::common::Value;
use quiltdb::doc;
use quiltdb::query::Query;
use quiltdb_int_test::test_util::{insert_test_documents, test_store};

#[test]
fn test_insert_document_parsed_from_json() {
    let store = test_store();
    let things = store.collection("things").unwrap();

    let document = Document::from_json(
        r#"{ "n": "anvil", "kind": "tool", "specs": { "weight": 500 } }"#,
    )
    .unwrap();
    let id = things.insert(document).unwrap();

    let stored = things.find_one_by_id(&id).unwrap().unwrap();
    assert_eq!(stored.get("n"), Value::from("anvil"));
    assert_eq!(stored.get("specs.weight"), Value::from(500));
}

#[test]
fn test_find_with_json_query_and_sort() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    insert_test_documents(&things).unwrap();

    let query = Document::from_json(r#"{ "weight": { "$gt": 10 } }"#).unwrap();
    let options = FindOptions::new()
        .sort_json(r#"[{ "weight": -1 }]"#)
        .unwrap();

    let found = things.find(&query, &options).unwrap().collect_all().unwrap();
    let names: Vec<Value> = found.iter().map(|d| d.get("n")).collect();
    assert_eq!(
        names,
        vec![
            Value::from("saw"),
            Value::from("hammer"),
            Value::from("chisel")
        ]
    );
}

#[test]
fn test_query_parsed_from_json_matches() {
    let query =
        Query::parse_json(r#"{ "kind": "bird", "weight": { "$lte": 1 } }"#).unwrap();

    assert!(query.matches(&doc! { n: "crow", kind: "bird", weight: 1 }));
    assert!(!query.matches(&doc! { n: "owl", kind: "bird", weight: 2 }));
    assert!(!query.matches(&doc! { n: "hammer", kind: "tool", weight: 1 }));
}

#[test]
fn test_stored_document_round_trips_through_json() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    insert_test_documents(&things).unwrap();

    let stored = things.find_one_by_id("crow").unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stored.to_json().unwrap()).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!({ "_id": "crow", "n": "crow", "kind": "bird", "weight": 1 })
    );

    let reloaded = Document::from_json(&stored.to_json().unwrap()).unwrap();
    assert_eq!(reloaded, stored);
}
