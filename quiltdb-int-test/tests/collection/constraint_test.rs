use quiltdb::doc;
use quiltdb::errors::ErrorKind;
use quiltdb_int_test::test_util::test_store;

#[test]
fn test_add_constraints_true_then_false() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    let spec = doc! { n: { "$required": 1 } };

    assert!(things.add_constraints(&spec).unwrap());
    assert!(!things.add_constraints(&spec).unwrap());
}

#[test]
fn test_add_constraints_creates_collection() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    things
        .add_constraints(&doc! { n: { "$required": 1 } })
        .unwrap();
    assert!(store.collection_exists("things"));
}

#[test]
fn test_list_constraints_canonical_and_sorted() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    things
        .add_constraints(&doc! {
            n: { "$required": 1, "$type": "string" },
            weight: { "$notnull": 1 },
        })
        .unwrap();

    assert_eq!(
        things.list_constraints().unwrap(),
        vec![
            "n:required".to_string(),
            "n:type:string".to_string(),
            "weight:notnull".to_string(),
        ]
    );
}

#[test]
fn test_required_rejects_missing_key() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    things
        .add_constraints(&doc! { n: { "$required": 1 } })
        .unwrap();

    let result = things.insert(doc! { kind: "tool" });
    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err().kind(),
        &ErrorKind::ConstraintViolation
    );
    assert_eq!(things.count(&doc! {}).unwrap(), 0);
}

#[test]
fn test_required_accepts_explicit_null() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    things
        .add_constraints(&doc! { n: { "$required": 1 } })
        .unwrap();

    things.insert(doc! { n: null, kind: "tool" }).unwrap();
    assert_eq!(things.count(&doc! {}).unwrap(), 1);
}

#[test]
fn test_notnull_rejects_null_but_allows_absence() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    things
        .add_constraints(&doc! { n: { "$notnull": 1 } })
        .unwrap();

    assert!(things.insert(doc! { n: null }).is_err());
    things.insert(doc! { kind: "tool" }).unwrap();
    things.insert(doc! { n: "hammer" }).unwrap();
}

#[test]
fn test_type_constraint() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    things
        .add_constraints(&doc! { weight: { "$type": "number" } })
        .unwrap();

    things.insert(doc! { weight: 10 }).unwrap();
    things.insert(doc! { weight: 10.5 }).unwrap();
    things.insert(doc! { weight: null }).unwrap();
    things.insert(doc! { n: "weightless" }).unwrap();
    assert!(things.insert(doc! { weight: "heavy" }).is_err());
}

#[test]
fn test_type_constraint_on_nested_path() {
    let store = test_store();
    let people = store.collection("people").unwrap();
    people
        .add_constraints(&doc! { "address.city": { "$type": "string" } })
        .unwrap();

    people
        .insert(doc! { address: { city: "Leith" } })
        .unwrap();
    assert!(people.insert(doc! { address: { city: 7 } }).is_err());
}

#[test]
fn test_remove_constraints_restores_writes() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    let spec = doc! { n: { "$required": 1 } };
    things.add_constraints(&spec).unwrap();
    assert!(things.insert(doc! { kind: "tool" }).is_err());

    assert!(things.remove_constraints(&spec).unwrap());
    assert!(!things.remove_constraints(&spec).unwrap());
    things.insert(doc! { kind: "tool" }).unwrap();
    assert!(things.list_constraints().unwrap().is_empty());
}

#[test]
fn test_invalid_constraint_spec_rejected() {
    let store = test_store();
    let things = store.collection("things").unwrap();

    let result = things.add_constraints(&doc! { n: { "$unique": 1 } });
    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err().kind(),
        &ErrorKind::InvalidConstraint
    );

    assert!(things
        .add_constraints(&doc! { n: { "$type": "integer" } })
        .is_err());
    assert!(things.list_constraints().unwrap().is_empty());
}

#[test]
fn test_constraints_do_not_revalidate_existing_documents() {
    let store = test_store();
    let things = store.collection("things").unwrap();
    things.insert(doc! { kind: "tool" }).unwrap();

    // the stored document has no "n", the rule still lands
    assert!(things
        .add_constraints(&doc! { n: { "$required": 1 } })
        .unwrap());
    assert_eq!(things.count(&doc! {}).unwrap(), 1);
    assert!(things.insert(doc! { kind: "tool" }).is_err());
}
