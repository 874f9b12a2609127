//! Tests for the clauses that follow the definition list

use pg_ddl::{
    ast::table::{OnCommit, PartitionStrategy, StorageValue},
    parse_create_table,
};
use std::collections::BTreeMap;

#[test]
fn test_inherits_keeps_order() {
    let table = parse_create_table("CREATE TABLE t (a int) INHERITS (parent1, parent2)").unwrap();
    assert_eq!(
        table.inherits,
        Some(vec!["parent1".to_string(), "parent2".to_string()])
    );
}

#[test]
fn test_partition_by_range() {
    let table = parse_create_table("CREATE TABLE t (a int) PARTITION BY RANGE (a)").unwrap();

    let spec = table.partition_by.unwrap();
    assert_eq!(spec.strategy, PartitionStrategy::Range);
    let keys: Vec<String> = spec.keys.iter().map(|k| k.to_string()).collect();
    assert_eq!(keys, vec!["a"]);
}

#[test]
fn test_storage_parameters() {
    let table =
        parse_create_table("CREATE TABLE t (a int) WITH (fillfactor = 70, oids)").unwrap();

    let expected = BTreeMap::from([
        ("fillfactor".to_string(), StorageValue::Value("70".to_string())),
        ("oids".to_string(), StorageValue::Flag(true)),
    ]);
    assert_eq!(table.storage_parameters, Some(expected));
}

#[test]
fn test_without_oids() {
    let table = parse_create_table("CREATE TABLE t (a int) WITHOUT OIDS").unwrap();
    assert_eq!(
        table.storage_parameters,
        Some(BTreeMap::from([("oids".to_string(), StorageValue::Flag(false))]))
    );
}

#[test]
fn test_all_clauses_in_canonical_order() {
    let table = parse_create_table(
        "CREATE TEMP TABLE t (a int)
         INHERITS (base)
         PARTITION BY LIST (a)
         USING heap
         WITH (fillfactor = 50)
         ON COMMIT DELETE ROWS
         TABLESPACE pg_default;",
    )
    .unwrap();

    assert_eq!(table.inherits, Some(vec!["base".to_string()]));
    assert_eq!(
        table.partition_by.map(|p| p.strategy),
        Some(PartitionStrategy::List)
    );
    assert_eq!(table.access_method.as_deref(), Some("heap"));
    assert!(table.storage_parameters.is_some());
    assert_eq!(table.on_commit, Some(OnCommit::DeleteRows));
    assert_eq!(table.tablespace.as_deref(), Some("pg_default"));
}

#[test]
fn test_on_commit_drop() {
    let table = parse_create_table("CREATE TEMP TABLE t (a int) ON COMMIT DROP").unwrap();
    assert_eq!(table.on_commit, Some(OnCommit::Drop));
}

#[test]
fn test_out_of_order_clause_fails() {
    let err = parse_create_table("CREATE TABLE t (a int) TABLESPACE ts INHERITS (base)")
        .unwrap_err();
    assert!(err.to_string().contains("'INHERITS'"), "{err}");
}
