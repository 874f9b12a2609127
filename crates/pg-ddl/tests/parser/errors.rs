//! Tests for malformed statements: every one must fail, none may hang

use pg_ddl::{errors::DdlError, parse_create_table};

fn parse_error(sql: &str) -> pg_ddl::errors::ParseError {
    match parse_create_table(sql) {
        Err(DdlError::Parse(err)) => err,
        other => panic!("expected a parse error for {sql:?}, got {other:?}"),
    }
}

#[test]
fn test_missing_table_keyword() {
    let err = parse_error("CREATE t (a int)");
    assert_eq!(err.found, "t");
    assert_eq!(err.position, 1);
    assert!(err.expected.contains("TABLE"));
}

#[test]
fn test_unknown_modifier_fails_instead_of_looping() {
    let err = parse_error("CREATE FOO TABLE t (a int)");
    assert_eq!(err.found, "FOO");
    assert_eq!(err.position, 1);
}

#[test]
fn test_modifiers_without_table_reach_end_of_input() {
    let err = parse_error("CREATE TEMP UNLOGGED");
    assert!(err.is_end_of_input());
    assert_eq!(err.position, 3);
}

#[test]
fn test_must_start_with_create() {
    let err = parse_error("DROP TABLE t");
    assert_eq!(err.found, "DROP");
    assert_eq!(err.expected, "CREATE");
}

#[test]
fn test_partial_if_not_exists() {
    let err = parse_error("CREATE TABLE IF EXISTS t (a int)");
    assert_eq!(err.found, "EXISTS");
    assert_eq!(err.expected, "NOT");
}

#[test]
fn test_unclosed_definition_list() {
    let err = parse_error("CREATE TABLE t (a int, b text");
    assert!(err.is_end_of_input());

    let err = parse_error("CREATE TABLE t (a int,");
    assert!(err.is_end_of_input());
}

#[test]
fn test_unknown_column_option() {
    let err = parse_error("CREATE TABLE t (a int AUTO_INCREMENT)");
    assert_eq!(err.found, "AUTO_INCREMENT");
    assert!(err.expected.contains("column option"));
}

#[test]
fn test_missing_data_type() {
    let err = parse_error("CREATE TABLE t (a, b int)");
    assert_eq!(err.found, ",");
    assert_eq!(err.expected, "data type");
}

#[test]
fn test_not_without_null() {
    let err = parse_error("CREATE TABLE t (a int NOT DEFERRABLE)");
    assert_eq!(err.found, "DEFERRABLE");
    assert_eq!(err.expected, "NULL");
}

#[test]
fn test_unbalanced_check() {
    let err = parse_error("CREATE TABLE t (a int CHECK (a > (0))");
    assert!(err.is_end_of_input());
}

#[test]
fn test_duplicate_like() {
    let err = parse_error("CREATE TABLE t (LIKE a, LIKE b)");
    assert_eq!(err.found, "LIKE");
    assert_eq!(err.position, 7);
}

#[test]
fn test_bad_table_constraint() {
    let err = parse_error("CREATE TABLE t (a int, CONSTRAINT c KEY (a))");
    assert_eq!(err.found, "KEY");
}

#[test]
fn test_foreign_key_needs_references() {
    let err = parse_error("CREATE TABLE t (a int, FOREIGN KEY (a) other (x))");
    assert_eq!(err.found, "other");
    assert_eq!(err.expected, "REFERENCES");
}

#[test]
fn test_unclosed_clause_lists() {
    assert!(parse_error("CREATE TABLE t (a int) INHERITS (p1, p2").is_end_of_input());
    assert!(parse_error("CREATE TABLE t (a int) PARTITION BY RANGE (a").is_end_of_input());
    assert!(parse_error("CREATE TABLE t (a int) WITH (fillfactor = ").is_end_of_input());
}

#[test]
fn test_on_without_commit() {
    let err = parse_error("CREATE TABLE t (a int) ON DELETE ROWS");
    assert_eq!(err.found, "DELETE");
    assert_eq!(err.expected, "COMMIT");
}

#[test]
fn test_entries_must_be_separated() {
    let err = parse_error("CREATE TABLE t (CONSTRAINT c CHECK (a > 0) NOT NULL)");
    assert_eq!(err.found, "NOT");
    assert_eq!(err.expected, "',' or ')'");

    let err = parse_error("CREATE TABLE t (PRIMARY KEY (a) b int)");
    assert_eq!(err.found, "b");
    assert_eq!(err.position, 9);

    let err = parse_error("CREATE TABLE t (LIKE s a int)");
    assert_eq!(err.found, "a");
    assert_eq!(err.expected, "',' or ')'");
}

#[test]
fn test_parenthesized_lists_must_be_separated() {
    let err = parse_error("CREATE TABLE t (a int) INHERITS (p q)");
    assert_eq!(err.found, "q");
    assert_eq!(err.expected, "',' or ')'");

    let err = parse_error("CREATE TABLE t (a numeric(10, 2), UNIQUE (a b))");
    assert_eq!(err.found, "b");

    let err = parse_error("CREATE TABLE t (a int) WITH (fillfactor = 70 autovacuum_enabled)");
    assert_eq!(err.found, "autovacuum_enabled");
}

#[test]
fn test_timing_needs_deferrable_constraint() {
    let err = parse_error("CREATE TABLE t (a int DEFERRABLE)");
    assert_eq!(err.found, "DEFERRABLE");
    assert!(err.expected.contains("before a timing attribute"));

    let err = parse_error("CREATE TABLE t (a int CHECK (a > 0) INITIALLY DEFERRED)");
    assert_eq!(err.found, "INITIALLY");

    let err = parse_error("CREATE TABLE t (a int REFERENCES b INITIALLY LATER)");
    assert_eq!(err.found, "LATER");
    assert_eq!(err.expected, "DEFERRED or IMMEDIATE");

    let err = parse_error("CREATE TABLE t (a int NOT UNIQUE)");
    assert_eq!(err.found, "UNIQUE");
    assert_eq!(err.expected, "NULL or DEFERRABLE");
}

#[test]
fn test_trailing_garbage() {
    let err = parse_error("CREATE TABLE t (a int) garbage");
    assert_eq!(err.found, "garbage");
    assert_eq!(err.expected, "';' or end of input");

    let err = parse_error("CREATE TABLE t (a int); CREATE TABLE u (b int)");
    assert_eq!(err.found, "CREATE");
    assert_eq!(err.expected, "end of input");
}

#[test]
fn test_lex_errors_are_reported_separately() {
    match parse_create_table("CREATE TABLE t (a text DEFAULT 'oops)") {
        Err(DdlError::Lex(_)) => {}
        other => panic!("expected a lex error, got {other:?}"),
    }
}

#[test]
fn test_truncated_input_never_hangs() {
    let sql = "CREATE TEMP TABLE IF NOT EXISTS s.t (a int NOT NULL DEFAULT 0 \
               CHECK (a > 0), CONSTRAINT pk PRIMARY KEY (a)) INHERITS (p) \
               PARTITION BY RANGE (a) USING heap WITH (fillfactor = 70) \
               ON COMMIT PRESERVE ROWS TABLESPACE ts;";
    let tokens: Vec<&str> = sql.split_whitespace().collect();

    // Every strict prefix is either a complete statement or a syntax error.
    for end in 0..tokens.len() {
        let prefix = tokens[..end].join(" ");
        let _ = parse_create_table(&prefix);
    }
    assert!(parse_create_table(sql).is_ok());
}
