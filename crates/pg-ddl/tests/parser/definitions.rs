//! Tests for column definitions, table constraints and LIKE entries

use pg_ddl::{
    ast::{
        column::{ColumnOption, StorageMode},
        constraint::{
            ColumnConstraintKind, ConstraintTiming, MatchType, ReferentialAction,
            TableConstraintKind,
        },
        table::LikeOptionKind,
    },
    parse_create_table,
};

#[test]
fn test_parameterized_types() {
    let table = parse_create_table(
        "CREATE TABLE t (name VARCHAR(255), price NUMERIC(10, 2), tags text[], at timestamptz)",
    )
    .unwrap();

    let types: Vec<String> = table
        .columns
        .iter()
        .map(|c| c.data_type.to_string())
        .collect();
    assert_eq!(
        types,
        vec!["VARCHAR(255)", "NUMERIC(10,2)", "text[]", "timestamptz"]
    );
}

#[test]
fn test_column_options_keep_order() {
    let table = parse_create_table(
        r#"CREATE TABLE t (body text STORAGE MAIN COMPRESSION pglz COLLATE "en_US" NOT NULL)"#,
    )
    .unwrap();

    let options = &table.columns[0].options;
    assert_eq!(options.len(), 4);
    assert_eq!(options[0], ColumnOption::Storage(StorageMode::Main));
    assert_eq!(options[1], ColumnOption::Compression("pglz".to_string()));
    assert_eq!(options[2], ColumnOption::Collate(r#""en_US""#.to_string()));
    assert!(matches!(
        &options[3],
        ColumnOption::Constraint(c) if c.kind == ColumnConstraintKind::NotNull
    ));
}

#[test]
fn test_column_constraint_timing() {
    let table = parse_create_table(
        "CREATE TABLE t (
            a int REFERENCES b DEFERRABLE,
            c int UNIQUE NOT DEFERRABLE INITIALLY IMMEDIATE NOT NULL,
            d int NOT NULL REFERENCES e (id) ON DELETE CASCADE INITIALLY DEFERRED
        )",
    )
    .unwrap();

    let a = table.columns[0].constraints().next().unwrap();
    assert!(matches!(a.kind, ColumnConstraintKind::References(_)));
    assert_eq!(a.timing.deferrable, Some(true));
    assert_eq!(a.timing.initially_deferred, None);

    let c: Vec<_> = table.columns[1].constraints().collect();
    assert_eq!(c.len(), 2);
    assert_eq!(
        c[0].timing,
        ConstraintTiming {
            deferrable: Some(false),
            initially_deferred: Some(false),
        }
    );
    assert_eq!(c[1].kind, ColumnConstraintKind::NotNull);
    assert!(c[1].timing.is_empty());

    let d: Vec<_> = table.columns[2].constraints().collect();
    assert!(d[0].timing.is_empty());
    assert_eq!(d[1].timing.initially_deferred, Some(true));
}

#[test]
fn test_table_constraint_timing() {
    let table = parse_create_table(
        "CREATE TABLE t (a int, b int,
            CONSTRAINT fk FOREIGN KEY (a) REFERENCES p (id) DEFERRABLE INITIALLY DEFERRED,
            PRIMARY KEY (a, b) NOT DEFERRABLE)",
    )
    .unwrap();

    assert_eq!(table.constraints[0].timing.deferrable, Some(true));
    assert_eq!(table.constraints[0].timing.initially_deferred, Some(true));
    assert_eq!(table.constraints[1].timing.deferrable, Some(false));
}

#[test]
fn test_column_constraints() {
    let table = parse_create_table(
        "CREATE TABLE t (
            id int CONSTRAINT id_pk PRIMARY KEY,
            code text UNIQUE NULL,
            qty int DEFAULT 1 CHECK (qty > 0) NO INHERIT,
            total int GENERATED ALWAYS AS (qty * 2) STORED
        )",
    )
    .unwrap();

    let id: Vec<_> = table.columns[0].constraints().collect();
    assert_eq!(id[0].name.as_deref(), Some("id_pk"));
    assert_eq!(id[0].kind, ColumnConstraintKind::PrimaryKey);

    let code: Vec<_> = table.columns[1].constraints().map(|c| &c.kind).collect();
    assert_eq!(
        code,
        vec![&ColumnConstraintKind::Unique, &ColumnConstraintKind::Null]
    );

    let qty: Vec<_> = table.columns[2].constraints().map(|c| &c.kind).collect();
    match (qty[0], qty[1]) {
        (
            ColumnConstraintKind::Default(default),
            ColumnConstraintKind::Check { expr, no_inherit },
        ) => {
            assert_eq!(default.to_string(), "1");
            assert_eq!(expr.to_string(), "qty > 0");
            assert!(*no_inherit);
        }
        other => panic!("unexpected constraints: {other:?}"),
    }

    let total: Vec<_> = table.columns[3].constraints().map(|c| &c.kind).collect();
    match total[0] {
        ColumnConstraintKind::Generated(expr) => assert_eq!(expr.to_string(), "qty * 2"),
        other => panic!("unexpected constraint: {other:?}"),
    }
}

#[test]
fn test_column_references() {
    let table = parse_create_table(
        "CREATE TABLE t (owner int REFERENCES users (id) ON DELETE CASCADE ON UPDATE NO ACTION)",
    )
    .unwrap();

    let constraint = table.columns[0].constraints().next().unwrap();
    match &constraint.kind {
        ColumnConstraintKind::References(reference) => {
            assert_eq!(reference.table, "users");
            assert_eq!(reference.columns, vec!["id"]);
            assert_eq!(reference.on_delete, Some(ReferentialAction::Cascade));
            assert_eq!(reference.on_update, Some(ReferentialAction::NoAction));
            assert_eq!(reference.match_type, None);
        }
        other => panic!("unexpected constraint: {other:?}"),
    }
}

#[test]
fn test_table_constraints() {
    let table = parse_create_table(
        "CREATE TABLE t (
            a int,
            b int,
            PRIMARY KEY (a, b),
            UNIQUE (b),
            CHECK (a <> b),
            CONSTRAINT fk FOREIGN KEY (b) REFERENCES other (x) MATCH SIMPLE ON DELETE RESTRICT
        )",
    )
    .unwrap();

    assert_eq!(table.columns.len(), 2);
    assert_eq!(table.constraints.len(), 4);

    assert_eq!(
        table.constraints[0].kind,
        TableConstraintKind::PrimaryKey {
            columns: vec!["a".into(), "b".into()],
            include: vec![],
        }
    );
    assert_eq!(
        table.constraints[1].kind,
        TableConstraintKind::Unique {
            columns: vec!["b".into()],
            include: vec![],
        }
    );
    match &table.constraints[2].kind {
        TableConstraintKind::Check { expr, no_inherit } => {
            assert_eq!(expr.to_string(), "a <> b");
            assert!(!no_inherit);
        }
        other => panic!("unexpected constraint: {other:?}"),
    }

    assert_eq!(table.constraints[3].name.as_deref(), Some("fk"));
    match &table.constraints[3].kind {
        TableConstraintKind::ForeignKey { columns, reference } => {
            assert_eq!(columns, &vec!["b".to_string()]);
            assert_eq!(reference.table, "other");
            assert_eq!(reference.match_type, Some(MatchType::Simple));
            assert_eq!(reference.on_delete, Some(ReferentialAction::Restrict));
        }
        other => panic!("unexpected constraint: {other:?}"),
    }
}

#[test]
fn test_columns_and_constraints_interleave() {
    let table =
        parse_create_table("CREATE TABLE t (a int, UNIQUE (a), b int, CHECK (b > a), c int)")
            .unwrap();

    let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(table.constraints.len(), 2);
}

#[test]
fn test_like_clause_with_columns() {
    let table = parse_create_table(
        "CREATE TABLE t (LIKE base INCLUDING CONSTRAINTS EXCLUDING COMMENTS, extra int)",
    )
    .unwrap();

    let like = table.like.unwrap();
    assert_eq!(like.source, "base");
    assert_eq!(like.options.len(), 2);
    assert!(like.options[0].including);
    assert_eq!(like.options[0].kind, LikeOptionKind::Constraints);
    assert!(!like.options[1].including);
    assert_eq!(like.options[1].kind, LikeOptionKind::Comments);

    assert_eq!(table.columns.len(), 1);
    assert_eq!(table.columns[0].name, "extra");
}

#[test]
fn test_default_escape_string() {
    let table = parse_create_table(r"CREATE TABLE t (note text DEFAULT E'it\'s')").unwrap();
    let constraint = table.columns[0].constraints().next().unwrap();

    assert_eq!(
        constraint.kind,
        ColumnConstraintKind::Default(r"E'it\'s'".into())
    );
}

#[test]
fn test_defaults_with_calls_and_casts() {
    let table = parse_create_table(
        "CREATE TABLE t (
            id bigint DEFAULT nextval('t_id_seq'::regclass) NOT NULL,
            created timestamp DEFAULT CURRENT_TIMESTAMP,
            status text DEFAULT 'new'::text,
            delta int DEFAULT -1
        )",
    )
    .unwrap();

    let defaults: Vec<String> = table
        .columns
        .iter()
        .filter_map(|c| {
            c.constraints().find_map(|constraint| match &constraint.kind {
                ColumnConstraintKind::Default(expr) => Some(expr.to_string()),
                _ => None,
            })
        })
        .collect();

    assert_eq!(
        defaults,
        vec![
            "nextval('t_id_seq'::regclass)",
            "CURRENT_TIMESTAMP",
            "'new'::text",
            "- 1"
        ]
    );
}

#[test]
fn test_identity_column() {
    let table = parse_create_table(
        "CREATE TABLE t (id int GENERATED ALWAYS AS IDENTITY (START WITH 100 INCREMENT BY 5))",
    )
    .unwrap();

    match &table.columns[0].constraints().next().unwrap().kind {
        ColumnConstraintKind::Identity { always, options } => {
            assert!(*always);
            assert_eq!(
                options.as_ref().unwrap().to_string(),
                "START WITH 100 INCREMENT BY 5"
            );
        }
        other => panic!("unexpected constraint: {other:?}"),
    }
}
