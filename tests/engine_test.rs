mod common;

use std::io::Write;

use common::*;
use sqlite_reader::db::page::{PageType, Value, read_all_rows};
use sqlite_reader::db::{
    self, Database, Error, ErrorKind, QueryOutput, describe_database, list_tables, row_count,
    run_query, schema,
};

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

#[test]
fn test_describe_database() {
    let file = apples_db();
    let info = describe_database(file.path()).unwrap();
    assert_eq!(info.page_size, 4096);
    assert_eq!(info.table_count, 1);
}

#[test]
fn test_apples_scenario() {
    let file = apples_db();
    let mut database = Database::open(file.path()).unwrap();
    assert_eq!(database.header().page_count, 2);

    let schema_page = database.read_page(1).unwrap();
    assert_eq!(schema::table_names(&schema_page).unwrap(), vec!["apples"]);
    assert_eq!(schema::root_page_of("apples", &schema_page).unwrap(), 2);

    let page = database.read_page(2).unwrap();
    assert_eq!(page.page_type, PageType::LeafTable);
    assert_eq!(page.cell_count, 4);
    assert_eq!(page.cell_pointers.len(), 4);
    assert_eq!(page.data().len(), PAGE_SIZE);

    let rows = read_all_rows(&page).unwrap();
    let ids: Vec<i64> = rows.iter().map(|r| r.rowid).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    for (row, (name, color)) in rows.iter().zip(APPLES) {
        assert_eq!(row.column_count(), 3);
        assert_eq!(row.value(1), Some(&text(name)));
        assert_eq!(row.value(2), Some(&text(color)));
    }

    assert_eq!(row_count(file.path(), "apples").unwrap(), 4);
}

#[test]
fn test_reading_a_page_twice_is_identical() {
    let file = apples_db();
    let mut database = Database::open(file.path()).unwrap();
    let first = database.read_page(2).unwrap();
    let second = database.read_page(2).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_list_tables_matches_schema_table_names() {
    let file = write_pages(&[
        schema_page_rows(&[
            ("table", "apples", "apples", 2, APPLES_SQL),
            ("index", "apples_by_name", "apples", 4, "CREATE INDEX apples_by_name ON apples (name)"),
            ("table", "sqlite_sequence", "sqlite_sequence", 3, "CREATE TABLE sqlite_sequence(name,seq)"),
        ]),
        leaf_table_page(&apple_rows()),
        leaf_table_page(&[]),
        leaf_table_page(&[]),
    ]);
    let listed = list_tables(file.path()).unwrap();
    let schema_page = Database::open(file.path()).unwrap().read_page(1).unwrap();
    assert_eq!(listed, schema::table_names(&schema_page).unwrap());
    assert_eq!(listed, vec!["apples", "apples", "sqlite_sequence"]);
}

#[test]
fn test_count_query() {
    let file = apples_db();
    assert_eq!(
        run_query(file.path(), "SELECT COUNT(*) FROM apples").unwrap(),
        QueryOutput::Count(4)
    );
    assert_eq!(
        run_query(file.path(), "select count(*) from apples where color = 'Red'").unwrap(),
        QueryOutput::Count(1)
    );
}

#[test]
fn test_column_queries() {
    let file = apples_db();
    let output = run_query(file.path(), "SELECT name FROM apples").unwrap();
    assert_eq!(
        output,
        QueryOutput::Rows(APPLES.iter().map(|(name, _)| vec![text(name)]).collect())
    );

    let output = run_query(file.path(), "SELECT id, color FROM apples WHERE name = 'Fuji'").unwrap();
    assert_eq!(output, QueryOutput::Rows(vec![vec![Value::Integer(2), text("Red")]]));

    let output = run_query(file.path(), "SELECT * FROM apples WHERE id = 4").unwrap();
    assert_eq!(
        output,
        QueryOutput::Rows(vec![vec![Value::Integer(4), text("Golden Delicious"), text("Yellow")]])
    );
}

#[test]
fn test_query_errors() {
    let file = apples_db();

    let err = run_query(file.path(), "SELECT COUNT(*) FROM pears").unwrap_err();
    assert!(matches!(err, Error::TableNotFound(ref name) if name == "pears"));
    assert_eq!(err.kind(), ErrorKind::Schema);

    let err = run_query(file.path(), "SELECT weight FROM apples").unwrap_err();
    assert!(matches!(err, Error::ColumnNotFound { .. }));

    let err = run_query(file.path(), "SELECT name").unwrap_err();
    assert!(matches!(err, Error::MissingFromClause));

    let err = run_query(file.path(), "SELECT * FROM apples a JOIN apples b").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::QueryShape);
}

#[test]
fn test_interior_root_page() {
    let file = write_pages(&[
        schema_page(&[("table", "apples", 2, APPLES_SQL)]),
        interior_table_page(&[(3, 2)], 4),
        leaf_table_page(&apple_rows()[..2]),
        leaf_table_page(&apple_rows()[2..]),
    ]);

    // Only the root page's own cells are counted.
    assert_eq!(row_count(file.path(), "apples").unwrap(), 1);

    let mut database = Database::open(file.path()).unwrap();
    let root = database.read_page(2).unwrap();
    assert_eq!(root.page_type, PageType::InteriorTable);
    assert_eq!(root.right_most_pointer, Some(4));

    let err = run_query(file.path(), "SELECT name FROM apples").unwrap_err();
    assert!(matches!(err, Error::NotALeafTablePage { page: 2, .. }));
}

#[test]
fn test_page_errors() {
    let file = apples_db();
    let mut database = Database::open(file.path()).unwrap();

    assert!(matches!(database.read_page(0), Err(Error::InvalidPageNumber)));

    let err = database.read_page(3).unwrap_err();
    assert!(matches!(err, Error::PageRead { page: 3, .. }));
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_unknown_page_type() {
    let file = write_pages(&[
        schema_page(&[("table", "apples", 2, APPLES_SQL)]),
        vec![0u8; PAGE_SIZE],
    ]);
    let err = row_count(file.path(), "apples").unwrap_err();
    assert!(matches!(err, Error::UnknownPageType { page: 2, type_byte: 0 }));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_corrupt_cell_fails_the_scan() {
    let mut rows = apple_rows();
    // Serial type 11 is reserved.
    rows[1] = vec![0x03, 0x02, 0x02, 0x0b];
    let file = write_pages(&[
        schema_page(&[("table", "apples", 2, APPLES_SQL)]),
        leaf_table_page(&rows),
    ]);
    let err = run_query(file.path(), "SELECT name FROM apples").unwrap_err();
    assert!(matches!(
        err,
        Error::Record { page: 2, cell: 1, source: db::DecodeError::ReservedSerialType(11), .. }
    ));
}

#[test]
fn test_not_a_database() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0u8; 200]).unwrap();
    let err = describe_database(file.path()).unwrap_err();
    assert!(matches!(err, Error::InvalidHeader { .. }));

    let missing = file.path().with_extension("missing");
    assert!(matches!(describe_database(&missing), Err(Error::Io(_))));
}
