use jiff::tz::TimeZone;
use parqsql::{
    driver::{ColumnarSink, ColumnarSource, RelationalSink, RelationalSource},
    schema::{Logical, PhysicalKind},
    BatchWriter, ColumnarOp, ColumnarSchema, ColumnarType, ConverterRegistry, Field, Record,
    RecordBridge, SchemaBridge, SqlOp, SqlType,
};
use parqsql_driver_sqlite::{SqliteSink, SqliteSource};
use parqsql_parquet::{ParquetSink, ParquetSource};
use pretty_assertions::assert_eq;
use rusqlite::types::Value as SqlValue;
use std::sync::Arc;
use tests::{users_copy, Fixture};

fn text(s: &str) -> Vec<u8> {
    s.as_bytes().to_vec()
}

/// A file written by another producer: no `value` column, plus a column the
/// users table does not have.
async fn write_partial(fixture: &Fixture) -> std::path::PathBuf {
    let path = fixture.path("partial.parquet");
    let string = |name: &str| {
        ColumnarType::new(name, PhysicalKind::Binary).with_logical(Logical::String)
    };

    let schema = ColumnarSchema::new(
        "partial",
        vec![string("username"), string("comment"), string("origin")],
    );

    let mut sink = ParquetSink::create(&path, schema).unwrap();
    for (username, comment) in [("Robert", Some("Testing")), ("Paul", None)] {
        let mut record = Record::new();
        record.insert(Field::new("username", text(username), ColumnarOp::Binary));
        record.insert(match comment {
            Some(comment) => Field::new("comment", text(comment), ColumnarOp::Binary),
            None => Field::skip("comment"),
        });
        record.insert(Field::new("origin", text("import"), ColumnarOp::Binary));
        sink.write_record(&record).await.unwrap();
    }
    sink.finish().await.unwrap();

    path
}

fn registry() -> Arc<ConverterRegistry> {
    Arc::new(ConverterRegistry::with_time_zone(TimeZone::UTC))
}

fn target(fixture: &Fixture) -> ColumnarSchema {
    let columns = SqliteSource::open(&fixture.sqlite, "users").unwrap().columns();
    SchemaBridge::new(registry())
        .derive_schema("users", &columns)
        .unwrap()
}

#[tokio::test]
async fn absent_columns_become_typed_nulls() {
    let fixture = Fixture::new();
    let path = write_partial(&fixture).await;
    let target = target(&fixture);

    let mut source = ParquetSource::open(&path).unwrap();
    let record = source.read_next().await.unwrap().unwrap();

    let row = RecordBridge::new(registry())
        .reconcile(&record, source.schema(), &target)
        .unwrap();

    assert_eq!(row.len(), target.len());
    assert_eq!(row[0].name, "username");
    assert_eq!(row[1].op, SqlOp::Null(SqlType::INTEGER));
    assert_eq!(row[2].op, SqlOp::String);
}

#[tokio::test]
async fn partial_file_loads_into_the_full_table() {
    let fixture = Fixture::new();
    let path = write_partial(&fixture).await;
    let target = target(&fixture);

    fixture.sqlite.execute_batch(&users_copy("users_copy")).unwrap();

    let writer = BatchWriter::builder()
        .registry(registry())
        .build(target)
        .unwrap();
    let mut sink = SqliteSink::new(
        fixture.sqlite.clone(),
        "users_copy",
        writer.columns(),
        None,
        TimeZone::UTC,
    )
    .unwrap();

    let mut source = ParquetSource::open(&path).unwrap();
    writer.write(&mut source, &mut sink).await.unwrap();
    sink.close().await.unwrap();

    assert_eq!(
        fixture.query("SELECT username, value, comment FROM users_copy ORDER BY rowid"),
        vec![
            vec![
                SqlValue::Text("Robert".into()),
                SqlValue::Null,
                SqlValue::Text("Testing".into())
            ],
            vec![SqlValue::Text("Paul".into()), SqlValue::Null, SqlValue::Null],
        ]
    );
}
