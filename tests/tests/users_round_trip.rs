use jiff::tz::TimeZone;
use parqsql::{
    driver::{ColumnarSource, RelationalSink},
    schema::{Logical, PhysicalKind},
    BatchWriter, ColumnarType, ConverterRegistry, Value, WriteStats,
};
use parqsql_driver_sqlite::{SqliteSink, SqliteSinkFactory};
use parqsql_parquet::ParquetSource;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tests::{export_table, users_copy, Fixture};

fn registry() -> Arc<ConverterRegistry> {
    Arc::new(ConverterRegistry::with_time_zone(TimeZone::UTC))
}

#[tokio::test]
async fn users_survive_a_round_trip() {
    let fixture = Fixture::new();
    let path = fixture.path("users.parquet");

    let (schema, rows) = export_table(&fixture.sqlite, "users", &path, registry())
        .await
        .unwrap();
    assert_eq!(rows, 3);
    assert_eq!(
        schema.columns,
        vec![
            ColumnarType::new("username", PhysicalKind::Binary)
                .with_logical(Logical::String)
                .with_nullable(false),
            ColumnarType::new("value", PhysicalKind::Int32),
            ColumnarType::new("comment", PhysicalKind::Binary).with_logical(Logical::String),
        ]
    );

    // nulls are absent values in the file
    let mut source = ParquetSource::open(&path).unwrap();
    let mut values = vec![];
    while let Some(record) = source.read_next().await.unwrap() {
        values.push(record.get("value").unwrap().value.clone());
    }
    assert_eq!(values, [Value::I32(7), Value::I32(4), Value::Null]);

    fixture.sqlite.execute_batch(&users_copy("users_copy")).unwrap();

    let writer = BatchWriter::builder()
        .batch_size(2)
        .registry(registry())
        .build(schema)
        .unwrap();

    let mut source = ParquetSource::open(&path).unwrap();
    let mut sink = SqliteSink::new(
        fixture.sqlite.clone(),
        "users_copy",
        writer.columns(),
        None,
        TimeZone::UTC,
    )
    .unwrap();

    let stats = writer.write(&mut source, &mut sink).await.unwrap();
    sink.close().await.unwrap();

    assert_eq!(stats, WriteStats { rows: 3, batches: 2 });
    assert_eq!(
        fixture.query("SELECT * FROM users_copy ORDER BY rowid"),
        fixture.query("SELECT * FROM users ORDER BY rowid")
    );
}

#[tokio::test]
async fn scoped_write_through_a_factory() {
    let fixture = Fixture::new();
    let path = fixture.path("users.parquet");
    let (schema, _) = export_table(&fixture.sqlite, "users", &path, registry())
        .await
        .unwrap();

    fixture.sqlite.execute_batch(&users_copy("users_copy")).unwrap();

    let factory = SqliteSinkFactory::new(fixture.driver(), "users_copy")
        .unwrap()
        .time_zone(TimeZone::UTC);
    let writer = BatchWriter::builder()
        .registry(registry())
        .build(schema)
        .unwrap();

    let mut source = ParquetSource::open(&path).unwrap();
    let stats = writer.write_scoped(&mut source, &factory).await.unwrap();

    assert_eq!(stats, WriteStats { rows: 3, batches: 1 });
    assert_eq!(
        fixture.query("SELECT username FROM users_copy WHERE value IS NULL"),
        vec![vec![rusqlite::types::Value::Text("Patrick".into())]]
    );
}
