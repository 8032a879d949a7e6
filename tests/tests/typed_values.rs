use jiff::tz::TimeZone;
use parqsql::{
    driver::{ColumnarSource, RelationalSink},
    schema::{Logical, PhysicalKind, TimeUnit},
    BatchWriter, ConverterRegistry, Value,
};
use parqsql_driver_sqlite::SqliteSink;
use parqsql_parquet::ParquetSource;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tests::{export_table, Fixture};

const EVENTS: &str = "
    CREATE TABLE events (
        at TIMESTAMP, amount DECIMAL(10, 2), day DATE, ok BOOLEAN, ratio DOUBLE
    );
    INSERT INTO events VALUES ('2024-07-01 12:30:00.125', '19.99', '2024-07-01', 1, 0.25);
    INSERT INTO events VALUES ('2024-11-03 01:30:00', '-0.5', '2024-11-03', 0, NULL);
    INSERT INTO events VALUES ('2024-03-10 03:15:00', NULL, NULL, NULL, 1.5);
";

const COPY: &str = "
    CREATE TABLE events_copy (
        at TIMESTAMP, amount DECIMAL(10, 2), day DATE, ok BOOLEAN, ratio DOUBLE
    );
";

fn new_york() -> TimeZone {
    TimeZone::get("America/New_York").unwrap()
}

#[tokio::test]
async fn timestamps_decimals_and_dates_round_trip() {
    let fixture = Fixture::new();
    fixture.sqlite.execute_batch(EVENTS).unwrap();
    fixture.sqlite.execute_batch(COPY).unwrap();

    let registry = Arc::new(ConverterRegistry::with_time_zone(new_york()));
    let path = fixture.path("events.parquet");

    let (schema, rows) = export_table(&fixture.sqlite, "events", &path, registry.clone())
        .await
        .unwrap();
    assert_eq!(rows, 3);

    let logical: Vec<_> = schema.columns.iter().map(|c| (c.physical, c.logical)).collect();
    assert_eq!(
        logical,
        [
            (
                PhysicalKind::Int64,
                Some(Logical::Timestamp {
                    unit: TimeUnit::Millis,
                    utc: true
                })
            ),
            (
                PhysicalKind::Int64,
                Some(Logical::Decimal {
                    scale: 2,
                    precision: 10
                })
            ),
            (PhysicalKind::Int32, Some(Logical::Date)),
            (PhysicalKind::Boolean, None),
            (PhysicalKind::Double, None),
        ]
    );

    // precision 10 needs INT64; the value is stored unscaled
    let mut source = ParquetSource::open(&path).unwrap();
    let first = source.read_next().await.unwrap().unwrap();
    assert_eq!(first.get("amount").unwrap().value, Value::I64(1999));

    let writer = BatchWriter::builder()
        .registry(registry)
        .build(schema)
        .unwrap();
    let mut sink = SqliteSink::new(
        fixture.sqlite.clone(),
        "events_copy",
        writer.columns(),
        None,
        new_york(),
    )
    .unwrap();

    let mut source = ParquetSource::open(&path).unwrap();
    writer.write(&mut source, &mut sink).await.unwrap();
    sink.close().await.unwrap();

    assert_eq!(
        fixture.query("SELECT * FROM events_copy ORDER BY rowid"),
        fixture.query("SELECT * FROM events ORDER BY rowid")
    );
}

#[tokio::test]
async fn bare_numeric_fractions_truncate() {
    let fixture = Fixture::new();
    fixture
        .sqlite
        .execute_batch(
            "CREATE TABLE prices (amount NUMERIC);
             INSERT INTO prices VALUES (12.5);
             INSERT INTO prices VALUES (-3.75);",
        )
        .unwrap();

    let registry = Arc::new(ConverterRegistry::with_time_zone(TimeZone::UTC));
    let path = fixture.path("prices.parquet");

    let (schema, rows) = export_table(&fixture.sqlite, "prices", &path, registry)
        .await
        .unwrap();
    assert_eq!(rows, 2);
    assert_eq!(
        schema.columns[0].logical,
        Some(Logical::Decimal {
            scale: 0,
            precision: 18
        })
    );

    let mut source = ParquetSource::open(&path).unwrap();
    let first = source.read_next().await.unwrap().unwrap();
    assert_eq!(first.get("amount").unwrap().value, Value::I64(12));
    let second = source.read_next().await.unwrap().unwrap();
    assert_eq!(second.get("amount").unwrap().value, Value::I64(-3));
}
