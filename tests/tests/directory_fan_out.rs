use jiff::tz::TimeZone;
use parqsql::{BatchWriter, ColumnarSchema, ConverterRegistry, WriteStats};
use parqsql_driver_sqlite::SqliteSinkFactory;
use parqsql_parquet::ParquetDataset;
use pretty_assertions::assert_eq;
use std::{fs, sync::Arc};
use tests::{export_table, Fixture};

fn registry() -> Arc<ConverterRegistry> {
    Arc::new(ConverterRegistry::with_time_zone(TimeZone::UTC))
}

/// Exports `users` twice and a disjoint `others` table once into a dataset
/// directory, and creates `users_pk` keyed on the user name.
async fn dataset(fixture: &Fixture) -> (ParquetDataset, ColumnarSchema) {
    fixture
        .sqlite
        .execute_batch(
            "CREATE TABLE others (username VARCHAR(32) NOT NULL, value INT, comment VARCHAR(64));
             INSERT INTO others VALUES ('Zed', 1, 'last');
             CREATE TABLE users_pk (
                 username VARCHAR(32) PRIMARY KEY, value INT, comment VARCHAR(64)
             );",
        )
        .unwrap();

    let dir = fixture.path("dataset");
    fs::create_dir(&dir).unwrap();

    for (file, table) in [
        ("part-0.parquet", "users"),
        ("part-1.parquet", "users"),
        ("part-2.parquet", "others"),
    ] {
        export_table(&fixture.sqlite, table, &dir.join(file), registry())
            .await
            .unwrap();
    }
    fs::write(dir.join("_SUCCESS"), b"").unwrap();

    let dataset = ParquetDataset::open(&dir).unwrap();
    let schema = dataset.schema().unwrap();
    (dataset, schema)
}

fn factory(fixture: &Fixture, hint: Option<&str>) -> Arc<SqliteSinkFactory> {
    Arc::new(
        SqliteSinkFactory::new(fixture.driver(), "users_pk")
            .unwrap()
            .write_hint(hint)
            .time_zone(TimeZone::UTC),
    )
}

fn count(fixture: &Fixture) -> usize {
    fixture.query("SELECT * FROM users_pk").len()
}

#[tokio::test]
async fn parallel_sources_all_land() {
    let fixture = Fixture::new();
    let (dataset, schema) = dataset(&fixture).await;
    assert_eq!(dataset.files().len(), 3);

    let writer = BatchWriter::builder()
        .batch_size(2)
        .parallelism(2)
        .registry(registry())
        .build(schema)
        .unwrap();

    let outcomes = writer
        .write_all(dataset.sources().unwrap(), factory(&fixture, Some("OR REPLACE")))
        .await;

    let stats: Vec<_> = outcomes
        .into_iter()
        .map(|outcome| outcome.result.unwrap())
        .collect();
    assert_eq!(
        stats,
        [
            WriteStats { rows: 3, batches: 2 },
            WriteStats { rows: 3, batches: 2 },
            WriteStats { rows: 1, batches: 1 },
        ]
    );
    assert_eq!(count(&fixture), 4);
}

#[tokio::test]
async fn continue_mode_reports_each_source() {
    let fixture = Fixture::new();
    let (dataset, schema) = dataset(&fixture).await;

    let writer = BatchWriter::builder()
        .batch_size(2)
        .fail_fast(false)
        .registry(registry())
        .build(schema)
        .unwrap();

    let outcomes = writer
        .write_all(dataset.sources().unwrap(), factory(&fixture, None))
        .await;

    assert!(outcomes[0].is_ok());
    assert!(outcomes[0].source.ends_with("part-0.parquet"));

    // second copy of the users collides on the key
    let err = outcomes[1].result.as_ref().unwrap_err();
    assert!(err.is_driver_operation_failed());

    assert!(outcomes[2].is_ok());
    assert_eq!(count(&fixture), 4);
}

#[tokio::test]
async fn fail_fast_cancels_remaining_sources() {
    let fixture = Fixture::new();
    let (dataset, schema) = dataset(&fixture).await;

    let writer = BatchWriter::builder()
        .batch_size(2)
        .registry(registry())
        .build(schema)
        .unwrap();

    let outcomes = writer
        .write_all(dataset.sources().unwrap(), factory(&fixture, None))
        .await;

    assert!(outcomes[0].is_ok());
    assert!(outcomes[1].result.as_ref().unwrap_err().is_driver_operation_failed());
    assert!(outcomes[2].result.as_ref().unwrap_err().is_cancelled());

    // batches committed before the failure stay written
    assert_eq!(count(&fixture), 3);
}
