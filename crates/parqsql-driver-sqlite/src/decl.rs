use parqsql_core::{
    convert::class,
    schema::{ColumnDescriptor, SqlType},
};

/// Builds column metadata from a SQLite declared type such as `VARCHAR(64)`
/// or `DECIMAL(10, 2)`.
///
/// SQLite itself only knows storage classes, so the declared type is the
/// only hint at what a column holds. A declared type the driver does not
/// recognize becomes the value class as written, leaving it to a registered
/// converter to accept it.
pub fn describe_column(name: &str, declared: &str, not_null: bool) -> ColumnDescriptor {
    let declared = declared.trim();
    let (base, args) = split_args(declared);
    let base = base.to_ascii_uppercase();

    let (sql_type, value_class) = match base.as_str() {
        "VARCHAR" | "NVARCHAR" | "CHARACTER VARYING" | "TEXT" | "CLOB" => {
            (SqlType::VARCHAR, class::STRING)
        }
        "CHAR" | "NCHAR" | "CHARACTER" => (SqlType::CHAR, class::STRING),
        "INT" | "INTEGER" | "MEDIUMINT" | "INT4" => (SqlType::INTEGER, class::INT),
        "BIGINT" | "INT8" => (SqlType::BIGINT, class::LONG),
        "SMALLINT" | "INT2" => (SqlType::SMALLINT, class::SHORT),
        "TINYINT" => (SqlType::TINYINT, class::BYTE),
        "BOOLEAN" | "BOOL" => (SqlType::BOOLEAN, class::BOOLEAN),
        "REAL" => (SqlType::REAL, class::FLOAT),
        "FLOAT" | "DOUBLE" | "DOUBLE PRECISION" => (SqlType::DOUBLE, class::DOUBLE),
        "DECIMAL" => (SqlType::DECIMAL, class::DECIMAL),
        "NUMERIC" => (SqlType::NUMERIC, class::DECIMAL),
        "DATE" => (SqlType::DATE, class::DATE),
        "TIMESTAMP" | "DATETIME" => (SqlType::TIMESTAMP, class::TIMESTAMP),
        "BLOB" | "BINARY" | "VARBINARY" => (SqlType::BLOB, class::BYTES),
        // no declared type means BLOB affinity
        "" => (SqlType::BLOB, class::BYTES),
        _ => {
            log::debug!("column `{name}` has unrecognized declared type `{declared}`");
            (SqlType::OTHER, declared)
        }
    };

    let mut column = ColumnDescriptor::new(name, sql_type, value_class).nullable(!not_null);

    match args.as_slice() {
        [precision] => column = column.precision(*precision, 0),
        [precision, scale] => column = column.precision(*precision, *scale),
        _ => {}
    }

    column
}

/// Splits `NAME(a, b)` into the name and its numeric arguments.
fn split_args(declared: &str) -> (&str, Vec<i32>) {
    let Some(open) = declared.find('(') else {
        return (declared, vec![]);
    };

    let base = declared[..open].trim_end();
    let inner = declared[open + 1..].trim_end().trim_end_matches(')');

    let args = inner
        .split(',')
        .map(|arg| arg.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_default();

    (base, args)
}
