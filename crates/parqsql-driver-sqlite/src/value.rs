use bigdecimal::BigDecimal;
use jiff::{civil, tz::TimeZone, Timestamp};
use parqsql_core::{
    convert::class,
    schema::ColumnDescriptor,
    Error, Result, Value as CoreValue,
};
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use std::str::FromStr;

/// Value classes this driver produces; anything else is passed through in
/// its storage class.
const KNOWN_CLASSES: &[&str] = &[
    class::STRING,
    class::BOOLEAN,
    class::BYTE,
    class::SHORT,
    class::INT,
    class::LONG,
    class::FLOAT,
    class::DOUBLE,
    class::DECIMAL,
    class::DATE,
    class::TIMESTAMP,
    class::BYTES,
];

#[derive(Debug, Clone, PartialEq)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Converts a stored SQLite value into the value class of its column.
    ///
    /// Timestamps stored as text are wall-clock times in `tz`; integers are
    /// epoch milliseconds.
    pub fn from_sql(value: SqlValue, column: &ColumnDescriptor, tz: &TimeZone) -> Result<Self> {
        use CoreValue as V;

        let name = column.name.as_str();

        let core_value = match (column.value_class.as_str(), value) {
            (_, SqlValue::Null) => V::Null,
            (class::STRING, SqlValue::Text(v)) => V::String(v),
            (class::STRING, SqlValue::Integer(v)) => V::String(v.to_string()),
            (class::STRING, SqlValue::Real(v)) => V::String(v.to_string()),
            (class::BOOLEAN, SqlValue::Integer(v)) => V::Bool(v != 0),
            (class::BYTE, SqlValue::Integer(v)) => V::I8(narrow(name, v)?),
            (class::SHORT, SqlValue::Integer(v)) => V::I16(narrow(name, v)?),
            (class::INT, SqlValue::Integer(v)) => V::I32(narrow(name, v)?),
            (class::LONG, SqlValue::Integer(v)) => V::I64(v),
            (class::FLOAT, SqlValue::Real(v)) => V::F32(v as f32),
            (class::FLOAT, SqlValue::Integer(v)) => V::F32(v as f32),
            (class::DOUBLE, SqlValue::Real(v)) => V::F64(v),
            (class::DOUBLE, SqlValue::Integer(v)) => V::F64(v as f64),
            (class::DECIMAL, SqlValue::Integer(v)) => V::Decimal(BigDecimal::from(v)),
            (class::DECIMAL, SqlValue::Real(v)) => V::Decimal(parse_decimal(name, &v.to_string())?),
            (class::DECIMAL, SqlValue::Text(v)) => V::Decimal(parse_decimal(name, &v)?),
            (class::DATE, SqlValue::Text(v)) => V::Date(
                civil::Date::from_str(v.trim())
                    .map_err(|err| Error::convert(name, format!("`{v}` is not a date: {err}")))?,
            ),
            (class::TIMESTAMP, SqlValue::Text(v)) => V::Timestamp(parse_timestamp(name, &v, tz)?),
            (class::TIMESTAMP, SqlValue::Integer(v)) => V::Timestamp(
                Timestamp::from_millisecond(v).map_err(|err| Error::convert(name, err.to_string()))?,
            ),
            (class::BYTES, SqlValue::Blob(v)) => V::Bytes(v),
            (class::BYTES, SqlValue::Text(v)) => V::Bytes(v.into_bytes()),
            (class, value) if KNOWN_CLASSES.contains(&class) => {
                return Err(Error::convert(
                    name,
                    format!("stored {} cannot be read as {class}", storage_class(&value)),
                ));
            }
            (_, SqlValue::Integer(v)) => V::I64(v),
            (_, SqlValue::Real(v)) => V::F64(v),
            (_, SqlValue::Text(v)) => V::String(v),
            (_, SqlValue::Blob(v)) => V::Bytes(v),
        };

        Ok(Value(core_value))
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use CoreValue as V;

        match &self.0 {
            V::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            V::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            V::I8(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v as i64))),
            V::I16(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v as i64))),
            V::I32(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v as i64))),
            V::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            V::F32(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v as f64))),
            V::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            V::Decimal(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(v.to_plain_string()))),
            V::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            V::Bytes(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Blob(&v[..]))),
            V::Date(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(v.to_string()))),
            V::Timestamp(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(render_timestamp(
                *v,
                &TimeZone::UTC,
            )))),
            V::Int96(v) => {
                let ts = v
                    .to_timestamp()
                    .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))?;
                Ok(ToSqlOutput::Owned(SqlValue::Text(render_timestamp(ts, &TimeZone::UTC))))
            }
            V::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
        }
    }
}

/// Renders an instant as wall-clock text in `tz`, e.g. `2024-03-10 01:30:00`.
pub(crate) fn render_timestamp(ts: Timestamp, tz: &TimeZone) -> String {
    tz.to_datetime(ts).strftime("%Y-%m-%d %H:%M:%S%.f").to_string()
}

/// Reads wall-clock text in `tz`. A time repeated by a fall-back transition
/// resolves to its earlier occurrence.
pub(crate) fn parse_timestamp(field: &str, text: &str, tz: &TimeZone) -> Result<Timestamp> {
    let text = text.trim().replacen(' ', "T", 1);
    let datetime = civil::DateTime::from_str(&text)
        .map_err(|err| Error::convert(field, format!("`{text}` is not a timestamp: {err}")))?;

    tz.to_ambiguous_timestamp(datetime)
        .compatible()
        .map_err(|err| Error::convert(field, err.to_string()))
}

fn parse_decimal(field: &str, text: &str) -> Result<BigDecimal> {
    BigDecimal::from_str(text.trim())
        .map_err(|err| Error::convert(field, format!("`{text}` is not a decimal: {err}")))
}

fn narrow<T: TryFrom<i64>>(field: &str, value: i64) -> Result<T> {
    T::try_from(value).map_err(|_| {
        Error::convert(
            field,
            format!("{value} is out of range for {}", std::any::type_name::<T>()),
        )
    })
}

fn storage_class(value: &SqlValue) -> &'static str {
    match value {
        SqlValue::Null => "NULL",
        SqlValue::Integer(_) => "INTEGER",
        SqlValue::Real(_) => "REAL",
        SqlValue::Text(_) => "TEXT",
        SqlValue::Blob(_) => "BLOB",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parqsql_core::schema::SqlType;

    fn column(class: &str) -> ColumnDescriptor {
        ColumnDescriptor::new("c", SqlType::OTHER, class)
    }

    #[test]
    fn integers_narrow_to_their_class() {
        let value = Value::from_sql(SqlValue::Integer(7), &column("i32"), &TimeZone::UTC).unwrap();
        assert_eq!(value.into_inner(), CoreValue::I32(7));

        let err = Value::from_sql(SqlValue::Integer(300), &column("i8"), &TimeZone::UTC).unwrap_err();
        assert!(err.is_convert());
    }

    #[test]
    fn decimals_from_text() {
        let value =
            Value::from_sql(SqlValue::Text("12.50".into()), &column("BigDecimal"), &TimeZone::UTC)
                .unwrap();
        assert_eq!(value.into_inner(), CoreValue::Decimal("12.50".parse().unwrap()));
    }

    #[test]
    fn mismatched_storage_class_is_an_error() {
        let err = Value::from_sql(SqlValue::Text("seven".into()), &column("i32"), &TimeZone::UTC)
            .unwrap_err();
        assert!(err.is_convert());
        assert!(err.to_string().contains("stored TEXT cannot be read as i32"));
    }

    #[test]
    fn unknown_classes_pass_through() {
        let value = Value::from_sql(SqlValue::Real(1.5), &column("MONEY"), &TimeZone::UTC).unwrap();
        assert_eq!(value.into_inner(), CoreValue::F64(1.5));
    }

    #[test]
    fn time_of_day_stays_text() {
        let column = crate::describe_column("opens", "TIME", false);
        let value =
            Value::from_sql(SqlValue::Text("09:30:00".into()), &column, &TimeZone::UTC).unwrap();
        assert_eq!(value.into_inner(), CoreValue::String("09:30:00".into()));
    }

    #[test]
    fn timestamp_text_is_wall_clock_in_zone() {
        let tz = TimeZone::get("America/New_York").unwrap();
        let ts: Timestamp = "2024-07-01T16:30:00Z".parse().unwrap();

        let text = render_timestamp(ts, &tz);
        assert_eq!(text, "2024-07-01 12:30:00");
        assert_eq!(parse_timestamp("c", &text, &tz).unwrap(), ts);
    }

    #[test]
    fn fractional_seconds_survive() {
        let ts: Timestamp = "2024-07-01T16:30:00.125Z".parse().unwrap();
        let text = render_timestamp(ts, &TimeZone::UTC);
        assert_eq!(text, "2024-07-01 16:30:00.125");
        assert_eq!(parse_timestamp("c", &text, &TimeZone::UTC).unwrap(), ts);
    }

    #[test]
    fn booleans_bind_as_integers() {
        let value = Value::from(CoreValue::Bool(true));
        assert_eq!(
            value.to_sql().unwrap(),
            ToSqlOutput::Owned(SqlValue::Integer(1))
        );
    }
}
