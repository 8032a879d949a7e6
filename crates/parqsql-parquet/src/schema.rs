//! Mapping between [`ColumnarSchema`] and parquet message types.

use parqsql_core::{
    schema::{Logical, PhysicalKind, TimeUnit},
    ColumnarSchema, ColumnarType, Error, Result,
};
use parquet::{
    basic::{
        ConvertedType, LogicalType, Repetition, TimeUnit as ParquetTimeUnit,
        Type as PhysicalType,
    },
    schema::types::{ColumnDescriptor, SchemaDescriptor, Type, TypePtr},
};
use std::sync::Arc;

/// Builds the parquet message type for `schema`.
pub fn to_parquet(schema: &ColumnarSchema) -> Result<TypePtr> {
    schema.verify()?;

    let fields = schema
        .columns
        .iter()
        .map(to_parquet_column)
        .collect::<Result<Vec<_>>>()?;

    let message = Type::group_type_builder(&schema.name)
        .with_fields(fields)
        .build()
        .map_err(|err| Error::invalid_schema(err.to_string()))?;

    Ok(Arc::new(message))
}

fn to_parquet_column(column: &ColumnarType) -> Result<TypePtr> {
    let physical = match column.physical {
        PhysicalKind::Boolean => PhysicalType::BOOLEAN,
        PhysicalKind::Int32 => PhysicalType::INT32,
        PhysicalKind::Int64 => PhysicalType::INT64,
        PhysicalKind::Int96 => PhysicalType::INT96,
        PhysicalKind::Float => PhysicalType::FLOAT,
        PhysicalKind::Double => PhysicalType::DOUBLE,
        PhysicalKind::Binary => PhysicalType::BYTE_ARRAY,
        PhysicalKind::FixedLenByteArray(_) => PhysicalType::FIXED_LEN_BYTE_ARRAY,
    };

    let repetition = if column.nullable {
        Repetition::OPTIONAL
    } else {
        Repetition::REQUIRED
    };

    let mut builder = Type::primitive_type_builder(&column.name, physical).with_repetition(repetition);

    if let PhysicalKind::FixedLenByteArray(len) = column.physical {
        builder = builder.with_length(len);
    }

    if let Some(logical) = column.logical {
        if let Logical::Decimal { scale, precision } = logical {
            builder = builder
                .with_precision(precision as i32)
                .with_scale(scale as i32);
        }
        builder = builder.with_logical_type(Some(to_logical_type(logical)));
    }

    let ty = builder
        .build()
        .map_err(|err| Error::invalid_schema(format!("column `{}`: {err}", column.name)))?;

    Ok(Arc::new(ty))
}

fn to_logical_type(logical: Logical) -> LogicalType {
    match logical {
        Logical::String => LogicalType::String,
        Logical::Enum => LogicalType::Enum,
        Logical::Json => LogicalType::Json,
        Logical::Uuid => LogicalType::Uuid,
        Logical::Timestamp { unit, utc } => LogicalType::Timestamp {
            is_adjusted_to_u_t_c: utc,
            unit: to_time_unit(unit),
        },
        Logical::Time { unit, utc } => LogicalType::Time {
            is_adjusted_to_u_t_c: utc,
            unit: to_time_unit(unit),
        },
        Logical::Date => LogicalType::Date,
        Logical::Int { bit_width, signed } => LogicalType::Integer {
            bit_width: bit_width as i8,
            is_signed: signed,
        },
        Logical::Decimal { scale, precision } => LogicalType::Decimal {
            scale: scale as i32,
            precision: precision as i32,
        },
    }
}

fn to_time_unit(unit: TimeUnit) -> ParquetTimeUnit {
    match unit {
        TimeUnit::Millis => ParquetTimeUnit::MILLIS(Default::default()),
        TimeUnit::Micros => ParquetTimeUnit::MICROS(Default::default()),
        TimeUnit::Nanos => ParquetTimeUnit::NANOS(Default::default()),
    }
}

/// Reads the columnar schema of a parquet file.
///
/// Only flat schemas are supported: every top-level field must be a
/// primitive that is not repeated.
pub fn from_parquet(descr: &SchemaDescriptor) -> Result<ColumnarSchema> {
    let root = descr.root_schema();

    for field in root.get_fields() {
        let info = field.get_basic_info();
        if !field.is_primitive() {
            return Err(Error::invalid_schema(format!(
                "nested field `{}` is not supported",
                info.name()
            )));
        }
        if info.has_repetition() && info.repetition() == Repetition::REPEATED {
            return Err(Error::invalid_schema(format!(
                "repeated field `{}` is not supported",
                info.name()
            )));
        }
    }

    let columns = descr.columns().iter().map(|column| from_parquet_column(column)).collect();

    Ok(ColumnarSchema::new(root.name(), columns))
}

fn from_parquet_column(column: &ColumnDescriptor) -> ColumnarType {
    let physical = match column.physical_type() {
        PhysicalType::BOOLEAN => PhysicalKind::Boolean,
        PhysicalType::INT32 => PhysicalKind::Int32,
        PhysicalType::INT64 => PhysicalKind::Int64,
        PhysicalType::INT96 => PhysicalKind::Int96,
        PhysicalType::FLOAT => PhysicalKind::Float,
        PhysicalType::DOUBLE => PhysicalKind::Double,
        PhysicalType::BYTE_ARRAY => PhysicalKind::Binary,
        PhysicalType::FIXED_LEN_BYTE_ARRAY => PhysicalKind::FixedLenByteArray(column.type_length()),
    };

    let logical = match column.logical_type() {
        Some(logical) => from_logical_type(&logical),
        None => from_converted_type(column),
    };

    ColumnarType {
        name: column.name().to_string(),
        physical,
        logical,
        nullable: column.max_def_level() > 0,
    }
}

fn from_logical_type(logical: &LogicalType) -> Option<Logical> {
    Some(match logical {
        LogicalType::String => Logical::String,
        LogicalType::Enum => Logical::Enum,
        LogicalType::Json => Logical::Json,
        LogicalType::Uuid => Logical::Uuid,
        LogicalType::Timestamp {
            is_adjusted_to_u_t_c,
            unit,
        } => Logical::Timestamp {
            unit: from_time_unit(unit),
            utc: *is_adjusted_to_u_t_c,
        },
        LogicalType::Time {
            is_adjusted_to_u_t_c,
            unit,
        } => Logical::Time {
            unit: from_time_unit(unit),
            utc: *is_adjusted_to_u_t_c,
        },
        LogicalType::Date => Logical::Date,
        LogicalType::Integer {
            bit_width,
            is_signed,
        } => Logical::Int {
            bit_width: *bit_width as u8,
            signed: *is_signed,
        },
        LogicalType::Decimal { scale, precision } => Logical::Decimal {
            scale: (*scale).max(0) as u32,
            precision: (*precision).max(0) as u32,
        },
        other => {
            log::debug!("ignoring parquet annotation {other:?}");
            return None;
        }
    })
}

fn from_time_unit(unit: &ParquetTimeUnit) -> TimeUnit {
    match unit {
        ParquetTimeUnit::MILLIS(_) => TimeUnit::Millis,
        ParquetTimeUnit::MICROS(_) => TimeUnit::Micros,
        ParquetTimeUnit::NANOS(_) => TimeUnit::Nanos,
    }
}

/// Files written before logical types existed only carry a converted type.
fn from_converted_type(column: &ColumnDescriptor) -> Option<Logical> {
    let int = |bit_width, signed| Some(Logical::Int { bit_width, signed });

    match column.converted_type() {
        ConvertedType::UTF8 => Some(Logical::String),
        ConvertedType::ENUM => Some(Logical::Enum),
        ConvertedType::JSON => Some(Logical::Json),
        ConvertedType::DATE => Some(Logical::Date),
        ConvertedType::DECIMAL => Some(Logical::Decimal {
            scale: column.type_scale().max(0) as u32,
            precision: column.type_precision().max(0) as u32,
        }),
        ConvertedType::TIMESTAMP_MILLIS => Some(Logical::Timestamp {
            unit: TimeUnit::Millis,
            utc: true,
        }),
        ConvertedType::TIMESTAMP_MICROS => Some(Logical::Timestamp {
            unit: TimeUnit::Micros,
            utc: true,
        }),
        ConvertedType::TIME_MILLIS => Some(Logical::Time {
            unit: TimeUnit::Millis,
            utc: true,
        }),
        ConvertedType::TIME_MICROS => Some(Logical::Time {
            unit: TimeUnit::Micros,
            utc: true,
        }),
        ConvertedType::INT_8 => int(8, true),
        ConvertedType::INT_16 => int(16, true),
        ConvertedType::INT_32 => int(32, true),
        ConvertedType::INT_64 => int(64, true),
        ConvertedType::UINT_8 => int(8, false),
        ConvertedType::UINT_16 => int(16, false),
        ConvertedType::UINT_32 => int(32, false),
        ConvertedType::UINT_64 => int(64, false),
        _ => None,
    }
}
