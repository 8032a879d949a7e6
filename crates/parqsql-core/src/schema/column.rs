use super::SqlType;

/// Metadata for one relational result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Name of the column
    pub name: String,

    /// Relational type code reported by the driver
    pub sql_type: SqlType,

    /// Whether the column may hold nulls
    pub nullable: bool,

    /// Declared precision, `0` when the driver reports none
    pub precision: i32,

    /// Declared scale, may be negative
    pub scale: i32,

    /// Name of the value class the driver produces for this column. Converter
    /// lookup is keyed on it.
    pub value_class: String,
}

impl ColumnDescriptor {
    pub fn new(
        name: impl Into<String>,
        sql_type: SqlType,
        value_class: impl Into<String>,
    ) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.into(),
            sql_type,
            nullable: true,
            precision: 0,
            scale: 0,
            value_class: value_class.into(),
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn precision(mut self, precision: i32, scale: i32) -> Self {
        self.precision = precision;
        self.scale = scale;
        self
    }
}
