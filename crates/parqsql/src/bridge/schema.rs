use parqsql_core::{
    field::{Field, Row, SqlOp},
    schema::{ColumnDescriptor, ColumnarSchema, ColumnarType},
    ConverterRegistry, Error, Result,
};
use std::sync::Arc;

/// Derives columnar schemas from relational metadata, and relational null
/// typing from columnar schemas.
#[derive(Debug, Clone)]
pub struct SchemaBridge {
    registry: Arc<ConverterRegistry>,
}

impl SchemaBridge {
    pub fn new(registry: Arc<ConverterRegistry>) -> SchemaBridge {
        SchemaBridge { registry }
    }

    /// Derives the columnar schema named `name` for `columns`.
    ///
    /// Column order is preserved. The first column whose value class has no
    /// converter fails the whole derivation.
    pub fn derive_schema(&self, name: &str, columns: &[ColumnDescriptor]) -> Result<ColumnarSchema> {
        if columns.is_empty() {
            return Err(Error::invalid_schema(format!("`{name}` has no columns")));
        }

        let columns = columns
            .iter()
            .map(|column| {
                let ty = self.registry.require(column)?.to_columnar_type(column)?;
                ty.verify()?;
                log::debug!(
                    "column `{}` ({}, class `{}`) -> {ty}",
                    column.name,
                    column.sql_type,
                    column.value_class
                );
                Ok(ty)
            })
            .collect::<Result<Vec<_>>>()
            .map_err(|err| err.context(format!("deriving schema `{name}`")))?;

        Ok(ColumnarSchema::new(name, columns))
    }

    /// The setter used to bind a null for each column.
    pub fn null_types(&self, schema: &ColumnarSchema) -> Vec<SqlOp> {
        schema.columns.iter().map(ColumnarType::null_op).collect()
    }

    /// A row of typed nulls, one per column.
    pub fn null_row(&self, schema: &ColumnarSchema) -> Row {
        Row::new(
            schema
                .columns
                .iter()
                .map(|ty| Field::null(&ty.name, ty.null_op()))
                .collect(),
        )
    }
}
