mod batch;
pub use batch::{BatchWriter, Builder, SourceOutcome, WriteStats};

mod bridge;
pub use bridge::{RecordBridge, SchemaBridge};

mod config;
pub use config::WriterConfig;

mod export;
pub use export::Export;

pub use parqsql_core::{
    bail, codec, convert, driver, err, field, schema, value, ColumnDescriptor, ColumnarOp,
    ColumnarSchema, ColumnarType, Converter, ConverterRegistry, Error, Field, Record, Result, Row,
    SourceField, SourceRow, SqlOp, SqlType, Value,
};
