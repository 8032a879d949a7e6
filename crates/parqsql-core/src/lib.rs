#[macro_use]
mod macros;

pub mod codec;

pub mod convert;
pub use convert::{Converter, ConverterRegistry};

pub mod driver;

mod error;
pub use error::{Error, IntoError};

pub mod field;
pub use field::{ColumnarOp, Field, Record, Row, SourceField, SourceRow, SqlOp};

pub mod schema;
pub use schema::{ColumnDescriptor, ColumnarSchema, ColumnarType, SqlType};

pub mod value;
pub use value::Value;

/// A Result type alias that uses parqsql's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
