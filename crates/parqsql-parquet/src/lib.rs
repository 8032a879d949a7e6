//! Parquet storage for the columnar side of the bridge.
//!
//! [`ParquetSink`] writes records through the `parquet` crate's column
//! writers, buffering a row group at a time. [`ParquetSource`] reads a file
//! back one row group at a time. [`ParquetDataset`] enumerates the data files
//! of a directory.

mod dataset;
pub use dataset::ParquetDataset;

pub mod schema;

mod sink;
pub use sink::{ParquetSink, DEFAULT_ROW_GROUP_SIZE};

mod source;
pub use source::ParquetSource;

pub use parquet::file::properties::WriterProperties;
