use crate::ParquetSource;
use parqsql_core::{driver::ColumnarSource, ColumnarSchema, Error, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// The data files of a parquet dataset: either a single file, or every
/// non-hidden file of a directory in name order.
///
/// Names starting with `.` or `_` are hidden, which skips markers such as
/// `_SUCCESS` and in-progress files.
#[derive(Debug, Clone)]
pub struct ParquetDataset {
    files: Vec<PathBuf>,
}

impl ParquetDataset {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.is_file() {
            return Ok(Self {
                files: vec![path.to_path_buf()],
            });
        }

        let mut files = vec![];

        for entry in fs::read_dir(path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if is_hidden(&entry.file_name().to_string_lossy()) {
                continue;
            }
            files.push(entry.path());
        }

        if files.is_empty() {
            return Err(Error::invalid_configuration(format!(
                "no parquet files in `{}`",
                path.display()
            )));
        }

        files.sort();

        log::debug!("found {} parquet files in `{}`", files.len(), path.display());

        Ok(Self { files })
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// The schema of the first file, used as the dataset's schema.
    pub fn schema(&self) -> Result<ColumnarSchema> {
        let Some(first) = self.files.first() else {
            return Err(Error::invalid_configuration("dataset has no files"));
        };
        Ok(ParquetSource::open(first)?.schema().clone())
    }

    /// Opens one source per file.
    pub fn sources(&self) -> Result<Vec<Box<dyn ColumnarSource>>> {
        self.files
            .iter()
            .map(|path| Ok(Box::new(ParquetSource::open(path)?) as Box<dyn ColumnarSource>))
            .collect()
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}
