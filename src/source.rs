//! Loading the wide source table.

use std::{io::Read, path::Path};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::info;

use crate::io_utils;

/// A fully materialized wide table: one header row and the raw, decoded
/// data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WideTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl WideTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn read(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Self> {
        info!(
            "Reading '{}' with delimiter '{}'",
            path.display(),
            io_utils::printable_delimiter(delimiter)
        );
        let reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
        let table = Self::from_csv_reader(reader, encoding)
            .with_context(|| format!("Reading table from {path:?}"))?;
        info!(
            "Loaded {} row(s) across {} column(s)",
            table.rows.len(),
            table.headers.len()
        );
        Ok(table)
    }

    pub fn from_csv_reader<R: Read>(
        mut reader: csv::Reader<R>,
        encoding: &'static Encoding,
    ) -> Result<Self> {
        let headers = io_utils::reader_headers(&mut reader, encoding)?;
        let mut rows = Vec::new();
        for (row_idx, record) in reader.byte_records().enumerate() {
            let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
            rows.push(
                io_utils::decode_record(&record, encoding)
                    .with_context(|| format!("Decoding row {}", row_idx + 2))?,
            );
        }
        Ok(Self { headers, rows })
    }
}
