//! Record table: one row per generated artifact in `sales_data.csv`.
//!
//! Rows are addressed by their current ordinal position. Deleting row `k`
//! renumbers every row after it.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use super::{GuardedFile, StoreError};
use crate::models::record::Record;

const RECORD_HEADERS: [&str; 5] = ["type", "input", "details", "output", "timestamp"];

#[derive(Debug, Clone)]
pub struct RecordStore {
    file: Arc<GuardedFile>,
}

impl RecordStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(GuardedFile::new(path)),
        }
    }

    /// Appends one row, writing the header first if the table is new.
    pub fn append(&self, record: &Record) -> Result<(), StoreError> {
        let _held = self.file.exclusive()?;
        let is_new = !self.file.has_content();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        info!("Saved {} record", record.record_type);
        Ok(())
    }

    /// All rows in file order; empty when the table does not exist.
    pub fn load_all(&self) -> Result<Vec<Record>, StoreError> {
        let _held = self.file.exclusive()?;
        self.read_all_locked()
    }

    /// Removes the row at ordinal `index` and rewrites the table.
    /// Returns false, leaving the table untouched, when `index` is out of range.
    pub fn delete_by_index(&self, index: usize) -> Result<bool, StoreError> {
        let _held = self.file.exclusive()?;
        let mut records = self.read_all_locked()?;

        if index >= records.len() {
            return Ok(false);
        }

        records.remove(index);

        // Rewrite via a sibling temp file so a crash leaves the old or the new table.
        let tmp_path = self.file.path.with_extension("csv.tmp");
        {
            let mut tmp = File::create(&tmp_path)?;
            tmp.write_all(&encode(&records)?)?;
            tmp.sync_all()?;
        }
        fs::rename(&tmp_path, &self.file.path)?;

        info!("Deleted record {index}; {} remaining", records.len());
        Ok(true)
    }

    /// The whole table as CSV bytes, header included, for download.
    pub fn export_csv(&self) -> Result<Vec<u8>, StoreError> {
        let records = self.load_all()?;
        encode(&records)
    }

    fn read_all_locked(&self) -> Result<Vec<Record>, StoreError> {
        if !self.file.has_content() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.file.path)?;
        let records = reader.deserialize().collect::<Result<Vec<Record>, _>>()?;
        Ok(records)
    }
}

/// Serializes records with an explicit header so an empty table still has one.
fn encode(records: &[Record]) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(RECORD_HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| StoreError::Io(e.into_error()))
}
