//! Row-level access to a mirrored worksheet.
//!
//! The client is constructed by the caller and handed to the mirror; the
//! mirror never reaches for a global client. The Google-backed transport
//! lives outside this crate; [`InMemorySheet`] covers tests and dry runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sheet backend errors.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Row {index} out of range (sheet has {len} rows)")]
    OutOfRange { index: usize, len: usize },

    #[error("Rundown entry {index} missing while mirroring")]
    MissingEntry { index: usize },

    #[error("Sheet backend error: {0}")]
    Backend(String),
}

/// One rendered worksheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    pub cells: Vec<String>,
}

impl SheetRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }
}

/// Row operations a sheet backend must provide.
pub trait SheetClient {
    fn row_count(&self) -> Result<usize, SheetError>;
    fn read_row(&self, index: usize) -> Result<SheetRow, SheetError>;
    fn insert_row(&mut self, index: usize, row: SheetRow) -> Result<(), SheetError>;
    fn update_row(&mut self, index: usize, row: SheetRow) -> Result<(), SheetError>;
    fn delete_row(&mut self, index: usize) -> Result<(), SheetError>;
    /// Drop every row at `from` and below.
    fn truncate(&mut self, from: usize) -> Result<(), SheetError>;
}

/// In-process sheet used by tests and CLI dry runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemorySheet {
    rows: Vec<SheetRow>,
}

impl InMemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut Vec<SheetRow> {
        &mut self.rows
    }
}

impl SheetClient for InMemorySheet {
    fn row_count(&self) -> Result<usize, SheetError> {
        Ok(self.rows.len())
    }

    fn read_row(&self, index: usize) -> Result<SheetRow, SheetError> {
        self.rows
            .get(index)
            .cloned()
            .ok_or(SheetError::OutOfRange {
                index,
                len: self.rows.len(),
            })
    }

    fn insert_row(&mut self, index: usize, row: SheetRow) -> Result<(), SheetError> {
        if index > self.rows.len() {
            return Err(SheetError::OutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        self.rows.insert(index, row);
        Ok(())
    }

    fn update_row(&mut self, index: usize, row: SheetRow) -> Result<(), SheetError> {
        let len = self.rows.len();
        match self.rows.get_mut(index) {
            Some(slot) => {
                *slot = row;
                Ok(())
            }
            None => Err(SheetError::OutOfRange { index, len }),
        }
    }

    fn delete_row(&mut self, index: usize) -> Result<(), SheetError> {
        if index >= self.rows.len() {
            return Err(SheetError::OutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        self.rows.remove(index);
        Ok(())
    }

    fn truncate(&mut self, from: usize) -> Result<(), SheetError> {
        self.rows.truncate(from);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(text: &str) -> SheetRow {
        SheetRow::new(vec![text.to_string()])
    }

    #[test]
    fn insert_and_read_back() {
        let mut sheet = InMemorySheet::new();
        sheet.insert_row(0, row("a")).unwrap();
        sheet.insert_row(1, row("b")).unwrap();
        sheet.insert_row(1, row("between")).unwrap();
        assert_eq!(sheet.row_count().unwrap(), 3);
        assert_eq!(sheet.read_row(1).unwrap(), row("between"));
    }

    #[test]
    fn out_of_range_operations_fail() {
        let mut sheet = InMemorySheet::new();
        assert!(matches!(
            sheet.read_row(0),
            Err(SheetError::OutOfRange { index: 0, len: 0 })
        ));
        assert!(sheet.insert_row(1, row("x")).is_err());
        assert!(sheet.update_row(0, row("x")).is_err());
        assert!(sheet.delete_row(0).is_err());
    }

    #[test]
    fn truncate_keeps_header_rows() {
        let mut sheet = InMemorySheet::new();
        for i in 0..4 {
            sheet.insert_row(i, row(&format!("r{i}"))).unwrap();
        }
        sheet.truncate(1).unwrap();
        assert_eq!(sheet.row_count().unwrap(), 1);
        assert_eq!(sheet.read_row(0).unwrap(), row("r0"));
    }
}
