// spreadsheets/export_xlsx.rs
use crate::errors::ScrapeError;
use crate::extract::Listing;
use crate::pipeline::RecordSink;
use rust_xlsxwriter::{Format, Workbook};
use std::path::PathBuf;
use tracing::{info, warn};

const HEADERS: [&str; 7] = ["物件名", "賃料", "敷金/礼金", "構造", "間取り", "最寄駅", "URL"];

/// Writes the record set to a single-sheet workbook, fully replacing
/// whatever file was there from the previous run.
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for XlsxSink {
    fn write(&self, records: &[Listing]) -> Result<(), ScrapeError> {
        if records.is_empty() {
            warn!("No data to save.");
            return Ok(());
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let bold = Format::new().set_bold();

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *header, &bold)
                .map_err(|e| {
                    ScrapeError::Xlsx(format!("Failed to write header '{header}': {e}"))
                })?;
        }

        for (i, listing) in records.iter().enumerate() {
            let row = (i + 1) as u32;
            let stations = listing.stations.join(", ");

            let cells = [
                listing.name.as_str(),
                listing.price.as_str(),
                listing.deposit.as_str(),
                listing.structure.as_str(),
                listing.layout.as_str(),
                stations.as_str(),
                listing.detail_url.as_str(),
            ];

            for (col, value) in cells.iter().enumerate() {
                worksheet.write_string(row, col as u16, *value).map_err(|e| {
                    ScrapeError::Xlsx(format!("Failed to write row {row}: {e}"))
                })?;
            }
        }

        workbook
            .save(&self.path)
            .map_err(|e| ScrapeError::Xlsx(format!("Failed to save workbook: {e}")))?;

        info!("Saved data to {}", self.path.display());
        Ok(())
    }
}
