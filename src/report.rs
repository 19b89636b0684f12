// Writes the collected listings to a CSV report.

use crate::{
    error::ScraperResult,
    models::{PropertyRecord, QueryParameters},
};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Column order of the report; the serde names on `PropertyRecord` follow it.
pub const HEADER: [&str; 7] = ["Nome", "Endereco", "Preco", "Area", "Preco_medio", "Bairro", "Url"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { path: PathBuf, rows: usize },
    /// Nothing was collected, so no file was created.
    NoData,
}

/// `Scrape_{city}.csv`, or `Scrape_{city}_{neighborhood}.csv` for a neighborhood search.
pub fn report_file_name(query: &QueryParameters) -> String {
    match &query.neighborhood_slug {
        Some(neighborhood) => format!("Scrape_{}_{}.csv", query.city_slug, neighborhood),
        None => format!("Scrape_{}.csv", query.city_slug),
    }
}

/// Serialises the records (header first) into any sink and returns the row count.
pub fn write_records<W: Write>(records: &[PropertyRecord], sink: W) -> ScraperResult<usize> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(sink);
    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(records.len())
}

pub fn write_report(records: &[PropertyRecord], path: &Path) -> ScraperResult<WriteOutcome> {
    if records.is_empty() {
        tracing::info!(path = %path.display(), "No records collected, skipping report");
        return Ok(WriteOutcome::NoData);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    // File::create truncates an existing report
    let file = File::create(path)?;
    let rows = write_records(records, file)?;

    tracing::info!(path = %path.display(), rows, "Report written");
    Ok(WriteOutcome::Written { path: path.to_path_buf(), rows })
}
