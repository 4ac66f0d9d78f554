use crate::domain::model::{ClassifiedRow, ClosureEntry, FundingStatus};
use crate::utils::error::{EtlError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt::Write as _;
use std::io::{Read, Write};

pub const HEADER: [&str; 4] = [
    "Holiday Name",
    "Start Date",
    "End Date",
    "Funding Received to",
];

pub const PREVIEW_HEADER: [&str; 3] = ["Holiday Name", "Start Date", "End Date"];

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Holiday Name")]
    name: String,
    #[serde(rename = "Start Date")]
    start_date: String,
    #[serde(rename = "End Date")]
    end_date: String,
    #[serde(rename = "Funding Received to")]
    funding_status: FundingStatus,
}

/// Writes the header even when there are no rows.
pub fn write_rows<W: Write>(writer: W, rows: &[ClassifiedRow], date_format: &str) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for row in rows {
        let start = format_date(row.start_date, date_format)?;
        let end = format_date(row.end_date, date_format)?;
        csv_writer.write_record([
            row.name.as_str(),
            start.as_str(),
            end.as_str(),
            row.funding_status.label(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn rows_to_csv_bytes(rows: &[ClassifiedRow], date_format: &str) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_rows(&mut buffer, rows, date_format)?;
    Ok(buffer)
}

/// The closures as found in the document, before the funding rules.
pub fn write_preview<W: Write>(
    writer: W,
    entries: &[ClosureEntry],
    date_format: &str,
) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(PREVIEW_HEADER)?;
    for entry in entries {
        let start = format_date(entry.start_date, date_format)?;
        let end = format_date(entry.end_date, date_format)?;
        csv_writer.write_record([entry.name.as_str(), start.as_str(), end.as_str()])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Reads back a CSV produced by [`write_rows`].
pub fn read_rows<R: Read>(reader: R, date_format: &str) -> Result<Vec<ClassifiedRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.iter().ne(HEADER) {
        return Err(EtlError::ValidationError {
            message: format!("Unexpected CSV header: {:?}", headers),
        });
    }

    let mut rows = Vec::new();
    for record in csv_reader.deserialize() {
        let record: CsvRow = record?;
        let start_date = parse_output_date(&record.start_date, date_format)?;
        let end_date = parse_output_date(&record.end_date, date_format)?;
        rows.push(ClassifiedRow {
            name: record.name,
            start_date,
            end_date,
            funding_status: record.funding_status,
        });
    }

    Ok(rows)
}

fn format_date(date: NaiveDate, date_format: &str) -> Result<String> {
    let mut text = String::new();
    write!(text, "{}", date.format(date_format)).map_err(|_| EtlError::InvalidConfigValueError {
        field: "output.date_format".to_string(),
        value: date_format.to_string(),
        reason: "Format can only use date fields".to_string(),
    })?;
    Ok(text)
}

fn parse_output_date(text: &str, date_format: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, date_format)
        .map_err(|e| EtlError::parse(text, format!("not a '{}' date: {}", date_format, e)))
}
