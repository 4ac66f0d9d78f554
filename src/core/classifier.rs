use crate::config::toml_config::LayoutConfig;
use crate::domain::model::{ClassifiedRow, ClosureEntry, FundingStatus, RawClosure, TransformResult};
use crate::utils::error::{EtlError, Result};
use chrono::NaiveDate;

/// Tries each format in order.
pub fn parse_date(text: &str, formats: &[String]) -> Option<NaiveDate> {
    let text = text.trim();
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

pub fn parse_entry(raw: &RawClosure, layout: &LayoutConfig) -> Result<ClosureEntry> {
    let formats = &layout.input_date_formats;

    let start_date = parse_date(&raw.start_text, formats).ok_or_else(|| {
        EtlError::parse(&raw.line, format!("invalid start date '{}'", raw.start_text))
    })?;
    let end_date = match &raw.end_text {
        Some(end_text) => parse_date(end_text, formats).ok_or_else(|| {
            EtlError::parse(&raw.line, format!("invalid end date '{}'", end_text))
        })?,
        None => start_date,
    };

    if end_date < start_date {
        return Err(EtlError::parse(
            &raw.line,
            format!("end date {} is before start date {}", end_date, start_date),
        ));
    }

    Ok(ClosureEntry {
        name: raw
            .name
            .clone()
            .unwrap_or_else(|| layout.default_holiday_name.clone()),
        start_date,
        end_date,
    })
}

/// One-day closures yield `None`.
pub fn classify(entry: &ClosureEntry) -> Option<ClassifiedRow> {
    let funding_status = FundingStatus::for_span(entry.span_days())?;

    Some(ClassifiedRow {
        name: entry.name.clone(),
        start_date: entry.start_date,
        end_date: entry.end_date,
        funding_status,
    })
}

/// Parses and classifies every closure, keeping extraction order. The first
/// malformed entry fails the whole batch.
pub fn classify_all(raws: &[RawClosure], layout: &LayoutConfig) -> Result<TransformResult> {
    let mut result = TransformResult::default();

    for raw in raws {
        let entry = parse_entry(raw, layout)?;

        match classify(&entry) {
            Some(row) => {
                tracing::debug!(
                    "{} {}..{} ({} days) -> {}",
                    row.name,
                    row.start_date,
                    row.end_date,
                    entry.span_days(),
                    row.funding_status
                );
                result.rows.push(row);
            }
            None => {
                tracing::debug!("Dropping one-day closure on {}", entry.start_date);
                result.dropped += 1;
            }
        }
        result.entries.push(entry);
    }

    Ok(result)
}
