use crate::utils::error::{EtlError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt::Write;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        if let Some(extension) = std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            if !allowed_set.contains(extension.to_ascii_lowercase().as_str()) {
                return Err(EtlError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
        } else {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.clone(),
                reason: "File has no extension or invalid filename".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// A chrono strftime format that names a full date (day, month and year).
pub fn validate_date_format(field_name: &str, format: &str) -> Result<()> {
    validate_non_empty_string(field_name, format)?;

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format.to_string(),
            reason: "Not a valid strftime format".to_string(),
        });
    }

    let has_day = ["%d", "%e", "%j", "%F", "%D", "%x", "%-d"]
        .iter()
        .any(|token| format.contains(token));
    let has_year = ["%Y", "%y", "%F", "%D", "%x", "%G"]
        .iter()
        .any(|token| format.contains(token));
    if !has_day || !has_year {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format.to_string(),
            reason: "Format must include a day and a year".to_string(),
        });
    }

    // Time or zone fields cannot be rendered from a bare date.
    let sample = NaiveDate::from_ymd_opt(2025, 8, 25).unwrap_or_default();
    if write!(String::new(), "{}", sample.format(format)).is_err() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format.to_string(),
            reason: "Format can only use date fields".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input", "calendar.pdf").is_ok());
        assert!(validate_path("input", "").is_err());
        assert!(validate_path("input", "bad\0path.pdf").is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["calendar.pdf".to_string(), "EXPORT.PDF".to_string()];
        assert!(validate_file_extensions("input", &files, &["pdf"]).is_ok());

        let invalid_files = vec!["calendar.docx".to_string()];
        assert!(validate_file_extensions("input", &invalid_files, &["pdf"]).is_err());

        let no_extension = vec!["calendar".to_string()];
        assert!(validate_file_extensions("input", &no_extension, &["pdf"]).is_err());
    }

    #[test]
    fn test_validate_date_format() {
        assert!(validate_date_format("output.date_format", "%Y-%m-%d").is_ok());
        assert!(validate_date_format("output.date_format", "%d/%m/%Y").is_ok());
        assert!(validate_date_format("output.date_format", "%F").is_ok());
        assert!(validate_date_format("output.date_format", "").is_err());
        assert!(validate_date_format("output.date_format", "%m/%Y").is_err());
        assert!(validate_date_format("output.date_format", "%Q-%m").is_err());
    }

    #[test]
    fn test_validate_date_format_rejects_time_fields() {
        assert!(validate_date_format("output.date_format", "%d/%m/%Y %H:%M").is_err());
        assert!(validate_date_format("output.date_format", "%Y-%m-%d %z").is_err());
        assert!(validate_date_format("output.date_format", "%A %d %B %Y").is_ok());
    }
}
