use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closure line as found in the export, before any date parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawClosure {
    pub name: Option<String>,
    pub start_text: String,
    pub end_text: Option<String>,
    pub page: usize,
    pub line: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosureEntry {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ClosureEntry {
    /// Inclusive day count; at least 1 for a valid entry.
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundingStatus {
    #[serde(rename = "Only Service")]
    OnlyService,
    #[serde(rename = "None")]
    None,
}

impl FundingStatus {
    /// `None` for one-day closures, which are not listed.
    pub fn for_span(span: i64) -> Option<Self> {
        match span {
            i64::MIN..=1 => Option::None,
            2 => Some(Self::OnlyService),
            _ => Some(Self::None),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OnlyService => "Only Service",
            Self::None => "None",
        }
    }
}

impl fmt::Display for FundingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedRow {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub funding_status: FundingStatus,
}

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub entries: Vec<ClosureEntry>,
    pub rows: Vec<ClassifiedRow>,
    pub dropped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start: (i32, u32, u32), end: (i32, u32, u32)) -> ClosureEntry {
        ClosureEntry {
            name: "Closed".to_string(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    #[test]
    fn test_span_is_inclusive() {
        assert_eq!(entry((2024, 3, 29), (2024, 3, 29)).span_days(), 1);
        assert_eq!(entry((2024, 3, 29), (2024, 3, 30)).span_days(), 2);
        assert_eq!(entry((2024, 7, 1), (2024, 7, 5)).span_days(), 5);
        // leap day and year boundary
        assert_eq!(entry((2024, 2, 28), (2024, 3, 1)).span_days(), 3);
        assert_eq!(entry((2025, 12, 31), (2026, 1, 1)).span_days(), 2);
    }

    #[test]
    fn test_funding_status_for_span() {
        assert_eq!(FundingStatus::for_span(0), Option::None);
        assert_eq!(FundingStatus::for_span(1), Option::None);
        assert_eq!(FundingStatus::for_span(2), Some(FundingStatus::OnlyService));
        assert_eq!(FundingStatus::for_span(3), Some(FundingStatus::None));
        assert_eq!(FundingStatus::for_span(60), Some(FundingStatus::None));
    }

    #[test]
    fn test_funding_status_labels() {
        assert_eq!(FundingStatus::OnlyService.to_string(), "Only Service");
        assert_eq!(FundingStatus::None.to_string(), "None");
    }
}
