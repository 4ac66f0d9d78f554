//! Finds the closure list in a service calendar export.
//!
//! The Hive export prints the list under a fixed sentence
//! ("We will be closed on the following dates:") with one closure per line,
//! either a single date or a `start - end` range, followed by a registration
//! footer. Everything about that layout comes from [`LayoutConfig`].

use crate::config::toml_config::LayoutConfig;
use crate::domain::model::RawClosure;
use crate::domain::ports::TextSource;
use crate::utils::error::{EtlError, Result};
use regex::Regex;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Page text via `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl TextSource for PdfTextSource {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>> {
        // pdf_extract can panic on malformed PDFs
        let result = catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));

        match result {
            Ok(Ok(pages)) => {
                tracing::debug!("PDF extracted: {} pages", pages.len());
                Ok(pages)
            }
            Ok(Err(e)) => Err(EtlError::extraction(format!("PDF extraction failed: {}", e))),
            Err(_) => Err(EtlError::extraction(
                "PDF extraction panicked (malformed PDF)",
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Extractor {
    closure_marker: String,
    footer_marker: String,
    pattern: Regex,
}

impl Extractor {
    pub fn new(layout: &LayoutConfig) -> Result<Self> {
        Ok(Self {
            closure_marker: layout.closure_marker.clone(),
            footer_marker: layout.footer_marker.to_lowercase(),
            pattern: layout.compile_entry_pattern()?,
        })
    }

    pub fn extract_from_bytes(
        &self,
        source: &dyn TextSource,
        bytes: &[u8],
    ) -> Result<Vec<RawClosure>> {
        if bytes.is_empty() {
            return Err(EtlError::extraction("Input document is empty"));
        }
        let pages = source.page_texts(bytes)?;
        self.extract_pages(&pages)
    }

    /// Collects closures from every page carrying the closure marker, in
    /// page and line order.
    pub fn extract_pages<S: AsRef<str>>(&self, pages: &[S]) -> Result<Vec<RawClosure>> {
        let mut closures = Vec::new();
        let mut marked_pages = 0;

        for (index, text) in pages.iter().enumerate() {
            let text = text.as_ref();
            let Some(position) = text.rfind(&self.closure_marker) else {
                continue;
            };
            marked_pages += 1;

            let section = &text[position + self.closure_marker.len()..];
            let before = closures.len();
            self.scan_section(index + 1, section, &mut closures);
            tracing::debug!(
                "Page {}: {} closure lines",
                index + 1,
                closures.len() - before
            );
        }

        if marked_pages == 0 {
            return Err(EtlError::extraction(format!(
                "Closure section \"{}\" not found in {} page(s)",
                self.closure_marker,
                pages.len()
            )));
        }
        if closures.is_empty() {
            return Err(EtlError::extraction(format!(
                "No closure dates listed after \"{}\"",
                self.closure_marker
            )));
        }

        tracing::info!(
            "Found {} closures on {} page(s)",
            closures.len(),
            marked_pages
        );
        Ok(closures)
    }

    fn scan_section(&self, page: usize, section: &str, out: &mut Vec<RawClosure>) {
        let lines = section.lines().map(str::trim).filter(|l| !l.is_empty());

        for line in lines {
            if line.to_lowercase().starts_with(&self.footer_marker) {
                break;
            }

            match self.parse_line(page, line) {
                Some(closure) => out.push(closure),
                None => tracing::debug!("Page {}: skipping line {:?}", page, line),
            }
        }
    }

    fn parse_line(&self, page: usize, line: &str) -> Option<RawClosure> {
        let caps = self.pattern.captures(line)?;
        let start = caps.name("start")?;
        let name = caps
            .name("name")
            .map(|m| m.as_str().trim().to_string())
            .filter(|name| !name.is_empty());

        // A "name" ending in a date is a range missing its separator.
        let name_ends_in_date = name
            .as_deref()
            .and_then(|name| name.split_whitespace().last())
            .is_some_and(|word| self.pattern.is_match(word));
        if name_ends_in_date {
            tracing::warn!("Page {}: ambiguous closure line {:?}, skipping", page, line);
            return None;
        }

        Some(RawClosure {
            name,
            start_text: start.as_str().to_string(),
            end_text: caps.name("end").map(|m| m.as_str().to_string()),
            page,
            line: line.to_string(),
        })
    }
}
