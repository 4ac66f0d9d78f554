#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use toml_config::{LayoutConfig, TomlConfig};

pub const DEFAULT_OUTPUT_FILE: &str = "ecce_calendar_processed.csv";

#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "ecce-calendar"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Turn an ECCE service calendar PDF into a funding CSV")
)]
pub struct CliConfig {
    /// Service calendar PDF exported from Hive
    #[cfg_attr(feature = "cli", arg(value_name = "INPUT"))]
    pub input_path: String,

    /// Where to write the processed CSV
    #[cfg_attr(feature = "cli", arg(short, long, default_value = DEFAULT_OUTPUT_FILE))]
    pub output_path: String,

    /// TOML file overriding the export layout and date formats
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub config: Option<String>,

    /// Output date format (chrono strftime), overrides the config file
    #[cfg_attr(feature = "cli", arg(long))]
    pub date_format: Option<String>,

    /// Print the raw closures found in the PDF before applying the rules
    #[cfg_attr(feature = "cli", arg(long))]
    pub preview: bool,

    /// Extract and classify without writing the CSV
    #[cfg_attr(feature = "cli", arg(long))]
    pub dry_run: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Log CPU and memory usage per phase"))]
    pub monitor: bool,

    #[cfg_attr(feature = "cli", arg(skip))]
    pub settings: TomlConfig,
}

impl CliConfig {
    pub fn new(input_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            config: None,
            date_format: None,
            preview: false,
            dry_run: false,
            verbose: false,
            monitor: false,
            settings: TomlConfig::default(),
        }
    }

    /// Loads the layout file (if any) and applies the command line overrides.
    pub fn load_settings(&mut self) -> Result<()> {
        if let Some(path) = &self.config {
            tracing::debug!("Loading layout config from {}", path);
            self.settings = TomlConfig::from_file(path)?;
        }

        if let Some(date_format) = &self.date_format {
            tracing::debug!("Output date format overridden to {}", date_format);
            self.settings.output.date_format = date_format.clone();
        }

        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn layout(&self) -> &LayoutConfig {
        &self.settings.layout
    }

    fn output_date_format(&self) -> &str {
        &self.settings.output.date_format
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input_path)?;
        validation::validate_file_extensions("input", &[self.input_path.clone()], &["pdf"])?;
        validation::validate_path("output", &self.output_path)?;
        self.settings.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_validate() {
        let config = CliConfig::new("calendar.pdf", "out.csv");
        assert!(config.validate().is_ok());
        assert_eq!(config.output_date_format(), "%Y-%m-%d");
    }

    #[test]
    fn test_rejects_non_pdf_input() {
        let config = CliConfig::new("calendar.csv", "out.csv");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_date_format_flag_overrides_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\ndate_format = \"%d-%m-%Y\"\n")
            .unwrap();

        let mut config = CliConfig::new("calendar.pdf", "out.csv");
        config.config = Some(temp_file.path().to_str().unwrap().to_string());
        config.load_settings().unwrap();
        assert_eq!(config.output_date_format(), "%d-%m-%Y");

        config.date_format = Some("%d/%m/%Y".to_string());
        config.load_settings().unwrap();
        assert_eq!(config.output_date_format(), "%d/%m/%Y");
    }
}
