use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CLOSURE_MARKER: &str = "We will be closed on the following dates:";
pub const DEFAULT_FOOTER_MARKER: &str = "This calendar has been registered";
pub const DEFAULT_ENTRY_PATTERN: &str = r"^(?:(?P<name>.*?\S)\s+)??(?P<start>\d{1,2}/\d{1,2}/\d{4})(?:\s*[-–]\s*(?P<end>\d{1,2}/\d{1,2}/\d{4}))?$";
pub const DEFAULT_HOLIDAY_NAME: &str = "Closed";
pub const DEFAULT_INPUT_DATE_FORMAT: &str = "%d/%m/%Y";
pub const DEFAULT_OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Layout file for a service calendar export.
///
/// Every section is optional; missing keys fall back to the Hive export layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub layout: LayoutConfig,
    pub output: OutputConfig,
}

/// Where the closure list sits in the page text and how its lines look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Text that introduces the closure list on a page.
    pub closure_marker: String,
    /// Lines starting with this (case-insensitive) end the list.
    pub footer_marker: String,
    /// Needs a `start` group; `end` and `name` groups are optional.
    pub entry_pattern: String,
    /// Used when a line carries no name of its own.
    pub default_holiday_name: String,
    /// chrono formats tried in order.
    pub input_date_formats: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            closure_marker: DEFAULT_CLOSURE_MARKER.to_string(),
            footer_marker: DEFAULT_FOOTER_MARKER.to_string(),
            entry_pattern: DEFAULT_ENTRY_PATTERN.to_string(),
            default_holiday_name: DEFAULT_HOLIDAY_NAME.to_string(),
            input_date_formats: vec![DEFAULT_INPUT_DATE_FORMAT.to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub date_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_OUTPUT_DATE_FORMAT.to_string(),
        }
    }
}

impl LayoutConfig {
    /// Compiles `entry_pattern`, checking that it exposes a `start` group.
    pub fn compile_entry_pattern(&self) -> Result<Regex> {
        let pattern = Regex::new(&self.entry_pattern).map_err(|e| {
            EtlError::InvalidConfigValueError {
                field: "layout.entry_pattern".to_string(),
                value: self.entry_pattern.clone(),
                reason: format!("Invalid regular expression: {}", e),
            }
        })?;

        if !pattern.capture_names().flatten().any(|name| name == "start") {
            return Err(EtlError::InvalidConfigValueError {
                field: "layout.entry_pattern".to_string(),
                value: self.entry_pattern.clone(),
                reason: "Pattern must define a named group 'start'".to_string(),
            });
        }

        Ok(pattern)
    }
}

impl TomlConfig {
    /// Loads the layout file from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses layout TOML, after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Failed to build env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("layout.closure_marker", &self.layout.closure_marker)?;
        validation::validate_non_empty_string("layout.footer_marker", &self.layout.footer_marker)?;
        validation::validate_non_empty_string(
            "layout.default_holiday_name",
            &self.layout.default_holiday_name,
        )?;
        self.layout.compile_entry_pattern()?;

        if self.layout.input_date_formats.is_empty() {
            return Err(EtlError::MissingConfigError {
                field: "layout.input_date_formats".to_string(),
            });
        }
        for format in &self.layout.input_date_formats {
            validation::validate_date_format("layout.input_date_formats", format)?;
        }

        validation::validate_date_format("output.date_format", &self.output.date_format)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
