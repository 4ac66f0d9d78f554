pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::LocalStorage;
pub use config::toml_config::{LayoutConfig, TomlConfig};
pub use config::CliConfig;

pub use app::pipelines::CalendarPipeline;
pub use core::extractor::{Extractor, PdfTextSource};
pub use core::{etl::EtlEngine, ClassifiedRow, ClosureEntry, FundingStatus, RawClosure};
pub use utils::error::{EtlError, Result};
