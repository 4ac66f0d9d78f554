pub mod classifier;
pub mod etl;
pub mod extractor;
pub mod writer;

pub use crate::domain::model::{ClassifiedRow, ClosureEntry, FundingStatus, RawClosure, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, TextSource};
pub use crate::utils::error::Result;
