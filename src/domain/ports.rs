use crate::config::toml_config::LayoutConfig;
use crate::domain::model::{RawClosure, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn layout(&self) -> &LayoutConfig;
    fn output_date_format(&self) -> &str;
}

/// Turns document bytes into the plain text of each page, in page order.
pub trait TextSource: Send + Sync {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawClosure>>;
    async fn transform(&self, data: Vec<RawClosure>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
