use crate::core::classifier;
use crate::core::extractor::{Extractor, PdfTextSource};
use crate::core::writer;
use crate::core::{ConfigProvider, Pipeline, RawClosure, Storage, TextSource, TransformResult};
use crate::utils::error::Result;

/// Service calendar PDF in, funding CSV out.
pub struct CalendarPipeline<S: Storage, C: ConfigProvider, T: TextSource = PdfTextSource> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) text_source: T,
}

impl<S: Storage, C: ConfigProvider> CalendarPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_text_source(storage, config, PdfTextSource)
    }
}

impl<S: Storage, C: ConfigProvider, T: TextSource> CalendarPipeline<S, C, T> {
    pub fn with_text_source(storage: S, config: C, text_source: T) -> Self {
        Self {
            storage,
            config,
            text_source,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, T: TextSource> Pipeline for CalendarPipeline<S, C, T> {
    async fn extract(&self) -> Result<Vec<RawClosure>> {
        let input_path = self.config.input_path();
        tracing::debug!("Reading calendar from: {}", input_path);
        let bytes = self.storage.read_file(input_path).await?;

        let extractor = Extractor::new(self.config.layout())?;
        extractor.extract_from_bytes(&self.text_source, &bytes)
    }

    async fn transform(&self, data: Vec<RawClosure>) -> Result<TransformResult> {
        classifier::classify_all(&data, self.config.layout())
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path();
        let csv_data = writer::rows_to_csv_bytes(&result.rows, self.config.output_date_format())?;

        tracing::debug!("Writing CSV ({} bytes) to storage", csv_data.len());
        self.storage.write_file(output_path, &csv_data).await?;

        Ok(output_path.to_string())
    }
}
