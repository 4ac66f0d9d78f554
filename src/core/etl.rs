use crate::core::{Pipeline, TransformResult};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Extract and transform, without writing anything.
    pub async fn prepare(&self) -> Result<TransformResult> {
        tracing::info!("Extracting closures...");
        let raw_closures = self.pipeline.extract().await?;
        tracing::info!("Extracted {} closures", raw_closures.len());
        self.monitor.log_stats("Extract");

        tracing::info!("Applying funding rules...");
        let result = self.pipeline.transform(raw_closures).await?;
        tracing::info!(
            "Classified {} closures, dropped {} one-day closures",
            result.rows.len(),
            result.dropped
        );
        self.monitor.log_stats("Transform");

        if result.rows.is_empty() {
            tracing::warn!("No rows left after applying the rules (no multi-day closures)");
        }

        Ok(result)
    }

    pub async fn finish(&self, result: TransformResult) -> Result<String> {
        tracing::info!("Writing {} rows...", result.rows.len());
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }

    pub async fn run(&self) -> Result<String> {
        let result = self.prepare().await?;
        self.finish(result).await
    }
}
