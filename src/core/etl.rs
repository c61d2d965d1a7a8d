use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load in turn. Nothing is written unless
    /// extraction succeeded for every combination.
    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting house scrape");

        tracing::info!("Extracting data...");
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", raw_data.len());

        tracing::info!("Transforming data...");
        let transformed_result = self.pipeline.transform(raw_data).await?;
        tracing::info!(
            "Rendered {} records into {} files",
            transformed_result.records.len(),
            transformed_result.outputs.len()
        );

        tracing::info!("Loading data...");
        let output_path = self.pipeline.load(transformed_result).await?;
        tracing::info!("Output saved to: {} ({:?})", output_path, started.elapsed());

        Ok(output_path)
    }
}
