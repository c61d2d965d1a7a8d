use crate::core::scraper::HouseScraper;
use crate::core::{ConfigProvider, HouseRecord, Pipeline, Storage, TransformResult};
use crate::export::{render, OutputFormat};
use crate::utils::error::Result;
use std::path::Path;

/// Scrapes every house listing and writes it out in the configured formats.
pub struct HousePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    scraper: HouseScraper,
}

impl<S: Storage, C: ConfigProvider> HousePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let scraper = HouseScraper::from_config(&config)?;
        Ok(Self {
            storage,
            config,
            scraper,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for HousePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<HouseRecord>> {
        let report = self.scraper.scrape().await?;

        tracing::info!(
            "Collected {} houses from {} combinations ({} forbidden, {} rows skipped, {} mismatched)",
            report.records.len(),
            report.combinations_requested,
            report.forbidden_combinations,
            report.skipped_rows,
            report.mismatched_combinations
        );
        Ok(report.records)
    }

    async fn transform(&self, data: Vec<HouseRecord>) -> Result<TransformResult> {
        let mut outputs = Vec::new();

        for format in self.config.output_formats() {
            let format: OutputFormat = format.parse()?;
            let bytes = render(&data, format)?;
            tracing::debug!("Rendered {} ({} bytes)", format, bytes.len());
            outputs.push((format.file_name(self.config.file_stem()), bytes));
        }

        Ok(TransformResult {
            records: data,
            outputs,
        })
    }

    /// Stages every output under a temporary name and renames them into
    /// place only once all of them were written, so a failed write leaves the
    /// previous outputs untouched.
    async fn load(&self, result: TransformResult) -> Result<String> {
        let mut staged = Vec::new();

        for (file_name, bytes) in &result.outputs {
            let partial = partial_name(file_name);
            if let Err(e) = self.storage.write_file(&partial, bytes).await {
                for leftover in staged.iter().chain(std::iter::once(&partial)) {
                    if self.storage.remove_file(leftover).await.is_err() {
                        tracing::warn!("Could not remove staged file {}", leftover);
                    }
                }
                return Err(e);
            }
            staged.push(partial);
        }

        let mut written = Vec::new();
        for ((file_name, _), partial) in result.outputs.iter().zip(&staged) {
            self.storage.rename(partial, file_name).await?;
            written.push(
                Path::new(self.config.output_path())
                    .join(file_name)
                    .display()
                    .to_string(),
            );
        }

        Ok(written.join(", "))
    }
}

fn partial_name(file_name: &str) -> String {
    format!("{}.partial", file_name)
}
