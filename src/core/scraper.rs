use crate::adapters::http::{build_client, ClientOptions, Fetcher};
use crate::core::ConfigProvider;
use crate::domain::model::{Catalog, Combination, FormPayload, HousePage, RequestTarget, ScrapeReport};
use crate::parse::{parse_catalog, parse_houses};
use crate::utils::error::{Result, ScrapeError};
use reqwest::StatusCode;
use std::time::Duration;

/// Drives the two rounds of a run: the catalog page, then one search per
/// (server, city) combination.
pub struct HouseScraper {
    fetcher: Fetcher,
    catalog_url: String,
    fail_on_mismatch: bool,
}

impl HouseScraper {
    pub fn new(fetcher: Fetcher, catalog_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            catalog_url: catalog_url.into(),
            fail_on_mismatch: false,
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let options = ClientOptions {
            user_agent: config.user_agent().to_string(),
            timeout: config.timeout_seconds().map(Duration::from_secs),
        };
        let fetcher = Fetcher::new(build_client(&options)?, config.concurrent_requests());

        Ok(Self::new(fetcher, config.catalog_url()).with_fail_on_mismatch(config.fail_on_mismatch()))
    }

    pub fn with_fail_on_mismatch(mut self, fail_on_mismatch: bool) -> Self {
        self.fail_on_mismatch = fail_on_mismatch;
        self
    }

    pub async fn scrape(&self) -> Result<ScrapeReport> {
        let catalog = self.fetch_catalog().await?;
        tracing::info!(
            "Catalog lists {} servers and {} cities",
            catalog.servers.len(),
            catalog.cities.len()
        );

        let combinations = Combination::cross_product(&catalog.servers, &catalog.cities);
        self.fetch_combinations(&combinations).await
    }

    pub async fn fetch_catalog(&self) -> Result<Catalog> {
        tracing::info!("Fetching catalog page {}", self.catalog_url);
        let page = self
            .fetcher
            .fetch_one(&RequestTarget::get(self.catalog_url.as_str()))
            .await?;

        if page.status != StatusCode::OK {
            return Err(ScrapeError::CatalogUnavailable {
                status: page.status.as_u16(),
            });
        }

        parse_catalog(&page.body)
    }

    /// Searches every combination and gathers the house rows.
    ///
    /// A 403 means the site has nothing to show for that combination and is
    /// skipped. Any other non-200 status aborts the whole run.
    pub async fn fetch_combinations(&self, combinations: &[Combination]) -> Result<ScrapeReport> {
        let forms: Vec<FormPayload> = combinations.iter().map(Combination::to_form).collect();
        let urls = [self.catalog_url.clone()];
        let responses = self.fetcher.fetch(&urls, Some(forms.as_slice())).await?;

        let mut report = ScrapeReport {
            combinations_requested: combinations.len(),
            ..ScrapeReport::default()
        };

        for (combination, response) in combinations.iter().zip(responses) {
            match response.status {
                StatusCode::OK => {
                    let page = parse_houses(&response.body)?;
                    self.check_echo(combination, &page, &mut report)?;

                    if page.skipped_rows > 0 {
                        tracing::warn!(
                            "{}: skipped {} rows without a size cell",
                            combination,
                            page.skipped_rows
                        );
                    }
                    tracing::debug!("{}: {} houses", combination, page.records.len());

                    report.skipped_rows += page.skipped_rows;
                    report.records.extend(page.records);
                }
                StatusCode::FORBIDDEN => {
                    tracing::debug!("{}: no accessible listings (403)", combination);
                    report.forbidden_combinations += 1;
                }
                status => {
                    return Err(ScrapeError::CombinationFetchFailed {
                        server: combination.server.clone(),
                        city: combination.city.clone(),
                        status: status.as_u16(),
                    });
                }
            }
        }

        Ok(report)
    }

    fn check_echo(
        &self,
        requested: &Combination,
        page: &HousePage,
        report: &mut ScrapeReport,
    ) -> Result<()> {
        let echoed = page.echoed();
        if requested.matches_echo(&echoed) {
            return Ok(());
        }

        if self.fail_on_mismatch {
            return Err(ScrapeError::CombinationMismatch {
                requested: requested.to_string(),
                echoed: echoed.to_string(),
            });
        }

        tracing::warn!(
            "Requested {} but the page rendered {}; keeping the page's labels",
            requested,
            echoed
        );
        report.mismatched_combinations += 1;
        Ok(())
    }
}
