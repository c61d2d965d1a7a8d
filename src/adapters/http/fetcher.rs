use crate::domain::model::{FormPayload, RequestTarget};
use crate::utils::error::{Result, ScrapeError};
use futures::future::try_join_all;
use reqwest::{Client, StatusCode};
use tokio::sync::Semaphore;

/// A response whose body has been read to the end.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: StatusCode,
    pub body: String,
}

/// Issues batches of requests concurrently, at most `limit` in flight.
///
/// A request counts as in flight until its body has been read, so no more
/// than `limit` connections are ever transferring at once. Pages come back in
/// the order the targets were given. The first transport failure aborts the
/// whole batch; HTTP error statuses are not failures here and are left for the
/// caller to classify.
pub struct Fetcher {
    client: Client,
    permits: Semaphore,
    limit: usize,
}

impl Fetcher {
    pub fn new(client: Client, limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            client,
            permits: Semaphore::new(limit),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// GETs every URL, or, when `form_data` is given, POSTs each form to `urls[0]`.
    pub async fn fetch(
        &self,
        urls: &[String],
        form_data: Option<&[FormPayload]>,
    ) -> Result<Vec<FetchedPage>> {
        let targets: Vec<RequestTarget> = match form_data {
            None => urls.iter().map(RequestTarget::get).collect(),
            Some(forms) => {
                let url = urls.first().ok_or_else(|| ScrapeError::ConfigError {
                    message: "a batch of form submissions needs a target URL".to_string(),
                })?;
                tracing::info!("Submitting {} search forms to {}", forms.len(), url);
                forms
                    .iter()
                    .map(|form| RequestTarget::post_form(url.as_str(), form.clone()))
                    .collect()
            }
        };

        self.fetch_targets(&targets).await
    }

    pub async fn fetch_targets(&self, targets: &[RequestTarget]) -> Result<Vec<FetchedPage>> {
        tracing::debug!(
            "Fetching {} targets with up to {} in flight",
            targets.len(),
            self.limit
        );
        try_join_all(targets.iter().map(|target| self.fetch_one(target))).await
    }

    pub async fn fetch_one(&self, target: &RequestTarget) -> Result<FetchedPage> {
        // The semaphore is owned here and never closed, so acquiring cannot fail.
        // The permit is held until the body is fully read.
        let _permit = self.permits.acquire().await.ok();

        let request = match target.form() {
            Some(form) => self.client.post(target.url()).form(form),
            None => self.client.get(target.url()),
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("{} -> {} ({} bytes)", target.url(), status, body.len());
        Ok(FetchedPage { status, body })
    }
}
