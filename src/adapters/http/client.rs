use crate::utils::error::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;

/// What a desktop Chrome sends; the community pages turn away obvious bots.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36";

const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub user_agent: String,
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: CHROME_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

/// Builds the one long-lived client for a run.
///
/// Cookies set by any response are replayed on later requests, which the
/// house search needs: it only answers once the catalog page handed out a
/// session cookie.
pub fn build_client(options: &ClientOptions) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE));

    let mut builder = Client::builder()
        .user_agent(options.user_agent.as_str())
        .default_headers(headers)
        .cookie_store(true);

    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }

    tracing::debug!(
        "Building HTTP client (user agent: {}, timeout: {:?})",
        options.user_agent,
        options.timeout
    );
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_client_presents_as_browser() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/")
                    .header("user-agent", CHROME_USER_AGENT)
                    .header("accept-language", BROWSER_ACCEPT_LANGUAGE);
                then.status(200).body("ok");
            })
            .await;

        let client = build_client(&ClientOptions::default()).unwrap();
        let response = client.get(server.url("/")).send().await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_client_replays_cookies() {
        let server = MockServer::start_async().await;
        let login = server
            .mock_async(|when, then| {
                when.method(GET).path("/catalog");
                then.status(200)
                    .header("Set-Cookie", "SessionID=abc123; Path=/")
                    .body("catalog");
            })
            .await;
        let search = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/catalog")
                    .header("cookie", "SessionID=abc123");
                then.status(200).body("results");
            })
            .await;

        let client = build_client(&ClientOptions::default()).unwrap();
        client.get(server.url("/catalog")).send().await.unwrap();
        let response = client.post(server.url("/catalog")).send().await.unwrap();

        login.assert_async().await;
        search.assert_async().await;
        assert_eq!(response.text().await.unwrap(), "results");
    }
}
