//! HTTP retrieval of raw feed text.

use std::time::Duration;

use reqwest::Client;

use crate::error::EventsError;

/// Raw body of a successfully fetched feed.
#[derive(Debug, Clone)]
pub struct FetchedFeed {
    pub body: String,
    pub status: u16,
}

/// Fetches feed documents with a fixed identifying `User-Agent`.
///
/// One client is shared by every source in a run. Requests are never retried;
/// a failed feed is reported in that feed's status and the run moves on.
pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    /// Creates a fetcher whose requests give up after `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`EventsError::ClientBuild`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, EventsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(EventsError::ClientBuild)?;
        Ok(Self { client })
    }

    /// GET `url` and return the response body.
    ///
    /// # Errors
    ///
    /// - [`EventsError::UnexpectedStatus`] for any non-2xx response.
    /// - [`EventsError::Timeout`] when the request exceeds the client timeout.
    /// - [`EventsError::Request`] for other network or TLS failures.
    pub async fn fetch_text(&self, url: &str) -> Result<FetchedFeed, EventsError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "application/rss+xml,application/atom+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EventsError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| request_error(url, e))?;
        Ok(FetchedFeed {
            body,
            status: status.as_u16(),
        })
    }
}

fn request_error(url: &str, source: reqwest::Error) -> EventsError {
    if source.is_timeout() {
        EventsError::Timeout {
            url: url.to_string(),
        }
    } else {
        EventsError::Request {
            url: url.to_string(),
            source,
        }
    }
}
