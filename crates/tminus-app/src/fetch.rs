//! Feed retrieval over HTTP or from the local filesystem.

use std::time::Duration;

use futures::future::join_all;
use tminus_core::constants::USER_AGENT;

use crate::config::FeedConfig;
use crate::error::{AppError, AppResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a feed's text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource<'a> {
    Http(&'a str),
    File(&'a str),
}

impl<'a> FeedSource<'a> {
    /// Classifies a configured feed location.
    ///
    /// `http://` and `https://` are fetched; `file://` URLs and anything else
    /// are read as filesystem paths.
    #[must_use]
    pub fn parse(url: &'a str) -> Self {
        let url = url.trim();
        let lower = url.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Http(url)
        } else if lower.starts_with("file://") {
            Self::File(&url["file://".len()..])
        } else {
            Self::File(url)
        }
    }
}

/// The outcome of fetching one configured feed.
#[derive(Debug)]
pub struct FetchedFeed {
    pub feed: FeedConfig,
    pub body: AppResult<String>,
}

#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: reqwest::Client,
}

impl FeedFetcher {
    /// ## Summary
    /// Builds a fetcher with the application user agent and a request timeout.
    ///
    /// ## Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new() -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// ## Summary
    /// Retrieves the text of one feed.
    ///
    /// ## Errors
    /// Returns an error on network failure, a non-success HTTP status, or an
    /// unreadable file.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> AppResult<String> {
        match FeedSource::parse(url) {
            FeedSource::Http(url) => {
                let response = self.client.get(url).send().await?.error_for_status()?;
                let body = response.text().await?;
                tracing::debug!(bytes = body.len(), "Fetched feed");
                Ok(body)
            }
            FeedSource::File(path) => {
                let body = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| AppError::ReadError {
                        path: path.to_string(),
                        source,
                    })?;
                tracing::debug!(bytes = body.len(), "Read feed file");
                Ok(body)
            }
        }
    }

    /// ## Summary
    /// Fetches every feed concurrently, keeping configuration order.
    ///
    /// A failing feed does not affect the others; its error is kept in
    /// [`FetchedFeed::body`] and logged.
    pub async fn fetch_all(&self, feeds: &[FeedConfig]) -> Vec<FetchedFeed> {
        let requests = feeds.iter().map(|feed| async move {
            let body = self.fetch(&feed.url).await;
            if let Err(e) = &body {
                tracing::error!(feed = feed.label(), error = %e, "Failed to fetch feed");
            }
            FetchedFeed {
                feed: feed.clone(),
                body,
            }
        });

        join_all(requests).await
    }
}
