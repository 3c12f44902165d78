//! Client for the upstream COVID-19 statistics feed

use crate::error::{GatewayError, Result};
use crate::models::FeedResponse;
use tracing::{debug, info};

const SERVICE: &str = "stats feed";

pub struct FeedClient {
    http: reqwest::Client,
    url: String,
}

impl FeedClient {
    pub fn new(http: reqwest::Client, url: &str) -> Self {
        Self {
            http,
            url: url.to_string(),
        }
    }

    /// Fetch and decode the full feed. A body that does not decode is an
    /// error, never an empty snapshot.
    pub async fn fetch(&self) -> Result<FeedResponse> {
        info!("Fetching stats feed from {}", self.url);

        let unavailable = |source| GatewayError::Unavailable {
            service: SERVICE,
            source,
        };

        let response = self.http.get(&self.url).send().await.map_err(unavailable)?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::UpstreamStatus {
                service: SERVICE,
                status,
            });
        }

        let body = response.bytes().await.map_err(unavailable)?;
        debug!("Stats feed returned {} bytes", body.len());

        let feed: FeedResponse =
            serde_json::from_slice(&body).map_err(|source| GatewayError::Decode {
                service: SERVICE,
                source,
            })?;

        info!(
            "Stats feed decoded: {} regions, last origin update {}",
            feed.data.regional.len(),
            feed.last_origin_update
        );
        Ok(feed)
    }
}
