//! Shop API client

use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::targets::{AddToCartBody, CartUpdated, Envelope, PayBody};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request failed with status {0}")]
    Status(StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// One finished request. `status` is `None` when no response arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub status: Option<u16>,
    pub latency: Duration,
}

impl Sample {
    pub fn is_success(&self) -> bool {
        self.status.is_some_and(|status| (200..300).contains(&status))
    }
}

#[derive(Debug, Clone)]
pub struct ShopClient {
    http: Client,
    base_url: String,
}

impl ShopClient {
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn list_goods(&self) -> Sample {
        let started = Instant::now();

        let result = self.http.get(self.url("/api/small/stocks")).send().await;

        sample(result.map(|response| response.status()), started)
    }

    /// Adds goods to a new cart, returning the cart when the request succeeded.
    pub async fn add_to_cart(&self, body: &AddToCartBody) -> (Sample, Option<CartUpdated>) {
        let started = Instant::now();

        let result = self.post_json("/api/small/cart", body).await;

        match result {
            Ok((status, text)) => {
                let sample = sample(Ok(status), started);

                debug!(status = status.as_u16(), body = %text, "add to cart response");

                let cart = status
                    .is_success()
                    .then(|| serde_json::from_str::<Envelope<CartUpdated>>(&text).ok())
                    .flatten()
                    .map(|envelope| envelope.data);

                (sample, cart)
            }
            Err(error) => (sample(Err(error), started), None),
        }
    }

    pub async fn pay(&self, body: &PayBody) -> Sample {
        let started = Instant::now();

        let result = self.post_json("/api/small/pay", body).await;

        sample(result.map(|(status, _)| status), started)
    }

    /// Asks the server to drop every cart and transaction.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn clear_db(&self) -> Result<(), ClientError> {
        let response = self.http.post(self.url("/clear-db")).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        Ok(())
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(StatusCode, String), reqwest::Error> {
        let response = self.http.post(self.url(path)).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;

        Ok((status, text))
    }
}

fn sample(result: Result<StatusCode, reqwest::Error>, started: Instant) -> Sample {
    let latency = started.elapsed();

    match result {
        Ok(status) => Sample {
            status: Some(status.as_u16()),
            latency,
        },
        Err(error) => {
            debug!("request failed: {error}");

            Sample {
                status: error.status().map(|status| status.as_u16()),
                latency,
            }
        }
    }
}
