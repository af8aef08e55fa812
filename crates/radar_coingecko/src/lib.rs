pub mod markets;
pub mod method;
pub mod trending;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, InvalidHeaderValue};
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

// Public (keyless) API root
pub const BASE_URL: &str = "https://api.coingecko.com/api/v3";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid API key header: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
    #[error("Failed to build reqwest client: {0}")]
    Build(#[from] reqwest::Error),
}

pub struct CoingeckoClient {
    base_url: String,
    reqwest: Client,
}

impl CoingeckoClient {
    pub fn new(api_key: Option<&str>) -> Result<Self, ClientError> {
        Self::with_options(BASE_URL, api_key, DEFAULT_TIMEOUT)
    }

    /// Builds a client against `base_url`. A demo API key is sent as `x-cg-demo-api-key` when given.
    pub fn with_options(
        base_url: &str,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(key) = api_key {
            headers.insert("x-cg-demo-api-key", HeaderValue::from_str(key)?);
        }

        let reqwest = ClientBuilder::new()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            reqwest,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn get<T: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> reqwest::Result<T> {
        let response = self
            .reqwest
            .get(url)
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await?;

        Ok(response)
    }

    pub(crate) async fn get0<R: DeserializeOwned>(&self, url: &str) -> reqwest::Result<R> {
        let response = self.reqwest.get(url).send().await?;
        let response = response.error_for_status()?;

        response.json().await
    }

    pub async fn call<M: method::Method>(&self, params: M::Params) -> reqwest::Result<M::Response> {
        self.get(&self.url(M::PATH), &params).await
    }

    pub async fn call0<M: method::Method0>(&self) -> reqwest::Result<M::Response> {
        self.get0(&self.url(M::PATH)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let client =
            CoingeckoClient::with_options("http://localhost:8080/api/v3/", None, DEFAULT_TIMEOUT)
                .unwrap();

        assert_eq!(client.base_url(), "http://localhost:8080/api/v3");
        assert_eq!(
            client.url(markets_path()),
            "http://localhost:8080/api/v3/coins/markets"
        );
    }

    #[test]
    fn rejects_api_key_with_control_characters() {
        let result = CoingeckoClient::with_options(BASE_URL, Some("bad\nkey"), DEFAULT_TIMEOUT);
        assert!(matches!(result, Err(ClientError::InvalidHeader(_))));
    }

    fn markets_path() -> &'static str {
        <markets::CoinsMarkets as method::Method>::PATH
    }
}
