pub mod chart;
pub mod method;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const BASE_URL: &str = "https://query1.finance.yahoo.com";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// Requests without a browser agent get rejected with 429.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("Base URL cannot carry a path: {0}")]
    NotABase(String),
    #[error("Failed to build reqwest client: {0}")]
    Build(#[from] reqwest::Error),
}

pub struct YahooClient {
    base_url: Url,
    reqwest: Client,
}

impl YahooClient {
    pub fn new() -> Result<Self, ClientError> {
        Self::with_options(BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_options(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::NotABase(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let reqwest = ClientBuilder::new()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { base_url, reqwest })
    }

    pub(crate) async fn get<T: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        url: Url,
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

    pub async fn call<M: method::Method>(&self, params: M::Params) -> reqwest::Result<M::Response> {
        let url = self.url::<M>(&params);
        self.get(url, &params).await
    }

    /// The resource is pushed as a single path segment, so `/`, `?` and `#` are escaped.
    fn url<M: method::Method>(&self, params: &M::Params) -> Url {
        let mut url = self.base_url.clone();
        // Only fails for cannot-be-a-base URLs, which `with_options` rejects.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(M::PATH.split('/').filter(|s| !s.is_empty()))
                .push(M::resource(params));
        }
        url
    }
}
