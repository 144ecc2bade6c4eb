use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::response::preview;

/// One round trip to the mart service. Implementations perform a single
/// attempt; retry policy belongs to the caller.
pub trait BiomartClient: Send + Sync {
    fn send_query(&self, xml: &str) -> Result<String, HarvestError>;
}

#[derive(Clone)]
pub struct BiomartHttpClient {
    client: Client,
    endpoint: String,
}

impl BiomartHttpClient {
    pub fn new(config: &HarvestConfig) -> Result<Self, HarvestError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("mart-harvest/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| HarvestError::BiomartHttp(err.to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|err| HarvestError::BiomartHttp(err.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl BiomartClient for BiomartHttpClient {
    fn send_query(&self, xml: &str) -> Result<String, HarvestError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("query", xml)])
            .send()
            .map_err(|err| HarvestError::BiomartHttp(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .unwrap_or_else(|_| "BioMart request failed".to_string());
            return Err(HarvestError::BiomartStatus {
                status,
                message: preview(&body).to_string(),
            });
        }

        response
            .text()
            .map_err(|err| HarvestError::BiomartHttp(err.to_string()))
    }
}
