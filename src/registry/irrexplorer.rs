use anyhow::Result;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::models::{AsnResponse, PrefixData};
use crate::registry::{DataSource, FetchError};

/// HTTP client for the IRR Explorer prefix API.
pub struct IrrExplorerClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl IrrExplorerClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn asn_url(&self, asn: u32) -> String {
        format!("{}/asn/AS{}", self.base_url, asn)
    }

    fn prefix_url(&self, prefix: &str) -> String {
        format!("{}/prefix/{}", self.base_url, encode_component(prefix))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.json::<T>().await.map_err(|e| self.classify_error(e))
    }

    fn classify_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout_secs)
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err)
        }
    }
}

impl DataSource for IrrExplorerClient {
    async fn fetch_asn(&self, asn: u32) -> Result<AsnResponse, FetchError> {
        self.get_json(&self.asn_url(asn)).await
    }

    async fn fetch_prefix(&self, prefix: &str) -> Result<Vec<PrefixData>, FetchError> {
        self.get_json(&self.prefix_url(prefix)).await
    }
}

/// Percent-encode a path component: everything outside the unreserved set.
fn encode_component(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
