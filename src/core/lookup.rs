use crate::domain::model::BinInfo;
use crate::domain::ports::{BinLookup, ConfigProvider};
use crate::utils::error::{BinluhnError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_LOOKUP_ENDPOINT: &str = "https://binlist.io/lookup";
pub const BIN_LENGTH: usize = 6;

const ACCEPT_VALUE: &str = "application/json, text/plain, */*";

#[derive(Debug, Deserialize)]
struct LookupResponse {
    scheme: Option<String>,
    #[serde(rename = "type")]
    card_type: Option<String>,
    country: Option<NamedEntry>,
    bank: Option<NamedEntry>,
}

#[derive(Debug, Deserialize)]
struct NamedEntry {
    name: Option<String>,
}

impl LookupResponse {
    fn into_bin_info(self, bin: &str) -> BinInfo {
        BinInfo {
            bin: bin.to_string(),
            scheme: self.scheme,
            card_type: self.card_type,
            country: self.country.and_then(|c| c.name),
            bank: self.bank.and_then(|b| b.name),
        }
    }
}

/// binlist 相容的查詢服務客戶端
pub struct BinlistClient {
    client: Client,
    endpoint: String,
}

impl BinlistClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.lookup_endpoint(),
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    fn lookup_url(&self, bin: &str) -> String {
        format!("{}/{}/", self.endpoint.trim_end_matches('/'), bin)
    }
}

/// BIN 必須剛好是 6 位數字
pub fn validate_bin(bin: &str) -> Result<()> {
    if bin.len() == BIN_LENGTH && bin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(BinluhnError::invalid_argument(
            "bin",
            bin,
            "Please enter a valid 6-digit BIN",
        ))
    }
}

#[async_trait]
impl BinLookup for BinlistClient {
    async fn lookup(&self, bin: &str) -> Result<BinInfo> {
        let bin = bin.trim();
        validate_bin(bin)?;

        let url = self.lookup_url(bin);
        tracing::debug!("Making BIN lookup request to: {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, ACCEPT_VALUE)
            .send()
            .await?;

        tracing::debug!("BIN lookup response status: {}", response.status());

        if !response.status().is_success() {
            return Err(BinluhnError::LookupFailed {
                bin: bin.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: LookupResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_bin_info(bin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_validate_bin() {
        assert!(validate_bin("457173").is_ok());
        assert!(validate_bin("45717").is_err());
        assert!(validate_bin("4571731").is_err());
        assert!(validate_bin("45717a").is_err());
    }

    #[test]
    fn test_lookup_url_normalizes_trailing_slash() {
        let client = BinlistClient::new("https://binlist.io/lookup/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.lookup_url("457173"), "https://binlist.io/lookup/457173/");
    }

    #[tokio::test]
    async fn test_lookup_rejects_bad_bin_without_request() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET);
            then.status(200);
        });

        let client = BinlistClient::new(server.url("/lookup"), Duration::from_secs(5)).unwrap();
        let result = client.lookup("12ab56").await;

        assert!(matches!(result, Err(BinluhnError::InvalidArgument { .. })));
        api_mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_lookup_sends_accept_header() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/lookup/411111/")
                .header("Accept", ACCEPT_VALUE);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"scheme": "visa"}));
        });

        let client = BinlistClient::new(server.url("/lookup"), Duration::from_secs(5)).unwrap();
        let info = client.lookup("411111").await.unwrap();

        api_mock.assert();
        assert_eq!(info.display_scheme(), "visa");
        assert_eq!(info.display_bank(), "N/A");
    }
}
