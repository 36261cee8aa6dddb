use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::quote::{CurrencyPair, QuoteBook, QuoteProvider, RateQuote};

/// Quote provider for the AwesomeAPI `json/last` endpoint.
pub struct AwesomeApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl AwesomeApiProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("convkit/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(AwesomeApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

// Rates arrive as decimal strings, e.g. "5.1234".
#[derive(Debug, Deserialize)]
struct AwesomeApiQuote {
    bid: Option<String>,
    ask: Option<String>,
}

fn parse_rate(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
}

#[async_trait]
impl QuoteProvider for AwesomeApiProvider {
    #[instrument(name = "AwesomeApiFetch", skip(self, pairs), fields(pairs = pairs.len()))]
    async fn fetch_quotes(&self, pairs: &[CurrencyPair]) -> Result<QuoteBook> {
        if pairs.is_empty() {
            return Ok(QuoteBook::new());
        }

        let ids = pairs.iter().map(|p| p.id()).collect::<Vec<_>>().join(",");
        let url = format!("{}/json/last/{}", self.base_url, ids);
        debug!("Requesting quotes from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for pairs: {}", e, ids))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for pairs: {}",
                response.status(),
                ids
            ));
        }

        let text = response.text().await?;

        let data: HashMap<String, AwesomeApiQuote> = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", ids, e))?;

        let book: QuoteBook = pairs
            .iter()
            .filter_map(|pair| {
                let item = data.get(&pair.code())?;
                Some(RateQuote {
                    pair: pair.clone(),
                    bid: parse_rate(item.bid.as_deref()),
                    ask: parse_rate(item.ask.as_deref()),
                })
            })
            .collect();

        debug!(found = book.len(), requested = pairs.len(), "Parsed quotes");
        Ok(book)
    }
}
