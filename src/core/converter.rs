//! Currency conversion through the BRL pivot.
//!
//! The upstream only publishes rates against BRL, so a conversion between two
//! foreign currencies goes through BRL: the source amount is sold for BRL at
//! the bid rate, and the BRL amount buys the target currency at the ask rate.

use crate::core::quote::{CurrencyPair, PIVOT_CURRENCY, QuoteBook, QuoteProvider};
use std::fmt::Display;
use tracing::{debug, instrument};

/// Targets displayed with eight fractional digits instead of two.
pub const HIGH_PRECISION_CURRENCIES: &[&str] = &["BTC", "ETH", "LTC", "DOGE"];

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConversionError {
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Quote unavailable for {pair}: {reason}")]
    QuoteUnavailable { pair: String, reason: String },
}

impl ConversionError {
    fn unavailable(pair: &CurrencyPair, reason: impl Into<String>) -> Self {
        ConversionError::QuoteUnavailable {
            pair: pair.id(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    amount: f64,
    from: String,
    to: String,
}

impl ConversionRequest {
    pub fn new(amount: f64, from: &str, to: &str) -> Result<Self, ConversionError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ConversionError::InvalidAmount(amount.to_string()));
        }
        Ok(Self {
            amount,
            from: normalize_code(from),
            to: normalize_code(to),
        })
    }

    /// Builds a request from the raw text typed by the user.
    pub fn parse(amount: &str, from: &str, to: &str) -> Result<Self, ConversionError> {
        let trimmed = amount.trim();
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| ConversionError::InvalidAmount(trimmed.to_string()))?;
        Self::new(value, from, to)
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub amount: f64,
    pub currency: String,
    pub precision: usize,
}

impl ConversionResult {
    fn new(amount: f64, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
            precision: display_precision(currency),
        }
    }

    /// The amount alone, rounded to the display precision.
    pub fn formatted_amount(&self) -> String {
        format!("{:.*}", self.precision, self.amount)
    }
}

impl Display for ConversionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.formatted_amount(), self.currency)
    }
}

pub fn display_precision(currency: &str) -> usize {
    if HIGH_PRECISION_CURRENCIES.contains(&currency) {
        8
    } else {
        2
    }
}

pub struct RateConverter<'a> {
    provider: &'a (dyn QuoteProvider + Send + Sync),
}

impl<'a> RateConverter<'a> {
    pub fn new(provider: &'a (dyn QuoteProvider + Send + Sync)) -> Self {
        Self { provider }
    }

    #[instrument(
        name = "Convert",
        skip(self),
        fields(from = %request.from(), to = %request.to())
    )]
    pub async fn convert(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResult, ConversionError> {
        let amount = request.amount();
        let (from, to) = (request.from(), request.to());

        if from == to {
            debug!("Same currency on both sides, skipping lookup");
            return Ok(ConversionResult::new(amount, to));
        }

        let converted = if from == PIVOT_CURRENCY {
            let pair = CurrencyPair::against_pivot(to);
            let book = self.lookup(std::slice::from_ref(&pair)).await?;
            let ask = ask_rate(&book, &pair)?;
            debug!(ask, "Buying {} with BRL", to);
            amount / ask
        } else if to == PIVOT_CURRENCY {
            let pair = CurrencyPair::against_pivot(from);
            let book = self.lookup(std::slice::from_ref(&pair)).await?;
            let bid = bid_rate(&book, &pair)?;
            debug!(bid, "Selling {} for BRL", from);
            amount * bid
        } else {
            let from_pair = CurrencyPair::against_pivot(from);
            let to_pair = CurrencyPair::against_pivot(to);
            let book = self.lookup(&[from_pair.clone(), to_pair.clone()]).await?;
            let bid = bid_rate(&book, &from_pair)?;
            let ask = ask_rate(&book, &to_pair)?;
            let amount_in_pivot = amount * bid;
            debug!(bid, ask, amount_in_pivot, "Converting through BRL");
            amount_in_pivot / ask
        };

        if !converted.is_finite() {
            debug!(converted, "Converted amount out of range");
            return Err(ConversionError::InvalidAmount(amount.to_string()));
        }
        Ok(ConversionResult::new(converted, to))
    }

    async fn lookup(&self, pairs: &[CurrencyPair]) -> Result<QuoteBook, ConversionError> {
        let ids = pairs.iter().map(|p| p.id()).collect::<Vec<_>>().join(",");
        self.provider.fetch_quotes(pairs).await.map_err(|e| {
            debug!("Quote lookup for {} failed: {:#}", ids, e);
            ConversionError::QuoteUnavailable {
                pair: ids.clone(),
                reason: e.to_string(),
            }
        })
    }
}

fn bid_rate(book: &QuoteBook, pair: &CurrencyPair) -> Result<f64, ConversionError> {
    let quote = book
        .get(pair)
        .ok_or_else(|| ConversionError::unavailable(pair, "pair missing from response"))?;
    positive_rate(quote.bid, pair, "bid")
}

fn ask_rate(book: &QuoteBook, pair: &CurrencyPair) -> Result<f64, ConversionError> {
    let quote = book
        .get(pair)
        .ok_or_else(|| ConversionError::unavailable(pair, "pair missing from response"))?;
    positive_rate(quote.ask, pair, "ask")
}

fn positive_rate(
    rate: Option<f64>,
    pair: &CurrencyPair,
    field: &str,
) -> Result<f64, ConversionError> {
    match rate {
        Some(r) if r.is_finite() && r > 0.0 => Ok(r),
        Some(r) => Err(ConversionError::unavailable(
            pair,
            format!("{field} rate is not positive: {r}"),
        )),
        None => Err(ConversionError::unavailable(
            pair,
            format!("{field} rate missing"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quote::RateQuote;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockQuoteProvider {
        quotes: Vec<RateQuote>,
        fail: bool,
        call_count: AtomicUsize,
        requested: Mutex<Vec<Vec<String>>>,
    }

    impl MockQuoteProvider {
        fn new(quotes: Vec<(&str, Option<f64>, Option<f64>)>) -> Self {
            Self {
                quotes: quotes
                    .into_iter()
                    .map(|(base, bid, ask)| RateQuote {
                        pair: CurrencyPair::against_pivot(base),
                        bid,
                        ask,
                    })
                    .collect(),
                fail: false,
                call_count: AtomicUsize::new(0),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            let mut provider = Self::new(vec![]);
            provider.fail = true;
            provider
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl QuoteProvider for MockQuoteProvider {
        async fn fetch_quotes(&self, pairs: &[CurrencyPair]) -> Result<QuoteBook> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.requested
                .lock()
                .unwrap()
                .push(pairs.iter().map(|p| p.id()).collect());
            if self.fail {
                return Err(anyhow!("connection refused"));
            }
            Ok(self
                .quotes
                .iter()
                .filter(|q| pairs.contains(&q.pair))
                .cloned()
                .collect())
        }
    }

    async fn convert(
        provider: &MockQuoteProvider,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<ConversionResult, ConversionError> {
        let request = ConversionRequest::new(amount, from, to)?;
        RateConverter::new(provider).convert(&request).await
    }

    #[tokio::test]
    async fn test_same_currency_skips_lookup() {
        let provider = MockQuoteProvider::new(vec![]);
        for (amount, code) in [(0.01, "USD"), (42.5, "BTC"), (1e9, "BRL")] {
            let result = convert(&provider, amount, code, code).await.unwrap();
            assert_eq!(result.amount, amount);
            assert_eq!(result.currency, code);
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_from_pivot_divides_by_ask() {
        let provider = MockQuoteProvider::new(vec![("USD", Some(4.9), Some(5.0))]);
        let result = convert(&provider, 100.0, "BRL", "USD").await.unwrap();
        assert!((result.amount - 20.0).abs() < 1e-9);
        assert_eq!(result.to_string(), "20.00 USD");
        assert_eq!(provider.calls(), 1);
        assert_eq!(*provider.requested.lock().unwrap(), vec![vec!["USD-BRL"]]);
    }

    #[tokio::test]
    async fn test_to_pivot_multiplies_by_bid() {
        let provider = MockQuoteProvider::new(vec![("USD", Some(4.9), Some(5.0))]);
        let result = convert(&provider, 100.0, "USD", "BRL").await.unwrap();
        assert!((result.amount - 490.0).abs() < 1e-9);
        assert_eq!(result.to_string(), "490.00 BRL");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_cross_rate_uses_single_batched_lookup() {
        let provider = MockQuoteProvider::new(vec![
            ("EUR", Some(5.4), Some(5.5)),
            ("USD", Some(4.9), Some(5.0)),
        ]);
        let result = convert(&provider, 100.0, "EUR", "USD").await.unwrap();
        assert!((result.amount - 108.0).abs() < 1e-9);
        assert_eq!(result.to_string(), "108.00 USD");
        assert_eq!(provider.calls(), 1);
        assert_eq!(
            *provider.requested.lock().unwrap(),
            vec![vec!["EUR-BRL", "USD-BRL"]]
        );
    }

    #[tokio::test]
    async fn test_codes_are_normalized() {
        let provider = MockQuoteProvider::new(vec![("USD", Some(4.9), Some(5.0))]);
        let result = convert(&provider, 100.0, " brl", "usd ").await.unwrap();
        assert_eq!(result.currency, "USD");
    }

    #[tokio::test]
    async fn test_display_precision() {
        let provider = MockQuoteProvider::new(vec![
            ("BTC", Some(300000.0), Some(320000.0)),
            ("EUR", Some(5.4), Some(5.5)),
        ]);

        let btc = convert(&provider, 100.0, "BRL", "BTC").await.unwrap();
        assert_eq!(btc.precision, 8);
        assert_eq!(btc.formatted_amount(), "0.00031250");

        let eur = convert(&provider, 100.0, "BRL", "EUR").await.unwrap();
        assert_eq!(eur.precision, 2);
        assert_eq!(eur.formatted_amount(), "18.18");
    }

    #[tokio::test]
    async fn test_invalid_amounts_rejected_before_lookup() {
        let provider = MockQuoteProvider::new(vec![("USD", Some(4.9), Some(5.0))]);

        for raw in ["0", "-5", "abc", "", "NaN", "inf"] {
            let err = ConversionRequest::parse(raw, "BRL", "USD").unwrap_err();
            assert!(
                matches!(err, ConversionError::InvalidAmount(_)),
                "{raw} should be invalid"
            );
        }
        assert!(matches!(
            convert(&provider, 0.0, "BRL", "USD").await,
            Err(ConversionError::InvalidAmount(_))
        ));
        assert!(matches!(
            convert(&provider, -5.0, "BRL", "USD").await,
            Err(ConversionError::InvalidAmount(_))
        ));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_overflowing_result_is_invalid() {
        let provider = MockQuoteProvider::new(vec![
            ("USD", Some(5.0), Some(5.0)),
            ("EUR", Some(6.0), Some(1e-300)),
        ]);

        let err = convert(&provider, 1e308, "USD", "BRL").await.unwrap_err();
        assert!(matches!(err, ConversionError::InvalidAmount(_)));

        let err = convert(&provider, 1e10, "USD", "EUR").await.unwrap_err();
        assert!(matches!(err, ConversionError::InvalidAmount(_)));

        let err = convert(&provider, 1e10, "BRL", "EUR").await.unwrap_err();
        assert!(matches!(err, ConversionError::InvalidAmount(_)));
    }

    #[tokio::test]
    async fn test_missing_fields_are_unavailable() {
        let provider = MockQuoteProvider::new(vec![
            ("USD", Some(4.9), None),
            ("EUR", None, Some(5.5)),
        ]);

        let err = convert(&provider, 100.0, "BRL", "USD").await.unwrap_err();
        assert_eq!(
            err,
            ConversionError::QuoteUnavailable {
                pair: "USD-BRL".to_string(),
                reason: "ask rate missing".to_string(),
            }
        );

        let err = convert(&provider, 100.0, "EUR", "BRL").await.unwrap_err();
        assert!(matches!(err, ConversionError::QuoteUnavailable { .. }));

        // EUR has no bid for the first leg
        let err = convert(&provider, 100.0, "EUR", "USD").await.unwrap_err();
        assert!(matches!(err, ConversionError::QuoteUnavailable { ref pair, .. } if pair == "EUR-BRL"));
    }

    #[tokio::test]
    async fn test_missing_pair_is_unavailable() {
        let provider = MockQuoteProvider::new(vec![("EUR", Some(5.4), Some(5.5))]);

        let err = convert(&provider, 100.0, "BRL", "GBP").await.unwrap_err();
        assert!(matches!(err, ConversionError::QuoteUnavailable { ref pair, .. } if pair == "GBP-BRL"));

        // Cross conversion where only one leg is present
        let err = convert(&provider, 100.0, "EUR", "GBP").await.unwrap_err();
        assert!(matches!(err, ConversionError::QuoteUnavailable { ref pair, .. } if pair == "GBP-BRL"));
    }

    #[tokio::test]
    async fn test_non_positive_rate_is_unavailable() {
        let provider = MockQuoteProvider::new(vec![("USD", Some(0.0), Some(-1.0))]);
        assert!(matches!(
            convert(&provider, 100.0, "USD", "BRL").await,
            Err(ConversionError::QuoteUnavailable { .. })
        ));
        assert!(matches!(
            convert(&provider, 100.0, "BRL", "USD").await,
            Err(ConversionError::QuoteUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_provider_failure_is_unavailable() {
        let provider = MockQuoteProvider::failing();
        let err = convert(&provider, 100.0, "EUR", "USD").await.unwrap_err();
        assert_eq!(
            err,
            ConversionError::QuoteUnavailable {
                pair: "EUR-BRL,USD-BRL".to_string(),
                reason: "connection refused".to_string(),
            }
        );
        assert_eq!(provider.calls(), 1);
    }
}
