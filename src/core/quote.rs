//! Exchange-rate quote abstractions

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Display;

/// The currency every upstream quote is published against.
pub const PIVOT_CURRENCY: &str = "BRL";

/// Currencies offered by the converter, with their display names.
pub const SUPPORTED_CURRENCIES: &[(&str, &str)] = &[
    ("USD", "US Dollar"),
    ("EUR", "Euro"),
    ("BRL", "Brazilian Real"),
    ("GBP", "Pound Sterling"),
    ("JPY", "Japanese Yen"),
    ("CAD", "Canadian Dollar"),
    ("AUD", "Australian Dollar"),
    ("CHF", "Swiss Franc"),
    ("CNY", "Chinese Yuan"),
    ("ARS", "Argentine Peso"),
    ("TRY", "Turkish Lira"),
    ("BTC", "Bitcoin"),
    ("ETH", "Ethereum"),
    ("LTC", "Litecoin"),
    ("DOGE", "Dogecoin"),
];

pub fn is_supported(code: &str) -> bool {
    SUPPORTED_CURRENCIES.iter().any(|(c, _)| *c == code)
}

/// An ordered currency pair, e.g. `USD-BRL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    pub fn new(base: &str, quote: &str) -> Self {
        Self {
            base: base.to_string(),
            quote: quote.to_string(),
        }
    }

    /// Pair priced against the pivot currency.
    pub fn against_pivot(base: &str) -> Self {
        Self::new(base, PIVOT_CURRENCY)
    }

    /// Identifier used in lookups: `USD-BRL`.
    pub fn id(&self) -> String {
        format!("{}-{}", self.base, self.quote)
    }

    /// Concatenated form used as response key: `USDBRL`.
    pub fn code(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Buy and sell rates for a pair. Either side may be missing upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub pair: CurrencyPair,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
}

/// Quotes returned by a single lookup, keyed by pair.
#[derive(Debug, Clone, Default)]
pub struct QuoteBook {
    quotes: HashMap<CurrencyPair, RateQuote>,
}

impl QuoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, quote: RateQuote) {
        self.quotes.insert(quote.pair.clone(), quote);
    }

    pub fn get(&self, pair: &CurrencyPair) -> Option<&RateQuote> {
        self.quotes.get(pair)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl FromIterator<RateQuote> for QuoteBook {
    fn from_iter<I: IntoIterator<Item = RateQuote>>(iter: I) -> Self {
        let mut book = QuoteBook::new();
        for quote in iter {
            book.insert(quote);
        }
        book
    }
}

/// Looks up current quotes for one or more pairs in a single request.
///
/// Pairs the upstream knows nothing about are left out of the returned
/// book rather than failing the whole lookup.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_quotes(&self, pairs: &[CurrencyPair]) -> Result<QuoteBook>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_forms() {
        let pair = CurrencyPair::against_pivot("DOGE");
        assert_eq!(pair.id(), "DOGE-BRL");
        assert_eq!(pair.code(), "DOGEBRL");
        assert_eq!(pair.to_string(), "DOGE-BRL");
    }

    #[test]
    fn test_quote_book_lookup() {
        let book: QuoteBook = vec![RateQuote {
            pair: CurrencyPair::new("USD", "BRL"),
            bid: Some(4.9),
            ask: Some(5.0),
        }]
        .into_iter()
        .collect();

        assert_eq!(book.len(), 1);
        assert_eq!(
            book.get(&CurrencyPair::new("USD", "BRL")).and_then(|q| q.ask),
            Some(5.0)
        );
        assert!(book.get(&CurrencyPair::new("EUR", "BRL")).is_none());
    }

    #[test]
    fn test_supported_currencies() {
        assert!(is_supported("BTC"));
        assert!(is_supported("BRL"));
        assert!(!is_supported("XYZ"));
    }
}
