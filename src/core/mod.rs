//! Core business logic abstractions

pub mod config;
pub mod converter;
pub mod finance;
pub mod forms;
pub mod health;
pub mod i18n;
pub mod interstitial;
pub mod log;
pub mod measurement;
pub mod quote;
pub mod store;

// Re-export main types for cleaner imports
pub use converter::{ConversionError, ConversionRequest, ConversionResult, RateConverter};
pub use i18n::{Language, Translator};
pub use quote::{CurrencyPair, QuoteBook, QuoteProvider, RateQuote};
