//! State owned by one run of the application.

use crate::core::config::AppConfig;
use crate::core::forms::{FormState, PersistentForm};
use crate::core::i18n::{Language, Translator};
use crate::core::interstitial::InteractionCounter;
use crate::core::quote::QuoteProvider;
use crate::core::store::Store;
use crate::providers::AwesomeApiProvider;
use crate::store::KeyValueStore;
use anyhow::Result;
use tracing::debug;

const FORMS_COLLECTION: &str = "forms";

pub struct Session {
    config: AppConfig,
    translator: Translator,
    store: KeyValueStore,
    counter: InteractionCounter,
    quotes: Box<dyn QuoteProvider + Send + Sync>,
}

impl Session {
    /// Builds a session from config, opening the on-disk form store and the
    /// configured quote provider. `language` overrides the configured one.
    pub fn new(config: AppConfig, language: Option<Language>) -> Result<Self> {
        let language = language.unwrap_or(config.language);
        let store = match config.default_data_path() {
            Ok(path) => KeyValueStore::open(&path.join(FORMS_COLLECTION)),
            Err(e) => {
                debug!("No data directory ({}), keeping forms in memory", e);
                KeyValueStore::in_memory()
            }
        };
        let quotes = AwesomeApiProvider::new(config.awesomeapi_base_url())?;
        Ok(Self::with_parts(
            config,
            Translator::new(language),
            store,
            Box::new(quotes),
        ))
    }

    pub fn with_parts(
        config: AppConfig,
        translator: Translator,
        store: KeyValueStore,
        quotes: Box<dyn QuoteProvider + Send + Sync>,
    ) -> Self {
        let counter = InteractionCounter::new(config.interstitial.threshold);
        Self {
            config,
            translator,
            store,
            counter,
            quotes,
        }
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn quote_provider(&self) -> &(dyn QuoteProvider + Send + Sync) {
        self.quotes.as_ref()
    }

    /// Loads a remembered form; changes made through it are saved immediately.
    pub fn form<T: FormState>(&self) -> PersistentForm<T> {
        PersistentForm::load(
            self.store.get_collection(FORMS_COLLECTION),
            self.config.form_retention(),
        )
    }

    /// Counts a user interaction; `true` means the advertisement panel is due.
    pub fn record_interaction(&mut self) -> bool {
        let due = self.counter.record();
        debug!(count = self.counter.count(), due, "Recorded interaction");
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forms::CurrencyForm;
    use crate::core::quote::{CurrencyPair, QuoteBook};
    use async_trait::async_trait;

    struct NoQuotes;

    #[async_trait]
    impl QuoteProvider for NoQuotes {
        async fn fetch_quotes(&self, _pairs: &[CurrencyPair]) -> Result<QuoteBook> {
            Ok(QuoteBook::new())
        }
    }

    fn test_session(threshold: u32) -> Session {
        let mut config = AppConfig::default();
        config.interstitial.threshold = threshold;
        Session::with_parts(
            config,
            Translator::new(Language::En),
            KeyValueStore::in_memory(),
            Box::new(NoQuotes),
        )
    }

    #[test]
    fn test_counter_uses_configured_threshold() {
        let mut session = test_session(1);
        assert!(!session.record_interaction());
        assert!(session.record_interaction());
        assert!(!session.record_interaction());
    }

    #[test]
    fn test_forms_share_the_session_store() {
        let session = test_session(2);
        let mut form = session.form::<CurrencyForm>();
        form.update(|f| f.amount = "42".to_string());
        assert_eq!(session.form::<CurrencyForm>().get().amount, "42");
    }

    #[test]
    fn test_new_session_uses_configured_data_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_path: Some(dir.path().to_string_lossy().to_string()),
            ..AppConfig::default()
        };
        let session = Session::new(config, Some(Language::En)).unwrap();
        assert_eq!(session.translator().language(), Language::En);
        assert!(dir.path().join("forms").exists());
    }
}
