use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use anyhow::Result;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::FluentResource;
use unic_langid::LanguageIdentifier;

/// English message catalog, compiled into the binary so the bot never
/// depends on a working directory layout.
const EN_MAIN_FTL: &str = include_str!("../locales/en/main.ftl");

/// Localization manager for the Notekeeper Bot
pub struct LocalizationManager {
    bundles: HashMap<String, Arc<FluentBundle<FluentResource>>>,
}

impl LocalizationManager {
    /// Create a new localization manager
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        let en_locale: LanguageIdentifier = "en".parse()?;
        let bundle = Self::create_bundle(&en_locale, EN_MAIN_FTL)?;
        bundles.insert("en".to_string(), Arc::new(bundle));

        Ok(Self { bundles })
    }

    fn create_bundle(
        locale: &LanguageIdentifier,
        source: &str,
    ) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);

        match FluentResource::try_new(source.to_string()) {
            Ok(resource) => {
                let _ = bundle.add_resource(resource);
            }
            Err((resource, _errors)) => {
                // A partially parsed resource still carries the valid messages.
                let _ = bundle.add_resource(resource);
            }
        }

        Ok(bundle)
    }

    /// Get a localized message, falling back to the key itself when the
    /// catalog has no entry for it.
    pub fn get_message(&self, key: &str) -> String {
        let Some(bundle) = self.bundles.get("en") else {
            return key.to_string();
        };

        let Some(msg) = bundle.get_message(key) else {
            return key.to_string();
        };

        let Some(pattern) = msg.value() else {
            return key.to_string();
        };

        let mut errors = vec![];
        bundle.format_pattern(pattern, None, &mut errors).to_string()
    }
}

static LOCALIZATION_MANAGER: OnceLock<LocalizationManager> = OnceLock::new();

/// Get the global localization manager, initializing it on first use.
pub fn get_localization_manager() -> &'static LocalizationManager {
    LOCALIZATION_MANAGER.get_or_init(|| {
        LocalizationManager::new().unwrap_or(LocalizationManager {
            bundles: HashMap::new(),
        })
    })
}

/// Convenience function to get a localized message
pub fn t(key: &str) -> String {
    get_localization_manager().get_message(key)
}
