use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Languages with a bundled resource file, the first one is the fallback
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["ru", "en"];

const RU_RESOURCE: &str = include_str!("../locales/ru/main.ftl");
const EN_RESOURCE: &str = include_str!("../locales/en/main.ftl");

/// Localization manager for the culture bot
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
    fallback: String,
}

impl LocalizationManager {
    /// Create a new localization manager falling back to Russian
    pub fn new() -> Result<Self> {
        Self::with_fallback(SUPPORTED_LANGUAGES[0])
    }

    /// Create a localization manager with the given fallback language
    pub fn with_fallback(fallback: &str) -> Result<Self> {
        let mut bundles = HashMap::new();

        for (code, source) in [("ru", RU_RESOURCE), ("en", EN_RESOURCE)] {
            let locale: LanguageIdentifier = code.parse()?;
            bundles.insert(code.to_string(), Self::create_bundle(&locale, source)?);
        }

        let fallback = if bundles.contains_key(fallback) {
            fallback.to_string()
        } else {
            warn!(language = %fallback, "Unsupported fallback language, using ru");
            SUPPORTED_LANGUAGES[0].to_string()
        };

        Ok(Self { bundles, fallback })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(
        locale: &LanguageIdentifier,
        source: &str,
    ) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Telegram shows the Unicode isolation marks verbatim
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Invalid resource for {locale}: {errors:?}"))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Duplicate messages for {locale}: {errors:?}"))?;

        Ok(bundle)
    }

    pub fn fallback_language(&self) -> &str {
        &self.fallback
    }

    /// Get a localized message in a specific language
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let bundle = match self
            .bundles
            .get(language)
            .or_else(|| self.bundles.get(&self.fallback))
        {
            Some(bundle) => bundle,
            None => return format!("Missing translation: {}", key),
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (name, value) in args {
                fluent_args.set(*name, FluentValue::from(*value));
            }
            fluent_args
        });

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            warn!(key = %key, language = %language, errors = ?errors, "Fluent formatting errors");
        }

        value.into_owned()
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, language: &str, args: &[(&str, &str)]) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message_in_language(key, language, Some(&args_map))
    }
}

/// Global localization instance
static LOCALIZATION_MANAGER: OnceLock<LocalizationManager> = OnceLock::new();

/// Initialize the global localization manager with a fallback language
pub fn init_localization(fallback: &str) -> Result<()> {
    if LOCALIZATION_MANAGER.get().is_some() {
        return Ok(());
    }
    let manager = LocalizationManager::with_fallback(fallback)?;
    // Another thread may have won the race, both managers are equivalent
    let _ = LOCALIZATION_MANAGER.set(manager);
    Ok(())
}

/// Get the global localization manager, if initialized
pub fn get_localization_manager() -> Option<&'static LocalizationManager> {
    LOCALIZATION_MANAGER.get()
}

/// Map a Telegram language code such as `en-US` to a supported language
pub fn detect_language(language_code: Option<&str>) -> &'static str {
    let fallback = get_localization_manager()
        .map(|manager| manager.fallback_language())
        .unwrap_or(SUPPORTED_LANGUAGES[0]);

    let primary = language_code
        .and_then(|code| code.split(['-', '_']).next())
        .map(|code| code.to_lowercase());

    SUPPORTED_LANGUAGES
        .iter()
        .copied()
        .find(|supported| primary.as_deref() == Some(*supported))
        .or_else(|| SUPPORTED_LANGUAGES.iter().copied().find(|s| *s == fallback))
        .unwrap_or(SUPPORTED_LANGUAGES[0])
}

/// Convenience function to get a localized message for a user language code
pub fn t_lang(key: &str, language_code: Option<&str>) -> String {
    t_args_lang(key, &[], language_code)
}

/// Convenience function to get a localized message with arguments
pub fn t_args_lang(key: &str, args: &[(&str, &str)], language_code: Option<&str>) -> String {
    let language = detect_language(language_code);
    match get_localization_manager() {
        Some(manager) => manager.get_message_with_args(key, language, args),
        None => {
            if let Err(e) = init_localization(SUPPORTED_LANGUAGES[0]) {
                warn!(error = %e, "Failed to initialize localization");
                return format!("Missing translation: {}", key);
            }
            match get_localization_manager() {
                Some(manager) => manager.get_message_with_args(key, language, args),
                None => format!("Missing translation: {}", key),
            }
        }
    }
}
