//! Config entry layers and token budget resolution.
//!
//! A config entry carries two layers: the `data` written at setup time and the
//! `options` the user may edit later. Every field resolves options-first, then
//! data, then a built-in default.

use serde::{Deserialize, Serialize};

/// Default budget applied to both input and output tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Model used when the entry does not configure one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Provider name used when the entry does not configure one.
pub const DEFAULT_PROVIDER: &str = "OpenAI";

/// One layer of entry settings. All fields are optional; unset fields fall
/// through to the next layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLayer {
    pub provider: Option<String>,
    pub model: Option<String>,
    /// Legacy single budget, kept for entries written before the split into
    /// input and output budgets.
    pub max_tokens: Option<u32>,
    pub max_input_tokens: Option<u32>,
    pub max_output_tokens: Option<u32>,
}

/// A persisted configuration entry: setup-time `data` plus user-editable
/// `options`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub data: EntryLayer,
    pub options: EntryLayer,
}

impl ConfigEntry {
    /// Create an entry with only a data layer.
    pub fn new(data: EntryLayer) -> Self {
        Self {
            data,
            options: EntryLayer::default(),
        }
    }

    /// Attach an options layer (builder pattern).
    pub fn with_options(mut self, options: EntryLayer) -> Self {
        self.options = options;
        self
    }

    fn field<T>(&self, pick: impl Fn(&EntryLayer) -> Option<T>) -> Option<T> {
        pick(&self.options).or_else(|| pick(&self.data))
    }

    /// Resolved provider name.
    pub fn provider(&self) -> String {
        self.field(|layer| layer.provider.clone())
            .unwrap_or_else(|| DEFAULT_PROVIDER.to_string())
    }

    /// Resolved model name.
    pub fn model(&self) -> String {
        self.field(|layer| layer.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// Resolved `(input, output)` token budgets.
    ///
    /// Each side resolves options-first, then data, then the legacy single
    /// `max_tokens` value, then [`DEFAULT_MAX_TOKENS`]. An entry that only
    /// configures the legacy value gets it on both sides.
    pub fn token_budgets(&self) -> (u32, u32) {
        let legacy = self.field(|layer| layer.max_tokens);
        let input = self
            .field(|layer| layer.max_input_tokens)
            .or(legacy)
            .unwrap_or(DEFAULT_MAX_TOKENS);
        let output = self
            .field(|layer| layer.max_output_tokens)
            .or(legacy)
            .unwrap_or(DEFAULT_MAX_TOKENS);
        (input, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_override_data_budgets() {
        let entry = ConfigEntry::new(EntryLayer {
            provider: Some("OpenAI".into()),
            max_tokens: Some(50),
            ..EntryLayer::default()
        })
        .with_options(EntryLayer {
            max_input_tokens: Some(100),
            max_output_tokens: Some(200),
            ..EntryLayer::default()
        });

        assert_eq!(entry.token_budgets(), (100, 200));
    }

    #[test]
    fn test_legacy_max_tokens_fills_both_sides() {
        let entry = ConfigEntry::new(EntryLayer {
            provider: Some("OpenAI".into()),
            max_tokens: Some(30),
            ..EntryLayer::default()
        });

        assert_eq!(entry.token_budgets(), (30, 30));
    }

    #[test]
    fn test_unconfigured_budgets_default() {
        let entry = ConfigEntry::default();
        assert_eq!(
            entry.token_budgets(),
            (DEFAULT_MAX_TOKENS, DEFAULT_MAX_TOKENS)
        );
    }

    #[test]
    fn test_partial_split_falls_back_to_legacy() {
        let entry = ConfigEntry::new(EntryLayer {
            max_tokens: Some(80),
            max_input_tokens: Some(400),
            ..EntryLayer::default()
        });

        assert_eq!(entry.token_budgets(), (400, 80));
    }

    #[test]
    fn test_model_and_provider_resolution() {
        let entry = ConfigEntry::new(EntryLayer {
            model: Some("model-a".into()),
            ..EntryLayer::default()
        });
        assert_eq!(entry.model(), "model-a");
        assert_eq!(entry.provider(), DEFAULT_PROVIDER);

        let overridden = entry.with_options(EntryLayer {
            model: Some("model-b".into()),
            ..EntryLayer::default()
        });
        assert_eq!(overridden.model(), "model-b");
    }
}
