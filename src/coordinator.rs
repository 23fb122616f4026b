//! Refresh coordinator: queries the provider and owns the latest snapshot.

use std::sync::{Arc, OnceLock, RwLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ConfigEntry;
use crate::provider::{ProviderError, SuggestionProvider, SuggestionRequest};

const PROMPT_HEADER: &str = "Suggest useful home automations for the entities listed below. \
Start with a one-line summary, explain your reasoning, and finish with the automations \
in a ```yaml fenced code block.";

/// Snapshot produced by the most recent provider query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefreshResult {
    /// Raw suggestion text as returned by the provider.
    pub suggestions: String,
    /// First non-empty line of the reply, used as a short summary.
    pub description: String,
    /// YAML payload extracted from the reply, empty if none validated.
    pub yaml_block: String,
    pub last_update: Option<DateTime<Utc>>,
    pub entities_processed: Vec<String>,
    pub provider: String,
    pub last_error: Option<String>,
}

impl RefreshResult {
    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }

    /// True when a non-empty error string is stored.
    pub fn has_error(&self) -> bool {
        self.last_error.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// Polls the AI provider and holds the latest [`RefreshResult`].
///
/// One refresh runs per polling cycle, driven by the host scheduler. The
/// snapshot is the only shared mutable state; sensors read cloned copies.
pub struct Coordinator {
    config: ConfigEntry,
    provider: Arc<dyn SuggestionProvider>,
    data: RwLock<Option<RefreshResult>>,
}

impl Coordinator {
    pub fn new(config: ConfigEntry, provider: Arc<dyn SuggestionProvider>) -> Self {
        Self {
            config,
            provider,
            data: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &ConfigEntry {
        &self.config
    }

    /// Resolved `(input, output)` token budgets for provider calls.
    pub fn budgets(&self) -> (u32, u32) {
        self.config.token_budgets()
    }

    /// Clone of the latest snapshot, `None` before the first refresh.
    pub fn snapshot(&self) -> Option<RefreshResult> {
        self.data
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Query the provider about `entities` and store the resulting snapshot.
    ///
    /// Failures never propagate to the host: the error display string lands in
    /// `last_error` while every other field keeps its prior value. A reply
    /// with no text at all is treated as
    /// [`ProviderError::EmptyReply`](crate::provider::ProviderError::EmptyReply).
    pub async fn refresh(&self, entities: &[String]) -> RefreshResult {
        let (max_input_tokens, max_output_tokens) = self.budgets();
        let request = SuggestionRequest {
            prompt: build_prompt(entities),
            model: self.config.model(),
            max_input_tokens,
            max_output_tokens,
        };
        debug!(
            provider = %self.provider.name(),
            model = %request.model,
            entities = entities.len(),
            "Refreshing automation suggestions"
        );

        // Blank replies count as provider failures.
        let outcome = self.provider.generate(&request).await.and_then(|reply| {
            if reply.trim().is_empty() {
                Err(ProviderError::EmptyReply)
            } else {
                Ok(reply)
            }
        });

        let result = match outcome {
            Ok(reply) => RefreshResult {
                description: first_line(&reply),
                yaml_block: extract_yaml_block(&reply).unwrap_or_default(),
                suggestions: reply,
                last_update: Some(Utc::now()),
                entities_processed: entities.to_vec(),
                provider: self.config.provider(),
                last_error: None,
            },
            Err(e) => {
                warn!(provider = %self.provider.name(), error = %e, "Suggestion refresh failed");
                let mut prior = self.snapshot().unwrap_or_else(|| RefreshResult {
                    provider: self.config.provider(),
                    ..RefreshResult::default()
                });
                prior.last_error = Some(e.to_string());
                prior
            }
        };

        *self
            .data
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(result.clone());
        result
    }
}

fn build_prompt(entities: &[String]) -> String {
    if entities.is_empty() {
        return PROMPT_HEADER.to_string();
    }
    let listing: Vec<String> = entities.iter().map(|id| format!("- {id}")).collect();
    format!("{PROMPT_HEADER}\n\nEntities:\n{}", listing.join("\n"))
}

fn first_line(reply: &str) -> String {
    reply
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Pull the first ```yaml fenced block out of the reply, keeping it only if
/// it actually parses as YAML.
fn extract_yaml_block(reply: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?s)```yaml\s*\n(.*?)```").expect("valid yaml fence regex")
    });

    let block = re.captures(reply)?.get(1)?.as_str().trim().to_string();
    serde_yaml_bw::from_str::<serde_yaml_bw::Value>(&block).ok()?;
    Some(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_lists_entities() {
        let prompt = build_prompt(&["light.kitchen".into(), "sensor.door".into()]);
        assert!(prompt.contains("- light.kitchen"));
        assert!(prompt.contains("- sensor.door"));

        let bare = build_prompt(&[]);
        assert!(!bare.contains("Entities:"));
    }

    #[test]
    fn test_first_line_skips_blanks() {
        assert_eq!(first_line("\n\n  Turn off idle lights\nmore"), "Turn off idle lights");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn test_extract_yaml_block() {
        let reply = "Summary\n\n```yaml\nalias: lights off\ntrigger: []\n```\ntrailing";
        let block = extract_yaml_block(reply).unwrap();
        assert!(block.starts_with("alias: lights off"));
        assert!(!block.contains("```"));
    }

    #[test]
    fn test_extract_yaml_block_rejects_invalid() {
        let reply = "```yaml\n[unbalanced\n```";
        assert_eq!(extract_yaml_block(reply), None);

        assert_eq!(extract_yaml_block("no fences here"), None);
    }

    #[test]
    fn test_refresh_result_error_flags() {
        let mut result = RefreshResult::default();
        assert!(!result.has_error());
        assert!(!result.has_suggestions());

        result.last_error = Some(String::new());
        assert!(!result.has_error());

        result.last_error = Some("boom".into());
        assert!(result.has_error());
    }
}
