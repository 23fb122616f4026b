//! # ai-automation-suggester
//!
//! Core of an AI-powered automation suggester for smart-home platforms: a
//! refresh [`Coordinator`] that asks an AI provider for automation
//! suggestions, and a set of read-only [`sensor`] views projecting the latest
//! refresh snapshot into displayable state.
//!
//! The AI provider itself is an external collaborator behind the
//! [`SuggestionProvider`] trait; polling cadence is driven by the host
//! platform's scheduler.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use ai_automation_suggester::{
//!     ConfigEntry, Coordinator, EntryLayer, Sensor, SuggestionsSensor,
//! };
//!
//! # fn provider() -> Arc<dyn ai_automation_suggester::SuggestionProvider> { unimplemented!() }
//! # async fn example() {
//! let config = ConfigEntry::new(EntryLayer {
//!     provider: Some("OpenAI".into()),
//!     model: Some("gpt-4o-mini".into()),
//!     ..EntryLayer::default()
//! });
//!
//! let coordinator = Arc::new(Coordinator::new(config, provider()));
//! coordinator.refresh(&["light.kitchen".into()]).await;
//!
//! let suggestions = SuggestionsSensor::new(coordinator.clone());
//! println!("{}", suggestions.native_value());
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod coordinator;
pub mod provider;
pub mod sensor;

// Re-exports for convenience
pub use config::{ConfigEntry, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_PROVIDER, EntryLayer};
pub use coordinator::{Coordinator, RefreshResult};
pub use provider::{ProviderError, ProviderResult, SuggestionProvider, SuggestionRequest};
pub use sensor::{
    LastErrorSensor, MaxInputTokensSensor, MaxOutputTokensSensor, ModelSensor, SENSOR_DESCRIPTIONS,
    Sensor, SensorDescription, SensorKey, SensorValue, StatusSensor, SuggestionsSensor,
    build_sensors,
};
