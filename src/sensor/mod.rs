//! Read-only sensor views over the coordinator snapshot.
//!
//! Each sensor is a pure projection: its value derives from the latest
//! [`RefreshResult`](crate::coordinator::RefreshResult) and static config,
//! with no state of its own.

mod views;

pub use views::{
    LastErrorSensor, MaxInputTokensSensor, MaxOutputTokensSensor, ModelSensor, StatusSensor,
    SuggestionsSensor,
};

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coordinator::Coordinator;

pub const STATUS_CONNECTED: &str = "connected";
pub const STATUS_ERROR: &str = "error";
pub const STATUS_INITIALIZING: &str = "initializing";

pub const NO_SUGGESTIONS: &str = "No Suggestions";
pub const NEW_SUGGESTIONS: &str = "New Suggestions Available";
pub const NO_ERROR: &str = "No Error";

/// Fixed identifier of each produced sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKey {
    Suggestions,
    Status,
    MaxInputTokens,
    MaxOutputTokens,
    Model,
    LastError,
}

impl SensorKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suggestions => "suggestions",
            Self::Status => "status",
            Self::MaxInputTokens => "max_input_tokens",
            Self::MaxOutputTokens => "max_output_tokens",
            Self::Model => "model",
            Self::LastError => "last_error",
        }
    }
}

impl fmt::Display for SensorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static display metadata for one sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorDescription {
    pub key: SensorKey,
    pub name: &'static str,
    pub icon: &'static str,
}

/// One description per produced sensor, in display order.
pub const SENSOR_DESCRIPTIONS: [SensorDescription; 6] = [
    SensorDescription {
        key: SensorKey::Suggestions,
        name: "AI Automation Suggestions",
        icon: "mdi:robot",
    },
    SensorDescription {
        key: SensorKey::Status,
        name: "AI Provider Status",
        icon: "mdi:lan-connect",
    },
    SensorDescription {
        key: SensorKey::MaxInputTokens,
        name: "Max Input Tokens",
        icon: "mdi:arrow-down-bold",
    },
    SensorDescription {
        key: SensorKey::MaxOutputTokens,
        name: "Max Output Tokens",
        icon: "mdi:arrow-up-bold",
    },
    SensorDescription {
        key: SensorKey::Model,
        name: "AI Model",
        icon: "mdi:brain",
    },
    SensorDescription {
        key: SensorKey::LastError,
        name: "AI Last Error",
        icon: "mdi:alert-circle-outline",
    },
];

impl SensorDescription {
    pub fn for_key(key: SensorKey) -> &'static SensorDescription {
        SENSOR_DESCRIPTIONS
            .iter()
            .find(|desc| desc.key == key)
            .expect("every SensorKey has a description")
    }
}

/// Value a sensor displays as its native state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SensorValue {
    Text(String),
    Tokens(u32),
}

impl SensorValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Tokens(_) => None,
        }
    }

    pub fn as_tokens(&self) -> Option<u32> {
        match self {
            Self::Tokens(tokens) => Some(*tokens),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Tokens(tokens) => write!(f, "{tokens}"),
        }
    }
}

/// Common surface of every sensor view.
pub trait Sensor: Send + Sync {
    fn description(&self) -> &SensorDescription;

    fn key(&self) -> SensorKey {
        self.description().key
    }

    fn name(&self) -> &'static str {
        self.description().name
    }

    /// Displayed state, derived from the latest snapshot and static config.
    fn native_value(&self) -> SensorValue;

    /// Extra displayed attributes; empty by default.
    fn extra_attributes(&self) -> Map<String, Value> {
        Map::new()
    }
}

/// Build one sensor per [`SensorKey`] over the given coordinator.
pub fn build_sensors(coordinator: Arc<Coordinator>) -> Vec<Box<dyn Sensor>> {
    vec![
        Box::new(SuggestionsSensor::new(coordinator.clone())),
        Box::new(StatusSensor::new(coordinator.clone())),
        Box::new(MaxInputTokensSensor::new(coordinator.clone())),
        Box::new(MaxOutputTokensSensor::new(coordinator.clone())),
        Box::new(ModelSensor::new(coordinator.clone())),
        Box::new(LastErrorSensor::new(coordinator)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_key_strings() {
        assert_eq!(SensorKey::Suggestions.as_str(), "suggestions");
        assert_eq!(SensorKey::MaxInputTokens.as_str(), "max_input_tokens");
        assert_eq!(SensorKey::LastError.to_string(), "last_error");
    }

    #[test]
    fn test_description_lookup_covers_all_keys() {
        for desc in SENSOR_DESCRIPTIONS {
            assert_eq!(SensorDescription::for_key(desc.key).key, desc.key);
            assert!(!desc.name.is_empty());
            assert!(desc.icon.starts_with("mdi:"));
        }
    }

    #[test]
    fn test_sensor_value_accessors() {
        let text = SensorValue::Text("connected".into());
        assert_eq!(text.as_text(), Some("connected"));
        assert_eq!(text.as_tokens(), None);
        assert_eq!(text.to_string(), "connected");

        let tokens = SensorValue::Tokens(500);
        assert_eq!(tokens.as_tokens(), Some(500));
        assert_eq!(tokens.to_string(), "500");
    }
}
