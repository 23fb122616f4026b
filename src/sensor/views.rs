//! The six concrete sensor views.

use std::sync::Arc;

use serde_json::{Map, Value, json};

use super::{
    NEW_SUGGESTIONS, NO_ERROR, NO_SUGGESTIONS, STATUS_CONNECTED, STATUS_ERROR, STATUS_INITIALIZING,
    Sensor, SensorDescription, SensorKey, SensorValue,
};
use crate::coordinator::Coordinator;

macro_rules! sensor_view {
    ($(#[$doc:meta])* $name:ident, $key:expr) => {
        $(#[$doc])*
        pub struct $name {
            coordinator: Arc<Coordinator>,
            description: &'static SensorDescription,
        }

        impl $name {
            pub fn new(coordinator: Arc<Coordinator>) -> Self {
                Self {
                    coordinator,
                    description: SensorDescription::for_key($key),
                }
            }
        }
    };
}

sensor_view!(
    /// "No Suggestions" / "New Suggestions Available", with the suggestion
    /// payload in the attributes.
    SuggestionsSensor,
    SensorKey::Suggestions
);

sensor_view!(
    /// "initializing" before the first refresh, then "connected" or "error".
    StatusSensor,
    SensorKey::Status
);

sensor_view!(
    /// Resolved input token budget.
    MaxInputTokensSensor,
    SensorKey::MaxInputTokens
);

sensor_view!(
    /// Resolved output token budget.
    MaxOutputTokensSensor,
    SensorKey::MaxOutputTokens
);

sensor_view!(
    /// Configured model name.
    ModelSensor,
    SensorKey::Model
);

sensor_view!(
    /// "No Error" or the stored error text, verbatim.
    LastErrorSensor,
    SensorKey::LastError
);

impl Sensor for SuggestionsSensor {
    fn description(&self) -> &SensorDescription {
        self.description
    }

    fn native_value(&self) -> SensorValue {
        let text = match self.coordinator.snapshot() {
            Some(snap) if snap.has_suggestions() => NEW_SUGGESTIONS,
            _ => NO_SUGGESTIONS,
        };
        SensorValue::Text(text.to_string())
    }

    fn extra_attributes(&self) -> Map<String, Value> {
        let mut attrs = Map::new();
        if let Some(snap) = self.coordinator.snapshot() {
            attrs.insert("suggestions".into(), Value::String(snap.suggestions));
            attrs.insert("description".into(), Value::String(snap.description));
            attrs.insert("yaml_block".into(), Value::String(snap.yaml_block));
            attrs.insert("last_update".into(), json!(snap.last_update));
            attrs.insert("provider".into(), Value::String(snap.provider));
            attrs.insert(
                "entities_processed_count".into(),
                Value::from(snap.entities_processed.len()),
            );
        }
        attrs
    }
}

impl Sensor for StatusSensor {
    fn description(&self) -> &SensorDescription {
        self.description
    }

    fn native_value(&self) -> SensorValue {
        let status = match self.coordinator.snapshot() {
            None => STATUS_INITIALIZING,
            Some(snap) if snap.has_error() => STATUS_ERROR,
            Some(_) => STATUS_CONNECTED,
        };
        SensorValue::Text(status.to_string())
    }

    fn extra_attributes(&self) -> Map<String, Value> {
        let mut attrs = Map::new();
        attrs.insert(
            "provider".into(),
            Value::String(self.coordinator.config().provider()),
        );
        attrs
    }
}

impl Sensor for MaxInputTokensSensor {
    fn description(&self) -> &SensorDescription {
        self.description
    }

    fn native_value(&self) -> SensorValue {
        SensorValue::Tokens(self.coordinator.budgets().0)
    }
}

impl Sensor for MaxOutputTokensSensor {
    fn description(&self) -> &SensorDescription {
        self.description
    }

    fn native_value(&self) -> SensorValue {
        SensorValue::Tokens(self.coordinator.budgets().1)
    }
}

impl Sensor for ModelSensor {
    fn description(&self) -> &SensorDescription {
        self.description
    }

    fn native_value(&self) -> SensorValue {
        SensorValue::Text(self.coordinator.config().model())
    }

    fn extra_attributes(&self) -> Map<String, Value> {
        let mut attrs = Map::new();
        attrs.insert(
            "provider".into(),
            Value::String(self.coordinator.config().provider()),
        );
        attrs
    }
}

impl Sensor for LastErrorSensor {
    fn description(&self) -> &SensorDescription {
        self.description
    }

    fn native_value(&self) -> SensorValue {
        let text = self
            .coordinator
            .snapshot()
            .and_then(|snap| snap.last_error.filter(|e| !e.is_empty()))
            .unwrap_or_else(|| NO_ERROR.to_string());
        SensorValue::Text(text)
    }
}
