//! Wire types exchanged with the simulation backend.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::simulation::error::SimulationError;

/// Request body sent to the simulation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub message: String,
    pub auth_token: String,
    pub use_encryption: bool,
    pub enc_key: String,
}

impl Default for SimulationRequest {
    fn default() -> Self {
        Self {
            message: "Hello from parent!".to_string(),
            auth_token: "SECRET123".to_string(),
            use_encryption: true,
            enc_key: "3".to_string(),
        }
    }
}

/// Which simulated party a step is attributed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Parent,
    Child,
    /// Kernel-side work (pipe creation, fork, auth checks). Shown in the step
    /// log only.
    System,
    #[serde(other)]
    #[default]
    Unknown,
}

impl Actor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Actor::Parent => "parent",
            Actor::Child => "child",
            Actor::System => "system",
            Actor::Unknown => "unknown",
        }
    }

    /// The panel this actor's steps update, if any.
    pub fn side(&self) -> Option<Side> {
        match self {
            Actor::Parent => Some(Side::Parent),
            Actor::Child => Some(Side::Child),
            Actor::System | Actor::Unknown => None,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two actor panels of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Parent,
    Child,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Parent => "Parent",
            Side::Child => "Child",
        }
    }
}

/// Values an actor holds after a step. The backend sends other keys too
/// (descriptor numbers, byte counts); only the displayable payloads are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataAfter {
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub encrypted: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub message_plain: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub decrypted: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub final_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_actor")]
    pub actor: Actor,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default)]
    pub data_after: Option<DataAfter>,
    #[serde(default, deserialize_with = "lenient_opt_text")]
    pub pipe_data: Option<String>,
}

impl Step {
    pub fn new(title: impl Into<String>, actor: Actor) -> Self {
        Self {
            title: title.into(),
            actor,
            description: String::new(),
            data_after: None,
            pipe_data: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_data(mut self, data: DataAfter) -> Self {
        self.data_after = Some(data);
        self
    }

    pub fn with_pipe_data(mut self, payload: impl Into<String>) -> Self {
        self.pipe_data = Some(payload.into());
        self
    }

    /// Payload to animate through the pipe. Empty strings do not animate.
    pub fn pipe_payload(&self) -> Option<&str> {
        self.pipe_data.as_deref().filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub level: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: String,
}

impl LogEntry {
    pub fn new(
        timestamp: impl Into<String>,
        level: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            level: level.into(),
            message: message.into(),
        }
    }
}

/// Overall outcome the backend reports alongside the steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_encryption: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<i64>,
}

impl SimulationSummary {
    /// One-line description for status bars.
    pub fn describe(&self) -> String {
        if !self.success {
            return match &self.reason {
                Some(reason) => format!("Simulation failed: {reason}"),
                None => "Simulation failed".to_string(),
            };
        }

        let mut text = "Simulation succeeded".to_string();
        if let Some(message) = &self.final_message {
            text.push_str(&format!(": child received \"{message}\""));
        }
        match (self.used_encryption, self.key) {
            (Some(true), Some(key)) => text.push_str(&format!(" (encrypted, key={key})")),
            (Some(true), None) => text.push_str(" (encrypted)"),
            (Some(false), _) => text.push_str(" (plain text)"),
            (None, _) => {}
        }
        text
    }
}

/// A complete, precomputed simulation ready for playback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationResult {
    pub steps: Vec<Step>,
    pub logs: Vec<LogEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SimulationSummary>,
}

impl SimulationResult {
    pub fn new(steps: Vec<Step>, logs: Vec<LogEntry>) -> Self {
        Self {
            steps,
            logs,
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: SimulationSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Parse a backend response body.
    ///
    /// A body without a `steps` array cannot be played back and is rejected.
    /// Everything below that is converted item by item: an unusable step or
    /// log entry is dropped with a warning and the rest still plays.
    pub fn from_json(body: &str) -> Result<Self, SimulationError> {
        let raw: RawResponse = serde_json::from_str(body)
            .map_err(|e| SimulationError::Malformed(e.to_string()))?;

        let steps = match raw.steps {
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| step_from_value(index, item))
                .collect(),
            Some(other) => {
                return Err(SimulationError::Malformed(format!(
                    "`steps` must be an array, got {}",
                    json_type(&other)
                )))
            }
            None => {
                return Err(SimulationError::Malformed(
                    "response has no `steps` array".into(),
                ))
            }
        };

        let logs = match raw.logs {
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| match serde_json::from_value::<LogEntry>(item) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        tracing::warn!(log = index, error = %e, "Skipping malformed log entry");
                        None
                    }
                })
                .collect(),
            Some(other) => {
                tracing::warn!(
                    kind = json_type(&other),
                    "Simulation `logs` is not an array; treating as empty"
                );
                Vec::new()
            }
            None => {
                tracing::warn!("Simulation response has no `logs` array; treating as empty");
                Vec::new()
            }
        };

        let summary = raw
            .summary
            .and_then(|value| match serde_json::from_value::<SimulationSummary>(value) {
                Ok(summary) => Some(summary),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring malformed simulation summary");
                    None
                }
            });

        Ok(Self {
            steps,
            logs,
            summary,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    steps: Option<Value>,
    #[serde(default)]
    logs: Option<Value>,
    #[serde(default)]
    summary: Option<Value>,
}

/// Convert one step, retrying without its payload fields if those are the
/// problem. `None` when nothing usable is left.
fn step_from_value(index: usize, item: Value) -> Option<Step> {
    let mut item = match serde_json::from_value::<Step>(item.clone()) {
        Ok(step) => return Some(step),
        Err(e) => {
            tracing::warn!(step = index, error = %e, "Dropping unusable step payload");
            item
        }
    };

    if let Value::Object(fields) = &mut item {
        fields.remove("dataAfter");
        fields.remove("pipeData");
    }

    match serde_json::from_value::<Step>(item) {
        Ok(step) => Some(step),
        Err(e) => {
            tracing::warn!(step = index, error = %e, "Skipping malformed step");
            None
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Text of a scalar JSON value. Numbers and booleans are shown as written;
/// null, arrays and objects have no text.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_actor<'de, D>(deserializer: D) -> Result<Actor, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Actor::deserialize(value).unwrap_or(Actor::Unknown))
}
