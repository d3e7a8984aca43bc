//! Display records appended to the step and message logs.

use std::fmt;

use crate::simulation::{Actor, LogEntry, Step};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub title: String,
    pub actor: Actor,
    pub description: String,
}

impl From<&Step> for StepRecord {
    fn from(step: &Step) -> Self {
        Self {
            title: step.title.clone(),
            actor: step.actor,
            description: step.description.clone(),
        }
    }
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] - {}", self.title, self.actor, self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

impl From<&LogEntry> for LogRecord {
    fn from(entry: &LogEntry) -> Self {
        Self {
            timestamp: entry.timestamp.clone(),
            level: entry.level.clone(),
            message: entry.message.clone(),
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.timestamp, self.level, self.message)
    }
}
