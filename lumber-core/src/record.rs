//! Log levels and records.

use crate::field::Field;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Log severity, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One fully-constructed log record: immutable once built, handed to the
/// sink and discarded. Fields keep their append order.
#[derive(Debug, Clone)]
pub struct Record {
    pub ts: DateTime<Utc>,
    pub level: Level,
    pub msg: String,
    pub fields: Vec<Field>,
}

impl Record {
    pub fn new(level: Level, msg: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            ts: Utc::now(),
            level,
            msg: msg.into(),
            fields,
        }
    }

    /// Look up the first field with the given key.
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Encode as one JSON line with the fixed keys `ts`, `level`, `msg`
    /// followed by every field in append order.
    ///
    /// The line is assembled by hand rather than through a JSON map so
    /// that duplicate field keys are all emitted.
    pub fn to_json_line(&self) -> String {
        let mut line = String::with_capacity(96 + self.fields.len() * 24);
        line.push_str("{\"ts\":");
        line.push_str(&json_string(&self.ts.to_rfc3339()));
        line.push_str(",\"level\":\"");
        line.push_str(self.level.as_str());
        line.push_str("\",\"msg\":");
        line.push_str(&json_string(&self.msg));
        for field in &self.fields {
            line.push(',');
            line.push_str(&json_string(&field.key));
            line.push(':');
            line.push_str(&field.value.to_json().to_string());
        }
        line.push('}');
        line
    }
}

fn json_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_default()
}
