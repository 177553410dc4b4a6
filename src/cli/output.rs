//! Output modes and robot envelopes.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::error::PqError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Styled terminal output
    Human,
    /// One pretty-printed JSON document
    Json,
    /// Tab-separated rows for cut/awk
    Plain,
}

impl OutputFormat {
    /// Lenient parse for the config-file default; anything unrecognized
    /// falls back to human output.
    pub fn from_config(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" | "robot" => Self::Json,
            "plain" | "tsv" => Self::Plain,
            _ => Self::Human,
        }
    }
}

/// Render a value in the requested output format.
pub trait Formattable {
    fn format(&self, fmt: OutputFormat) -> String;
}

/// Envelope for robot-mode errors, printed to stdout so agents can rely
/// on a single stream.
#[derive(Serialize)]
pub struct RobotError {
    pub error: bool,
    pub code: &'static str,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl RobotError {
    pub fn from_error(err: &PqError) -> Self {
        Self {
            error: true,
            code: err.code(),
            message: err.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"error":true,"code":"{}","message":"serialize failed"}}"#, self.code)
        })
    }
}
