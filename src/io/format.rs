//! Format definitions for CLI output.
//!
//! Build orchestrators read the JSON form; humans read the text form.

use crate::error::SchemagateError;
use crate::io::exit_code::ExitCode;
use serde::{Deserialize, Serialize};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text (default)
    Text,
    /// JSON for build tool integration
    Json,
}

impl OutputFormat {
    /// Create format from JSON flag.
    #[must_use]
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }

    /// Check if format is JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Standard JSON response format.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResponse<T = serde_json::Value>
where
    T: Serialize,
{
    /// Status: "success" or "error"
    pub status: String,

    /// Result code (e.g., "OK", "NOT_FOUND", "CONFIG_ERROR")
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Actual data payload (only for success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Recovery hints extracted from the error (only for errors)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,

    /// Exit code for shell scripts
    pub exit_code: u8,
}

impl<T> JsonResponse<T>
where
    T: Serialize,
{
    /// Create a success response with data.
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            code: "OK".to_string(),
            message: "Operation completed successfully".to_string(),
            data: Some(data),
            suggestions: Vec::new(),
            exit_code: ExitCode::Success as u8,
        }
    }
}

impl JsonResponse<serde_json::Value> {
    /// Create an error response from a CLI error.
    ///
    /// "Suggestion:" lines in the message are lifted into `suggestions`.
    pub fn from_error(error: &SchemagateError) -> Self {
        let full = error.to_string();
        let mut message_lines = Vec::new();
        let mut suggestions = Vec::new();
        for line in full.lines() {
            match line.strip_prefix("Suggestion:") {
                Some(hint) => suggestions.push(hint.trim().to_string()),
                None => message_lines.push(line),
            }
        }

        Self {
            status: "error".to_string(),
            code: error.status_code().to_string(),
            message: message_lines.join("\n"),
            data: None,
            suggestions,
            exit_code: error.exit_code() as u8,
        }
    }
}
