//! Structured review output and model-response normalization
//!
//! The model is instructed to answer with a single JSON object, but the
//! response is still free text from an external service. Normalization
//! enumerates the seven schema fields explicitly: a field that is missing or
//! of the wrong type takes its default, so a well-formed-but-incomplete
//! object is a successful (partially defaulted) review, while a response
//! that is not a JSON object at all is an error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// The fixed seven-field result of one code review
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewOutput {
    /// Bugs, logical errors, or runtime issues
    pub errors: Vec<String>,

    /// Suggestions for better structure, readability, and performance
    pub improvements: Vec<String>,

    /// Possible vulnerabilities or unsafe patterns
    pub security_issues: Vec<String>,

    /// Suggestions based on clean code principles
    pub clean_code: Vec<String>,

    /// Time and space complexity analysis, when the code is algorithmic
    pub complexity: String,

    /// Corrected and refactored version of the input code
    pub refactor_code: String,

    /// Short summary of the overall code quality
    pub summary: String,
}

impl ReviewOutput {
    /// Normalize raw model response text into a fully-populated output
    ///
    /// Fails with [`Error::MalformedModelResponse`] when the text is not a
    /// JSON object. Total over every JSON object, including `{}`.
    pub fn from_model_response(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| Error::MalformedModelResponse(e.to_string()))?;

        let object = value.as_object().ok_or_else(|| {
            Error::MalformedModelResponse("response is not a JSON object".to_string())
        })?;

        Ok(Self {
            errors: string_list(object, "errors"),
            improvements: string_list(object, "improvements"),
            security_issues: string_list(object, "security_issues"),
            clean_code: string_list(object, "clean_code"),
            complexity: string_field(object, "complexity"),
            refactor_code: string_field(object, "refactor_code"),
            summary: string_field(object, "summary"),
        })
    }
}

/// Take a field as a list of strings; anything else yields the empty default
fn string_list(object: &Map<String, Value>, key: &str) -> Vec<String> {
    match object.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<String>>>()
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Take a field as a string; anything else yields the empty default
fn string_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(text)) => text.clone(),
        _ => String::new(),
    }
}
