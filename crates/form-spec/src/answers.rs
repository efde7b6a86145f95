use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_cbor::{to_vec, value::to_value};
use serde_json::Value;

/// Value bag: field id to submitted value, scoped either to the whole form or
/// to one repeatable entry.
pub type ValueBag = serde_json::Map<String, Value>;

/// Stable failure codes surfaced to callers verbatim. Localization happens
/// outside the engine, keyed by these labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureCode {
    Required,
    NoAccents,
    InvalidDate,
    InvalidOption,
    TypeMismatch,
}

impl FailureCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCode::Required => "required",
            FailureCode::NoAccents => "no_accents",
            FailureCode::InvalidDate => "invalid_date",
            FailureCode::InvalidOption => "invalid_option",
            FailureCode::TypeMismatch => "type_mismatch",
        }
    }
}

/// One failed check, addressed by a dotted/indexed field path such as
/// `companions[0].name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationError {
    pub field: String,
    pub code: FailureCode,
}

/// Outcome of validating a value bag. Data failures are values, never errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub(crate) fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Failure codes grouped per field path, the shape endpoint payloads use.
    pub fn errors_by_field(&self) -> BTreeMap<String, Vec<FailureCode>> {
        let mut map: BTreeMap<String, Vec<FailureCode>> = BTreeMap::new();
        for error in &self.errors {
            map.entry(error.field.clone()).or_default().push(error.code);
        }
        map
    }

    /// Codes recorded for one field path.
    pub fn codes_for(&self, field: &str) -> Vec<FailureCode> {
        self.errors
            .iter()
            .filter(|error| error.field == field)
            .map(|error| error.code)
            .collect()
    }
}

/// Optional metadata paired with an `AnswerSet`. Timestamps are RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct AnswerMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Answers captured for one application, in transit or at rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnswerSet {
    pub application_id: String,
    pub answers: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<AnswerMeta>,
}

impl AnswerSet {
    /// Creates a fresh empty answer set for an application.
    pub fn new(application_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            answers: Value::Object(Default::default()),
            meta: None,
        }
    }

    /// Serializes the answer set as canonical CBOR bytes.
    pub fn to_cbor(&self) -> Result<Vec<u8>, serde_cbor::Error> {
        let canonical = to_value(self)?;
        to_vec(&canonical)
    }

    /// Serializes the answer set as indented JSON for debugging.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
