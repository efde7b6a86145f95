use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::i18n::LocalizedText;

/// Supported field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Select,
    Radio,
    Date,
    File,
    Repeatable,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Select => "select",
            FieldKind::Radio => "radio",
            FieldKind::Date => "date",
            FieldKind::File => "file",
            FieldKind::Repeatable => "repeatable",
        }
    }
}

/// One selectable choice for select/radio fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldOption {
    pub value: String,
    pub label: LocalizedText,
}

/// Gates a field (or its requiredness) on a sibling answer holding a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldCondition {
    pub field_id: String,
    pub equals: String,
}

/// Extra constraints orthogonal to the field kind. Size and MIME limits are
/// enforced by the upload host, not by the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct FieldValidation {
    #[serde(default)]
    pub no_accents: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_size_mb: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_types: Vec<String>,
}

/// Definition of a single field inside a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSchema {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: LocalizedText,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validations: Option<FieldValidation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<FieldCondition>,
    /// Nested per-entry schema, meaningful only for repeatable fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldSchema>,
}
