use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::i18n::LocalizedText;
use crate::spec::field::FieldSchema;

/// A named, titled group of fields shown together in the full wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StepSchema {
    pub id: String,
    pub title: LocalizedText,
    pub fields: Vec<FieldSchema>,
}

/// Top-level form definition, loaded once and treated as immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormSchema {
    pub title: LocalizedText,
    pub steps: Vec<StepSchema>,
}

impl FormSchema {
    /// Every field across all steps, in declaration order.
    pub fn all_fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.steps.iter().flat_map(|step| step.fields.iter())
    }

    /// Looks a step up by id.
    pub fn step(&self, step_id: &str) -> Option<&StepSchema> {
        self.steps.iter().find(|step| step.id == step_id)
    }
}
