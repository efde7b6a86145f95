use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::form::FormSchema;

/// Static wiring from coarse wizard pages to schema-level step ids, loaded
/// from configuration alongside the form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct StepPlan {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pages: BTreeMap<String, Vec<String>>,
}

impl StepPlan {
    /// Schema step ids behind one wizard page; unknown pages map to nothing.
    pub fn step_ids(&self, page: &str) -> &[String] {
        self.pages.get(page).map(Vec::as_slice).unwrap_or_default()
    }

    /// Reduced schema for one wizard page.
    pub fn subset(&self, form: &FormSchema, page: &str) -> FormSchema {
        subset_steps(form, self.step_ids(page))
    }
}

/// Keeps only the steps whose id is listed, preserving original step order
/// and the root title. Unknown ids simply match nothing.
pub fn subset_steps(form: &FormSchema, step_ids: &[String]) -> FormSchema {
    FormSchema {
        title: form.title.clone(),
        steps: form
            .steps
            .iter()
            .filter(|step| step_ids.iter().any(|id| id == &step.id))
            .cloned()
            .collect(),
    }
}
