use serde_json::Value;

use crate::answers::ValueBag;
use crate::condition::satisfies;
use crate::spec::field::FieldSchema;
use crate::spec::form::FormSchema;

pub type VisibilityMap = std::collections::BTreeMap<String, bool>;

/// Whether a field is currently shown and enforceable.
///
/// For fields nested inside a repeatable entry, pass the entry's own bag so
/// conditions resolve against siblings within the same entry.
pub fn is_active(field: &FieldSchema, values: &ValueBag) -> bool {
    satisfies(&field.conditions, values)
}

/// Visibility of every top-level field in the form against one answer
/// snapshot. Non-object answers behave like an empty bag.
pub fn resolve_visibility(form: &FormSchema, answers: &Value) -> VisibilityMap {
    let empty = ValueBag::new();
    let values = answers.as_object().unwrap_or(&empty);

    let mut map = VisibilityMap::new();
    for field in form.all_fields() {
        map.insert(field.id.clone(), is_active(field, values));
    }
    map
}
