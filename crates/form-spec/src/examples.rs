use serde_json::{Map, Value};

use crate::spec::field::{FieldKind, FieldSchema};
use crate::spec::form::FormSchema;
use crate::visibility::VisibilityMap;

const EXAMPLE_DATE: &str = "2026-01-15";

/// Deterministic placeholder answers for the currently active fields.
pub fn generate(form: &FormSchema, visibility: &VisibilityMap) -> Value {
    let mut output = Map::new();

    for field in form.all_fields() {
        if !visibility.get(&field.id).copied().unwrap_or(true) {
            continue;
        }
        output.insert(field.id.clone(), example_for(field));
    }

    Value::Object(output)
}

fn example_for(field: &FieldSchema) -> Value {
    match field.kind {
        FieldKind::Text => Value::String(format!("example-{}", field.id)),
        FieldKind::Select | FieldKind::Radio => field
            .options
            .first()
            .map(|option| Value::String(option.value.clone()))
            .unwrap_or_else(|| Value::String(format!("example-{}", field.id))),
        FieldKind::Date => Value::String(EXAMPLE_DATE.to_string()),
        FieldKind::File => Value::String(format!("file-{}", field.id)),
        FieldKind::Repeatable => {
            let mut entry = Map::new();
            for nested in &field.fields {
                entry.insert(nested.id.clone(), example_for(nested));
            }
            Value::Array(vec![Value::Object(entry)])
        }
    }
}
