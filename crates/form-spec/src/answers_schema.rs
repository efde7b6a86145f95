use serde_json::{Map, Value};

use crate::spec::field::{FieldKind, FieldSchema};
use crate::spec::form::FormSchema;
use crate::visibility::VisibilityMap;

/// Generates a JSON Schema document for the value bag of the currently
/// active fields. Conditionally required fields stay out of `required`; they
/// are structurally optional and enforced by the conditional pass.
pub fn generate(form: &FormSchema, visibility: &VisibilityMap) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in form.all_fields() {
        if !visibility.get(&field.id).copied().unwrap_or(true) {
            continue;
        }
        properties.insert(field.id.clone(), field_schema_value(field));
        if field.required && field.conditions.is_empty() {
            required.push(Value::String(field.id.clone()));
        }
    }

    let mut root = Map::new();
    root.insert("type".into(), Value::String("object".into()));
    root.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        root.insert("required".into(), Value::Array(required));
    }

    Value::Object(root)
}

fn field_schema_value(field: &FieldSchema) -> Value {
    let mut schema = Map::new();
    match field.kind {
        FieldKind::Text | FieldKind::File => {
            schema.insert("type".into(), Value::String("string".into()));
        }
        FieldKind::Date => {
            schema.insert("type".into(), Value::String("string".into()));
            schema.insert("format".into(), Value::String("date".into()));
        }
        FieldKind::Select | FieldKind::Radio => {
            schema.insert("type".into(), Value::String("string".into()));
            if !field.options.is_empty() {
                schema.insert(
                    "enum".into(),
                    Value::Array(
                        field
                            .options
                            .iter()
                            .map(|option| Value::String(option.value.clone()))
                            .collect(),
                    ),
                );
            }
        }
        FieldKind::Repeatable => {
            schema.insert("type".into(), Value::String("array".into()));

            let mut item_props = Map::new();
            let mut item_required = Vec::new();
            for nested in &field.fields {
                item_props.insert(nested.id.clone(), field_schema_value(nested));
                if nested.required && nested.conditions.is_empty() {
                    item_required.push(Value::String(nested.id.clone()));
                }
            }
            let mut item_schema = Map::new();
            item_schema.insert("type".into(), Value::String("object".into()));
            item_schema.insert("properties".into(), Value::Object(item_props));
            if !item_required.is_empty() {
                item_schema.insert("required".into(), Value::Array(item_required));
            }
            schema.insert("items".into(), Value::Object(item_schema));

            if field.required && field.conditions.is_empty() {
                schema.insert("minItems".into(), Value::Number(1.into()));
            }
        }
    }

    Value::Object(schema)
}
