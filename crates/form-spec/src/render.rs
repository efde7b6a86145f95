use serde_json::Value;

use crate::answers::ValueBag;
use crate::i18n::Locale;
use crate::spec::field::{FieldKind, FieldSchema};
use crate::spec::form::FormSchema;
use crate::visibility::is_active;

/// Renders a locale-aware plain-text summary of the form against one answer
/// snapshot. Inactive fields are listed with a `(hidden)` marker; repeatable
/// answers are expanded entry by entry.
pub fn render_text(form: &FormSchema, answers: &Value, locale: Locale) -> String {
    let empty = ValueBag::new();
    let values = answers.as_object().unwrap_or(&empty);

    let mut lines = Vec::new();
    lines.push(format!("Form: {}", form.title.resolve(locale)));

    for step in &form.steps {
        lines.push(format!("Step {}: {}", step.id, step.title.resolve(locale)));
        for field in &step.fields {
            render_field(field, values, locale, &mut lines);
        }
    }

    lines.join("\n")
}

fn render_field(field: &FieldSchema, values: &ValueBag, locale: Locale, lines: &mut Vec<String>) {
    let mut entry = format!(" - {} ({})", field.id, field.label.resolve(locale));
    if field.required {
        entry.push_str(" [required]");
    }

    if !is_active(field, values) {
        entry.push_str(" (hidden)");
        lines.push(entry);
        return;
    }

    match values.get(&field.id) {
        Some(Value::Array(items)) if field.kind == FieldKind::Repeatable => {
            lines.push(entry);
            for (index, item) in items.iter().enumerate() {
                lines.push(format!("   [{}]", index));
                let entry_bag = item.as_object().cloned().unwrap_or_default();
                for nested in &field.fields {
                    render_nested(nested, &entry_bag, locale, lines);
                }
            }
        }
        Some(value) => {
            entry.push_str(&format!(" = {}", value_to_display(value)));
            lines.push(entry);
        }
        None => lines.push(entry),
    }
}

fn render_nested(field: &FieldSchema, values: &ValueBag, locale: Locale, lines: &mut Vec<String>) {
    let mut entry = format!("     - {} ({})", field.id, field.label.resolve(locale));
    if !is_active(field, values) {
        entry.push_str(" (hidden)");
        lines.push(entry);
        return;
    }
    if let Some(value) = values.get(&field.id) {
        entry.push_str(&format!(" = {}", value_to_display(value)));
    }
    lines.push(entry);
}

fn value_to_display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}
