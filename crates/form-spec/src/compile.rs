use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::answers::{FailureCode, ValidationError, ValidationReport, ValueBag};
use crate::condition::satisfies;
use crate::path::FieldPath;
use crate::spec::field::{FieldCondition, FieldKind, FieldSchema};
use crate::spec::form::FormSchema;

/// Schema shape problems, reported once at compile time so the per-submission
/// hot path stays pure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("duplicate field id `{0}` within one field list")]
    DuplicateFieldId(String),
    #[error("duplicate step id `{0}`")]
    DuplicateStepId(String),
    #[error("duplicate option value `{value}` on field `{field}`")]
    DuplicateOptionValue { field: String, value: String },
    #[error("repeatable field `{0}` has no nested fields")]
    RepeatableWithoutFields(String),
}

static NON_ASCII: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x00-\x7F]").expect("hard-coded pattern compiles"));

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Emptiness policy shared by the structural and conditional-requirement
/// passes: absent, null, blank-after-trim strings, empty arrays, `false`, and
/// zero all count as missing.
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Bool(flag)) => !flag,
        Some(Value::Number(number)) => number.as_f64() == Some(0.0),
        Some(Value::Object(_)) => false,
    }
}

#[derive(Debug, Clone)]
struct RequirementRule {
    field_id: String,
    conditions: Vec<FieldCondition>,
}

#[derive(Debug, Clone)]
struct CompiledField {
    id: String,
    kind: FieldKind,
    /// Unconditional requiredness only; conditionally required fields are
    /// structurally optional and handled by their scope's rules.
    required: bool,
    no_accents: bool,
    option_values: Vec<String>,
    entries: Option<CompiledGroup>,
}

/// One compiled field list: per-field structural programs plus the
/// conditional-requirement rules registered for that scope.
#[derive(Debug, Clone, Default)]
struct CompiledGroup {
    fields: Vec<CompiledField>,
    rules: Vec<RequirementRule>,
}

/// Executable validator produced from a schema. A pure function of its input,
/// safe to cache keyed by schema identity.
#[derive(Debug, Clone)]
pub struct CompiledForm {
    group: CompiledGroup,
}

/// Compiles a flat field list into its executable validator.
pub fn compile(fields: &[FieldSchema]) -> Result<CompiledForm, SchemaError> {
    Ok(CompiledForm {
        group: compile_group(fields)?,
    })
}

/// Compiles every field across the form's steps, in declaration order.
pub fn compile_form(form: &FormSchema) -> Result<CompiledForm, SchemaError> {
    let mut seen = BTreeSet::new();
    for step in &form.steps {
        if !seen.insert(step.id.clone()) {
            return Err(SchemaError::DuplicateStepId(step.id.clone()));
        }
    }
    Ok(CompiledForm {
        group: compile_group(form.all_fields())?,
    })
}

fn compile_group<'a>(
    fields: impl IntoIterator<Item = &'a FieldSchema>,
) -> Result<CompiledGroup, SchemaError> {
    let mut group = CompiledGroup::default();
    let mut seen = BTreeSet::new();

    for field in fields {
        if !seen.insert(field.id.clone()) {
            return Err(SchemaError::DuplicateFieldId(field.id.clone()));
        }
        group.fields.push(compile_field(field)?);
        if field.required && !field.conditions.is_empty() {
            group.rules.push(RequirementRule {
                field_id: field.id.clone(),
                conditions: field.conditions.clone(),
            });
        }
    }

    Ok(group)
}

fn compile_field(field: &FieldSchema) -> Result<CompiledField, SchemaError> {
    let mut option_values = Vec::new();
    for option in &field.options {
        if option_values.contains(&option.value) {
            return Err(SchemaError::DuplicateOptionValue {
                field: field.id.clone(),
                value: option.value.clone(),
            });
        }
        option_values.push(option.value.clone());
    }

    let entries = match field.kind {
        FieldKind::Repeatable => {
            if field.fields.is_empty() {
                return Err(SchemaError::RepeatableWithoutFields(field.id.clone()));
            }
            Some(compile_group(&field.fields)?)
        }
        _ => None,
    };

    Ok(CompiledField {
        id: field.id.clone(),
        kind: field.kind,
        required: field.required && field.conditions.is_empty(),
        no_accents: field
            .validations
            .as_ref()
            .is_some_and(|validation| validation.no_accents),
        option_values,
        entries,
    })
}

impl CompiledForm {
    /// Validates a value bag: the structural pass runs per field, then the
    /// conditional-requirement pass runs over the full bag. Non-object
    /// answers behave like an empty bag.
    pub fn validate(&self, answers: &Value) -> ValidationReport {
        let empty = ValueBag::new();
        let values = answers.as_object().unwrap_or(&empty);

        let mut errors = Vec::new();
        validate_group(&self.group, values, &FieldPath::root(), &mut errors);
        ValidationReport::from_errors(errors)
    }
}

fn validate_group(
    group: &CompiledGroup,
    values: &ValueBag,
    path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) {
    for field in &group.fields {
        validate_field(field, values, path, errors);
    }

    for rule in &group.rules {
        if satisfies(&rule.conditions, values) && is_empty_value(values.get(&rule.field_id)) {
            errors.push(failure(
                &path.push_field(&rule.field_id),
                FailureCode::Required,
            ));
        }
    }
}

fn validate_field(
    field: &CompiledField,
    values: &ValueBag,
    path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) {
    let value = values.get(&field.id);
    let field_path = path.push_field(&field.id);

    if is_empty_value(value) {
        if field.required {
            errors.push(failure(&field_path, FailureCode::Required));
        }
        return;
    }

    let Some(value) = value else {
        return;
    };

    match field.kind {
        FieldKind::Repeatable => validate_entries(field, value, &field_path, errors),
        _ => match value.as_str() {
            Some(text) => check_content(field, text, &field_path, errors),
            None => errors.push(failure(&field_path, FailureCode::TypeMismatch)),
        },
    }
}

fn validate_entries(
    field: &CompiledField,
    value: &Value,
    path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) {
    let Some(items) = value.as_array() else {
        errors.push(failure(path, FailureCode::TypeMismatch));
        return;
    };
    let Some(group) = &field.entries else {
        return;
    };

    for (index, item) in items.iter().enumerate() {
        let entry_path = path.push_index(index);
        match item.as_object() {
            Some(entry) => validate_group(group, entry, &entry_path, errors),
            None => errors.push(failure(&entry_path, FailureCode::TypeMismatch)),
        }
    }
}

fn check_content(
    field: &CompiledField,
    text: &str,
    path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) {
    match field.kind {
        FieldKind::Date => {
            if Date::parse(text, DATE_FORMAT).is_err() {
                errors.push(failure(path, FailureCode::InvalidDate));
            }
        }
        FieldKind::Select | FieldKind::Radio => {
            if !field.option_values.is_empty()
                && !field.option_values.iter().any(|option| option == text)
            {
                errors.push(failure(path, FailureCode::InvalidOption));
            }
        }
        _ => {}
    }

    if field.no_accents && NON_ASCII.is_match(text) {
        errors.push(failure(path, FailureCode::NoAccents));
    }
}

fn failure(path: &FieldPath, code: FailureCode) -> ValidationError {
    ValidationError {
        field: path.to_string(),
        code,
    }
}
