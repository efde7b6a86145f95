#![allow(missing_docs)]

pub mod answers;
pub mod answers_schema;
pub mod compile;
pub mod condition;
pub mod examples;
pub mod i18n;
pub mod path;
pub mod render;
pub mod spec;
pub mod steps;
pub mod upload;
pub mod visibility;

pub use answers::{
    AnswerMeta, AnswerSet, FailureCode, ValidationError, ValidationReport, ValueBag,
};
pub use answers_schema::generate as answers_schema;
pub use compile::{CompiledForm, SchemaError, compile, compile_form, is_empty_value};
pub use condition::satisfies;
pub use examples::generate as example_answers;
pub use i18n::{Locale, LocalizedText, UnknownLocale};
pub use path::FieldPath;
pub use render::render_text;
pub use spec::{
    FieldCondition, FieldKind, FieldOption, FieldSchema, FieldValidation, FormSchema, StepSchema,
};
pub use steps::{StepPlan, subset_steps};
pub use upload::{UploadError, UploadPolicy};
pub use visibility::{VisibilityMap, is_active, resolve_visibility};
