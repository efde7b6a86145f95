pub mod field;
pub mod form;

pub use field::{FieldCondition, FieldKind, FieldOption, FieldSchema, FieldValidation};
pub use form::{FormSchema, StepSchema};
