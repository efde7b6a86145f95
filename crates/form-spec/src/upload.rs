use globset::Glob;
use thiserror::Error;

use crate::spec::field::FieldValidation;

const DEFAULT_MAX_SIZE_MB: u64 = 5;
const DEFAULT_ALLOWED_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];

/// Upload rejection reasons, with the stable codes the host surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("content type `{0}` is not allowed")]
    TypeNotAllowed(String),
    #[error("file of {size_bytes} bytes exceeds the {limit_mb} MB limit")]
    TooLarge { size_bytes: u64, limit_mb: u64 },
}

impl UploadError {
    pub fn as_code(&self) -> &'static str {
        match self {
            UploadError::TypeNotAllowed(_) => "invalid_type",
            UploadError::TooLarge { .. } => "file_too_large",
        }
    }
}

/// File constraints for one field, applied by the upload host before it
/// issues the identifier stored in the value bag.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    allowed_types: Vec<String>,
    max_size_bytes: u64,
}

fn matches_pattern(pattern: &str, content_type: &str) -> bool {
    match Glob::new(pattern) {
        Ok(glob) => glob.compile_matcher().is_match(content_type),
        Err(_) => false,
    }
}

impl UploadPolicy {
    /// Builds the policy from a field's validations, falling back to the host
    /// defaults when the schema is silent.
    pub fn from_validation(validation: Option<&FieldValidation>) -> Self {
        let max_size_mb = validation
            .and_then(|validation| validation.max_file_size_mb)
            .unwrap_or(DEFAULT_MAX_SIZE_MB);
        let allowed_types = match validation {
            Some(validation) if !validation.allowed_types.is_empty() => {
                validation.allowed_types.clone()
            }
            _ => DEFAULT_ALLOWED_TYPES
                .iter()
                .map(|pattern| pattern.to_string())
                .collect(),
        };

        Self {
            allowed_types,
            max_size_bytes: max_size_mb * 1024 * 1024,
        }
    }

    /// Checks one candidate upload. Patterns may carry `*` wildcards, so an
    /// allow-list entry like `image/*` admits every image subtype.
    pub fn check(&self, content_type: &str, size_bytes: u64) -> Result<(), UploadError> {
        if !self
            .allowed_types
            .iter()
            .any(|pattern| matches_pattern(pattern, content_type))
        {
            return Err(UploadError::TypeNotAllowed(content_type.to_string()));
        }
        if size_bytes > self.max_size_bytes {
            return Err(UploadError::TooLarge {
                size_bytes,
                limit_mb: self.max_size_bytes / (1024 * 1024),
            });
        }
        Ok(())
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }
}
