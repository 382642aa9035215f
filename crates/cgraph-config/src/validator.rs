//! Runtime validation of a loaded configuration.
//!
//! Field rules are declared with `validator` attributes on the schema; this
//! module holds the custom rules and turns `ValidationErrors` into
//! [`CgraphError::Validation`].

use crate::schema::Config;
use cgraph_common::{CgraphError, Result};
use std::path::Path;
use url::Url;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration. The error names the first offending field
    /// in `section.field` form and lists every violation in its message.
    pub fn validate(config: &Config) -> Result<()> {
        Validate::validate(config).map_err(|errors| {
            let mut violations = Vec::new();
            collect_violations("", &errors, &mut violations);
            violations.sort();

            let field = violations
                .first()
                .map(|(field, _)| field.clone())
                .unwrap_or_default();
            let message = violations
                .iter()
                .map(|(field, message)| format!("{field}: {message}"))
                .collect::<Vec<_>>()
                .join("; ");
            CgraphError::validation_field(message, field)
        })
    }
}

fn collect_violations(prefix: &str, errors: &ValidationErrors, out: &mut Vec<(String, String)>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            (*field).to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Struct(inner) => collect_violations(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_violations(&format!("{path}[{index}]"), inner, out);
                }
            }
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|error| {
                    let message = error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string);
                    (path.clone(), message)
                }));
            }
        }
    }
}

/// Rejects strings made only of whitespace.
pub fn validate_not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

/// Accepts only `http` and `https` URLs. Unparseable input is left to the
/// `url` rule.
pub fn validate_http_scheme(value: &str) -> std::result::Result<(), ValidationError> {
    match Url::parse(value) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            Err(ValidationError::new("unsupported_scheme"))
        }
        _ => Ok(()),
    }
}

/// Rejects an empty output path.
pub fn validate_output_path(path: &Path) -> std::result::Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        Err(ValidationError::new("empty_path"))
    } else {
        Ok(())
    }
}
