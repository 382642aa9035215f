//! Application-wide error types using thiserror.

use cgraph_common::CgraphError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded, validated, or wired up.
    #[error("Configuration error: {0}")]
    Config(#[source] CgraphError),

    /// Collecting commits or rendering the chart failed.
    #[error("Graph generation failed: {0}")]
    Generation(#[from] CgraphError),
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error_keeps_source() {
        let err = AppError::Config(CgraphError::validation_field("must not be empty", "github.token"));
        assert!(err.to_string().starts_with("Configuration error:"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_generation_error_from_core_error() {
        let err: AppError = CgraphError::github_with_status("Not Found", 404).into();
        assert!(matches!(err, AppError::Generation(_)));
        assert!(err.to_string().contains("Not Found"));
    }
}
