use thiserror::Error;

/// Failures while loading configuration or starting a service.
///
/// Request handling has its own error types; nothing here is rendered as
/// an HTTP response.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_becomes_internal_error() {
        let err = AppError::from(std::io::Error::other("address in use"));
        assert!(matches!(err, AppError::InternalError(_)));
        assert!(err.to_string().contains("address in use"));
    }

    #[test]
    fn test_config_crate_error_becomes_config_error() {
        let err = AppError::from(config::ConfigError::NotFound("port".to_string()));
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_config_error_message_names_cause() {
        let err = AppError::ConfigError(anyhow::anyhow!("OFFICIAL_EMAIL is required but not set"));
        assert_eq!(
            err.to_string(),
            "Configuration error: OFFICIAL_EMAIL is required but not set"
        );
    }
}
