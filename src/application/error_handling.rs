// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors to user-friendly responses
// - Provides consistent error format for UI
// - Never exposes internal implementation details
// - Logs errors for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Invalid input/validation error (400)
    Validation,

    /// Domain invariant or session phase violation (422)
    DomainError,

    /// Missing API key or unreadable settings; the user must fix settings
    Configuration,

    /// Database/persistence error (500)
    Database,

    /// Metadata provider unreachable or misbehaving (502)
    ExternalService,

    /// File system error (500)
    FileSystem,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::new(ErrorType::NotFound, "Resource not found", None),

            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                "Domain validation failed",
                Some(domain_error.to_string()),
            ),

            AppError::Configuration(message) => {
                log::warn!("Configuration error: {}", message);
                Self::new(ErrorType::Configuration, "Settings incomplete", Some(message))
            }

            AppError::Provider(provider_error) => {
                log::warn!("Provider error: {}", provider_error);
                Self::new(
                    ErrorType::ExternalService,
                    "External service error",
                    Some(provider_error.to_string()),
                )
            }

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed", None)
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::FileSystem,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }
}

/// Helper trait to convert Results to a JSON error string for Tauri
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| {
            let error_response = ErrorResponse::from_app_error(e);
            serde_json::to_string(&error_response).unwrap_or_else(|_| "Internal error".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::integrations::ProviderError;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound);
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Resource not found");
    }

    #[test]
    fn test_configuration_error() {
        let error = ErrorResponse::from_app_error(AppError::Configuration(
            "TMDB API key is missing".to_string(),
        ));
        assert_eq!(error.error_type, ErrorType::Configuration);
        assert_eq!(error.details.as_deref(), Some("TMDB API key is missing"));
    }

    #[test]
    fn test_provider_error_is_external_service() {
        let error = ErrorResponse::from_app_error(AppError::Provider(ProviderError::Status {
            provider: "TMDB",
            status: 500,
        }));
        assert_eq!(error.error_type, ErrorType::ExternalService);
    }

    #[test]
    fn test_phase_error_is_domain_error() {
        let error = ErrorResponse::from_app_error(AppError::Domain(
            DomainError::InvalidStateTransition("idle to committing".to_string()),
        ));
        assert_eq!(error.error_type, ErrorType::DomainError);
    }

    #[test]
    fn test_validation_error() {
        let error = ErrorResponse::validation("Invalid input".to_string());
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.message, "Invalid input");
    }

    #[test]
    fn test_to_error_response_serializes() {
        let result: Result<(), AppError> = Err(AppError::NotFound);
        let json = result.to_error_response().unwrap_err();
        assert!(json.contains("not_found"));

        let error = ErrorResponse::not_found("Import session");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("Import session not found"));
    }
}
