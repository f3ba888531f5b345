//! Error types for the Delta client.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Onboarding error: {0}")]
    Onboarding(#[from] OnboardingError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Transport and response errors from the remote API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {path} failed: {reason}")]
    Transport { path: String, reason: String },

    #[error("{path} returned HTTP {status}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {path}: {reason}")]
    InvalidResponse { path: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Client-side validation failures. These never reach the network.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields ({}) on step {step}", fields.join(", "))]
    Step { step: usize, fields: Vec<String> },

    #[error("Field {field} is invalid: {reason}")]
    Field { field: String, reason: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Rejections from the image upload control.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("Please upload a valid image file")]
    NotAnImage { mime: String },

    #[error("Image is too large (max 2MB)")]
    TooLarge { size: usize, max: usize },
}

/// Terminal failures of an onboarding submission attempt.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("{0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Failed to register user: {reason}")]
    RegistrationFailed { reason: String },

    #[error("Could not resolve a user id for {email}")]
    UserIdUnresolved { email: String },

    #[error("Failed to complete onboarding: {body}")]
    OnboardingPersistFailed { status: Option<u16>, body: String },

    #[error("Failed to generate growth path: {reason}")]
    RoadmapGenerationFailed { reason: String },
}

/// Session gating errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Please complete onboarding first")]
    OnboardingRequired,
}

/// Result type alias for the client.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_error_lists_fields() {
        let err = ValidationError::Step {
            step: 2,
            fields: vec!["major".to_string(), "university".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("major, university"));
        assert!(msg.contains("step 2"));
    }

    #[test]
    fn image_errors_are_distinct() {
        let not_image = ImageError::NotAnImage {
            mime: "text/plain".to_string(),
        };
        let too_large = ImageError::TooLarge {
            size: 3 * 1024 * 1024,
            max: 2 * 1024 * 1024,
        };
        assert_ne!(not_image.to_string(), too_large.to_string());
    }

    #[test]
    fn persist_failure_carries_body() {
        let err = OnboardingError::OnboardingPersistFailed {
            status: Some(500),
            body: "database offline".to_string(),
        };
        assert!(err.to_string().contains("database offline"));
    }

    #[test]
    fn api_status_accessor() {
        let err = ApiError::Status {
            path: "/users/register".to_string(),
            status: 500,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(500));
        let err = ApiError::Transport {
            path: "/users/register".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(err.status(), None);
    }

    #[test]
    fn image_error_converts_to_top_level() {
        let err: Error = ImageError::NotAnImage {
            mime: "text/plain".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Image(ImageError::NotAnImage { .. })));
        assert!(err.to_string().contains("valid image"));
    }

    #[test]
    fn session_error_converts_to_top_level() {
        let err: Error = SessionError::OnboardingRequired.into();
        assert!(matches!(err, Error::Session(SessionError::OnboardingRequired)));
    }
}
