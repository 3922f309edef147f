//! Error types for Foodiet.

use uuid::Uuid;

use crate::profile::{MAX_AGE, MIN_AGE};

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Broad class of a submission failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionErrorKind {
    Validation,
    Network,
    Api,
    Unknown,
}

/// Why a profile submission did not produce a profile id.
///
/// `Display` is the short user-facing message; [`SubmissionError::details`]
/// carries the longer explanation shown alongside it.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Invalid profile data")]
    MalformedBody { reason: String },

    #[error("Missing required profile fields")]
    MissingProfileFields,

    #[error("Invalid age provided")]
    InvalidAge { raw: String },

    #[error("Invalid height or weight values")]
    InvalidMeasurements {
        height: Option<String>,
        weight: Option<String>,
    },

    #[error("Missing or empty required field: {field}")]
    EmptyPayloadField { field: &'static str, value: String },

    #[error("Network connection error")]
    Network { reason: String },

    #[error("Cross-origin request blocked")]
    CrossOriginBlocked { reason: String },

    #[error("Failed to create profile")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Failed to create profile")]
    Unknown { reason: String },
}

impl SubmissionError {
    pub fn kind(&self) -> SubmissionErrorKind {
        match self {
            Self::MalformedBody { .. }
            | Self::MissingProfileFields
            | Self::InvalidAge { .. }
            | Self::InvalidMeasurements { .. }
            | Self::EmptyPayloadField { .. } => SubmissionErrorKind::Validation,
            Self::Network { .. } | Self::CrossOriginBlocked { .. } => SubmissionErrorKind::Network,
            Self::Api { .. } => SubmissionErrorKind::Api,
            Self::Unknown { .. } => SubmissionErrorKind::Unknown,
        }
    }

    pub fn details(&self) -> String {
        match self {
            Self::MalformedBody { reason } => {
                format!("Request body is not a profile object: {reason}")
            }
            Self::MissingProfileFields => {
                "firstName, lastName, age, sex, and location are required".to_string()
            }
            Self::InvalidAge { raw } => format!(
                "Age must be a valid number between {MIN_AGE} and {MAX_AGE}, got: {raw}"
            ),
            Self::InvalidMeasurements { height, weight } => format!(
                "Height: {}, Weight: {}",
                height.as_deref().unwrap_or("unset"),
                weight.as_deref().unwrap_or("unset")
            ),
            Self::EmptyPayloadField { field, value } => {
                format!("Field {field} has value: {value}")
            }
            Self::Network { .. } => "Unable to reach the server. Please check your internet \
                                     connection and try again."
                .to_string(),
            Self::CrossOriginBlocked { .. } => "The request was blocked by browser security \
                                                policy. Please contact support."
                .to_string(),
            Self::Api {
                status,
                status_text,
                body,
            } => format!("API failed: {status} {status_text}. Response: {body}"),
            Self::Unknown { reason } => reason.clone(),
        }
    }

    /// Classify a transport-level failure by its message.
    ///
    /// `unreachable` is set when the transport already knows the host could
    /// not be reached (connect error or timeout).
    pub fn from_transport(message: &str, unreachable: bool) -> Self {
        if unreachable || message.contains("Failed to fetch") {
            Self::Network {
                reason: message.to_string(),
            }
        } else if message.contains("CORS") {
            Self::CrossOriginBlocked {
                reason: message.to_string(),
            }
        } else {
            Self::Unknown {
                reason: message.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for SubmissionError {
    fn from(e: reqwest::Error) -> Self {
        Self::from_transport(&e.to_string(), e.is_connect() || e.is_timeout())
    }
}

/// Onboarding controller errors.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("Onboarding session {0} not found")]
    SessionNotFound(Uuid),

    #[error("Step {step} is not complete")]
    StepIncomplete { step: String },

    #[error("A profile submission is already in progress")]
    SubmissionInFlight,

    #[error("A step transition is already in progress")]
    Transitioning,

    #[error("Onboarding already completed")]
    AlreadyCompleted,

    #[error("Onboarding not completed yet")]
    NotCompleted,

    #[error("Step change interrupted: {0}")]
    Interrupted(String),
}
