//! Profile data model: the in-progress onboarding profile and the payload
//! shape the external profile API accepts.

pub mod catalog;
mod de;
pub mod model;
pub mod payload;

pub use catalog::{HEALTH_TARGETS, TargetConfig};
pub use model::{HealthTarget, MAX_AGE, MIN_AGE, FieldUpdate, Sex, UserProfile};
pub use payload::{
    ExternalApiPayload, Gender, Measurements, PICTURE_PLACEHOLDER, REQUIRED_PAYLOAD_FIELDS,
};
