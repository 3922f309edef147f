//! Profile → payload mapping with the validation that guards it.
//!
//! Pure: no network, no clock. The same profile and config always produce
//! the same payload.

use secrecy::ExposeSecret;

use crate::config::SubmissionConfig;
use crate::error::SubmissionError;
use crate::profile::{
    ExternalApiPayload, Gender, MAX_AGE, MIN_AGE, Measurements, PICTURE_PLACEHOLDER, UserProfile,
};

/// Validate `profile` and build the body for the external API.
///
/// Checks run in order and the first failure wins: required fields present,
/// age in range, measurements numeric, then every payload field non-empty
/// after trimming.
pub fn build_payload(
    profile: &UserProfile,
    measurements: &Measurements,
    config: &SubmissionConfig,
) -> Result<ExternalApiPayload, SubmissionError> {
    if !profile.has_required_fields() {
        return Err(SubmissionError::MissingProfileFields);
    }

    let age = parse_age(&profile.age).ok_or_else(|| SubmissionError::InvalidAge {
        raw: profile.age.clone(),
    })?;

    let height = parse_measurement(measurements.height.as_deref(), config.default_height);
    let weight = parse_measurement(measurements.weight.as_deref(), config.default_weight);
    let (Some(height), Some(weight)) = (height, weight) else {
        return Err(SubmissionError::InvalidMeasurements {
            height: measurements.height.clone(),
            weight: measurements.weight.clone(),
        });
    };

    let picture = if profile.profile_picture.is_empty() {
        PICTURE_PLACEHOLDER.to_string()
    } else {
        profile.profile_picture.clone()
    };

    let payload = ExternalApiPayload {
        key: config.api_key.expose_secret().to_string(),
        name: profile.first_name.trim().to_string(),
        lastname: profile.last_name.trim().to_string(),
        picture,
        location: profile.location.trim().to_string(),
        age,
        gender: Gender::from_sex(profile.sex),
        height,
        weight,
    };

    if let Some((field, value)) = payload.first_empty_field() {
        return Err(SubmissionError::EmptyPayloadField {
            field,
            value: value.to_string(),
        });
    }

    Ok(payload)
}

/// Parse a textual age, accepting only whole numbers in `MIN_AGE..=MAX_AGE`.
///
/// Surrounding whitespace is ignored but nothing else is: `"12.5"` and
/// `"30abc"` are rejected rather than truncated to their leading digits.
pub fn parse_age(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|age| (MIN_AGE..=MAX_AGE).contains(age))
}

/// Absent or empty input takes the default; anything else must be a whole
/// integer, with the same strictness as [`parse_age`].
fn parse_measurement(raw: Option<&str>, default: i32) -> Option<i32> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => value.parse().ok(),
        None => Some(default),
    }
}
