//! User profile collected during onboarding.

use serde::{Deserialize, Serialize};

use super::de;

/// Youngest age accepted when a profile is submitted.
pub const MIN_AGE: u32 = 1;
/// Oldest age accepted when a profile is submitted.
pub const MAX_AGE: u32 = 150;

/// Sex options offered by the profile step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    #[serde(rename = "Non-binary")]
    NonBinary,
    Other,
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

impl Sex {
    pub const ALL: [Sex; 5] = [
        Sex::Male,
        Sex::Female,
        Sex::NonBinary,
        Sex::Other,
        Sex::PreferNotToSay,
    ];
}

impl Sex {
    /// Match a form label; anything unrecognized counts as `Other`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|sex| sex.to_string().eq_ignore_ascii_case(label))
            .unwrap_or(Self::Other)
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::NonBinary => "Non-binary",
            Self::Other => "Other",
            Self::PreferNotToSay => "Prefer not to say",
        };
        write!(f, "{s}")
    }
}

/// Performance pathway picked on the targets step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HealthTarget {
    #[default]
    Normal,
    Sporty,
    Ironman,
}

impl HealthTarget {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Sporty => "sporty",
            Self::Ironman => "ironman",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "sporty" => Some(Self::Sporty),
            "ironman" => Some(Self::Ironman),
            _ => None,
        }
    }
}

impl std::fmt::Display for HealthTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// In-progress profile, mutated one field at a time while onboarding.
///
/// `age` stays textual until submission, where it is parsed and range
/// checked. `profile_picture` is either empty or a data URI.
///
/// Absent fields deserialize as empty, and an absent or blank `sex` as
/// `None`, so a partial or sloppy body reaches validation instead of failing
/// to parse. Numeric values are read as their text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(deserialize_with = "de::text")]
    pub first_name: String,
    #[serde(deserialize_with = "de::text")]
    pub last_name: String,
    #[serde(deserialize_with = "de::text")]
    pub profile_picture: String,
    #[serde(deserialize_with = "de::text")]
    pub age: String,
    #[serde(default, deserialize_with = "de::sex")]
    pub sex: Option<Sex>,
    #[serde(deserialize_with = "de::text")]
    pub location: String,
    #[serde(deserialize_with = "de::target")]
    pub target: HealthTarget,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            profile_picture: String::new(),
            age: String::new(),
            sex: Some(Sex::Male),
            location: String::new(),
            target: HealthTarget::default(),
        }
    }
}

impl UserProfile {
    /// Names of the required fields that are still empty, in form order.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.first_name.is_empty() {
            missing.push("firstName");
        }
        if self.last_name.is_empty() {
            missing.push("lastName");
        }
        if self.age.is_empty() {
            missing.push("age");
        }
        if self.sex.is_none() {
            missing.push("sex");
        }
        if self.location.is_empty() {
            missing.push("location");
        }
        missing
    }

    /// True when first name, last name, age, sex and location are all set.
    pub fn has_required_fields(&self) -> bool {
        self.missing_required_fields().is_empty()
    }

    /// Name shown in the dashboard greeting.
    pub fn display_name(&self) -> Option<&str> {
        let first = self.first_name.trim();
        if !first.is_empty() {
            return Some(first);
        }
        self.location
            .split(',')
            .next()
            .map(str::trim)
            .filter(|city| !city.is_empty())
    }

    /// Return a copy with exactly one field replaced.
    pub fn with_update(&self, update: FieldUpdate) -> Self {
        let mut next = self.clone();
        match update {
            FieldUpdate::FirstName(v) => next.first_name = v,
            FieldUpdate::LastName(v) => next.last_name = v,
            FieldUpdate::ProfilePicture(v) => next.profile_picture = v,
            FieldUpdate::Age(v) => next.age = v,
            FieldUpdate::Sex(v) => next.sex = v,
            FieldUpdate::Location(v) => next.location = v,
            FieldUpdate::Target(v) => next.target = v,
        }
        next
    }
}

/// A single-field edit coming from the profile or targets step.
///
/// Wire form is `{"field": "firstName", "value": "Jane"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    FirstName(String),
    LastName(String),
    ProfilePicture(String),
    #[serde(deserialize_with = "de::text")]
    Age(String),
    #[serde(deserialize_with = "de::sex")]
    Sex(Option<Sex>),
    Location(String),
    Target(HealthTarget),
}
