//! Request body accepted by the external `create_profile` endpoint.

use serde::{Deserialize, Serialize};

use super::model::Sex;

/// Fields the external API requires, in wire order. The proxy checks the
/// same list before forwarding.
pub const REQUIRED_PAYLOAD_FIELDS: [&str; 9] = [
    "key", "name", "lastname", "picture", "location", "age", "gender", "height", "weight",
];

/// Placeholder sent when the user skipped the profile picture.
pub const PICTURE_PLACEHOLDER: &str = "[picture]";

/// Gender code understood by the external API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
}

impl Gender {
    /// Only Male and Female have dedicated codes; everything else is "O".
    pub fn from_sex(sex: Option<Sex>) -> Self {
        match sex {
            Some(Sex::Male) => Self::Male,
            Some(Sex::Female) => Self::Female,
            _ => Self::Other,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "O",
        }
    }
}

/// Optional body measurements. The UI never collects them; callers may.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurements {
    #[serde(
        default,
        deserialize_with = "super::de::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::de::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<String>,
}

/// Body POSTed to `/api/create_profile`. Field order is the wire order.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalApiPayload {
    pub key: String,
    pub name: String,
    pub lastname: String,
    pub picture: String,
    pub location: String,
    pub age: u32,
    pub gender: Gender,
    pub height: i32,
    pub weight: i32,
}

impl ExternalApiPayload {
    /// First required text field that ended up empty, with its value.
    pub fn first_empty_field(&self) -> Option<(&'static str, &str)> {
        [
            ("key", self.key.as_str()),
            ("name", self.name.as_str()),
            ("lastname", self.lastname.as_str()),
            ("picture", self.picture.as_str()),
            ("location", self.location.as_str()),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty())
    }
}

impl std::fmt::Debug for ExternalApiPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalApiPayload")
            .field("key", &"[REDACTED]")
            .field("name", &self.name)
            .field("lastname", &self.lastname)
            .field("picture", &truncate(&self.picture, 32))
            .field("location", &self.location)
            .field("age", &self.age)
            .field("gender", &self.gender.code())
            .field("height", &self.height)
            .field("weight", &self.weight)
            .finish()
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        format!("{}…", s.chars().take(max).collect::<String>())
    }
}
