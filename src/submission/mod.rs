//! Profile submission against the external profile API.

pub mod client;
pub mod routes;
pub mod validate;

pub use client::{CreatedProfile, ProfileClient, ProfileSubmitter, SubmitResponse};
pub use routes::submission_routes;
pub use validate::build_payload;
