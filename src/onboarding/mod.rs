//! Onboarding wizard.
//!
//! The step sequencer in [`state`] is a set of pure transitions over a
//! serializable state. [`manager`] owns live sessions, applies the short
//! cosmetic delay between steps, and submits the finished profile.

pub mod manager;
pub mod routes;
pub mod state;

pub use manager::{AppView, OnboardingManager, SessionSnapshot};
pub use routes::{OnboardingRouteState, onboarding_routes};
pub use state::{Advance, OnboardingState, OnboardingStep, StepInfo};
