//! Foodiet onboarding and dashboard service.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod onboarding;
pub mod profile;
pub mod proxy;
pub mod server;
pub mod submission;
