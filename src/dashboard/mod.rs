//! Dashboard view over static sample data. Display only.

pub mod data;
pub mod routes;

use chrono::Timelike;
use serde::Serialize;

pub use data::{
    APP_FEATURES, AppFeature, DAILY_STATS, FOOD_ENTRIES, FoodEntry, NAV_ITEMS, NavItem,
    SWAP_SUGGESTIONS, StatCard, SwapSuggestion, total_calories,
};
pub use routes::{DashboardRouteState, dashboard_routes};

use crate::profile::{TargetConfig, UserProfile};

/// Everything the dashboard renders in one response.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub greeting: String,
    pub stats: Vec<StatTile>,
    pub food_log: &'static [FoodEntry],
    pub total_calories: u32,
    pub swaps: &'static [SwapSuggestion],
    pub features: &'static [AppFeature],
    pub navigation: &'static [NavItem],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<&'static TargetConfig>,
}

/// A stat card with its display strings precomputed.
#[derive(Debug, Clone, Serialize)]
pub struct StatTile {
    #[serde(flatten)]
    pub card: &'static StatCard,
    pub value_text: String,
    pub target_text: String,
}

/// Time-of-day salutation for a 0–23 hour.
pub fn salutation(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    }
}

impl DashboardView {
    /// Build the view for `profile` (if any) at the given local hour.
    pub fn build(profile: Option<&UserProfile>, hour: u32) -> Self {
        let name = profile
            .and_then(UserProfile::display_name)
            .unwrap_or("there");
        Self {
            greeting: format!("{}, {name}", salutation(hour)),
            stats: DAILY_STATS
                .iter()
                .map(|card| StatTile {
                    card,
                    value_text: card.value_text(),
                    target_text: card.target_text(),
                })
                .collect(),
            food_log: &FOOD_ENTRIES,
            total_calories: total_calories(&FOOD_ENTRIES),
            swaps: &SWAP_SUGGESTIONS,
            features: &APP_FEATURES,
            navigation: &NAV_ITEMS,
            target: profile.map(|p| TargetConfig::for_target(p.target)),
        }
    }

    /// Build the view using the server's local clock.
    pub fn now(profile: Option<&UserProfile>) -> Self {
        Self::build(profile, chrono::Local::now().hour())
    }
}
