//! Sample datasets rendered by the dashboard.

use serde::Serialize;

/// One daily metric tile.
#[derive(Debug, Clone, Serialize)]
pub struct StatCard {
    pub label: &'static str,
    pub current: u32,
    pub target: u32,
    pub percentage: u32,
    /// Suffix appended to numbers, e.g. "g" or "min".
    pub unit: &'static str,
    /// Whether `target` is a goal to reach or a limit to stay under.
    pub bound: StatBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatBound {
    Goal,
    Limit,
}

impl StatCard {
    pub fn value_text(&self) -> String {
        format!("{}{}", self.current, self.unit)
    }

    pub fn target_text(&self) -> String {
        let bound = match self.bound {
            StatBound::Goal => "goal",
            StatBound::Limit => "limit",
        };
        if self.unit.is_empty() {
            format!("of {} {bound}", self.target)
        } else {
            format!("of {}{} {bound}", self.target, self.unit)
        }
    }
}

pub static DAILY_STATS: [StatCard; 4] = [
    StatCard {
        label: "Calories",
        current: 1842,
        target: 2400,
        percentage: 77,
        unit: "",
        bound: StatBound::Goal,
    },
    StatCard {
        label: "Protein",
        current: 82,
        target: 120,
        percentage: 68,
        unit: "g",
        bound: StatBound::Goal,
    },
    StatCard {
        label: "Sugar",
        current: 45,
        target: 60,
        percentage: 75,
        unit: "g",
        bound: StatBound::Limit,
    },
    StatCard {
        label: "Activity",
        current: 45,
        target: 60,
        percentage: 75,
        unit: "min",
        bound: StatBound::Goal,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, Serialize)]
pub struct FoodEntry {
    pub name: &'static str,
    pub calories: u32,
    pub time: &'static str,
    pub category: MealCategory,
}

pub static FOOD_ENTRIES: [FoodEntry; 4] = [
    FoodEntry {
        name: "Overnight Oats",
        calories: 340,
        time: "8:30 AM",
        category: MealCategory::Breakfast,
    },
    FoodEntry {
        name: "Greek Yogurt",
        calories: 150,
        time: "10:15 AM",
        category: MealCategory::Snack,
    },
    FoodEntry {
        name: "Quinoa Bowl",
        calories: 520,
        time: "12:45 PM",
        category: MealCategory::Lunch,
    },
    FoodEntry {
        name: "Protein Shake",
        calories: 280,
        time: "3:20 PM",
        category: MealCategory::Snack,
    },
];

/// A community-sourced healthier alternative.
#[derive(Debug, Clone, Serialize)]
pub struct SwapSuggestion {
    pub original: &'static str,
    pub swap: &'static str,
    pub delta: &'static str,
    pub usage: &'static str,
    pub stores: u32,
}

pub static SWAP_SUGGESTIONS: [SwapSuggestion; 3] = [
    SwapSuggestion {
        original: "White Rice",
        swap: "Cauliflower Rice",
        delta: "-120 kcal",
        usage: "147 community swaps",
        stores: 3,
    },
    SwapSuggestion {
        original: "Regular Pasta",
        swap: "Lentil Pasta",
        delta: "+8g protein",
        usage: "89 community swaps",
        stores: 5,
    },
    SwapSuggestion {
        original: "Soda",
        swap: "Sparkling Water",
        delta: "-140 kcal, -35g sugar",
        usage: "256 community swaps",
        stores: 8,
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct AppFeature {
    pub title: &'static str,
    pub description: &'static str,
}

pub static APP_FEATURES: [AppFeature; 6] = [
    AppFeature {
        title: "Vision Capture",
        description: "AI-powered food recognition from any angle",
    },
    AppFeature {
        title: "Voice Intelligence",
        description: "Natural language food and activity logging",
    },
    AppFeature {
        title: "Quick Input",
        description: "Lightning-fast manual tracking",
    },
    AppFeature {
        title: "Community Wisdom",
        description: "Real swaps from your performance community",
    },
    AppFeature {
        title: "AI Optimization",
        description: "Personalized recommendations that adapt",
    },
    AppFeature {
        title: "Local Discovery",
        description: "Find better options wherever you are",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
    pub active: bool,
}

pub static NAV_ITEMS: [NavItem; 6] = [
    NavItem { name: "Dashboard", href: "#", active: true },
    NavItem { name: "Food Log", href: "#", active: false },
    NavItem { name: "Activity", href: "#", active: false },
    NavItem { name: "Progress", href: "#", active: false },
    NavItem { name: "Community", href: "#", active: false },
    NavItem { name: "Stores", href: "#", active: false },
];

/// Calories across today's log.
pub fn total_calories(entries: &[FoodEntry]) -> u32 {
    entries.iter().map(|e| e.calories).sum()
}
