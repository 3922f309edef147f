//! Fixed catalog of health targets offered on the targets step.

use serde::Serialize;

use super::model::HealthTarget;

/// Display metadata for one health target.
#[derive(Debug, Clone, Serialize)]
pub struct TargetConfig {
    pub id: HealthTarget,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub calories: &'static str,
    pub activity: &'static str,
    pub popular: bool,
}

pub static HEALTH_TARGETS: [TargetConfig; 3] = [
    TargetConfig {
        id: HealthTarget::Normal,
        name: "Foundation",
        description: "Balanced nutrition for sustainable wellness",
        icon: "⚖️",
        calories: "Balanced intake",
        activity: "Moderate activity",
        popular: false,
    },
    TargetConfig {
        id: HealthTarget::Sporty,
        name: "Performance",
        description: "Optimized for active lifestyles and training",
        icon: "🏃‍♂️",
        calories: "+15% calories",
        activity: "Enhanced performance",
        popular: true,
    },
    TargetConfig {
        id: HealthTarget::Ironman,
        name: "IronMan",
        description: "Maximum performance nutrition for athletes",
        icon: "🔥",
        calories: "+35% calories",
        activity: "Elite training",
        popular: false,
    },
];

impl TargetConfig {
    pub fn for_target(target: HealthTarget) -> &'static TargetConfig {
        match target {
            HealthTarget::Normal => &HEALTH_TARGETS[0],
            HealthTarget::Sporty => &HEALTH_TARGETS[1],
            HealthTarget::Ironman => &HEALTH_TARGETS[2],
        }
    }
}
