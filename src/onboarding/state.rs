//! Onboarding step sequencer: pure transitions over a serializable state.

use serde::{Deserialize, Serialize};

use crate::profile::{FieldUpdate, UserProfile};

/// The steps of the onboarding wizard.
///
/// Progresses linearly: Welcome → Profile → Targets, then completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    #[default]
    Welcome,
    Profile,
    Targets,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 3] = [Self::Welcome, Self::Profile, Self::Targets];

    pub fn index(&self) -> usize {
        match self {
            Self::Welcome => 0,
            Self::Profile => 1,
            Self::Targets => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The following step, or `None` on the last one.
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The preceding step, or `None` on the first one.
    pub fn prev(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Welcome => "Fuel Your Pursuit",
            Self::Profile => "Your Foundation",
            Self::Targets => "Define Your Goal",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::Welcome => "Performance nutrition meets intelligent tracking",
            Self::Profile => "Build your personalized nutrition profile",
            Self::Targets => "Choose your performance pathway",
        }
    }

    /// Catalog entries for the presentation layer.
    pub fn catalog() -> Vec<StepInfo> {
        Self::ALL
            .iter()
            .map(|step| StepInfo {
                id: *step,
                index: step.index(),
                title: step.title(),
                subtitle: step.subtitle(),
            })
            .collect()
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Welcome => "welcome",
            Self::Profile => "profile",
            Self::Targets => "targets",
        };
        write!(f, "{s}")
    }
}

/// Display metadata for one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepInfo {
    pub id: OnboardingStep,
    pub index: usize,
    pub title: &'static str,
    pub subtitle: &'static str,
}

/// Outcome of [`OnboardingState::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next step.
    Moved(OnboardingState),
    /// Already on the last step: the profile is ready for submission.
    Completed(UserProfile),
}

/// Current step plus the profile accumulated so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingState {
    pub step: OnboardingStep,
    pub profile: UserProfile,
}

impl OnboardingState {
    /// Move forward one step, or complete on the last one.
    ///
    /// Does not check the current step; callers gate on
    /// [`OnboardingState::is_step_complete`] first.
    pub fn advance(self) -> Advance {
        match self.step.next() {
            Some(step) => Advance::Moved(Self { step, ..self }),
            None => Advance::Completed(self.profile),
        }
    }

    /// Move back one step. No-op on the first step.
    pub fn retreat(self) -> Self {
        match self.step.prev() {
            Some(step) => Self { step, ..self },
            None => self,
        }
    }

    /// Apply a single-field edit, leaving every other field untouched.
    pub fn update_field(self, update: FieldUpdate) -> Self {
        Self {
            profile: self.profile.with_update(update),
            ..self
        }
    }

    pub fn is_step_complete(&self, step: OnboardingStep) -> bool {
        match step {
            OnboardingStep::Welcome => true,
            OnboardingStep::Profile => self.profile.has_required_fields(),
            // `target` is a catalog enum with a default, so always set.
            OnboardingStep::Targets => true,
        }
    }

    pub fn current_step_complete(&self) -> bool {
        self.is_step_complete(self.step)
    }

    pub fn step_index(&self) -> usize {
        self.step.index()
    }

    /// Progress through the wizard, counting the current step as done.
    pub fn progress_percent(&self) -> u32 {
        let total = OnboardingStep::ALL.len() as f64;
        (((self.step_index() + 1) as f64 / total) * 100.0).round() as u32
    }
}
