//! OnboardingManager: owns onboarding sessions and hands completed profiles
//! to the submitter.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::state::{Advance, OnboardingState, OnboardingStep};
use crate::error::OnboardingError;
use crate::profile::{FieldUpdate, Measurements, UserProfile};
use crate::submission::ProfileSubmitter;

/// How often the background sweep looks for stale sessions.
const PRUNE_INTERVAL: Duration = Duration::from_secs(600);

type Sessions = Arc<RwLock<HashMap<Uuid, Session>>>;

/// Which top-level view a session is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppView {
    Onboarding,
    Dashboard,
}

/// One user's pass through the wizard. Lives in memory only.
#[derive(Debug, Clone)]
struct Session {
    state: OnboardingState,
    view: AppView,
    /// Set while the cosmetic step transition runs.
    transitioning: bool,
    /// Set while the completed profile is being submitted.
    submitting: bool,
    /// Inline message from the last failed submission.
    error: Option<String>,
    profile_id: Option<String>,
    last_active: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            state: OnboardingState::default(),
            view: AppView::Onboarding,
            transitioning: false,
            submitting: false,
            error: None,
            profile_id: None,
            last_active: Instant::now(),
        }
    }

    fn is_busy(&self) -> bool {
        self.transitioning || self.submitting
    }

    /// Reject navigation and edits while something else owns the session.
    fn ensure_idle(&self) -> Result<(), OnboardingError> {
        if self.view == AppView::Dashboard {
            return Err(OnboardingError::AlreadyCompleted);
        }
        if self.submitting {
            return Err(OnboardingError::SubmissionInFlight);
        }
        if self.transitioning {
            return Err(OnboardingError::Transitioning);
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    fn snapshot(&self, id: Uuid) -> SessionSnapshot {
        SessionSnapshot {
            id,
            view: self.view,
            step: self.state.step,
            step_index: self.state.step_index(),
            step_count: OnboardingStep::ALL.len(),
            title: self.state.step.title(),
            subtitle: self.state.step.subtitle(),
            progress_percent: self.state.progress_percent(),
            step_complete: self.state.current_step_complete(),
            is_last_step: self.state.step.is_last(),
            profile: self.state.profile.clone(),
            submitting: self.submitting,
            error: self.error.clone(),
            profile_id: self.profile_id.clone(),
        }
    }
}

/// Session state returned to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub view: AppView,
    pub step: OnboardingStep,
    pub step_index: usize,
    pub step_count: usize,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub progress_percent: u32,
    pub step_complete: bool,
    pub is_last_step: bool,
    pub profile: UserProfile,
    pub submitting: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
}

/// Coordinates onboarding sessions: step gating, transition delay, and
/// profile submission on completion.
///
/// Step changes and submissions run on their own tasks, so a caller that
/// goes away mid-request never leaves a session stuck in a busy state.
pub struct OnboardingManager {
    submitter: Arc<dyn ProfileSubmitter>,
    sessions: Sessions,
    transition_delay: Duration,
}

impl OnboardingManager {
    pub fn new(submitter: Arc<dyn ProfileSubmitter>, transition_delay: Duration) -> Self {
        Self {
            submitter,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            transition_delay,
        }
    }

    /// Start a new session on the welcome step with a default profile.
    pub async fn create_session(&self) -> SessionSnapshot {
        let id = Uuid::new_v4();
        let session = Session::new();
        let snapshot = session.snapshot(id);
        self.sessions.write().await.insert(id, session);
        tracing::info!(session = %id, "Onboarding session started");
        snapshot
    }

    pub async fn snapshot(&self, id: Uuid) -> Result<SessionSnapshot, OnboardingError> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(&id)
            .ok_or(OnboardingError::SessionNotFound(id))?;
        Ok(session.snapshot(id))
    }

    /// Profile of a session that finished onboarding.
    pub async fn completed_profile(&self, id: Uuid) -> Result<UserProfile, OnboardingError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(OnboardingError::SessionNotFound(id))?;
        if session.view != AppView::Dashboard {
            return Err(OnboardingError::NotCompleted);
        }
        session.touch();
        Ok(session.state.profile.clone())
    }

    /// Merge one field into the session's profile.
    pub async fn update_field(
        &self,
        id: Uuid,
        update: FieldUpdate,
    ) -> Result<SessionSnapshot, OnboardingError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(OnboardingError::SessionNotFound(id))?;
        session.ensure_idle()?;

        tracing::debug!(session = %id, ?update, "Profile field updated");
        session.state = std::mem::take(&mut session.state).update_field(update);
        session.touch();
        Ok(session.snapshot(id))
    }

    /// Advance past the current step, or submit the profile on the last one.
    ///
    /// A failed submission leaves the session on the last step with `error`
    /// set and the profile intact, so the user can retry.
    pub async fn advance(&self, id: Uuid) -> Result<SessionSnapshot, OnboardingError> {
        let outcome = {
            let mut sessions = self.sessions.write().await;
            let session = sessions
                .get_mut(&id)
                .ok_or(OnboardingError::SessionNotFound(id))?;
            session.ensure_idle()?;

            if !session.state.current_step_complete() {
                return Err(OnboardingError::StepIncomplete {
                    step: session.state.step.to_string(),
                });
            }

            let outcome = session.state.clone().advance();
            match outcome {
                Advance::Moved(_) => session.transitioning = true,
                Advance::Completed(_) => {
                    session.submitting = true;
                    session.error = None;
                }
            }
            session.touch();
            outcome
        };

        let sessions = Arc::clone(&self.sessions);
        let task = match outcome {
            Advance::Moved(next) => tokio::spawn(commit_transition(
                sessions,
                id,
                next,
                self.transition_delay,
            )),
            Advance::Completed(profile) => tokio::spawn(complete(
                sessions,
                Arc::clone(&self.submitter),
                id,
                profile,
            )),
        };
        self.join(id, task).await
    }

    /// Step back one step. No-op (and no delay) on the welcome step.
    pub async fn retreat(&self, id: Uuid) -> Result<SessionSnapshot, OnboardingError> {
        let previous = {
            let mut sessions = self.sessions.write().await;
            let session = sessions
                .get_mut(&id)
                .ok_or(OnboardingError::SessionNotFound(id))?;
            session.ensure_idle()?;

            if session.state.step.prev().is_none() {
                return Ok(session.snapshot(id));
            }
            session.transitioning = true;
            session.touch();
            session.state.clone().retreat()
        };

        let task = tokio::spawn(commit_transition(
            Arc::clone(&self.sessions),
            id,
            previous,
            self.transition_delay,
        ));
        self.join(id, task).await
    }

    /// Remove sessions untouched for longer than `idle_timeout`.
    ///
    /// Sessions mid-transition or mid-submission are kept.
    pub async fn prune_stale_sessions(&self, idle_timeout: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.is_busy() || s.last_active.elapsed() < idle_timeout);
        let pruned = before - sessions.len();
        if pruned > 0 {
            tracing::info!(pruned, remaining = sessions.len(), "Pruned stale onboarding sessions");
        }
        pruned
    }

    /// Sweep stale sessions on a fixed interval for as long as the manager
    /// lives.
    pub fn spawn_pruning(self: &Arc<Self>, idle_timeout: Duration) -> JoinHandle<()> {
        let manager = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(PRUNE_INTERVAL);
            interval.tick().await; // Skip immediate first tick
            loop {
                interval.tick().await;
                let Some(manager) = manager.upgrade() else {
                    break;
                };
                manager.prune_stale_sessions(idle_timeout).await;
            }
        })
    }

    /// Wait for a step task. A task that died clears the busy flags so the
    /// session can be retried.
    async fn join(
        &self,
        id: Uuid,
        task: JoinHandle<Result<SessionSnapshot, OnboardingError>>,
    ) -> Result<SessionSnapshot, OnboardingError> {
        match task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(session = %id, error = %e, "Onboarding step task failed");
                if let Some(session) = self.sessions.write().await.get_mut(&id) {
                    session.transitioning = false;
                    session.submitting = false;
                }
                Err(OnboardingError::Interrupted(e.to_string()))
            }
        }
    }
}

async fn commit_transition(
    sessions: Sessions,
    id: Uuid,
    next: OnboardingState,
    delay: Duration,
) -> Result<SessionSnapshot, OnboardingError> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let mut sessions = sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or(OnboardingError::SessionNotFound(id))?;
    tracing::debug!(session = %id, from = %session.state.step, to = %next.step, "Step changed");
    session.state = next;
    session.transitioning = false;
    session.touch();
    Ok(session.snapshot(id))
}

async fn complete(
    sessions: Sessions,
    submitter: Arc<dyn ProfileSubmitter>,
    id: Uuid,
    profile: UserProfile,
) -> Result<SessionSnapshot, OnboardingError> {
    tracing::info!(session = %id, target = %profile.target, "Onboarding complete, submitting profile");
    let result = submitter.submit(&profile, &Measurements::default()).await;

    let mut sessions = sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or(OnboardingError::SessionNotFound(id))?;
    session.submitting = false;
    session.touch();

    match result {
        Ok(created) => {
            tracing::info!(session = %id, profile_id = ?created.profile_id, "Profile submitted");
            session.view = AppView::Dashboard;
            session.profile_id = created.profile_id;
            session.error = None;
        }
        Err(e) => {
            tracing::warn!(session = %id, error = %e, details = %e.details(), "Profile submission failed");
            session.error = Some(e.to_string());
        }
    }
    Ok(session.snapshot(id))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::SubmissionError;
    use crate::profile::Sex;
    use crate::submission::CreatedProfile;

    /// Submitter that records calls and answers with a fixed result.
    struct StubSubmitter {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubSubmitter {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl ProfileSubmitter for StubSubmitter {
        async fn submit(
            &self,
            _profile: &UserProfile,
            _measurements: &Measurements,
        ) -> Result<CreatedProfile, SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(SubmissionError::Network {
                    reason: "connection refused".to_string(),
                })
            } else {
                Ok(CreatedProfile {
                    data: serde_json::json!({"id": "abc123"}),
                    profile_id: Some("abc123".to_string()),
                })
            }
        }
    }

    fn manager(submitter: Arc<StubSubmitter>) -> OnboardingManager {
        OnboardingManager::new(submitter, Duration::ZERO)
    }

    async fn fill_profile(manager: &OnboardingManager, id: Uuid) {
        for update in [
            FieldUpdate::FirstName("Jane".to_string()),
            FieldUpdate::LastName("Doe".to_string()),
            FieldUpdate::Age("29".to_string()),
            FieldUpdate::Sex(Some(Sex::Female)),
            FieldUpdate::Location("Austin, TX".to_string()),
        ] {
            manager.update_field(id, update).await.unwrap();
        }
    }

    #[tokio::test]
    async fn new_session_starts_on_welcome() {
        let manager = manager(StubSubmitter::new(false));
        let snapshot = manager.create_session().await;
        assert_eq!(snapshot.step, OnboardingStep::Welcome);
        assert_eq!(snapshot.view, AppView::Onboarding);
        assert!(snapshot.step_complete);
        assert_eq!(snapshot.step_count, 3);
    }

    #[tokio::test]
    async fn full_walkthrough_submits_once_and_switches_view() {
        let submitter = StubSubmitter::new(false);
        let manager = manager(Arc::clone(&submitter));
        let id = manager.create_session().await.id;

        assert_eq!(manager.advance(id).await.unwrap().step_index, 1);
        fill_profile(&manager, id).await;
        assert_eq!(manager.advance(id).await.unwrap().step_index, 2);

        let done = manager.advance(id).await.unwrap();
        assert_eq!(done.view, AppView::Dashboard);
        assert_eq!(done.profile_id.as_deref(), Some("abc123"));
        assert!(!done.submitting);
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);

        let profile = manager.completed_profile(id).await.unwrap();
        assert_eq!(profile.first_name, "Jane");

        assert!(matches!(
            manager.advance(id).await,
            Err(OnboardingError::AlreadyCompleted)
        ));
    }

    #[tokio::test]
    async fn incomplete_profile_blocks_advance() {
        let submitter = StubSubmitter::new(false);
        let manager = manager(Arc::clone(&submitter));
        let id = manager.create_session().await.id;
        manager.advance(id).await.unwrap();

        let err = manager.advance(id).await.unwrap_err();
        assert!(matches!(err, OnboardingError::StepIncomplete { ref step } if step == "profile"));
        assert_eq!(manager.snapshot(id).await.unwrap().step_index, 1);
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_submission_keeps_profile_for_retry() {
        let submitter = StubSubmitter::new(true);
        let manager = manager(Arc::clone(&submitter));
        let id = manager.create_session().await.id;
        manager.advance(id).await.unwrap();
        fill_profile(&manager, id).await;
        manager.advance(id).await.unwrap();

        let failed = manager.advance(id).await.unwrap();
        assert_eq!(failed.view, AppView::Onboarding);
        assert_eq!(failed.step, OnboardingStep::Targets);
        assert_eq!(failed.error.as_deref(), Some("Network connection error"));
        assert_eq!(failed.profile.first_name, "Jane");
        assert!(matches!(
            manager.completed_profile(id).await,
            Err(OnboardingError::NotCompleted)
        ));

        // Retry goes out again with the same profile.
        manager.advance(id).await.unwrap();
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn retreat_at_welcome_is_noop() {
        let manager = manager(StubSubmitter::new(false));
        let id = manager.create_session().await.id;
        let snapshot = manager.retreat(id).await.unwrap();
        assert_eq!(snapshot.step_index, 0);

        manager.advance(id).await.unwrap();
        assert_eq!(manager.retreat(id).await.unwrap().step_index, 0);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let manager = manager(StubSubmitter::new(false));
        let id = Uuid::new_v4();
        assert!(matches!(
            manager.advance(id).await,
            Err(OnboardingError::SessionNotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn navigation_blocked_during_transition() {
        let manager = Arc::new(OnboardingManager::new(
            StubSubmitter::new(false),
            Duration::from_millis(200),
        ));
        let id = manager.create_session().await.id;

        let background = {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move { manager.advance(id).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(matches!(
            manager.advance(id).await,
            Err(OnboardingError::Transitioning)
        ));
        assert!(matches!(
            manager.update_field(id, FieldUpdate::FirstName("J".to_string())).await,
            Err(OnboardingError::Transitioning)
        ));

        let moved = background.await.unwrap().unwrap();
        assert_eq!(moved.step_index, 1);
    }

    /// Submitter that takes a while to answer.
    struct SlowSubmitter {
        delay: Duration,
    }

    #[async_trait]
    impl ProfileSubmitter for SlowSubmitter {
        async fn submit(
            &self,
            _profile: &UserProfile,
            _measurements: &Measurements,
        ) -> Result<CreatedProfile, SubmissionError> {
            tokio::time::sleep(self.delay).await;
            Ok(CreatedProfile {
                data: serde_json::json!({"id": "slow"}),
                profile_id: Some("slow".to_string()),
            })
        }
    }

    #[tokio::test]
    async fn abandoned_transition_still_settles() {
        let manager = Arc::new(OnboardingManager::new(
            StubSubmitter::new(false),
            Duration::from_millis(200),
        ));
        let id = manager.create_session().await.id;

        let request = {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move { manager.advance(id).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        request.abort();
        tokio::time::sleep(Duration::from_millis(400)).await;

        let snapshot = manager.snapshot(id).await.unwrap();
        assert_eq!(snapshot.step, OnboardingStep::Profile);
        manager
            .update_field(id, FieldUpdate::FirstName("Jane".to_string()))
            .await
            .unwrap();
        assert_eq!(manager.retreat(id).await.unwrap().step_index, 0);
    }

    #[tokio::test]
    async fn abandoned_submission_still_settles() {
        let manager = Arc::new(OnboardingManager::new(
            Arc::new(SlowSubmitter {
                delay: Duration::from_millis(200),
            }),
            Duration::ZERO,
        ));
        let id = manager.create_session().await.id;
        manager.advance(id).await.unwrap();
        fill_profile(&manager, id).await;
        manager.advance(id).await.unwrap();

        let request = {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move { manager.advance(id).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(manager.snapshot(id).await.unwrap().submitting);
        request.abort();
        tokio::time::sleep(Duration::from_millis(400)).await;

        let snapshot = manager.snapshot(id).await.unwrap();
        assert!(!snapshot.submitting);
        assert_eq!(snapshot.view, AppView::Dashboard);
        assert_eq!(snapshot.profile_id.as_deref(), Some("slow"));
    }

    #[tokio::test]
    async fn stale_sessions_are_pruned() {
        let manager = manager(StubSubmitter::new(false));
        let stale = manager.create_session().await.id;
        tokio::time::sleep(Duration::from_millis(100)).await;
        let fresh = manager.create_session().await.id;

        assert_eq!(manager.prune_stale_sessions(Duration::from_millis(50)).await, 1);
        assert!(matches!(
            manager.snapshot(stale).await,
            Err(OnboardingError::SessionNotFound(_))
        ));
        assert!(manager.snapshot(fresh).await.is_ok());
    }

    #[tokio::test]
    async fn busy_sessions_survive_pruning() {
        let manager = Arc::new(OnboardingManager::new(
            StubSubmitter::new(false),
            Duration::from_millis(200),
        ));
        let id = manager.create_session().await.id;
        let background = {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move { manager.advance(id).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(manager.prune_stale_sessions(Duration::ZERO).await, 0);
        assert_eq!(background.await.unwrap().unwrap().step_index, 1);
    }
}
