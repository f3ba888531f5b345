//! Submission pipeline: register → persist profile → generate roadmap.
//!
//! Steps run strictly in order and the first failure ends the attempt.
//! Nothing is retried; resubmitting is safe because registration treats
//! "already exists" (HTTP 409) as success.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::{DeltaApi, UserEnvelope, UserId};
use crate::config::ClientConfig;
use crate::error::OnboardingError;
use crate::notify::{LoadingGuard, Notifier, ONBOARDING_STATUS, ToastKind};
use crate::pages::Page;
use crate::session::{Session, SessionUser};
use crate::wizard::{OnboardingPayload, Wizard};

pub const SUCCESS_TOAST: &str = "Growth path generated successfully!";
pub const SUCCESS_STATUS: &str =
    "Success! Navigate to \"My Roadmap\" to see your personalized path.";
pub const FAILURE_TOAST: &str = "Error during onboarding. Please try again.";

/// The named steps of a submission, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Register,
    PersistProfile,
    GenerateRoadmap,
}

impl PipelineStep {
    pub const ORDER: [PipelineStep; 3] = [
        PipelineStep::Register,
        PipelineStep::PersistProfile,
        PipelineStep::GenerateRoadmap,
    ];

    pub fn next(&self) -> Option<PipelineStep> {
        match self {
            Self::Register => Some(Self::PersistProfile),
            Self::PersistProfile => Some(Self::GenerateRoadmap),
            Self::GenerateRoadmap => None,
        }
    }
}

impl std::fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Register => "register",
            Self::PersistProfile => "persist_profile",
            Self::GenerateRoadmap => "generate_roadmap",
        };
        write!(f, "{s}")
    }
}

/// What a successful step hands to the ones after it.
#[derive(Debug)]
enum StepOutput {
    UserResolved(UserId),
    ProfileStored,
    RoadmapRequested,
}

/// Runs onboarding submissions against the growth service.
pub struct SubmissionPipeline {
    api: DeltaApi,
    session: Session,
    notifier: Arc<dyn Notifier>,
    config: ClientConfig,
}

impl SubmissionPipeline {
    pub fn new(
        api: DeltaApi,
        session: Session,
        notifier: Arc<dyn Notifier>,
        config: ClientConfig,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            config,
        }
    }

    /// Validate the whole wizard, then run the pipeline. Validation
    /// failures never reach the network.
    pub async fn submit(&self, wizard: &Wizard) -> Result<SessionUser, OnboardingError> {
        let payload = match wizard.payload() {
            Ok(payload) => payload,
            Err(e) => {
                debug!(error = %e, "Onboarding form incomplete");
                let err = OnboardingError::from(e);
                self.notifier.toast(ToastKind::Warning, &err.to_string());
                self.notifier
                    .status(ONBOARDING_STATUS, ToastKind::Error, &err.to_string());
                return Err(err);
            }
        };
        self.run(payload).await
    }

    /// Run every step for an already assembled payload.
    pub async fn run(&self, payload: OnboardingPayload) -> Result<SessionUser, OnboardingError> {
        info!(email = %payload.email, "Starting onboarding submission");

        let outcome = {
            let _loading = LoadingGuard::new(self.notifier.as_ref());
            self.execute(&payload).await
        };

        match outcome {
            Ok(user) => {
                self.session.establish(user.clone()).await;
                self.notifier.toast(ToastKind::Success, SUCCESS_TOAST);
                self.notifier
                    .status(ONBOARDING_STATUS, ToastKind::Success, SUCCESS_STATUS);
                self.notifier
                    .navigate_after(Page::Roadmap, self.config.redirect_delay);
                info!(user_id = %user.id, "Onboarding complete");
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Onboarding submission failed");
                self.notifier.toast(ToastKind::Error, FAILURE_TOAST);
                self.notifier
                    .status(ONBOARDING_STATUS, ToastKind::Error, &e.to_string());
                Err(e)
            }
        }
    }

    async fn execute(&self, payload: &OnboardingPayload) -> Result<SessionUser, OnboardingError> {
        let mut user_id: Option<UserId> = None;

        for step in PipelineStep::ORDER {
            debug!(%step, "Running onboarding step");
            match self.run_step(step, payload, user_id.as_ref()).await? {
                StepOutput::UserResolved(id) => {
                    info!(%step, user_id = %id, "User resolved");
                    user_id = Some(id);
                }
                StepOutput::ProfileStored | StepOutput::RoadmapRequested => {
                    info!(%step, "Step complete");
                }
            }
        }

        let id = user_id.ok_or_else(|| OnboardingError::UserIdUnresolved {
            email: payload.email.clone(),
        })?;
        Ok(SessionUser {
            id,
            profile: payload.clone(),
        })
    }

    async fn run_step(
        &self,
        step: PipelineStep,
        payload: &OnboardingPayload,
        user_id: Option<&UserId>,
    ) -> Result<StepOutput, OnboardingError> {
        let resolved = || {
            user_id.ok_or_else(|| OnboardingError::UserIdUnresolved {
                email: payload.email.clone(),
            })
        };

        match step {
            PipelineStep::Register => self.register(payload).await.map(StepOutput::UserResolved),
            PipelineStep::PersistProfile => {
                let id = resolved()?;
                self.persist_profile(id, payload)
                    .await
                    .map(|()| StepOutput::ProfileStored)
            }
            PipelineStep::GenerateRoadmap => {
                let id = resolved()?;
                self.generate_roadmap(id, payload.timeline_months())
                    .await
                    .map(|()| StepOutput::RoadmapRequested)
            }
        }
    }

    /// Register, tolerating "already exists", and resolve the user id.
    async fn register(&self, payload: &OnboardingPayload) -> Result<UserId, OnboardingError> {
        let resp = self
            .api
            .register(&payload.email, &payload.name)
            .await
            .map_err(|e| OnboardingError::RegistrationFailed {
                reason: e.to_string(),
            })?;

        if !resp.is_success() && !resp.is_conflict() {
            return Err(OnboardingError::RegistrationFailed {
                reason: format!("HTTP {}: {}", resp.status, resp.body),
            });
        }
        if resp.is_conflict() {
            info!(email = %payload.email, "User already registered");
        }

        if let Some(id) = resp
            .json_opt::<UserEnvelope>()
            .and_then(|envelope| envelope.user_id())
        {
            return Ok(id);
        }

        debug!(email = %payload.email, "No id in registration response, looking up by email");
        match self.api.find_user_id(&payload.email).await {
            Ok(Some(id)) => Ok(id),
            Ok(None) => Err(OnboardingError::UserIdUnresolved {
                email: payload.email.clone(),
            }),
            Err(e) => {
                warn!(error = %e, "User lookup by email failed");
                Err(OnboardingError::UserIdUnresolved {
                    email: payload.email.clone(),
                })
            }
        }
    }

    async fn persist_profile(
        &self,
        user_id: &UserId,
        payload: &OnboardingPayload,
    ) -> Result<(), OnboardingError> {
        let resp = self.api.onboard(user_id, payload).await.map_err(|e| {
            OnboardingError::OnboardingPersistFailed {
                status: e.status(),
                body: e.to_string(),
            }
        })?;
        if !resp.is_success() {
            warn!(status = resp.status, body = %resp.body, "Onboarding rejected");
            return Err(OnboardingError::OnboardingPersistFailed {
                status: Some(resp.status),
                body: resp.body,
            });
        }
        Ok(())
    }

    async fn generate_roadmap(
        &self,
        user_id: &UserId,
        timeline_months: u32,
    ) -> Result<(), OnboardingError> {
        let resp = self
            .api
            .generate_growth_path(user_id, timeline_months)
            .await
            .map_err(|e| OnboardingError::RoadmapGenerationFailed {
                reason: e.to_string(),
            })?;
        if !resp.is_success() {
            warn!(status = resp.status, body = %resp.body, "Roadmap generation rejected");
            return Err(OnboardingError::RoadmapGenerationFailed {
                reason: format!("HTTP {}: {}", resp.status, resp.body),
            });
        }
        Ok(())
    }
}
