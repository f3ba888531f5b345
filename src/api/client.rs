//! Typed endpoint calls over a [`Transport`].

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::*;
use super::{ApiResponse, Transport};
use crate::error::ApiError;
use crate::wizard::OnboardingPayload;

pub const REGISTER_PATH: &str = "/users/register";
pub const USER_BY_EMAIL_PATH: &str = "/users/by-email";
pub const ONBOARD_PATH: &str = "/users/onboard";
pub const GENERATE_GROWTH_PATH: &str = "/growth-path/generate";
pub const GENERATE_MONTH_PATH: &str = "/roadmap/generate-month";
pub const CHAT_PATH: &str = "/roadmap/chat";
pub const PROGRESS_UPDATE_PATH: &str = "/progress/update";
pub const RESUME_TOGGLE_PATH: &str = "/progress/resume-toggle";
pub const LINKEDIN_POST_PATH: &str = "/linkedin/generate-post";
pub const PROFILE_DETAILS_PATH: &str = "/profile/details";
pub const PROFILE_REFRESH_PATH: &str = "/profile/refresh";

/// Client for the growth service.
///
/// The three onboarding calls hand back the raw [`ApiResponse`] because the
/// submission pipeline owns their success criteria (409 on register is not
/// an error there). Everything else is decoded here.
#[derive(Clone)]
pub struct DeltaApi {
    transport: Arc<dyn Transport>,
}

impl DeltaApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn post_raw<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse, ApiError> {
        let body = serde_json::to_value(body)?;
        self.transport.post(path, &body).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.post_raw(path, body)
            .await?
            .error_for_status(path)?
            .json(path)
    }

    async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.post_raw(path, body).await?.error_for_status(path)?;
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.transport
            .get(path)
            .await?
            .error_for_status(path)?
            .json(path)
    }

    // ── Onboarding ───────────────────────────────────────────────────

    pub async fn register(&self, email: &str, name: &str) -> Result<ApiResponse, ApiError> {
        self.post_raw(REGISTER_PATH, &RegisterRequest { email, name })
            .await
    }

    /// Look up an existing user's id. Non-2xx answers and bodies without
    /// `user.id` resolve to `None`.
    pub async fn find_user_id(&self, email: &str) -> Result<Option<UserId>, ApiError> {
        let resp = self
            .post_raw(USER_BY_EMAIL_PATH, &EmailLookupRequest { email })
            .await?;
        if !resp.is_success() {
            debug!(status = resp.status, "User lookup by email found nothing");
            return Ok(None);
        }
        Ok(resp
            .json_opt::<UserEnvelope>()
            .and_then(|envelope| envelope.user_id()))
    }

    pub async fn onboard(
        &self,
        user_id: &UserId,
        profile: &OnboardingPayload,
    ) -> Result<ApiResponse, ApiError> {
        self.post_raw(ONBOARD_PATH, &OnboardRequest { user_id, profile })
            .await
    }

    pub async fn generate_growth_path(
        &self,
        user_id: &UserId,
        timeline_months: u32,
    ) -> Result<ApiResponse, ApiError> {
        self.post_raw(
            GENERATE_GROWTH_PATH,
            &GenerateRoadmapRequest {
                user_id,
                timeline_months,
            },
        )
        .await
    }

    // ── Roadmap ──────────────────────────────────────────────────────

    /// Full roadmap, or `None` when the service has none for this user.
    pub async fn growth_path(&self, user_id: &UserId) -> Result<Option<Roadmap>, ApiError> {
        let path = format!("/growth-path/{user_id}");
        let resp = self.transport.get(&path).await?;
        if !resp.is_success() {
            warn!(status = resp.status, %user_id, "Full roadmap unavailable");
            return Ok(None);
        }
        let parsed: GrowthPathResponse = resp.json(&path)?;
        Ok(parsed.enriched_roadmap)
    }

    /// Tasks of the current month, or `None` if the month has not been
    /// generated yet.
    pub async fn current_month(&self, user_id: &UserId) -> Result<Option<CurrentMonth>, ApiError> {
        let path = format!("/roadmap/current-month/{user_id}");
        let resp = self.transport.get(&path).await?;
        if !resp.is_success() {
            debug!(status = resp.status, %user_id, "No current month yet");
            return Ok(None);
        }
        resp.json(&path).map(Some)
    }

    pub async fn generate_month(&self, user_id: &UserId) -> Result<GeneratedMonth, ApiError> {
        self.post_json(GENERATE_MONTH_PATH, &UserRequest { user_id })
            .await
    }

    pub async fn chat(&self, user_id: &UserId, message: &str) -> Result<ChatReply, ApiError> {
        self.post_json(CHAT_PATH, &ChatRequest { user_id, message })
            .await
    }

    // ── Progress ─────────────────────────────────────────────────────

    pub async fn progress_summary(&self, user_id: &UserId) -> Result<ProgressSummary, ApiError> {
        self.get_json(&format!("/progress/{user_id}/summary")).await
    }

    pub async fn progress_tasks(&self, user_id: &UserId) -> Result<Vec<TaskRecord>, ApiError> {
        let parsed: TasksResponse = self
            .get_json(&format!("/progress/{user_id}/tasks"))
            .await?;
        Ok(parsed.tasks)
    }

    pub async fn update_progress(
        &self,
        user_id: &UserId,
        item_id: &ItemId,
        status: TaskStatus,
    ) -> Result<ProgressUpdate, ApiError> {
        self.post_json(
            PROGRESS_UPDATE_PATH,
            &ProgressUpdateRequest {
                user_id,
                item_id,
                status,
            },
        )
        .await
    }

    pub async fn set_resume_inclusion(
        &self,
        user_id: &UserId,
        item_id: &ItemId,
        include_in_resume: bool,
    ) -> Result<(), ApiError> {
        self.post_unit(
            RESUME_TOGGLE_PATH,
            &ResumeToggleRequest {
                user_id,
                item_id,
                include_in_resume,
            },
        )
        .await
    }

    pub async fn linkedin_post(
        &self,
        user_id: &UserId,
        item_id: &ItemId,
    ) -> Result<LinkedInPost, ApiError> {
        self.post_json(LINKEDIN_POST_PATH, &ItemRequest { user_id, item_id })
            .await
    }

    // ── Profile ──────────────────────────────────────────────────────

    /// The resume exactly as the service returns it under `resume`.
    pub async fn resume_document(&self, user_id: &UserId) -> Result<serde_json::Value, ApiError> {
        let mut body: serde_json::Value = self
            .get_json(&format!("/profile/{user_id}/resume"))
            .await?;
        Ok(body
            .get_mut("resume")
            .map(serde_json::Value::take)
            .unwrap_or(serde_json::Value::Null))
    }

    pub async fn resume(&self, user_id: &UserId) -> Result<Option<Resume>, ApiError> {
        let document = self.resume_document(user_id).await?;
        if document.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(document)?))
    }

    pub async fn linkedin_profile(&self, user_id: &UserId) -> Result<LinkedInProfile, ApiError> {
        let path = format!("/profile/{user_id}/linkedin");
        let resp = self.transport.get(&path).await?.error_for_status(&path)?;
        Ok(resp.json_opt().unwrap_or_default())
    }

    pub async fn save_contact_details(
        &self,
        user_id: &UserId,
        details: &ContactDetails,
    ) -> Result<(), ApiError> {
        self.post_unit(PROFILE_DETAILS_PATH, &ContactDetailsRequest { user_id, details })
            .await
    }

    pub async fn refresh_profile(&self, user_id: &UserId) -> Result<(), ApiError> {
        self.post_unit(PROFILE_REFRESH_PATH, &UserRequest { user_id })
            .await
    }
}
