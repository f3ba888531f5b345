//! Page handlers behind the navigation bar.
//!
//! Every handler except the onboarding page requires an established
//! [`Session`]; without one it returns [`SessionError::OnboardingRequired`]
//! before touching the network. Failures are logged, shown as an error
//! toast and returned to the caller.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api::client::GENERATE_GROWTH_PATH;
use crate::api::{ContactDetails, CurrentMonth, DeltaApi, ItemId, TaskRecord, TaskStatus, UserId};
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::notify::{LoadingGuard, Notifier, ToastKind};
use crate::session::{Session, SessionUser};
use crate::views::{
    CurrentMonthView, LinkedInView, PhaseView, PreferencesView, ResumeView, SummaryView,
    TaskFilter, TaskView, current_month_view, format_post, linkedin_view, resume_view,
    roadmap_view, summary_view, task_views,
};

pub const CHAT_APOLOGY: &str = "Sorry, I had trouble understanding that. Could you try again?";

/// Top-level pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Onboarding,
    Roadmap,
    Progress,
    Profile,
}

impl Page {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Onboarding => "onboarding",
            Self::Roadmap => "roadmap",
            Self::Progress => "progress",
            Self::Profile => "profile",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "onboarding" => Ok(Self::Onboarding),
            "roadmap" => Ok(Self::Roadmap),
            "progress" => Ok(Self::Progress),
            "profile" => Ok(Self::Profile),
            other => Err(format!("unknown page: {other}")),
        }
    }
}

/// Canned requests offered next to the assistant chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    MoreProjects,
    MoreCourses,
    SlowerPace,
    FasterPace,
}

impl QuickAction {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MoreProjects => "I want to focus more on hands-on projects this month",
            Self::MoreCourses => "I prefer more structured courses over projects",
            Self::SlowerPace => "The current pace is too fast, I need fewer tasks",
            Self::FasterPace => "I can handle more tasks, speed things up!",
        }
    }
}

impl std::str::FromStr for QuickAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "more-projects" => Ok(Self::MoreProjects),
            "more-courses" => Ok(Self::MoreCourses),
            "slower-pace" => Ok(Self::SlowerPace),
            "faster-pace" => Ok(Self::FasterPace),
            other => Err(format!("unknown quick action: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapPage {
    pub month: CurrentMonthView,
    /// Empty when the full roadmap could not be loaded.
    pub phases: Vec<PhaseView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressPage {
    pub summary: SummaryView,
    pub tasks: Vec<TaskView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePage {
    pub resume: ResumeView,
    /// Prefilled from the resume header.
    pub contact: ContactDetails,
    pub linkedin: LinkedInView,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageContent {
    Onboarding,
    Roadmap(RoadmapPage),
    Progress(ProgressPage),
    Profile(ProfilePage),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    pub message: String,
    pub preferences: Option<PreferencesView>,
    /// Set when the assistant's change forced a month regeneration.
    pub regenerated: Option<CurrentMonthView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPost {
    pub text: String,
    pub suggested_image: Option<String>,
}

/// Session-gated page loads and actions.
pub struct Pages {
    api: DeltaApi,
    session: Session,
    notifier: Arc<dyn Notifier>,
    config: ClientConfig,
    current_month: RwLock<u32>,
    tasks: RwLock<Vec<TaskRecord>>,
}

impl Pages {
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
            current_month: RwLock::new(1),
            tasks: RwLock::new(Vec::new()),
        }
    }

    /// Month the user is currently on, 1 until the service says otherwise.
    pub async fn current_month(&self) -> u32 {
        *self.current_month.read().await
    }

    async fn set_current_month(&self, month: u32) {
        if month > 0 {
            *self.current_month.write().await = month;
        }
    }

    async fn user(&self) -> Result<SessionUser> {
        Ok(self.session.require().await?)
    }

    fn report<T>(&self, result: Result<T>, failure: &str) -> Result<T> {
        if let Err(e) = &result {
            warn!(error = %e, "{failure}");
            self.notifier.toast(ToastKind::Error, failure);
        }
        result
    }

    /// Load whichever page was selected.
    pub async fn load_page(&self, page: Page) -> Result<PageContent> {
        debug!(%page, "Loading page");
        match page {
            Page::Onboarding => Ok(PageContent::Onboarding),
            Page::Roadmap => self.load_roadmap().await.map(PageContent::Roadmap),
            Page::Progress => self
                .load_progress(TaskFilter::All)
                .await
                .map(PageContent::Progress),
            Page::Profile => self.load_profile().await.map(PageContent::Profile),
        }
    }

    // ── Roadmap ──────────────────────────────────────────────────────

    /// Current month first, then the full roadmap. A missing full roadmap
    /// is not an error.
    pub async fn load_roadmap(&self) -> Result<RoadmapPage> {
        let month = self.load_current_month().await?;
        let user = self.user().await?;

        let phases = match self.api.growth_path(&user.id).await {
            Ok(Some(roadmap)) => roadmap_view(&roadmap, self.current_month().await),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, user_id = %user.id, "Error loading full roadmap");
                Vec::new()
            }
        };
        Ok(RoadmapPage { month, phases })
    }

    /// Tasks for the current month, generating them if the service has none.
    pub async fn load_current_month(&self) -> Result<CurrentMonthView> {
        let user = self.user().await?;
        let _loading = LoadingGuard::new(self.notifier.as_ref());

        let result = match self.api.current_month(&user.id).await {
            Ok(Some(data)) => Ok(self.show_month(data).await),
            Ok(None) => {
                info!(user_id = %user.id, "No tasks for current month, generating");
                return self.report(
                    self.generate_month(&user.id).await,
                    "Error generating month tasks",
                );
            }
            Err(e) => Err(e.into()),
        };
        self.report(result, "Error loading current month")
    }

    /// Regenerate this month's tasks.
    pub async fn generate_current_month(&self) -> Result<CurrentMonthView> {
        let user = self.user().await?;
        let _loading = LoadingGuard::new(self.notifier.as_ref());
        let result = self.generate_month(&user.id).await;
        self.report(result, "Error generating month tasks")
    }

    async fn generate_month(&self, user_id: &UserId) -> Result<CurrentMonthView> {
        let generated = self.api.generate_month(user_id).await?;
        let view = self.show_month(CurrentMonth::from(generated)).await;
        self.notifier.toast(ToastKind::Success, "Month tasks generated!");
        Ok(view)
    }

    async fn show_month(&self, data: CurrentMonth) -> CurrentMonthView {
        self.set_current_month(data.current_month).await;
        current_month_view(&data)
    }

    /// Chat with the roadmap assistant. Blank messages are ignored. A chat
    /// failure yields an apology instead of an error.
    pub async fn send_assistant_message(&self, message: &str) -> Result<Option<AssistantReply>> {
        let user = self.user().await?;
        let message = message.trim();
        if message.is_empty() {
            return Ok(None);
        }

        let reply = match self.api.chat(&user.id, message).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Assistant chat failed");
                return Ok(Some(AssistantReply {
                    message: CHAT_APOLOGY.to_string(),
                    preferences: None,
                    regenerated: None,
                }));
            }
        };

        let regenerated = if reply.requires_regeneration() {
            info!(action = %reply.action, "Assistant changed preferences");
            self.notifier
                .toast(ToastKind::Info, "Preferences updated! Regenerating tasks...");
            match self.generate_month(&user.id).await {
                Ok(view) => Some(view),
                Err(e) => {
                    warn!(error = %e, "Month regeneration after chat failed");
                    None
                }
            }
        } else {
            None
        };

        Ok(Some(AssistantReply {
            message: reply.response,
            preferences: reply
                .preferences
                .as_ref()
                .map(|p| PreferencesView::from(Some(p))),
            regenerated,
        }))
    }

    pub async fn quick_action(&self, action: QuickAction) -> Result<Option<AssistantReply>> {
        self.send_assistant_message(action.message()).await
    }

    /// Regenerate the whole roadmap over the configured timeline, then reload it.
    pub async fn regenerate_roadmap(&self) -> Result<RoadmapPage> {
        let user = self.user().await?;
        {
            let _loading = LoadingGuard::new(self.notifier.as_ref());
            let result = self.request_roadmap(&user.id).await;
            self.report(result, "Error regenerating roadmap")?;
        }
        self.notifier
            .toast(ToastKind::Success, "Roadmap regenerated successfully!");
        self.load_roadmap().await
    }

    async fn request_roadmap(&self, user_id: &UserId) -> Result<()> {
        self.api
            .generate_growth_path(user_id, self.config.regenerate_months)
            .await?
            .error_for_status(GENERATE_GROWTH_PATH)?;
        Ok(())
    }

    // ── Progress ─────────────────────────────────────────────────────

    pub async fn load_progress(&self, filter: TaskFilter) -> Result<ProgressPage> {
        let user = self.user().await?;
        let _loading = LoadingGuard::new(self.notifier.as_ref());
        let result = self.fetch_progress(&user.id, filter).await;
        self.report(result, "Error loading progress")
    }

    async fn fetch_progress(&self, user_id: &UserId, filter: TaskFilter) -> Result<ProgressPage> {
        let summary = self.api.progress_summary(user_id).await?;
        if let Some(month) = summary.current_month {
            self.set_current_month(month).await;
        }
        let tasks = self.api.progress_tasks(user_id).await?;
        let visible = task_views(&tasks, filter, self.current_month().await);
        *self.tasks.write().await = tasks;

        Ok(ProgressPage {
            summary: summary_view(&summary),
            tasks: visible,
        })
    }

    /// Re-filter the last loaded task list without a round trip.
    pub async fn filter_tasks(&self, filter: TaskFilter) -> Vec<TaskView> {
        let tasks = self.tasks.read().await;
        task_views(&tasks, filter, self.current_month().await)
    }

    /// Change a task's status, celebrate completions, reload progress.
    pub async fn update_task_status(
        &self,
        item_id: &ItemId,
        status: TaskStatus,
    ) -> Result<ProgressPage> {
        let user = self.user().await?;
        let _loading = LoadingGuard::new(self.notifier.as_ref());

        let update = self.report(
            self.api
                .update_progress(&user.id, item_id, status)
                .await
                .map_err(Into::into),
            "Error updating task",
        )?;
        info!(%item_id, %status, "Task status updated");

        if status.is_completed() {
            self.notifier
                .toast(ToastKind::Success, "Great job! Task completed!");
            if let Some(message) = update
                .progress
                .encouragement_message
                .as_deref()
                .filter(|m| !m.is_empty())
            {
                self.notifier.toast(ToastKind::Info, message);
            }
            if update.next_month_unlocked {
                self.notifier.toast(
                    ToastKind::Success,
                    "Amazing progress! You have unlocked the next month's tasks!",
                );
            }
        } else {
            self.notifier.toast(ToastKind::Success, "Task status updated");
        }

        let result = self.fetch_progress(&user.id, TaskFilter::All).await;
        self.report(result, "Error loading progress")
    }

    pub async fn toggle_resume_item(&self, item_id: &ItemId, include: bool) -> Result<()> {
        let user = self.user().await?;
        self.report(
            self.api
                .set_resume_inclusion(&user.id, item_id, include)
                .await
                .map_err(Into::into),
            "Error updating resume setting",
        )?;

        if let Some(task) = self
            .tasks
            .write()
            .await
            .iter_mut()
            .find(|t| &t.item_id == item_id)
        {
            task.include_in_resume = include;
        }
        self.notifier.toast(
            ToastKind::Success,
            if include {
                "Added to resume"
            } else {
                "Removed from resume"
            },
        );
        Ok(())
    }

    pub async fn generate_linkedin_post(&self, item_id: &ItemId) -> Result<GeneratedPost> {
        let user = self.user().await?;
        let _loading = LoadingGuard::new(self.notifier.as_ref());
        let post = self.report(
            self.api
                .linkedin_post(&user.id, item_id)
                .await
                .map_err(Into::into),
            "Error generating LinkedIn post",
        )?;
        Ok(GeneratedPost {
            text: format_post(&post),
            suggested_image: post.suggested_image,
        })
    }

    // ── Profile ──────────────────────────────────────────────────────

    pub async fn load_profile(&self) -> Result<ProfilePage> {
        let user = self.user().await?;
        let _loading = LoadingGuard::new(self.notifier.as_ref());
        let result = self.fetch_profile(&user.id).await;
        self.report(result, "Error loading profile")
    }

    async fn fetch_profile(&self, user_id: &UserId) -> Result<ProfilePage> {
        let resume = self.api.resume(user_id).await?;
        let contact = resume
            .as_ref()
            .and_then(|r| r.header.as_ref())
            .map(ContactDetails::from_header)
            .unwrap_or_default();
        let linkedin = self.api.linkedin_profile(user_id).await?;

        Ok(ProfilePage {
            resume: resume_view(resume.as_ref()),
            contact,
            linkedin: linkedin_view(&linkedin),
        })
    }

    /// Save contact details and reload the profile so the resume reflects them.
    pub async fn save_contact_details(&self, details: &ContactDetails) -> Result<ProfilePage> {
        let user = self.user().await?;
        let _loading = LoadingGuard::new(self.notifier.as_ref());
        self.report(
            self.api
                .save_contact_details(&user.id, details)
                .await
                .map_err(Into::into),
            "Failed to save details",
        )?;
        self.notifier
            .toast(ToastKind::Success, "Contact details saved!");
        let result = self.fetch_profile(&user.id).await;
        self.report(result, "Error loading profile")
    }

    pub async fn refresh_profile(&self) -> Result<ProfilePage> {
        let user = self.user().await?;
        let _loading = LoadingGuard::new(self.notifier.as_ref());
        self.report(
            self.api.refresh_profile(&user.id).await.map_err(Into::into),
            "Error refreshing profile",
        )?;
        self.notifier
            .toast(ToastKind::Success, "Profile refreshed successfully!");
        let result = self.fetch_profile(&user.id).await;
        self.report(result, "Error loading profile")
    }

    /// Write the resume document, pretty-printed, to `path`.
    pub async fn download_resume(&self, path: &Path) -> Result<()> {
        let user = self.user().await?;
        let result = self.write_resume(&user.id, path).await;
        self.report(result, "Error downloading resume")?;
        info!(path = %path.display(), "Resume written");
        self.notifier.toast(ToastKind::Success, "Resume downloaded!");
        Ok(())
    }

    async fn write_resume(&self, user_id: &UserId, path: &Path) -> Result<()> {
        let document = self.api.resume_document(user_id).await?;
        let pretty = serde_json::to_string_pretty(&document).map_err(ApiError::from)?;
        tokio::fs::write(path, pretty).await?;
        Ok(())
    }
}
