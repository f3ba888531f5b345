//! Wire types for the growth service.
//!
//! The backend is loose about optional fields, so most response fields carry
//! `#[serde(default)]` and absent collections decode as empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wizard::OnboardingPayload;

/// Identifier as the backend sends it. Numeric in practice, but string ids
/// are accepted and echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Numeric(i64),
    Text(String),
}

pub type UserId = Id;
pub type ItemId = Id;

impl Id {
    /// Blank string ids are treated as missing.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

// ── Users ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailLookupRequest<'a> {
    pub email: &'a str,
}

/// `{"user": {"id": ...}}` envelope returned by register and by-email.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserEnvelope {
    #[serde(default)]
    pub user: Option<UserRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: Option<UserId>,
}

impl UserEnvelope {
    /// The non-blank user id, if the envelope carries one.
    pub fn user_id(&self) -> Option<UserId> {
        self.user
            .as_ref()
            .and_then(|u| u.id.clone())
            .filter(|id| !id.is_blank())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OnboardRequest<'a> {
    pub user_id: &'a UserId,
    #[serde(flatten)]
    pub profile: &'a OnboardingPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRoadmapRequest<'a> {
    pub user_id: &'a UserId,
    pub timeline_months: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRequest<'a> {
    pub user_id: &'a UserId,
}

// ── Roadmap ──────────────────────────────────────────────────────────

/// Category of a roadmap item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Course,
    Project,
    Certificate,
    Internship,
    Test,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Project => "project",
            Self::Certificate => "certificate",
            Self::Internship => "internship",
            Self::Test => "test",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "course" => Ok(Self::Course),
            "project" => Ok(Self::Project),
            "certificate" => Ok(Self::Certificate),
            "internship" => Ok(Self::Internship),
            "test" => Ok(Self::Test),
            other => Err(format!("unknown item type: {other}")),
        }
    }
}

/// Progress state of a task or roadmap item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Unknown => "unknown",
        }
    }

    /// Human label, e.g. "in progress".
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemProgress {
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub encouragement_message: Option<String>,
}

/// One course/project/certificate/internship/test inside a phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadmapItem {
    #[serde(default)]
    pub id: Option<ItemId>,
    #[serde(default)]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub item_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rationale: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub target_score: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub timing: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub when: Option<String>,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub skills_demonstrated: Vec<String>,
    #[serde(default)]
    pub progress: Option<ItemProgress>,
}

/// Free-form display value. Generated roadmaps sometimes carry numbers
/// (a target score of `320`) where text is expected.
fn display_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// One month of the roadmap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Phase {
    pub phase: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub courses: Vec<RoadmapItem>,
    #[serde(default)]
    pub projects: Vec<RoadmapItem>,
    #[serde(default)]
    pub certificates: Vec<RoadmapItem>,
    #[serde(default)]
    pub internships: Vec<RoadmapItem>,
    #[serde(default)]
    pub tests: Vec<RoadmapItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roadmap {
    #[serde(default)]
    pub phases: Vec<Phase>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GrowthPathResponse {
    #[serde(default)]
    pub enriched_roadmap: Option<Roadmap>,
}

// ── Current month ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub motivation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthTask {
    pub item_id: ItemId,
    #[serde(default)]
    pub item_type: String,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub status: TaskStatus,
}

/// Pacing preferences the assistant adjusts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub project_ratio: Option<u32>,
    #[serde(default)]
    pub pace: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentMonth {
    pub current_month: u32,
    #[serde(default)]
    pub month_info: Option<MonthInfo>,
    #[serde(default)]
    pub tasks: Vec<MonthTask>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
    #[serde(default)]
    pub total_tasks: u32,
    #[serde(default)]
    pub completed: u32,
}

/// Response of `/roadmap/generate-month`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedMonth {
    pub month: u32,
    #[serde(default)]
    pub month_data: Option<MonthInfo>,
    #[serde(default)]
    pub tasks: Vec<MonthTask>,
}

impl From<GeneratedMonth> for CurrentMonth {
    fn from(generated: GeneratedMonth) -> Self {
        let total_tasks = generated.tasks.len() as u32;
        Self {
            current_month: generated.month,
            month_info: generated.month_data,
            tasks: generated.tasks,
            preferences: Some(Preferences::default()),
            total_tasks,
            completed: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub user_id: &'a UserId,
    pub message: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub preferences: Option<Preferences>,
    #[serde(default = "no_action")]
    pub action: String,
}

fn no_action() -> String {
    "none".to_string()
}

impl ChatReply {
    /// Whether the assistant changed something that invalidates the month's tasks.
    pub fn requires_regeneration(&self) -> bool {
        self.action != "none"
    }
}

// ── Progress ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressSummary {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub completed: u32,
    #[serde(default)]
    pub in_progress: u32,
    #[serde(default)]
    pub not_started: u32,
    #[serde(default)]
    pub current_month: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub item_id: ItemId,
    #[serde(default)]
    pub item_type: String,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub phase: Option<u32>,
    #[serde(default)]
    pub completion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub encouragement_message: Option<String>,
    #[serde(default)]
    pub include_in_resume: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TasksResponse {
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressUpdateRequest<'a> {
    pub user_id: &'a UserId,
    pub item_id: &'a ItemId,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressUpdate {
    #[serde(default)]
    pub progress: ItemProgress,
    #[serde(default)]
    pub next_month_unlocked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeToggleRequest<'a> {
    pub user_id: &'a UserId,
    pub item_id: &'a ItemId,
    pub include_in_resume: bool,
}

// ── LinkedIn ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ItemRequest<'a> {
    pub user_id: &'a UserId,
    pub item_id: &'a ItemId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkedInPost {
    #[serde(default)]
    pub post_content: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub suggested_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostIdea {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub draft: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkedInProfile {
    #[serde(default)]
    pub profile_summary: Option<String>,
    #[serde(default)]
    pub post_ideas: Vec<PostIdea>,
    #[serde(default)]
    pub skills_to_add: Vec<String>,
}

// ── Resume ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeHeader {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub graduation_year: Option<serde_json::Value>,
    #[serde(default)]
    pub gpa: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeEntry {
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resume {
    #[serde(default)]
    pub header: Option<ResumeHeader>,
    #[serde(default)]
    pub education: Option<Education>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ResumeEntry>,
    #[serde(default)]
    pub projects: Vec<ResumeEntry>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
}

/// Contact details edited from the profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub phone_number: String,
    pub linkedin_url: String,
    pub github_url: String,
    pub portfolio_url: String,
}

impl ContactDetails {
    /// Prefill from an existing resume header.
    pub fn from_header(header: &ResumeHeader) -> Self {
        Self {
            phone_number: header.phone.clone().unwrap_or_default(),
            linkedin_url: header.linkedin.clone().unwrap_or_default(),
            github_url: header.github.clone().unwrap_or_default(),
            portfolio_url: header.portfolio.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactDetailsRequest<'a> {
    pub user_id: &'a UserId,
    #[serde(flatten)]
    pub details: &'a ContactDetails,
}
