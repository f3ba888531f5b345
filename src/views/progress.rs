//! Progress page: completion summary and the filterable task list.

use serde::Serialize;

use super::month_badge;
use crate::api::{ItemId, ItemKind, ProgressSummary, TaskRecord, TaskStatus};

pub const NO_TASKS: &str = "No tasks found for your current progress level.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub total: u32,
    pub completed: u32,
    pub in_progress: u32,
    pub not_started: u32,
    /// Rounded completion percentage.
    pub percentage: u32,
    pub completed_degrees: f64,
    pub in_progress_degrees: f64,
    pub not_started_degrees: f64,
}

pub fn summary_view(summary: &ProgressSummary) -> SummaryView {
    let total = summary.total;
    let degrees = |n: u32| {
        if total > 0 {
            f64::from(n) / f64::from(total) * 360.0
        } else {
            0.0
        }
    };
    let percentage = if total > 0 {
        (f64::from(summary.completed) / f64::from(total) * 100.0).round() as u32
    } else {
        0
    };

    SummaryView {
        total,
        completed: summary.completed,
        in_progress: summary.in_progress,
        not_started: summary.not_started,
        percentage,
        completed_degrees: degrees(summary.completed),
        in_progress_degrees: degrees(summary.in_progress),
        not_started_degrees: degrees(summary.not_started),
    }
}

/// Which item types the task list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Kind(ItemKind),
}

impl TaskFilter {
    fn matches(&self, task: &TaskRecord) -> bool {
        match self {
            Self::All => true,
            Self::Kind(kind) => task.item_type.parse::<ItemKind>().ok() == Some(*kind),
        }
    }
}

impl std::str::FromStr for TaskFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Kind)
    }
}

/// Buttons offered next to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    Start,
    Complete,
    ToggleResume { included: bool },
    LinkedInPost,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskView {
    pub item_id: ItemId,
    pub name: String,
    pub item_type: String,
    pub status: TaskStatus,
    pub status_label: String,
    pub month: String,
    pub completed_on: Option<String>,
    pub encouragement: Option<String>,
    pub actions: Vec<TaskAction>,
}

/// Tasks visible for `filter`, hiding anything past `current_month`.
/// Tasks without a phase belong to month 1.
pub fn task_views(tasks: &[TaskRecord], filter: TaskFilter, current_month: u32) -> Vec<TaskView> {
    let current_month = current_month.max(1);
    tasks
        .iter()
        .filter(|t| filter.matches(t))
        .filter(|t| t.phase.unwrap_or(1) <= current_month)
        .map(task_view)
        .collect()
}

fn task_view(task: &TaskRecord) -> TaskView {
    let actions = if task.status.is_completed() {
        vec![
            TaskAction::ToggleResume {
                included: task.include_in_resume,
            },
            TaskAction::LinkedInPost,
        ]
    } else {
        vec![TaskAction::Start, TaskAction::Complete]
    };

    TaskView {
        item_id: task.item_id.clone(),
        name: task.item_name.clone(),
        item_type: task.item_type.clone(),
        status: task.status,
        status_label: task.status.label(),
        month: month_badge(task.phase.unwrap_or(1)),
        completed_on: task
            .completion_date
            .map(|d| d.date_naive().format("%Y-%m-%d").to_string()),
        encouragement: task.encouragement_message.clone(),
        actions,
    }
}
