//! The "this month" panel of the roadmap page.

use serde::Serialize;

use super::month_badge;
use crate::api::{CurrentMonth, ItemId, Preferences};

pub const DEFAULT_FOCUS: &str = "Focus on building your skills";
pub const NO_TASKS: &str = "No tasks for this month yet.";
pub const DEFAULT_PROJECT_RATIO: u32 = 50;
pub const DEFAULT_PACE: &str = "moderate";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTaskView {
    pub item_id: ItemId,
    pub item_type: String,
    pub item_name: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferencesView {
    /// Percentage of project work.
    pub project_ratio: u32,
    pub pace: String,
}

impl Default for PreferencesView {
    fn default() -> Self {
        Self {
            project_ratio: DEFAULT_PROJECT_RATIO,
            pace: DEFAULT_PACE.to_string(),
        }
    }
}

impl From<Option<&Preferences>> for PreferencesView {
    fn from(prefs: Option<&Preferences>) -> Self {
        let Some(prefs) = prefs else {
            return Self::default();
        };
        Self {
            project_ratio: prefs
                .project_ratio
                .filter(|r| *r > 0)
                .unwrap_or(DEFAULT_PROJECT_RATIO),
            pace: prefs
                .pace
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_PACE.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentMonthView {
    pub month: u32,
    pub title: String,
    pub focus: String,
    /// "Tip: ..." line, absent when there is no motivation text.
    pub motivation: Option<String>,
    pub tasks: Vec<MonthTaskView>,
    pub completed: u32,
    pub total: u32,
    /// 0..=100
    pub percent: f64,
    pub preferences: PreferencesView,
}

pub fn current_month_view(data: &CurrentMonth) -> CurrentMonthView {
    let info = data.month_info.as_ref();
    let non_empty = |s: Option<&String>| s.filter(|s| !s.trim().is_empty()).cloned();

    let percent = if data.total_tasks > 0 {
        f64::from(data.completed) / f64::from(data.total_tasks) * 100.0
    } else {
        0.0
    };

    CurrentMonthView {
        month: data.current_month,
        title: non_empty(info.and_then(|i| i.title.as_ref()))
            .unwrap_or_else(|| month_badge(data.current_month)),
        focus: non_empty(info.and_then(|i| i.focus.as_ref()))
            .unwrap_or_else(|| DEFAULT_FOCUS.to_string()),
        motivation: non_empty(info.and_then(|i| i.motivation.as_ref()))
            .map(|m| format!("Tip: {m}")),
        tasks: data
            .tasks
            .iter()
            .map(|t| MonthTaskView {
                item_id: t.item_id.clone(),
                item_type: t.item_type.clone(),
                item_name: t.item_name.clone(),
                completed: t.status.is_completed(),
            })
            .collect(),
        completed: data.completed,
        total: data.total_tasks,
        percent,
        preferences: PreferencesView::from(data.preferences.as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{GeneratedMonth, MonthInfo};

    #[test]
    fn falls_back_when_month_info_missing() {
        let data = CurrentMonth {
            current_month: 3,
            ..Default::default()
        };
        let view = current_month_view(&data);
        assert_eq!(view.title, "Month 3");
        assert_eq!(view.focus, DEFAULT_FOCUS);
        assert_eq!(view.motivation, None);
        assert_eq!(view.percent, 0.0);
        assert_eq!(view.preferences, PreferencesView::default());
    }

    #[test]
    fn uses_month_info_and_progress() {
        let data: CurrentMonth = serde_json::from_value(serde_json::json!({
            "current_month": 2,
            "month_info": {"title": "Go deeper", "focus": "APIs", "motivation": "Ship it"},
            "tasks": [
                {"item_id": "c1", "item_type": "course", "item_name": "HTTP", "status": "completed"},
                {"item_id": "p1", "item_type": "project", "item_name": "Server"}
            ],
            "preferences": {"project_ratio": 70, "pace": "fast"},
            "total_tasks": 4,
            "completed": 1
        }))
        .unwrap();
        let view = current_month_view(&data);
        assert_eq!(view.title, "Go deeper");
        assert_eq!(view.motivation.as_deref(), Some("Tip: Ship it"));
        assert!(view.tasks[0].completed);
        assert!(!view.tasks[1].completed);
        assert_eq!(view.percent, 25.0);
        assert_eq!(view.preferences.project_ratio, 70);
        assert_eq!(view.preferences.pace, "fast");
    }

    #[test]
    fn generated_month_gets_default_preferences() {
        let generated = GeneratedMonth {
            month: 1,
            month_data: Some(MonthInfo::default()),
            tasks: vec![],
        };
        let view = current_month_view(&CurrentMonth::from(generated));
        assert_eq!(view.title, "Month 1");
        assert_eq!(view.preferences.project_ratio, DEFAULT_PROJECT_RATIO);
        assert_eq!(view.preferences.pace, DEFAULT_PACE);
    }
}
