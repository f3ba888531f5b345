//! Full roadmap: one card per month, later months locked.

use serde::Serialize;

use super::month_badge;
use crate::api::{ItemId, ItemKind, Phase, Roadmap, RoadmapItem, TaskStatus};

pub const LOCKED_NOTICE: &str = "Complete 75% of previous months to unlock";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    pub id: Option<ItemId>,
    pub kind: ItemKind,
    pub name: String,
    pub details: String,
    pub description: Option<String>,
    pub rationale: Option<String>,
    pub status: TaskStatus,
    /// Only shown once the item is completed.
    pub encouragement: Option<String>,
    pub can_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub title: &'static str,
    pub kind: ItemKind,
    pub items: Vec<ItemView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseView {
    pub phase: u32,
    pub title: String,
    pub badge: String,
    pub focus: String,
    pub locked: bool,
    pub current: bool,
    pub locked_notice: Option<&'static str>,
    /// Non-empty sections only, in course/project/certificate/internship/test order.
    pub sections: Vec<SectionView>,
}

/// Shape every phase. Phases after `current_month` are locked.
pub fn roadmap_view(roadmap: &Roadmap, current_month: u32) -> Vec<PhaseView> {
    let current_month = current_month.max(1);
    roadmap
        .phases
        .iter()
        .map(|phase| phase_view(phase, current_month))
        .collect()
}

fn phase_view(phase: &Phase, current_month: u32) -> PhaseView {
    let locked = phase.phase > current_month;
    let sections = [
        ("Courses", ItemKind::Course, &phase.courses),
        ("Projects", ItemKind::Project, &phase.projects),
        ("Certificates", ItemKind::Certificate, &phase.certificates),
        ("Internships", ItemKind::Internship, &phase.internships),
        ("Tests", ItemKind::Test, &phase.tests),
    ]
    .into_iter()
    .filter(|(_, _, items)| !items.is_empty())
    .map(|(title, kind, items)| SectionView {
        title,
        kind,
        items: items.iter().map(|i| item_view(i, kind, locked)).collect(),
    })
    .collect();

    PhaseView {
        phase: phase.phase,
        title: if locked {
            format!("{} (Locked)", phase.title)
        } else {
            phase.title.clone()
        },
        badge: month_badge(phase.phase),
        focus: phase.focus.clone(),
        locked,
        current: phase.phase == current_month,
        locked_notice: locked.then_some(LOCKED_NOTICE),
        sections,
    }
}

fn item_view(item: &RoadmapItem, kind: ItemKind, locked: bool) -> ItemView {
    let progress = item.progress.clone().unwrap_or_default();
    let completed = progress.status.is_completed();
    ItemView {
        id: item.id.clone().or_else(|| item.item_id.clone()),
        kind,
        name: item
            .name
            .clone()
            .or_else(|| item.item_type.clone())
            .unwrap_or_else(|| kind.to_string()),
        details: item_details(item, kind),
        description: item.description.clone().filter(|d| !d.is_empty()),
        rationale: item.rationale.clone(),
        status: progress.status,
        encouragement: progress.encouragement_message.filter(|_| completed),
        can_complete: !locked && !completed,
    }
}

/// One-line summary specific to the item's kind.
pub fn item_details(item: &RoadmapItem, kind: ItemKind) -> String {
    let or = |v: &Option<String>, fallback: &str| v.clone().unwrap_or_else(|| fallback.to_string());
    let joined = |v: &[String], fallback: &str| {
        if v.is_empty() {
            fallback.to_string()
        } else {
            v.join(", ")
        }
    };

    match kind {
        ItemKind::Course => format!(
            "Platform: {} | Duration: {}",
            or(&item.platform, "Unknown"),
            or(&item.duration, "Self-paced")
        ),
        ItemKind::Test => format!(
            "Target: {} | Date: {}",
            or(&item.target_score, "TBD"),
            or(&item.timing, "TBD")
        ),
        ItemKind::Internship => format!(
            "When: {} | Company: {}",
            or(&item.when, "TBD"),
            joined(item.companies.as_slice(), "Various companies")
        ),
        ItemKind::Certificate => format!(
            "Provider: {} | Date: {}",
            or(&item.provider, "Unknown"),
            or(&item.timing, "TBD")
        ),
        ItemKind::Project => format!(
            "Skills: {}",
            joined(item.skills_demonstrated.as_slice(), "Multiple skills")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Id, ItemProgress};

    fn roadmap() -> Roadmap {
        serde_json::from_value(serde_json::json!({
            "phases": [
                {
                    "phase": 1,
                    "title": "Foundations",
                    "focus": "Basics",
                    "courses": [{"id": "c1", "name": "Intro to SQL", "platform": "Coursera"}],
                    "projects": [{"item_id": "p1", "name": "Dashboard",
                                  "progress": {"status": "completed", "encouragement_message": "Nice!"}}]
                },
                {
                    "phase": 2,
                    "title": "Depth",
                    "focus": "Systems",
                    "internships": [{"id": "i1", "name": "Summer role", "when": "June"}]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn later_phases_are_locked() {
        let phases = roadmap_view(&roadmap(), 1);
        assert!(phases[0].current);
        assert!(!phases[0].locked);
        assert!(phases[1].locked);
        assert_eq!(phases[1].title, "Depth (Locked)");
        assert_eq!(phases[1].locked_notice, Some(LOCKED_NOTICE));
        assert_eq!(phases[1].badge, "Month 2");
        assert!(phases[1].sections[0].items.iter().all(|i| !i.can_complete));
    }

    #[test]
    fn unlocking_follows_current_month() {
        let phases = roadmap_view(&roadmap(), 2);
        assert!(phases.iter().all(|p| !p.locked));
        assert!(phases[1].current);
        assert!(phases[1].sections[0].items[0].can_complete);
    }

    #[test]
    fn empty_sections_are_skipped() {
        let phases = roadmap_view(&roadmap(), 1);
        let titles: Vec<_> = phases[0].sections.iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Courses", "Projects"]);
    }

    #[test]
    fn completed_items_show_encouragement_and_no_action() {
        let phases = roadmap_view(&roadmap(), 1);
        let project = &phases[0].sections[1].items[0];
        assert_eq!(project.id, Some(Id::from("p1")));
        assert_eq!(project.status, TaskStatus::Completed);
        assert_eq!(project.encouragement.as_deref(), Some("Nice!"));
        assert!(!project.can_complete);
    }

    #[test]
    fn encouragement_hidden_until_completed() {
        let item = RoadmapItem {
            progress: Some(ItemProgress {
                status: TaskStatus::InProgress,
                encouragement_message: Some("Keep going".to_string()),
            }),
            ..Default::default()
        };
        let view = item_view(&item, ItemKind::Course, false);
        assert_eq!(view.encouragement, None);
        assert_eq!(view.name, "course");
    }

    #[test]
    fn details_per_kind() {
        let item = RoadmapItem {
            platform: Some("Coursera".to_string()),
            ..Default::default()
        };
        assert_eq!(
            item_details(&item, ItemKind::Course),
            "Platform: Coursera | Duration: Self-paced"
        );
        assert_eq!(
            item_details(&RoadmapItem::default(), ItemKind::Internship),
            "When: TBD | Company: Various companies"
        );
        let item = RoadmapItem {
            skills_demonstrated: vec!["Rust".to_string(), "SQL".to_string()],
            ..Default::default()
        };
        assert_eq!(item_details(&item, ItemKind::Project), "Skills: Rust, SQL");
    }
}
