//! Render-ready shapes built from service responses.
//!
//! Nothing in here performs I/O; page handlers fetch, these functions
//! decide what the user sees.

pub mod current_month;
pub mod linkedin;
pub mod progress;
pub mod resume;
pub mod roadmap;

pub use current_month::{CurrentMonthView, MonthTaskView, PreferencesView, current_month_view};
pub use linkedin::{LinkedInView, PostIdeaView, format_post, hashtag_line, linkedin_view};
pub use progress::{SummaryView, TaskAction, TaskFilter, TaskView, summary_view, task_views};
pub use resume::{ContactPart, EntryView, ResumeSection, ResumeView, resume_view};
pub use roadmap::{ItemView, PhaseView, SectionView, item_details, roadmap_view};

/// `Month N` badge used across pages.
pub fn month_badge(month: u32) -> String {
    format!("Month {month}")
}
