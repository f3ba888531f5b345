//! Resume preview on the profile page.

use serde::Serialize;

use crate::api::{Resume, ResumeEntry};

pub const RESUME_PENDING: &str = "Loading resume data...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContactPart {
    Text { value: String },
    Link { label: &'static str, url: String },
}

impl std::fmt::Display for ContactPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text { value } => write!(f, "{value}"),
            Self::Link { label, .. } => write!(f, "{label}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub title: String,
    pub date: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum ResumeSection {
    Education {
        university: String,
        graduation_year: String,
        major: String,
        gpa: Option<String>,
    },
    Skills {
        skills: String,
    },
    Experience {
        entries: Vec<EntryView>,
    },
    Projects {
        entries: Vec<EntryView>,
    },
    Certifications {
        entries: Vec<EntryView>,
    },
}

impl ResumeSection {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Education { .. } => "Education",
            Self::Skills { .. } => "Skills",
            Self::Experience { .. } => "Experience",
            Self::Projects { .. } => "Projects",
            Self::Certifications { .. } => "Certifications",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResumeView {
    /// The service has not built a resume header yet.
    Pending,
    Ready {
        name: String,
        contact: Vec<ContactPart>,
        sections: Vec<ResumeSection>,
    },
}

impl ResumeView {
    /// Contact parts joined with " | ".
    pub fn contact_line(&self) -> String {
        match self {
            Self::Pending => String::new(),
            Self::Ready { contact, .. } => contact
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }
}

pub fn resume_view(resume: Option<&Resume>) -> ResumeView {
    let Some((resume, header)) = resume.and_then(|r| r.header.as_ref().map(|h| (r, h))) else {
        return ResumeView::Pending;
    };

    let present = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
    let mut contact: Vec<ContactPart> = [&header.email, &header.phone, &header.location]
        .into_iter()
        .filter_map(present)
        .map(|value| ContactPart::Text { value })
        .collect();
    contact.extend(
        [
            ("LinkedIn", &header.linkedin),
            ("GitHub", &header.github),
            ("Portfolio", &header.portfolio),
        ]
        .into_iter()
        .filter_map(|(label, url)| present(url).map(|url| ContactPart::Link { label, url })),
    );

    let mut sections = Vec::new();
    if let Some(edu) = &resume.education {
        sections.push(ResumeSection::Education {
            university: edu.university.clone(),
            graduation_year: match &edu.graduation_year {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(serde_json::Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            },
            major: edu.major.clone(),
            gpa: edu.gpa.filter(|g| *g > 0.0).map(|g| format!("GPA: {g}")),
        });
    }
    if !resume.skills.is_empty() {
        sections.push(ResumeSection::Skills {
            skills: resume.skills.join(", "),
        });
    }
    if !resume.experience.is_empty() {
        sections.push(ResumeSection::Experience {
            entries: entries(&resume.experience),
        });
    }
    if !resume.projects.is_empty() {
        sections.push(ResumeSection::Projects {
            entries: entries(&resume.projects),
        });
    }
    if !resume.certifications.is_empty() {
        sections.push(ResumeSection::Certifications {
            entries: resume
                .certifications
                .iter()
                .map(|c| EntryView {
                    title: c.name.clone(),
                    date: c.date.clone(),
                    bullets: Vec::new(),
                })
                .collect(),
        });
    }

    ResumeView::Ready {
        name: header.name.clone(),
        contact,
        sections,
    }
}

fn entries(list: &[ResumeEntry]) -> Vec<EntryView> {
    list.iter()
        .map(|e| EntryView {
            title: e.title.clone(),
            date: e.date.clone(),
            bullets: e.bullets.clone(),
        })
        .collect()
}
