//! The onboarding form: four steps of declared fields.

use super::field::{FieldKind, FieldSpec};

/// Field names, as sent in the payload where they map one-to-one.
pub mod fields {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const PROFILE_PHOTO: &str = "profile_photo";
    pub const UNIVERSITY: &str = "university";
    pub const MAJOR: &str = "major";
    pub const GPA: &str = "gpa";
    pub const CAREER_ASPIRATIONS: &str = "career_aspirations";
    pub const TARGET_INDUSTRIES: &str = "target_industries";
    pub const CURRENT_SKILLS: &str = "current_skills";
    pub const EXPERIENCE_LEVEL: &str = "experience_level";
    pub const PREFERRED_LEARNING: &str = "preferred_learning";
    pub const PREFERRED_CONTENT_TYPES: &str = "preferred_content_types";
    pub const TIME_COMMITMENT: &str = "time_commitment";
    pub const EXTRACURRICULAR_INTERESTS: &str = "extracurricular_interests";
    pub const RELOCATION: &str = "relocation";
    pub const RELOCATION_GOAL: &str = "relocation_goal";
    pub const PLANNING_HORIZON: &str = "planning_horizon";
}

pub const EXPERIENCE_LEVELS: &[&str] = &["beginner", "intermediate", "advanced"];
pub const LEARNING_STYLES: &[&str] = &["courses", "projects", "mixed"];
pub const TIME_COMMITMENTS: &[&str] = &["1-5 hours/week", "5-10 hours/week", "10+ hours/week"];

/// Smallest and largest planning horizon, in years.
pub const HORIZON_YEARS: (u32, u32) = (1, 5);

#[derive(Debug, Clone)]
pub struct StepSpec {
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone)]
pub struct OnboardingForm {
    pub steps: Vec<StepSpec>,
}

impl OnboardingForm {
    pub fn new(steps: Vec<StepSpec>) -> Self {
        Self { steps }
    }

    /// The growth-roadmap onboarding form.
    pub fn standard() -> Self {
        use fields::*;

        Self::new(vec![
            StepSpec {
                title: "About you",
                fields: vec![
                    FieldSpec::text(NAME, "Full name").required(),
                    FieldSpec::new(EMAIL, "Email", FieldKind::Email).required(),
                    FieldSpec::new(PROFILE_PHOTO, "Profile photo", FieldKind::Image),
                ],
            },
            StepSpec {
                title: "Academics",
                fields: vec![
                    FieldSpec::text(UNIVERSITY, "University").required(),
                    FieldSpec::text(MAJOR, "Major").required(),
                    FieldSpec::new(GPA, "GPA", FieldKind::Number { min: 0.0, max: 4.0 }),
                ],
            },
            StepSpec {
                title: "Career goals",
                fields: vec![
                    FieldSpec::new(CAREER_ASPIRATIONS, "Career aspirations", FieldKind::LongText)
                        .required(),
                    FieldSpec::list(TARGET_INDUSTRIES, "Target industries (comma separated)")
                        .required(),
                    FieldSpec::list(CURRENT_SKILLS, "Current skills (comma separated)").required(),
                    FieldSpec::new(
                        EXPERIENCE_LEVEL,
                        "Experience level",
                        FieldKind::Select {
                            options: EXPERIENCE_LEVELS,
                        },
                    )
                    .required(),
                ],
            },
            StepSpec {
                title: "Preferences",
                fields: vec![
                    FieldSpec::new(
                        PREFERRED_LEARNING,
                        "Preferred learning style",
                        FieldKind::Select {
                            options: LEARNING_STYLES,
                        },
                    )
                    .required(),
                    FieldSpec::list(
                        PREFERRED_CONTENT_TYPES,
                        "Preferred content types (comma separated)",
                    ),
                    FieldSpec::new(
                        TIME_COMMITMENT,
                        "Weekly time commitment",
                        FieldKind::Select {
                            options: TIME_COMMITMENTS,
                        },
                    )
                    .required(),
                    FieldSpec::list(
                        EXTRACURRICULAR_INTERESTS,
                        "Extracurricular interests (comma separated)",
                    ),
                    FieldSpec::new(RELOCATION, "Open to relocating", FieldKind::Toggle),
                    FieldSpec::text(RELOCATION_GOAL, "Where would you like to relocate?")
                        .revealed_by(RELOCATION),
                    FieldSpec::new(
                        PLANNING_HORIZON,
                        "Planning horizon",
                        FieldKind::Range {
                            min: HORIZON_YEARS.0,
                            max: HORIZON_YEARS.1,
                            default: HORIZON_YEARS.0,
                        },
                    ),
                ],
            },
        ])
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Step (1-based) by number.
    pub fn step(&self, number: usize) -> Option<&StepSpec> {
        number.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.all_fields().find(|f| f.name == name)
    }

    pub fn all_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.steps.iter().flat_map(|s| s.fields.iter())
    }

    /// Fields revealed by `toggle`.
    pub fn dependents_of<'a>(&'a self, toggle: &'a str) -> impl Iterator<Item = &'a FieldSpec> {
        self.all_fields()
            .filter(move |f| f.revealed_by == Some(toggle))
    }
}
