//! The onboarding request body assembled from wizard values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::field::FieldValue;
use super::form::{HORIZON_YEARS, fields};

/// Profile submitted at the end of onboarding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingPayload {
    pub name: String,
    pub email: String,
    pub major: String,
    pub university: String,
    pub gpa: Option<f64>,
    pub career_aspirations: String,
    pub target_industries: Vec<String>,
    pub current_skills: Vec<String>,
    pub experience_level: String,
    pub preferred_learning: String,
    pub preferred_content_types: Vec<String>,
    pub time_commitment: String,
    /// Data URL of the accepted profile photo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    /// Only present while the relocation toggle is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relocation_goal: Option<String>,
    pub extracurricular_interests: Vec<String>,
    pub planning_horizon_years: u32,
}

impl OnboardingPayload {
    /// Build from raw field values. Does not validate.
    pub fn from_values(values: &HashMap<String, FieldValue>) -> Self {
        let text = |name: &str| {
            values
                .get(name)
                .and_then(FieldValue::as_text)
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };
        let list = |name: &str| {
            values
                .get(name)
                .and_then(FieldValue::as_text)
                .map(split_list)
                .unwrap_or_default()
        };

        let relocating = values
            .get(fields::RELOCATION)
            .is_some_and(FieldValue::as_flag);
        let relocation_goal = relocating
            .then(|| text(fields::RELOCATION_GOAL))
            .filter(|goal| !goal.is_empty());

        let profile_photo = match values.get(fields::PROFILE_PHOTO) {
            Some(FieldValue::Image(image)) => Some(image.data_url.clone()),
            _ => None,
        };

        let planning_horizon_years = values
            .get(fields::PLANNING_HORIZON)
            .and_then(FieldValue::as_number)
            .map(|n| (n as u32).clamp(HORIZON_YEARS.0, HORIZON_YEARS.1))
            .unwrap_or(HORIZON_YEARS.0);

        Self {
            name: text(fields::NAME),
            email: text(fields::EMAIL),
            major: text(fields::MAJOR),
            university: text(fields::UNIVERSITY),
            gpa: values.get(fields::GPA).and_then(FieldValue::as_number),
            career_aspirations: text(fields::CAREER_ASPIRATIONS),
            target_industries: list(fields::TARGET_INDUSTRIES),
            current_skills: list(fields::CURRENT_SKILLS),
            experience_level: text(fields::EXPERIENCE_LEVEL),
            preferred_learning: text(fields::PREFERRED_LEARNING),
            preferred_content_types: list(fields::PREFERRED_CONTENT_TYPES),
            time_commitment: text(fields::TIME_COMMITMENT),
            profile_photo,
            relocation_goal,
            extracurricular_interests: list(fields::EXTRACURRICULAR_INTERESTS),
            planning_horizon_years,
        }
    }

    /// Planning horizon in months, as the roadmap generator expects.
    pub fn timeline_months(&self) -> u32 {
        self.planning_horizon_years * 12
    }
}

/// Split a comma-separated entry into trimmed, non-empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::image::AcceptedImage;

    fn values(pairs: &[(&str, FieldValue)]) -> HashMap<String, FieldValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn split_list_trims_and_drops_empties() {
        assert_eq!(split_list("Python, SQL ,  Go"), vec!["Python", "SQL", "Go"]);
        assert!(split_list("").is_empty());
        assert!(split_list(" , ,").is_empty());
        assert_eq!(split_list("Rust,,Go, "), vec!["Rust", "Go"]);
    }

    #[test]
    fn relocation_goal_only_with_toggle() {
        let mut vals = values(&[
            (fields::RELOCATION, FieldValue::Flag(true)),
            (fields::RELOCATION_GOAL, FieldValue::text("Berlin")),
        ]);
        assert_eq!(
            OnboardingPayload::from_values(&vals).relocation_goal.as_deref(),
            Some("Berlin")
        );

        vals.insert(fields::RELOCATION.to_string(), FieldValue::Flag(false));
        let payload = OnboardingPayload::from_values(&vals);
        assert_eq!(payload.relocation_goal, None);
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("relocation_goal").is_none());
    }

    #[test]
    fn horizon_converts_to_months() {
        let vals = values(&[(fields::PLANNING_HORIZON, FieldValue::Number(3.0))]);
        let payload = OnboardingPayload::from_values(&vals);
        assert_eq!(payload.planning_horizon_years, 3);
        assert_eq!(payload.timeline_months(), 36);

        let payload = OnboardingPayload::from_values(&HashMap::new());
        assert_eq!(payload.planning_horizon_years, 1);
    }

    #[test]
    fn gpa_and_photo() {
        let vals = values(&[
            (fields::GPA, FieldValue::text("3.5")),
            (
                fields::PROFILE_PHOTO,
                FieldValue::Image(AcceptedImage {
                    mime: "image/png".to_string(),
                    data_url: "data:image/png;base64,AA==".to_string(),
                }),
            ),
        ]);
        let payload = OnboardingPayload::from_values(&vals);
        assert_eq!(payload.gpa, Some(3.5));
        assert_eq!(
            payload.profile_photo.as_deref(),
            Some("data:image/png;base64,AA==")
        );

        let payload = OnboardingPayload::from_values(&values(&[(fields::GPA, FieldValue::text(""))]));
        assert_eq!(payload.gpa, None);
    }

    #[test]
    fn lists_are_normalized() {
        let vals = values(&[
            (fields::TARGET_INDUSTRIES, FieldValue::text("Fintech, , Health")),
            (fields::CURRENT_SKILLS, FieldValue::text("Python, SQL ,  Go")),
        ]);
        let payload = OnboardingPayload::from_values(&vals);
        assert_eq!(payload.target_industries, vec!["Fintech", "Health"]);
        assert_eq!(payload.current_skills, vec!["Python", "SQL", "Go"]);
        assert!(payload.preferred_content_types.is_empty());
    }
}
