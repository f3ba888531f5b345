//! Onboarding wizard: multi-step form gated on per-step validation.
//!
//! The [`Wizard`] owns the step cursor and field values. Forward navigation
//! only happens when every required, visible field of the active step is
//! valid; going back is always allowed. Once the last step is reached the
//! collected values are assembled into an [`OnboardingPayload`] for the
//! submission pipeline.

pub mod field;
pub mod form;
pub mod image;
pub mod payload;
pub mod state;

pub use field::{FieldKind, FieldSpec, FieldValue, validate_field};
pub use form::{OnboardingForm, StepSpec, fields};
pub use image::{AcceptedImage, ImageFile, MAX_IMAGE_BYTES, accept_image};
pub use payload::{OnboardingPayload, split_list};
pub use state::{PrimaryAction, StepCursor, StepView, horizon_label};

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info};

use crate::error::{ImageError, ValidationError};
use crate::notify::{Notifier, ToastKind};

/// Warning shown when a step does not validate.
pub const INCOMPLETE_STEP_WARNING: &str = "Please fill in all required fields.";

/// Wizard controller.
#[derive(Debug, Clone)]
pub struct Wizard {
    form: OnboardingForm,
    cursor: StepCursor,
    values: HashMap<String, FieldValue>,
    invalid: BTreeSet<String>,
    focused: Option<String>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(OnboardingForm::standard())
    }
}

impl Wizard {
    pub fn new(form: OnboardingForm) -> Self {
        let values = form
            .all_fields()
            .filter_map(|f| f.initial_value().map(|v| (f.name.to_string(), v)))
            .collect();
        Self {
            cursor: StepCursor::new(form.total_steps()),
            form,
            values,
            invalid: BTreeSet::new(),
            focused: None,
        }
    }

    pub fn form(&self) -> &OnboardingForm {
        &self.form
    }

    pub fn current_step(&self) -> usize {
        self.cursor.current()
    }

    pub fn current_step_spec(&self) -> Option<&StepSpec> {
        self.form.step(self.cursor.current())
    }

    pub fn step_view(&self) -> StepView {
        self.cursor.view()
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Fields marked invalid by the last failed `advance`.
    pub fn invalid_fields(&self) -> impl Iterator<Item = &str> {
        self.invalid.iter().map(String::as_str)
    }

    /// Field that received focus after the last failed `advance`.
    pub fn focused_field(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Set a field. Clears its invalid mark. Range controls only take whole
    /// numbers and clamp them to their bounds.
    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<(), ValidationError> {
        let value = match self.form.field(name).map(|f| &f.kind) {
            None => return Err(ValidationError::UnknownField(name.to_string())),
            Some(FieldKind::Range { min, max, .. }) => match value.as_number() {
                Some(n) if n.fract() == 0.0 => {
                    FieldValue::Number(n.clamp(*min as f64, *max as f64))
                }
                _ => {
                    return Err(ValidationError::Field {
                        field: name.to_string(),
                        reason: format!("must be a whole number from {min} to {max}"),
                    });
                }
            },
            Some(_) => value,
        };
        self.invalid.remove(name);
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    pub fn set_text(&mut self, name: &str, value: &str) -> Result<(), ValidationError> {
        self.set(name, FieldValue::text(value))
    }

    /// Whether the field is shown. Dependent fields follow their toggle.
    pub fn is_visible(&self, name: &str) -> bool {
        match self.form.field(name) {
            Some(spec) => match spec.revealed_by {
                Some(toggle) => self.toggle_on(toggle),
                None => true,
            },
            None => false,
        }
    }

    /// Effective required flag.
    pub fn is_required(&self, name: &str) -> bool {
        match self.form.field(name) {
            Some(spec) => match spec.revealed_by {
                Some(toggle) => self.toggle_on(toggle),
                None => spec.required,
            },
            None => false,
        }
    }

    fn toggle_on(&self, toggle: &str) -> bool {
        self.values.get(toggle).is_some_and(FieldValue::as_flag)
    }

    /// Flip a toggle. Turning it off hides its dependents and drops their
    /// invalid marks.
    pub fn set_toggle(&mut self, name: &str, on: bool) -> Result<(), ValidationError> {
        match self.form.field(name).map(|f| &f.kind) {
            Some(FieldKind::Toggle) => {}
            Some(_) => {
                return Err(ValidationError::Field {
                    field: name.to_string(),
                    reason: "not a toggle".to_string(),
                });
            }
            None => return Err(ValidationError::UnknownField(name.to_string())),
        }
        self.values.insert(name.to_string(), FieldValue::Flag(on));
        if !on {
            let dependents: Vec<&str> = self.form.dependents_of(name).map(|f| f.name).collect();
            for dep in dependents {
                self.invalid.remove(dep);
                if self.focused.as_deref() == Some(dep) {
                    self.focused = None;
                }
            }
        }
        debug!(toggle = name, on, "Toggle changed");
        Ok(())
    }

    /// Set the planning horizon, clamped to the control's range. Returns
    /// the label to show next to it.
    pub fn set_horizon(&mut self, years: u32) -> String {
        let years = years.clamp(form::HORIZON_YEARS.0, form::HORIZON_YEARS.1);
        self.invalid.remove(fields::PLANNING_HORIZON);
        self.values.insert(
            fields::PLANNING_HORIZON.to_string(),
            FieldValue::Number(years as f64),
        );
        horizon_label(years)
    }

    /// Label for the current horizon value.
    pub fn horizon_label(&self) -> String {
        let years = self
            .values
            .get(fields::PLANNING_HORIZON)
            .and_then(FieldValue::as_number)
            .map(|n| n as u32)
            .unwrap_or(form::HORIZON_YEARS.0);
        horizon_label(years)
    }

    /// Validate and store an uploaded image. Rejections are reported to the
    /// user and leave any earlier image in place.
    pub fn upload_image(
        &mut self,
        name: &str,
        file: &ImageFile,
        notifier: &dyn Notifier,
    ) -> Result<(), ImageError> {
        match accept_image(file) {
            Ok(image) => {
                info!(field = name, mime = %image.mime, bytes = file.bytes.len(), "Image accepted");
                self.invalid.remove(name);
                self.values
                    .insert(name.to_string(), FieldValue::Image(image));
                Ok(())
            }
            Err(e) => {
                notifier.toast(ToastKind::Error, &e.to_string());
                Err(e)
            }
        }
    }

    /// Names of fields in `step` that fail validation, in declaration order.
    fn invalid_in_step(&self, step: usize) -> Vec<String> {
        let Some(spec) = self.form.step(step) else {
            return Vec::new();
        };
        spec.fields
            .iter()
            .filter(|f| self.is_visible(f.name))
            .filter(|f| {
                validate_field(f, self.values.get(f.name), self.is_required(f.name)).is_err()
            })
            .map(|f| f.name.to_string())
            .collect()
    }

    /// Validate the active step and move forward.
    ///
    /// On failure marks every invalid field, focuses the first one, shows a
    /// warning and stays put.
    pub fn advance(&mut self, notifier: &dyn Notifier) -> Result<StepView, ValidationError> {
        let step = self.cursor.current();
        let invalid = self.invalid_in_step(step);

        if !invalid.is_empty() {
            debug!(step, fields = ?invalid, "Step did not validate");
            self.invalid.extend(invalid.iter().cloned());
            self.focused = invalid.first().cloned();
            notifier.toast(ToastKind::Warning, INCOMPLETE_STEP_WARNING);
            return Err(ValidationError::Step {
                step,
                fields: invalid,
            });
        }

        self.invalid.clear();
        self.focused = None;
        self.cursor.forward();
        Ok(self.cursor.view())
    }

    /// Step back. Never validates.
    pub fn retreat(&mut self) -> StepView {
        self.cursor.back();
        self.cursor.view()
    }

    /// Validate every step; the first failing step is reported.
    pub fn validate_all(&self) -> Result<(), ValidationError> {
        for step in 1..=self.form.total_steps() {
            let fields = self.invalid_in_step(step);
            if !fields.is_empty() {
                return Err(ValidationError::Step { step, fields });
            }
        }
        Ok(())
    }

    /// Validate and assemble the submission payload.
    pub fn payload(&self) -> Result<OnboardingPayload, ValidationError> {
        self.validate_all()?;
        Ok(OnboardingPayload::from_values(&self.values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotifier;

    fn fill_step_one(wizard: &mut Wizard) {
        wizard.set_text(fields::NAME, "Ada Lovelace").unwrap();
        wizard.set_text(fields::EMAIL, "ada@example.com").unwrap();
    }

    fn fill_step_two(wizard: &mut Wizard) {
        wizard.set_text(fields::UNIVERSITY, "Cambridge").unwrap();
        wizard.set_text(fields::MAJOR, "Mathematics").unwrap();
        wizard.set_text(fields::GPA, "3.9").unwrap();
    }

    fn fill_step_three(wizard: &mut Wizard) {
        wizard
            .set_text(fields::CAREER_ASPIRATIONS, "Build analytical engines")
            .unwrap();
        wizard.set_text(fields::TARGET_INDUSTRIES, "Computing, Research").unwrap();
        wizard.set_text(fields::CURRENT_SKILLS, "Python, SQL ,  Go").unwrap();
        wizard.set_text(fields::EXPERIENCE_LEVEL, "intermediate").unwrap();
    }

    fn fill_step_four(wizard: &mut Wizard) {
        wizard.set_text(fields::PREFERRED_LEARNING, "projects").unwrap();
        wizard.set_text(fields::TIME_COMMITMENT, "5-10 hours/week").unwrap();
    }

    #[test]
    fn advance_requires_valid_step() {
        let notifier = MemoryNotifier::new();
        let mut wizard = Wizard::default();

        let err = wizard.advance(&notifier).unwrap_err();
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(
            err,
            ValidationError::Step {
                step: 1,
                fields: vec![fields::NAME.to_string(), fields::EMAIL.to_string()],
            }
        );
        assert_eq!(wizard.focused_field(), Some(fields::NAME));
        assert_eq!(
            notifier.toasts(),
            vec![(ToastKind::Warning, INCOMPLETE_STEP_WARNING.to_string())]
        );

        fill_step_one(&mut wizard);
        let view = wizard.advance(&notifier).unwrap();
        assert_eq!(view.step, 2);
        assert_eq!(wizard.invalid_fields().count(), 0);
        assert!(wizard.focused_field().is_none());
    }

    #[test]
    fn invalid_value_blocks_advance() {
        let notifier = MemoryNotifier::new();
        let mut wizard = Wizard::default();
        fill_step_one(&mut wizard);
        wizard.set_text(fields::EMAIL, "not-an-email").unwrap();
        assert!(wizard.advance(&notifier).is_err());
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.focused_field(), Some(fields::EMAIL));
    }

    #[test]
    fn every_step_gates_forward_navigation() {
        let notifier = MemoryNotifier::new();
        let mut wizard = Wizard::default();
        let fillers: [fn(&mut Wizard); 3] = [fill_step_one, fill_step_two, fill_step_three];
        for (i, fill) in fillers.iter().enumerate() {
            let step = i + 1;
            assert!(wizard.advance(&notifier).is_err());
            assert_eq!(wizard.current_step(), step);
            fill(&mut wizard);
            assert_eq!(wizard.advance(&notifier).unwrap().step, step + 1);
        }
        // Last step: advancing is capped.
        fill_step_four(&mut wizard);
        assert_eq!(wizard.advance(&notifier).unwrap().step, 4);
        assert_eq!(wizard.step_view().primary, PrimaryAction::Submit);
    }

    #[test]
    fn retreat_never_validates() {
        let notifier = MemoryNotifier::new();
        let mut wizard = Wizard::default();
        assert_eq!(wizard.retreat().step, 1);

        fill_step_one(&mut wizard);
        wizard.advance(&notifier).unwrap();
        assert_eq!(wizard.current_step(), 2);
        // Step 2 is empty, going back is still allowed.
        assert_eq!(wizard.retreat().step, 1);
    }

    #[test]
    fn relocation_toggle_controls_requiredness() {
        let mut wizard = Wizard::default();
        assert!(!wizard.is_visible(fields::RELOCATION_GOAL));
        assert!(!wizard.is_required(fields::RELOCATION_GOAL));

        wizard.set_toggle(fields::RELOCATION, true).unwrap();
        assert!(wizard.is_visible(fields::RELOCATION_GOAL));
        assert!(wizard.is_required(fields::RELOCATION_GOAL));
        wizard.set_text(fields::RELOCATION_GOAL, "Toronto").unwrap();

        wizard.set_toggle(fields::RELOCATION, false).unwrap();
        assert!(!wizard.is_visible(fields::RELOCATION_GOAL));
        assert!(!wizard.is_required(fields::RELOCATION_GOAL));

        fill_step_one(&mut wizard);
        fill_step_two(&mut wizard);
        fill_step_three(&mut wizard);
        fill_step_four(&mut wizard);
        assert_eq!(wizard.payload().unwrap().relocation_goal, None);
    }

    #[test]
    fn revealed_goal_must_be_filled() {
        let notifier = MemoryNotifier::new();
        let mut wizard = Wizard::default();
        fill_step_one(&mut wizard);
        fill_step_two(&mut wizard);
        fill_step_three(&mut wizard);
        fill_step_four(&mut wizard);
        for _ in 0..3 {
            wizard.advance(&notifier).unwrap();
        }
        wizard.set_toggle(fields::RELOCATION, true).unwrap();
        let err = wizard.advance(&notifier).unwrap_err();
        assert!(matches!(err, ValidationError::Step { fields: ref names, .. } if names == &vec![fields::RELOCATION_GOAL.to_string()]));
        assert!(wizard.payload().is_err());

        wizard.set_toggle(fields::RELOCATION, false).unwrap();
        assert_eq!(wizard.invalid_fields().count(), 0);
        assert!(wizard.payload().is_ok());
    }

    #[test]
    fn set_toggle_rejects_non_toggles() {
        let mut wizard = Wizard::default();
        assert!(wizard.set_toggle(fields::NAME, true).is_err());
        assert!(matches!(
            wizard.set_toggle("nope", true),
            Err(ValidationError::UnknownField(_))
        ));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut wizard = Wizard::default();
        assert_eq!(
            wizard.set_text("favourite_colour", "blue"),
            Err(ValidationError::UnknownField("favourite_colour".to_string()))
        );
    }

    #[test]
    fn horizon_control() {
        let mut wizard = Wizard::default();
        assert_eq!(wizard.horizon_label(), "1 Year");
        assert_eq!(wizard.set_horizon(3), "3 Years");
        assert_eq!(wizard.set_horizon(99), "5 Years");
        assert_eq!(wizard.set_horizon(0), "1 Year");
    }

    #[test]
    fn horizon_writes_stay_whole() {
        let mut wizard = Wizard::default();
        wizard.set_horizon(3);
        assert!(matches!(
            wizard.set(fields::PLANNING_HORIZON, FieldValue::Number(2.7)),
            Err(ValidationError::Field { .. })
        ));
        assert_eq!(wizard.horizon_label(), "3 Years");

        wizard.set(fields::PLANNING_HORIZON, FieldValue::text("2")).unwrap();
        assert_eq!(wizard.horizon_label(), "2 Years");
        wizard.set(fields::PLANNING_HORIZON, FieldValue::Number(40.0)).unwrap();
        assert_eq!(wizard.value(fields::PLANNING_HORIZON), Some(&FieldValue::Number(5.0)));
        assert_eq!(wizard.horizon_label(), "5 Years");
    }

    #[test]
    fn separator_only_lists_block_advance() {
        let notifier = MemoryNotifier::new();
        let mut wizard = Wizard::default();
        fill_step_one(&mut wizard);
        fill_step_two(&mut wizard);
        fill_step_three(&mut wizard);
        wizard.advance(&notifier).unwrap();
        wizard.advance(&notifier).unwrap();
        assert_eq!(wizard.current_step(), 3);

        wizard.set_text(fields::TARGET_INDUSTRIES, " , ,").unwrap();
        wizard.set_text(fields::CURRENT_SKILLS, ",").unwrap();
        let err = wizard.advance(&notifier).unwrap_err();
        assert_eq!(wizard.current_step(), 3);
        assert_eq!(
            err,
            ValidationError::Step {
                step: 3,
                fields: vec![
                    fields::TARGET_INDUSTRIES.to_string(),
                    fields::CURRENT_SKILLS.to_string(),
                ],
            }
        );
        assert_eq!(wizard.focused_field(), Some(fields::TARGET_INDUSTRIES));

        fill_step_four(&mut wizard);
        assert!(matches!(
            wizard.payload(),
            Err(ValidationError::Step { step: 3, .. })
        ));
    }

    #[test]
    fn image_rejections_keep_previous_image() {
        let notifier = MemoryNotifier::new();
        let mut wizard = Wizard::default();

        let good = ImageFile::new("image/png", b"png-bytes".to_vec());
        wizard
            .upload_image(fields::PROFILE_PHOTO, &good, &notifier)
            .unwrap();
        let before = wizard.value(fields::PROFILE_PHOTO).cloned();
        assert!(matches!(before, Some(FieldValue::Image(_))));

        let big = ImageFile::new("image/png", vec![0u8; 3 * 1024 * 1024]);
        let too_large = wizard
            .upload_image(fields::PROFILE_PHOTO, &big, &notifier)
            .unwrap_err();
        let text = ImageFile::new("text/plain", b"hello".to_vec());
        let not_image = wizard
            .upload_image(fields::PROFILE_PHOTO, &text, &notifier)
            .unwrap_err();

        assert!(matches!(too_large, ImageError::TooLarge { .. }));
        assert!(matches!(not_image, ImageError::NotAnImage { .. }));
        assert_eq!(wizard.value(fields::PROFILE_PHOTO).cloned(), before);

        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 2);
        assert!(toasts.iter().all(|(kind, _)| *kind == ToastKind::Error));
        assert_ne!(toasts[0].1, toasts[1].1);
    }

    #[test]
    fn payload_from_complete_wizard() {
        let mut wizard = Wizard::default();
        fill_step_one(&mut wizard);
        fill_step_two(&mut wizard);
        fill_step_three(&mut wizard);
        fill_step_four(&mut wizard);
        wizard.set_horizon(2);

        let payload = wizard.payload().unwrap();
        assert_eq!(payload.name, "Ada Lovelace");
        assert_eq!(payload.current_skills, vec!["Python", "SQL", "Go"]);
        assert_eq!(payload.gpa, Some(3.9));
        assert_eq!(payload.timeline_months(), 24);
        assert!(payload.profile_photo.is_none());
    }

    #[test]
    fn payload_reports_first_incomplete_step() {
        let mut wizard = Wizard::default();
        fill_step_one(&mut wizard);
        fill_step_three(&mut wizard);
        assert!(matches!(
            wizard.payload(),
            Err(ValidationError::Step { step: 2, .. })
        ));
    }
}
