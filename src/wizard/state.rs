//! Wizard step position and what it implies for the screen.

use serde::{Deserialize, Serialize};

/// What the primary button does on the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAction {
    Next,
    Submit,
}

impl std::fmt::Display for PrimaryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Next => write!(f, "Next"),
            Self::Submit => write!(f, "Submit"),
        }
    }
}

/// Render-ready description of which step is showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    /// Visible step, 1-based.
    pub step: usize,
    pub total_steps: usize,
    /// `indicators[i]` is reached iff `i + 1 <= step`.
    pub indicators: Vec<bool>,
    pub show_back: bool,
    pub primary: PrimaryAction,
}

/// 1-based step position bounded by `[1, total_steps]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCursor {
    current: usize,
    total: usize,
}

impl StepCursor {
    /// Start at step 1. A form always has at least one step.
    pub fn new(total: usize) -> Self {
        Self {
            current: 1,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_last(&self) -> bool {
        self.current == self.total
    }

    /// Move forward, capped at the last step. Returns the new step.
    pub fn forward(&mut self) -> usize {
        if self.current < self.total {
            self.current += 1;
        }
        self.current
    }

    /// Move back, floored at step 1. Returns the new step.
    pub fn back(&mut self) -> usize {
        if self.current > 1 {
            self.current -= 1;
        }
        self.current
    }

    pub fn view(&self) -> StepView {
        StepView {
            step: self.current,
            total_steps: self.total,
            indicators: (1..=self.total).map(|i| i <= self.current).collect(),
            show_back: self.current > 1,
            primary: if self.is_last() {
                PrimaryAction::Submit
            } else {
                PrimaryAction::Next
            },
        }
    }
}

/// Label for the horizon control, e.g. "1 Year", "3 Years".
pub fn horizon_label(years: u32) -> String {
    format!("{years} Year{}", if years == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_is_capped() {
        let mut cursor = StepCursor::new(4);
        let steps: Vec<usize> = (0..5).map(|_| cursor.forward()).collect();
        assert_eq!(steps, vec![2, 3, 4, 4, 4]);
        assert!(cursor.is_last());
    }

    #[test]
    fn back_is_floored() {
        let mut cursor = StepCursor::new(4);
        assert_eq!(cursor.back(), 1);
        cursor.forward();
        cursor.forward();
        assert_eq!(cursor.back(), 2);
        assert_eq!(cursor.back(), 1);
        assert_eq!(cursor.back(), 1);
    }

    #[test]
    fn view_on_first_step() {
        let view = StepCursor::new(4).view();
        assert_eq!(view.step, 1);
        assert_eq!(view.indicators, vec![true, false, false, false]);
        assert!(!view.show_back);
        assert_eq!(view.primary, PrimaryAction::Next);
    }

    #[test]
    fn view_on_last_step_offers_submit() {
        let mut cursor = StepCursor::new(4);
        for _ in 0..3 {
            cursor.forward();
        }
        let view = cursor.view();
        assert_eq!(view.indicators, vec![true; 4]);
        assert!(view.show_back);
        assert_eq!(view.primary, PrimaryAction::Submit);
        assert_eq!(view.primary.to_string(), "Submit");
    }

    #[test]
    fn single_step_form_submits_immediately() {
        let cursor = StepCursor::new(0);
        assert_eq!(cursor.total(), 1);
        assert_eq!(cursor.view().primary, PrimaryAction::Submit);
    }

    #[test]
    fn horizon_label_pluralizes() {
        assert_eq!(horizon_label(1), "1 Year");
        assert_eq!(horizon_label(2), "2 Years");
        assert_eq!(horizon_label(5), "5 Years");
    }
}
