//! Field declarations and per-field validation.

use std::sync::LazyLock;

use regex::Regex;

use super::image::AcceptedImage;
use super::payload::split_list;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Input control type and its constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    LongText,
    Email,
    /// Comma separated entries.
    List,
    /// Decimal number within `[min, max]`.
    Number { min: f64, max: f64 },
    /// One of a fixed set of values.
    Select { options: &'static [&'static str] },
    /// Slider over whole numbers.
    Range { min: u32, max: u32, default: u32 },
    Toggle,
    Image,
}

/// One input of the wizard.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Toggle that reveals this field and makes it required while on.
    pub revealed_by: Option<&'static str>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            revealed_by: None,
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn list(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::List)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn revealed_by(mut self, toggle: &'static str) -> Self {
        self.revealed_by = Some(toggle);
        self
    }

    /// Value the control starts with, if any.
    pub fn initial_value(&self) -> Option<FieldValue> {
        match self.kind {
            FieldKind::Range { default, .. } => Some(FieldValue::Number(default as f64)),
            FieldKind::Toggle => Some(FieldValue::Flag(false)),
            _ => None,
        }
    }
}

/// Current content of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
    Image(AcceptedImage),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view; text is parsed the way a number input would.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> bool {
        matches!(self, Self::Flag(true))
    }

    fn is_blank(&self, kind: &FieldKind) -> bool {
        match (self, kind) {
            (Self::Text(s), FieldKind::List) => split_list(s).is_empty(),
            (Self::Text(s), _) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// Check one field. `required` is the effective flag (a revealed dependent
/// field is required even if its spec is not).
pub fn validate_field(
    spec: &FieldSpec,
    value: Option<&FieldValue>,
    required: bool,
) -> Result<(), String> {
    let value = match value {
        Some(v) if !v.is_blank(&spec.kind) => v,
        _ if required => return Err(format!("{} is required", spec.label)),
        _ => return Ok(()),
    };

    match &spec.kind {
        FieldKind::Text | FieldKind::LongText | FieldKind::List => match value {
            FieldValue::Text(_) => Ok(()),
            _ => Err(format!("{} must be text", spec.label)),
        },
        FieldKind::Email => match value.as_text() {
            Some(s) if EMAIL_RE.is_match(s.trim()) => Ok(()),
            _ => Err(format!("{} must be a valid email address", spec.label)),
        },
        FieldKind::Number { min, max } => match value.as_number() {
            Some(n) if n >= *min && n <= *max => Ok(()),
            Some(_) => Err(format!("{} must be between {min} and {max}", spec.label)),
            None => Err(format!("{} must be a number", spec.label)),
        },
        FieldKind::Select { options } => match value.as_text() {
            Some(s) if options.contains(&s.trim()) => Ok(()),
            _ => Err(format!("{} must be one of: {}", spec.label, options.join(", "))),
        },
        FieldKind::Range { min, max, .. } => match value.as_number() {
            Some(n) if n.fract() == 0.0 && n >= *min as f64 && n <= *max as f64 => Ok(()),
            _ => Err(format!("{} must be a whole number from {min} to {max}", spec.label)),
        },
        FieldKind::Toggle => match value {
            FieldValue::Flag(_) => Ok(()),
            _ => Err(format!("{} must be on or off", spec.label)),
        },
        FieldKind::Image => match value {
            FieldValue::Image(_) => Ok(()),
            _ => Err(format!("{} must be an uploaded image", spec.label)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gpa() -> FieldSpec {
        FieldSpec::new("gpa", "GPA", FieldKind::Number { min: 0.0, max: 4.0 })
    }

    #[test]
    fn required_blank_fails() {
        let spec = FieldSpec::text("name", "Full name").required();
        assert!(validate_field(&spec, None, true).is_err());
        assert!(validate_field(&spec, Some(&FieldValue::text("   ")), true).is_err());
        assert!(validate_field(&spec, Some(&FieldValue::text("Ada")), true).is_ok());
    }

    #[test]
    fn required_list_needs_an_entry() {
        let spec = FieldSpec::list("current_skills", "Current skills").required();
        assert!(validate_field(&spec, Some(&FieldValue::text(" , ,")), true).is_err());
        assert!(validate_field(&spec, Some(&FieldValue::text(",")), true).is_err());
        assert!(validate_field(&spec, Some(&FieldValue::text("Rust, ")), true).is_ok());

        let optional = FieldSpec::list("interests", "Interests");
        assert!(validate_field(&optional, Some(&FieldValue::text(" , ")), false).is_ok());
    }

    #[test]
    fn optional_blank_passes() {
        assert!(validate_field(&gpa(), None, false).is_ok());
        assert!(validate_field(&gpa(), Some(&FieldValue::text("")), false).is_ok());
    }

    #[test]
    fn number_range() {
        assert!(validate_field(&gpa(), Some(&FieldValue::text("3.7")), false).is_ok());
        assert!(validate_field(&gpa(), Some(&FieldValue::Number(4.0)), false).is_ok());
        let err = validate_field(&gpa(), Some(&FieldValue::text("4.5")), false).unwrap_err();
        assert!(err.contains("between"));
        let err = validate_field(&gpa(), Some(&FieldValue::text("abc")), false).unwrap_err();
        assert!(err.contains("number"));
    }

    #[test]
    fn email_shape() {
        let spec = FieldSpec::new("email", "Email", FieldKind::Email).required();
        assert!(validate_field(&spec, Some(&FieldValue::text("ada@example.com")), true).is_ok());
        assert!(validate_field(&spec, Some(&FieldValue::text("ada@")), true).is_err());
        assert!(validate_field(&spec, Some(&FieldValue::text("ada example.com")), true).is_err());
    }

    #[test]
    fn select_options() {
        let spec = FieldSpec::new(
            "experience_level",
            "Experience level",
            FieldKind::Select {
                options: &["beginner", "intermediate"],
            },
        );
        assert!(validate_field(&spec, Some(&FieldValue::text("beginner")), true).is_ok());
        assert!(validate_field(&spec, Some(&FieldValue::text("expert")), true).is_err());
    }

    #[test]
    fn range_requires_whole_numbers() {
        let spec = FieldSpec::new(
            "planning_horizon",
            "Planning horizon",
            FieldKind::Range {
                min: 1,
                max: 5,
                default: 1,
            },
        );
        assert!(validate_field(&spec, Some(&FieldValue::Number(3.0)), true).is_ok());
        assert!(validate_field(&spec, Some(&FieldValue::Number(2.5)), true).is_err());
        assert!(validate_field(&spec, Some(&FieldValue::Number(6.0)), true).is_err());
    }

    #[test]
    fn initial_values() {
        let toggle = FieldSpec::new("relocation", "Relocation", FieldKind::Toggle);
        assert_eq!(toggle.initial_value(), Some(FieldValue::Flag(false)));
        assert_eq!(FieldSpec::text("name", "Name").initial_value(), None);
    }
}
