//! Field validation composed from configuration flags.
//!
//! The validator set for a form is assembled once at construction time
//! from the share options, so which rules apply is decided up front
//! rather than branched on inside a monolithic schema.

use std::fmt;

use shareport_core::config::ShareOptions;
use shareport_core::types::ShareLink;

use super::form::FormValues;

/// A form field that can carry an inline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    /// The share link token.
    Link,
    /// Display name.
    Name,
    /// Share password.
    Password,
    /// Maximum view count.
    MaxViews,
    /// Recipient e-mail list.
    Recipients,
    /// Expiration magnitude.
    ExpirationMagnitude,
}

impl FormField {
    /// Field name as shown next to inline errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Name => "name",
            Self::Password => "password",
            Self::MaxViews => "max_views",
            Self::Recipients => "recipients",
            Self::ExpirationMagnitude => "expiration",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single field check. Returns an error message, or `None` when valid.
type CheckFn = fn(&FormValues) -> Option<String>;

/// A validator bound to the field its errors attach to.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    /// Field the error is reported on.
    pub field: FormField,
    check: CheckFn,
}

impl FieldValidator {
    /// Creates a validator for a field.
    pub fn new(field: FormField, check: CheckFn) -> Self {
        Self { field, check }
    }

    /// Run the check against the current values.
    pub fn run(&self, values: &FormValues) -> Option<String> {
        (self.check)(values)
    }
}

/// Assemble the validator set for the given options.
///
/// The simplified flow only exposes name and description; link, password
/// and view-limit validators exist only for the full flow.
pub fn build_validators(options: &ShareOptions) -> Vec<FieldValidator> {
    let mut validators = vec![FieldValidator::new(FormField::Name, check_name)];
    if options.simplified {
        return validators;
    }
    validators.push(FieldValidator::new(FormField::Link, check_link));
    validators.push(FieldValidator::new(FormField::Password, check_password));
    validators.push(FieldValidator::new(FormField::MaxViews, check_max_views));
    if !options.is_reverse_share {
        validators.push(FieldValidator::new(
            FormField::ExpirationMagnitude,
            check_expiration_magnitude,
        ));
    }
    validators
}

fn check_link(values: &FormValues) -> Option<String> {
    if values.link.is_empty() {
        return Some("This field is required".to_string());
    }
    ShareLink::validate(&values.link).err().map(|e| e.message)
}

fn check_name(values: &FormValues) -> Option<String> {
    check_optional_length(values.name.as_deref(), 3, 30)
}

fn check_password(values: &FormValues) -> Option<String> {
    check_optional_length(values.password.as_deref(), 3, 30)
}

fn check_max_views(values: &FormValues) -> Option<String> {
    match values.max_views {
        Some(0) => Some("Must be at least 1".to_string()),
        _ => None,
    }
}

fn check_expiration_magnitude(values: &FormValues) -> Option<String> {
    if !values.never_expires && values.expiration_magnitude == 0 {
        Some("This field is required".to_string())
    } else {
        None
    }
}

/// Length bounds for an optional field; absent values are valid.
fn check_optional_length(value: Option<&str>, min: usize, max: usize) -> Option<String> {
    let value = value?;
    if value.len() < min {
        Some(format!("Must be at least {min} characters"))
    } else if value.len() > max {
        Some(format!("Must be at most {max} characters"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_options() -> ShareOptions {
        ShareOptions::default()
    }

    fn values() -> FormValues {
        FormValues {
            link: "abc123".to_string(),
            ..FormValues::default()
        }
    }

    fn run_all(options: &ShareOptions, values: &FormValues) -> Vec<(FormField, String)> {
        build_validators(options)
            .iter()
            .filter_map(|v| v.run(values).map(|msg| (v.field, msg)))
            .collect()
    }

    #[test]
    fn test_valid_values_produce_no_errors() {
        assert!(run_all(&full_options(), &values()).is_empty());
    }

    #[test]
    fn test_link_required_and_pattern_checked() {
        let mut v = values();
        v.link = String::new();
        let errors = run_all(&full_options(), &v);
        assert_eq!(errors[0].0, FormField::Link);

        v.link = "bad link!".to_string();
        let errors = run_all(&full_options(), &v);
        assert_eq!(errors[0].0, FormField::Link);
    }

    #[test]
    fn test_optional_fields_checked_only_when_present() {
        let mut v = values();
        v.name = Some("ab".to_string());
        v.password = Some("x".repeat(31));
        v.max_views = Some(0);
        let errors = run_all(&full_options(), &v);
        let fields: Vec<FormField> = errors.iter().map(|(f, _)| *f).collect();
        assert_eq!(
            fields,
            vec![FormField::Name, FormField::Password, FormField::MaxViews]
        );

        v.name = None;
        v.password = None;
        v.max_views = None;
        assert!(run_all(&full_options(), &v).is_empty());
    }

    #[test]
    fn test_zero_magnitude_is_required_field_error_unless_never() {
        let mut v = values();
        v.expiration_magnitude = 0;
        let errors = run_all(&full_options(), &v);
        assert_eq!(errors[0].0, FormField::ExpirationMagnitude);

        v.never_expires = true;
        assert!(run_all(&full_options(), &v).is_empty());
    }

    #[test]
    fn test_simplified_flow_only_validates_name() {
        let options = ShareOptions {
            simplified: true,
            ..ShareOptions::default()
        };
        let validators = build_validators(&options);
        assert_eq!(validators.len(), 1);
        assert_eq!(validators[0].field, FormField::Name);

        // An invalid link value is ignored entirely in simplified mode.
        let mut v = FormValues::default();
        v.link = "!!".to_string();
        assert!(run_all(&options, &v).is_empty());
    }
}
