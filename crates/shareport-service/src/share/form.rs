//! Create-share form composition and submission.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::Rng;
use tracing::info;
use validator::{Validate, ValidateEmail};

use shareport_core::config::ShareOptions;
use shareport_core::error::{AppError, ErrorKind};
use shareport_core::result::AppResult;
use shareport_core::traits::ShareGateway;
use shareport_core::types::{
    CreateShareRequest, ExpirationSpec, ExpirationUnit, ShareLink, ShareRecord, ShareSecurity,
};

use super::allocator::LinkAllocator;
use super::expiration::ExpirationPolicy;
use super::link::LinkGenerator;
use super::validate::{FieldValidator, FormField, build_validators};

/// Current values of the share creation form.
#[derive(Debug, Clone)]
pub struct FormValues {
    /// Share link token (full mode only; user-editable).
    pub link: String,
    /// Display name.
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Share password (full mode only).
    pub password: Option<String>,
    /// Maximum view count (full mode only).
    pub max_views: Option<u32>,
    /// Recipient e-mails, in insertion order.
    pub recipients: Vec<String>,
    /// Expiration magnitude.
    pub expiration_magnitude: u32,
    /// Expiration unit.
    pub expiration_unit: ExpirationUnit,
    /// Whether the share never expires.
    pub never_expires: bool,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            link: String::new(),
            name: None,
            description: None,
            password: None,
            max_views: None,
            recipients: Vec::new(),
            expiration_magnitude: 7,
            expiration_unit: ExpirationUnit::Days,
            never_expires: false,
        }
    }
}

/// The share creation form.
///
/// Owns its field values exclusively; every dialog invocation builds its
/// own form. Submission is atomic: either one fully-formed request is
/// handed to the gateway, or no request is sent and at least one error is
/// surfaced. After a failed submission the values are preserved so the
/// user can correct and resubmit.
#[derive(Debug)]
pub struct CreateShareForm {
    options: ShareOptions,
    gateway: Arc<dyn ShareGateway>,
    generator: LinkGenerator,
    allocator: LinkAllocator,
    policy: ExpirationPolicy,
    validators: Vec<FieldValidator>,
    values: FormValues,
    errors: BTreeMap<FormField, String>,
}

impl CreateShareForm {
    /// Creates a form for the given options.
    ///
    /// In the full flow the link field is prefilled with a generated
    /// candidate, matching the dialog's initial state.
    pub fn new<R: Rng>(options: ShareOptions, gateway: Arc<dyn ShareGateway>, rng: &mut R) -> Self {
        let generator = LinkGenerator::new();
        let mut values = FormValues::default();
        if !options.simplified {
            values.link = generator.generate(rng);
        }
        let allocator = LinkAllocator::new(Arc::clone(&gateway));
        let policy = ExpirationPolicy::new(&options);
        let validators = build_validators(&options);
        Self {
            options,
            gateway,
            generator,
            allocator,
            policy,
            validators,
            values,
            errors: BTreeMap::new(),
        }
    }

    /// Current field values.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Options this form was built with.
    pub fn options(&self) -> &ShareOptions {
        &self.options
    }

    /// Inline errors from the last submission or insertion attempt.
    pub fn errors(&self) -> &BTreeMap<FormField, String> {
        &self.errors
    }

    /// The inline error for one field, if any.
    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Set the link field (full mode).
    pub fn set_link(&mut self, link: impl Into<String>) {
        self.values.link = link.into();
    }

    /// Refill the link field with a fresh candidate (the "generate" action).
    pub fn regenerate_link<R: Rng>(&mut self, rng: &mut R) {
        self.values.link = self.generator.generate(rng);
        self.errors.remove(&FormField::Link);
    }

    /// Set the display name. Empty input clears the field.
    pub fn set_name(&mut self, name: Option<String>) {
        self.values.name = normalize(name);
    }

    /// Set the description. Empty input clears the field.
    pub fn set_description(&mut self, description: Option<String>) {
        self.values.description = normalize(description);
    }

    /// Set the password. Empty input means "no password".
    pub fn set_password(&mut self, password: Option<String>) {
        self.values.password = normalize(password);
    }

    /// Set the maximum view count. `None` means unlimited.
    pub fn set_max_views(&mut self, max_views: Option<u32>) {
        self.values.max_views = max_views;
    }

    /// Set the expiration duration fields.
    pub fn set_expiration(&mut self, magnitude: u32, unit: ExpirationUnit) {
        self.values.expiration_magnitude = magnitude;
        self.values.expiration_unit = unit;
    }

    /// Set whether the share never expires.
    pub fn set_never_expires(&mut self, never: bool) {
        self.values.never_expires = never;
    }

    /// Add a recipient e-mail.
    ///
    /// Recipients are validated here, at insertion time, not at
    /// submission. Duplicates are kept.
    pub fn add_recipient(&mut self, email: impl Into<String>) -> AppResult<()> {
        let email = email.into();
        if !self.options.enable_email_recipients {
            return Err(AppError::validation("E-mail recipients are disabled"));
        }
        if !email.validate_email() {
            let message = format!("'{email}' is not a valid e-mail address");
            self.errors.insert(FormField::Recipients, message.clone());
            return Err(AppError::validation(message));
        }
        self.errors.remove(&FormField::Recipients);
        self.values.recipients.push(email);
        Ok(())
    }

    /// Validate and submit the form.
    ///
    /// On failure the returned error describes the submission outcome and
    /// any field-level detail is available via [`errors`](Self::errors).
    /// Nothing reaches the gateway's `create_share` unless every check
    /// passed.
    pub async fn submit<R: Rng + Send>(&mut self, rng: &mut R) -> AppResult<ShareRecord> {
        if !self.run_validators() {
            return Err(AppError::validation("Share form has invalid fields"));
        }

        let request = if self.options.simplified {
            self.compose_simplified(rng).await?
        } else {
            self.compose_full().await?
        };

        // The composer must never emit a request violating its own
        // contract; a failure here is a bug, not user error.
        request
            .validate()
            .map_err(|e| AppError::internal(format!("Composed request failed validation: {e}")))?;

        let record = self.gateway.create_share(&request).await?;
        info!(link = %record.link, expiration = %request.expiration, "Share created");
        Ok(record)
    }

    fn run_validators(&mut self) -> bool {
        self.errors.clear();
        for validator in &self.validators {
            if let Some(message) = validator.run(&self.values) {
                self.errors.insert(validator.field, message);
            }
        }
        self.errors.is_empty()
    }

    /// Full flow: probe the user-chosen link once, then evaluate the
    /// expiration policy. A collision becomes a field error with no
    /// automatic retry; a probe transport failure propagates as-is.
    async fn compose_full(&mut self) -> AppResult<CreateShareRequest> {
        let link = ShareLink::new(self.values.link.clone())?;

        match self.gateway.is_link_available(&link).await {
            Ok(true) => {}
            Ok(false) => {
                self.errors.insert(
                    FormField::Link,
                    "This link is already in use".to_string(),
                );
                return Err(AppError::conflict(format!(
                    "Share link '{link}' is already taken"
                )));
            }
            Err(err) => return Err(err),
        }

        // Reverse shares inherit their lifetime from the reverse link;
        // the expiration policy applies there, not here.
        let expiration = if self.options.is_reverse_share {
            ExpirationSpec::Never
        } else {
            let requested = if self.values.never_expires {
                ExpirationSpec::Never
            } else {
                ExpirationSpec::after(
                    self.values.expiration_magnitude,
                    self.values.expiration_unit,
                )?
            };
            match self.policy.evaluate(&requested) {
                Ok(spec) => spec,
                Err(err) if err.kind == ErrorKind::Policy => {
                    self.errors
                        .insert(FormField::ExpirationMagnitude, err.message.clone());
                    return Err(err);
                }
                Err(err) => return Err(err),
            }
        };

        Ok(CreateShareRequest {
            link,
            name: self.values.name.clone(),
            description: self.values.description.clone(),
            expiration,
            recipients: self.values.recipients.clone(),
            security: ShareSecurity {
                password: self.values.password.clone(),
                max_views: self.values.max_views,
            },
        })
    }

    /// Simplified flow: the allocator picks the link, expiration is
    /// hard-wired to never, and the security block stays empty.
    async fn compose_simplified<R: Rng + Send>(
        &mut self,
        rng: &mut R,
    ) -> AppResult<CreateShareRequest> {
        let link = self.allocator.allocate(rng).await?;
        Ok(CreateShareRequest {
            link,
            name: self.values.name.clone(),
            description: self.values.description.clone(),
            expiration: ExpirationSpec::Never,
            recipients: Vec::new(),
            security: ShareSecurity::none(),
        })
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::testing::ScriptedGateway;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn form_with(
        options: ShareOptions,
        gateway: &Arc<ScriptedGateway>,
    ) -> (CreateShareForm, StdRng) {
        let mut rng = StdRng::seed_from_u64(1);
        let form = CreateShareForm::new(
            options,
            Arc::clone(gateway) as Arc<dyn ShareGateway>,
            &mut rng,
        );
        (form, rng)
    }

    #[tokio::test]
    async fn test_full_mode_submits_composed_request() {
        let gateway = Arc::new(ScriptedGateway::new());
        let options = ShareOptions {
            max_expiration_in_hours: 72,
            ..ShareOptions::default()
        };
        let (mut form, mut rng) = form_with(options, &gateway);

        form.set_link("myAwesomeShare");
        form.set_name(Some("Holiday photos".to_string()));
        form.set_password(Some("secret".to_string()));
        form.set_max_views(Some(5));
        form.set_expiration(2, ExpirationUnit::Days);
        form.add_recipient("a@example.com").unwrap();
        form.add_recipient("a@example.com").unwrap();

        let record = form.submit(&mut rng).await.unwrap();
        assert_eq!(record.link.as_str(), "myAwesomeShare");

        let submitted = gateway.submissions();
        assert_eq!(submitted.len(), 1);
        let request = &submitted[0];
        assert_eq!(request.expiration.to_string(), "2days");
        assert_eq!(request.security.password.as_deref(), Some("secret"));
        assert_eq!(request.security.max_views, Some(5));
        // Duplicates are kept, in insertion order.
        assert_eq!(request.recipients, vec!["a@example.com", "a@example.com"]);
        // The composed request satisfies its own contract.
        assert!(request.validate().is_ok());
    }

    #[tokio::test]
    async fn test_full_mode_taken_link_sets_field_error_and_aborts() {
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.script_probes(&[false]);
        let (mut form, mut rng) = form_with(ShareOptions::default(), &gateway);

        form.set_link("taken42");
        form.set_name(Some("My files".to_string()));

        let err = form.submit(&mut rng).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(form.error(FormField::Link).is_some());
        // Other fields are untouched and nothing was submitted.
        assert_eq!(form.values().name.as_deref(), Some("My files"));
        assert!(gateway.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_full_mode_policy_violation_lands_on_expiration_field() {
        let gateway = Arc::new(ScriptedGateway::new());
        let options = ShareOptions {
            max_expiration_in_hours: 72,
            ..ShareOptions::default()
        };
        let (mut form, mut rng) = form_with(options, &gateway);

        form.set_link("abc123");
        form.set_expiration(4, ExpirationUnit::Days);

        let err = form.submit(&mut rng).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Policy);
        let message = form.error(FormField::ExpirationMagnitude).unwrap();
        assert!(message.contains("3 days"));
        assert!(gateway.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_full_mode_never_under_bounded_policy_is_rejected() {
        let gateway = Arc::new(ScriptedGateway::new());
        let options = ShareOptions {
            max_expiration_in_hours: 24,
            ..ShareOptions::default()
        };
        let (mut form, mut rng) = form_with(options, &gateway);

        form.set_link("abc123");
        form.set_never_expires(true);

        let err = form.submit(&mut rng).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Policy);
        assert!(gateway.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_full_mode_probe_transport_error_is_distinct() {
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.push_probe(Err(AppError::external_service("backend unreachable")));
        let (mut form, mut rng) = form_with(ShareOptions::default(), &gateway);

        form.set_link("abc123");

        let err = form.submit(&mut rng).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
        // Not a collision: no field error on the link.
        assert!(form.error(FormField::Link).is_none());
        assert!(gateway.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_resubmission_after_validation_failure() {
        let gateway = Arc::new(ScriptedGateway::new());
        let (mut form, mut rng) = form_with(ShareOptions::default(), &gateway);

        form.set_link("ab");
        form.set_description(Some("report bundle".to_string()));
        let err = form.submit(&mut rng).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(form.error(FormField::Link).is_some());
        assert!(gateway.submissions().is_empty());

        // Fix the one offending field; the rest of the state survived.
        form.set_link("abc123");
        let record = form.submit(&mut rng).await.unwrap();
        assert_eq!(record.description.as_deref(), Some("report bundle"));
        assert_eq!(gateway.submissions().len(), 1);
    }

    #[tokio::test]
    async fn test_reverse_share_bypasses_expiration_policy() {
        let gateway = Arc::new(ScriptedGateway::new());
        let options = ShareOptions {
            is_reverse_share: true,
            max_expiration_in_hours: 24,
            ..ShareOptions::default()
        };
        let (mut form, mut rng) = form_with(options, &gateway);

        form.set_link("abc123");

        form.submit(&mut rng).await.unwrap();
        let submitted = gateway.submissions();
        assert_eq!(submitted[0].expiration.to_string(), "never");
    }

    #[tokio::test]
    async fn test_simplified_mode_never_exposes_restricted_fields() {
        let gateway = Arc::new(ScriptedGateway::new());
        let options = ShareOptions {
            simplified: true,
            ..ShareOptions::default()
        };
        let (mut form, mut rng) = form_with(options, &gateway);

        form.set_name(Some("Quick drop".to_string()));

        let record = form.submit(&mut rng).await.unwrap();
        assert_eq!(record.link.as_str().len(), 7);

        let submitted = gateway.submissions();
        let request = &submitted[0];
        assert_eq!(request.expiration.to_string(), "never");
        assert!(request.security.is_unrestricted());
        assert!(request.recipients.is_empty());
    }

    #[tokio::test]
    async fn test_simplified_mode_allocation_exhaustion_sends_nothing() {
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.script_probes(&[false; 10]);
        let options = ShareOptions {
            simplified: true,
            ..ShareOptions::default()
        };
        let (mut form, mut rng) = form_with(options, &gateway);

        let err = form.submit(&mut rng).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::AllocationExhausted);
        assert!(gateway.submissions().is_empty());
        // Not a field error: there is no visible link field to attach to.
        assert!(form.error(FormField::Link).is_none());
    }

    #[tokio::test]
    async fn test_add_recipient_validates_at_insertion() {
        let gateway = Arc::new(ScriptedGateway::new());
        let (mut form, _rng) = form_with(ShareOptions::default(), &gateway);

        assert!(form.add_recipient("not-an-email").is_err());
        assert!(form.error(FormField::Recipients).is_some());
        assert!(form.values().recipients.is_empty());

        form.add_recipient("a@example.com").unwrap();
        assert!(form.error(FormField::Recipients).is_none());
        assert_eq!(form.values().recipients, vec!["a@example.com"]);
    }

    #[tokio::test]
    async fn test_add_recipient_rejected_when_disabled() {
        let gateway = Arc::new(ScriptedGateway::new());
        let options = ShareOptions {
            enable_email_recipients: false,
            ..ShareOptions::default()
        };
        let (mut form, _rng) = form_with(options, &gateway);
        assert!(form.add_recipient("a@example.com").is_err());
    }

    #[tokio::test]
    async fn test_regenerate_link_clears_link_error() {
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.script_probes(&[false]);
        let (mut form, mut rng) = form_with(ShareOptions::default(), &gateway);

        form.set_link("taken42");
        let _ = form.submit(&mut rng).await.unwrap_err();
        assert!(form.error(FormField::Link).is_some());

        form.regenerate_link(&mut rng);
        assert!(form.error(FormField::Link).is_none());
        assert_eq!(form.values().link.len(), 7);
    }

    #[tokio::test]
    async fn test_full_mode_prefills_generated_link() {
        let gateway = Arc::new(ScriptedGateway::new());
        let (form, _rng) = form_with(ShareOptions::default(), &gateway);
        assert_eq!(form.values().link.len(), 7);

        let options = ShareOptions {
            simplified: true,
            ..ShareOptions::default()
        };
        let (form, _rng) = form_with(options, &gateway);
        assert!(form.values().link.is_empty());
    }
}
