//! Interactive share creation wizard.

use chrono::Utc;
use clap::Args;
use dialoguer::{Confirm, Input, Password, Select};
use rand::SeedableRng;
use rand::rngs::StdRng;

use shareport_core::config::{AppConfig, ShareOptions};
use shareport_core::error::AppError;
use shareport_core::types::{ExpirationSpec, ExpirationUnit};
use shareport_service::share::expiration::expiration_preview;
use shareport_service::share::form::CreateShareForm;
use shareport_service::share::validate::FormField;

use super::prompt_error;
use crate::output;

/// Arguments for share creation
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Use the simplified flow (name and description only)
    #[arg(long)]
    pub simplified: bool,

    /// Create a reverse share (suppresses the expiration prompt)
    #[arg(long)]
    pub reverse: bool,
}

/// Execute the create command
pub async fn execute(args: &CreateArgs, config: &AppConfig) -> Result<(), AppError> {
    let mut options = config.share.clone();
    if args.simplified {
        options.simplified = true;
    }
    if args.reverse {
        options.is_reverse_share = true;
    }

    if !options.is_user_signed_in && !options.allow_unauthenticated_shares {
        return Err(AppError::validation(
            "Signing in is required to create shares on this instance",
        ));
    }

    let gateway = super::build_gateway(config)?;
    let mut rng = StdRng::from_rng(&mut rand::rng());
    let mut form = CreateShareForm::new(options.clone(), gateway, &mut rng);

    if !options.is_user_signed_in {
        output::print_warning(
            "You are not signed in. This share cannot be managed or deleted later.",
        );
    }

    loop {
        prompt_values(&mut form, &options, &mut rng)?;

        match form.submit(&mut rng).await {
            Ok(record) => {
                output::print_success(&format!(
                    "Share created: {}",
                    record.share_url(&options.app_url)
                ));
                match record.expires_at {
                    Some(at) => println!("Expires on {}", at.format("%Y-%m-%d %H:%M UTC")),
                    None => println!("This share never expires."),
                }
                return Ok(());
            }
            Err(err) => {
                if form.errors().is_empty() {
                    output::print_error(&err.message);
                } else {
                    for (field, message) in form.errors() {
                        output::print_error(&format!("{field}: {message}"));
                    }
                }

                let retry = Confirm::new()
                    .with_prompt("Edit the form and try again?")
                    .default(true)
                    .interact()
                    .map_err(prompt_error)?;
                if !retry {
                    return Err(err);
                }
            }
        }
    }
}

/// Prompt for all fields the active flow exposes.
fn prompt_values(
    form: &mut CreateShareForm,
    options: &ShareOptions,
    rng: &mut StdRng,
) -> Result<(), AppError> {
    if !options.simplified {
        if form.error(FormField::Link).is_some() {
            let regenerate = Confirm::new()
                .with_prompt("Generate a fresh link?")
                .default(true)
                .interact()
                .map_err(prompt_error)?;
            if regenerate {
                form.regenerate_link(rng);
            }
        }

        let link: String = Input::new()
            .with_prompt("Share link")
            .default(form.values().link.clone())
            .interact_text()
            .map_err(prompt_error)?;
        form.set_link(link.trim());
        println!("  {}/s/{}", options.app_url.trim_end_matches('/'), form.values().link);
    }

    let name: String = Input::new()
        .with_prompt("Name (optional)")
        .allow_empty(true)
        .default(form.values().name.clone().unwrap_or_default())
        .interact_text()
        .map_err(prompt_error)?;
    form.set_name(Some(name.trim().to_string()));

    let description: String = Input::new()
        .with_prompt("Description (optional)")
        .allow_empty(true)
        .default(form.values().description.clone().unwrap_or_default())
        .interact_text()
        .map_err(prompt_error)?;
    form.set_description(Some(description.trim().to_string()));

    if !options.simplified {
        let password = Password::new()
            .with_prompt("Password (empty for none)")
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_error)?;
        form.set_password(Some(password));

        form.set_max_views(prompt_max_views()?);

        if options.enable_email_recipients {
            prompt_recipients(form)?;
        }

        if !options.is_reverse_share {
            prompt_expiration(form, options)?;
        }
    }

    Ok(())
}

fn prompt_max_views() -> Result<Option<u32>, AppError> {
    loop {
        let raw: String = Input::new()
            .with_prompt("Maximum views (empty for unlimited)")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        match raw.parse::<u32>() {
            Ok(n) => return Ok(Some(n)),
            Err(_) => output::print_error("Enter a whole number"),
        }
    }
}

fn prompt_recipients(form: &mut CreateShareForm) -> Result<(), AppError> {
    loop {
        let email: String = Input::new()
            .with_prompt("Add recipient e-mail (empty to finish)")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        let email = email.trim();
        if email.is_empty() {
            return Ok(());
        }
        if let Err(err) = form.add_recipient(email) {
            output::print_error(&err.message);
        }
    }
}

fn prompt_expiration(form: &mut CreateShareForm, options: &ShareOptions) -> Result<(), AppError> {
    // "Never expires" is only offered under an unbounded policy; the
    // form would reject it anyway, so do not tempt the user.
    if options.max_expiration_in_hours == 0 {
        let never = Confirm::new()
            .with_prompt("Never expires?")
            .default(form.values().never_expires)
            .interact()
            .map_err(prompt_error)?;
        form.set_never_expires(never);
        if never {
            println!("  {}", expiration_preview(&ExpirationSpec::Never, Utc::now()));
            return Ok(());
        }
    }

    let magnitude = loop {
        let raw: String = Input::new()
            .with_prompt("Expires after")
            .default(form.values().expiration_magnitude.to_string())
            .interact_text()
            .map_err(prompt_error)?;
        match raw.trim().parse::<u32>() {
            Ok(n) if n > 0 => break n,
            _ => output::print_error("Enter a positive whole number"),
        }
    };

    let labels: Vec<&str> = ExpirationUnit::ALL.iter().map(|u| u.as_str()).collect();
    let default_index = ExpirationUnit::ALL
        .iter()
        .position(|u| *u == form.values().expiration_unit)
        .unwrap_or(0);
    let index = Select::new()
        .with_prompt("Unit")
        .items(&labels)
        .default(default_index)
        .interact()
        .map_err(prompt_error)?;

    let unit = ExpirationUnit::ALL[index];
    form.set_expiration(magnitude, unit);
    if let Ok(spec) = ExpirationSpec::after(magnitude, unit) {
        println!("  {}", expiration_preview(&spec, Utc::now()));
    }
    Ok(())
}
