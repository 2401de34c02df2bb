//! Availability check for a share link.

use clap::Args;

use shareport_core::config::AppConfig;
use shareport_core::error::AppError;
use shareport_core::types::ShareLink;

use crate::output;

/// Arguments for the availability check
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Share link to probe
    pub link: String,
}

/// Execute the check command
pub async fn execute(args: &CheckArgs, config: &AppConfig) -> Result<(), AppError> {
    let link = ShareLink::new(args.link.as_str())?;
    let gateway = super::build_gateway(config)?;

    if gateway.is_link_available(&link).await? {
        output::print_success(&format!("'{link}' is available"));
    } else {
        output::print_warning(&format!("'{link}' is already taken"));
    }
    Ok(())
}
