//! Customer profile management commands.
//!
//! # Usage
//!
//! ```bash
//! amber-lane admin grant -e admin@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `SUPABASE_URL` - Base URL of the hosted store
//! - `SUPABASE_SERVICE_ROLE_KEY` - Service-role API key

use amber_lane_core::Email;

/// Set the admin flag on an existing customer profile.
///
/// # Errors
///
/// Returns an error if the email is invalid, the profile does not exist,
/// or the store write fails.
pub async fn grant(email: &str) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(email)?;

    let client = super::connect()?;

    // PATCH matches zero rows silently; verify the profile exists first so
    // a typo'd email fails loudly.
    let profiles = client.list_profiles().await?;
    if !profiles.iter().any(|p| p.email == email) {
        return Err(format!("no profile found for email: {email}").into());
    }

    client.grant_admin(&email).await?;
    tracing::info!("Granted admin flag to {email}");

    Ok(())
}
