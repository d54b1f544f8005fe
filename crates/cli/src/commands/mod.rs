//! CLI command implementations.

pub mod admin;
pub mod seed;

use amber_lane_storefront::config::StorefrontConfig;
use amber_lane_storefront::supabase::SupabaseClient;

/// Build a hosted-store client from the environment.
pub(crate) fn connect() -> Result<SupabaseClient, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = StorefrontConfig::from_env()?;
    let client = SupabaseClient::new(&config.supabase)?;
    Ok(client)
}
