//! `ProfileStore` implementation over the `user_profiles` table.

use async_trait::async_trait;
use tracing::instrument;

use amber_lane_core::{Email, ProfileId};

use crate::models::{NewProfile, Profile};
use crate::stores::{ProfileStore, StoreError};

use super::client::{SupabaseClient, SupabaseError};

impl From<SupabaseError> for StoreError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::NotFound(_) => Self::NotFound,
            other => Self::Backend(other.to_string()),
        }
    }
}

#[async_trait]
impl ProfileStore for SupabaseClient {
    #[instrument(skip(self), fields(email = %email))]
    async fn find_by_email(&self, email: &Email) -> Result<Option<Profile>, StoreError> {
        let query = format!(
            "select=*&email=eq.{}&limit=1",
            urlencoding::encode(email.as_str())
        );
        let rows: Vec<Profile> = self.select("user_profiles", &query).await?;
        Ok(rows.into_iter().next())
    }

    #[instrument(skip(self, profile), fields(email = %profile.email))]
    async fn insert(&self, profile: NewProfile) -> Result<Profile, StoreError> {
        let created = self.insert_returning("user_profiles", &profile).await?;
        Ok(created)
    }

    #[instrument(skip(self), fields(profile_id = %id))]
    async fn delete(&self, id: ProfileId) -> Result<(), StoreError> {
        self.delete_rows("user_profiles", &format!("id=eq.{id}"))
            .await?;
        Ok(())
    }
}

impl SupabaseClient {
    /// List every customer profile (admin back-office listing).
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, SupabaseError> {
        self.select("user_profiles", "select=*&order=created_at.desc")
            .await
    }

    /// Set the admin flag on the profile with the given email.
    ///
    /// Used by the CLI's `admin grant` command.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn grant_admin(&self, email: &Email) -> Result<(), SupabaseError> {
        let filter = format!("email=eq.{}", urlencoding::encode(email.as_str()));
        self.patch(
            "user_profiles",
            &filter,
            &serde_json::json!({ "is_admin": true }),
        )
        .await
    }
}
