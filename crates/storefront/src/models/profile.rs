//! Customer profile rows (`user_profiles` table).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use amber_lane_core::{Email, ProfileId};

/// A stored customer profile, keyed by email.
///
/// Created on first order from a new email and reused afterwards. The
/// checkout workflow never updates a profile; it deletes one only as
/// rollback compensation for a profile it created itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub email: Email,
    pub full_name: String,
    pub phone: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a new profile; the store assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewProfile {
    pub email: Email,
    pub full_name: String,
    pub phone: String,
    pub is_admin: bool,
}
