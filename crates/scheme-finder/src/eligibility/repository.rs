use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Program, ProgramId, UserId, UserProfile};

/// Stored profile together with its owner and last edit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub user_id: UserId,
    pub profile: UserProfile,
    pub last_updated: DateTime<Utc>,
}

impl ProfileRecord {
    pub fn view(&self) -> ProfileView {
        ProfileView {
            user_id: self.user_id.clone(),
            profile: self.profile.clone(),
            last_updated: self.last_updated,
            complete: self.profile.is_complete(),
            missing_fields: self.profile.missing_fields(),
        }
    }
}

/// Profile payload returned to clients, flagging what still needs to be filled in.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub user_id: UserId,
    pub profile: UserProfile,
    pub last_updated: DateTime<Utc>,
    pub complete: bool,
    pub missing_fields: Vec<&'static str>,
}

/// Persistence for user profiles, keyed by the identity the auth provider assigned.
pub trait ProfileStore: Send + Sync {
    fn save(&self, record: ProfileRecord) -> Result<ProfileRecord, StoreError>;
    fn fetch(&self, user_id: &UserId) -> Result<Option<ProfileRecord>, StoreError>;
}

/// Read access to the scheme/scholarship catalog maintained by administrators.
pub trait CatalogStore: Send + Sync {
    fn programs(&self) -> Result<Vec<Program>, StoreError>;
    fn program(&self, id: &ProgramId) -> Result<Option<Program>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
