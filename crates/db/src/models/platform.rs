//! Connected platform entity and DTOs.
//!
//! A platform's identity and type are immutable after creation;
//! credentials and status are mutable (token rotation, failure flips).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shopsync_core::credentials::{PlatformCredentials, PlatformType};
use shopsync_core::error::CoreError;
use shopsync_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a connected platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformStatus {
    Active,
    Error,
    Disabled,
}

impl PlatformStatus {
    /// Database representation. Matches the `platforms.status` CHECK set.
    pub fn as_str(self) -> &'static str {
        match self {
            PlatformStatus::Active => "active",
            PlatformStatus::Error => "error",
            PlatformStatus::Disabled => "disabled",
        }
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A connected external store.
///
/// The raw credential blob is never serialized outward; callers decode it
/// through [`Platform::credentials`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Platform {
    pub id: DbId,
    pub user_id: DbId,
    pub platform_type: String,
    pub platform_name: String,
    #[serde(skip_serializing)]
    pub api_credentials: serde_json::Value,
    pub status: String,
    pub last_sync_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Platform {
    /// The typed platform type for this row.
    pub fn platform_type(&self) -> Result<PlatformType, CoreError> {
        PlatformType::parse(&self.platform_type)
    }

    /// Decode the stored credential blob into its typed bundle.
    pub fn credentials(&self) -> Result<PlatformCredentials, CoreError> {
        PlatformCredentials::decode(self.platform_type()?, &self.api_credentials)
    }

    /// Whether this platform participates in reconciliation.
    pub fn is_active(&self) -> bool {
        self.status == PlatformStatus::Active.as_str()
    }
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// DTO for connecting a new platform. Created only after a successful
/// connect-test against the live API.
#[derive(Debug, Clone)]
pub struct CreatePlatform {
    pub platform_type: PlatformType,
    pub platform_name: String,
    pub api_credentials: serde_json::Value,
}
