//! Backup request, response and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::{Actor, BranchResource, BranchScope, Pagination};

/// Lifecycle state of a backup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupState {
    Pending,
    Running,
    Success,
    Failed,
    Canceled,
    Ignored,
    #[serde(other)]
    Unknown,
}

/// Unit for a backup's retention period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetentionUnit {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// A branch backup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Backup {
    pub id: String,
    pub name: String,
    pub state: BackupState,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Whether the backup is a required (system) backup.
    #[serde(default)]
    pub required: bool,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub actor: Option<Actor>,
}

/// Input for listing a branch's backups.
#[derive(Debug, Clone, Serialize)]
pub struct ListBackupsInput {
    pub organization: String,
    pub database: String,
    pub branch: String,
    /// Only return production (or only non-production) backups.
    pub production: Option<bool>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// Input for fetching one backup.
#[derive(Debug, Clone, Serialize)]
pub struct GetBackupInput {
    pub organization: String,
    pub database: String,
    pub branch: String,
    pub id: String,
}

/// Input for creating a backup.
#[derive(Debug, Clone, Serialize)]
pub struct CreateBackupInput {
    pub organization: String,
    pub database: String,
    pub branch: String,
    pub name: Option<String>,
    pub retention_unit: Option<RetentionUnit>,
    pub retention_value: Option<u32>,
    /// Run the backup immediately on the primary.
    pub emergency: Option<bool>,
}

impl CreateBackupInput {
    pub(crate) fn check(&self) -> Result<(), String> {
        match (self.retention_unit, self.retention_value) {
            (Some(_), None) | (None, Some(_)) => {
                Err("retention_unit and retention_value must be set together".to_string())
            }
            (_, Some(0)) => Err("retention_value must be positive".to_string()),
            _ => Ok(()),
        }
    }
}

/// Input for deleting a backup.
pub type DeleteBackupInput = GetBackupInput;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListBackupsError {
    #[error("branch not found: {0}")]
    NotFound(BranchScope),
    #[error("access to branch forbidden: {0}")]
    Forbidden(BranchScope),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetBackupError {
    #[error("backup not found: {0}")]
    NotFound(BranchResource),
    #[error("access to backup forbidden: {0}")]
    Forbidden(BranchResource),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateBackupError {
    #[error("branch not found: {0}")]
    NotFound(BranchScope),
    #[error("access to branch forbidden: {0}")]
    Forbidden(BranchScope),
    #[error("backup rejected: {0}")]
    Unprocessable(BranchScope),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteBackupError {
    #[error("backup not found: {0}")]
    NotFound(BranchResource),
    #[error("access to backup forbidden: {0}")]
    Forbidden(BranchResource),
}
