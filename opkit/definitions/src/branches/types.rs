//! Branch request, response and error types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::{write_message, Actor, BranchScope, DatabaseScope, Pagination};

/// Region a branch is hosted in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Region {
    pub slug: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A database branch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Branch {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_branch: Option<String>,
    /// Production branches reject direct schema changes.
    #[serde(default)]
    pub production: bool,
    #[serde(default)]
    pub ready: bool,
    /// Whether safe migrations are enabled.
    #[serde(default)]
    pub safe_migrations: bool,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub cluster_rate_name: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub actor: Option<Actor>,
}

/// Input for listing a database's branches.
#[derive(Debug, Clone, Serialize)]
pub struct ListBranchesInput {
    pub organization: String,
    pub database: String,
    /// Filter by name.
    pub q: Option<String>,
    pub production: Option<bool>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// Input addressing a single branch.
#[derive(Debug, Clone, Serialize)]
pub struct BranchInput {
    pub organization: String,
    pub database: String,
    pub branch: String,
}

/// Input for creating a branch.
#[derive(Debug, Clone, Serialize)]
pub struct CreateBranchInput {
    pub organization: String,
    pub database: String,
    pub name: String,
    pub parent_branch: String,
    /// Restore the new branch from this backup.
    pub backup_id: Option<String>,
    pub region: Option<String>,
    pub seed_data: Option<String>,
}

impl CreateBranchInput {
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.parent_branch.trim().is_empty() {
            return Err("parent_branch must not be empty".to_string());
        }
        Ok(())
    }
}

/// Failure context for branch creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBranchFailure {
    pub organization: String,
    pub database: String,
    pub name: String,
    pub parent_branch: String,
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for CreateBranchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} from {}",
            self.organization, self.database, self.name, self.parent_branch
        )?;
        write_message(f, &self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListBranchesError {
    #[error("database not found: {0}")]
    NotFound(DatabaseScope),
    #[error("access to database forbidden: {0}")]
    Forbidden(DatabaseScope),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetBranchError {
    #[error("branch not found: {0}")]
    NotFound(BranchScope),
    #[error("access to branch forbidden: {0}")]
    Forbidden(BranchScope),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateBranchError {
    #[error("database or parent branch not found: {0}")]
    NotFound(CreateBranchFailure),
    #[error("access to database forbidden: {0}")]
    Forbidden(CreateBranchFailure),
    #[error("branch rejected: {0}")]
    Unprocessable(CreateBranchFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteBranchError {
    #[error("branch not found: {0}")]
    NotFound(BranchScope),
    #[error("access to branch forbidden: {0}")]
    Forbidden(BranchScope),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromoteBranchError {
    #[error("branch not found: {0}")]
    NotFound(BranchScope),
    #[error("access to branch forbidden: {0}")]
    Forbidden(BranchScope),
    #[error("branch cannot be promoted: {0}")]
    Unprocessable(BranchScope),
}
