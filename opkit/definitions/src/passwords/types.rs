//! Password request, response and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::{Actor, BranchResource, BranchScope, Pagination};

/// Access level granted by a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordRole {
    Reader,
    Writer,
    Admin,
    Readwriter,
}

/// A branch password.
///
/// `plain_text` is only present in the response to a create call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Password {
    pub id: String,
    pub name: String,
    pub role: PasswordRole,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub plain_text: Option<String>,
    #[serde(default)]
    pub access_host_url: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub actor: Option<Actor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListPasswordsInput {
    pub organization: String,
    pub database: String,
    pub branch: String,
    #[serde(flatten)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePasswordInput {
    pub organization: String,
    pub database: String,
    pub branch: String,
    pub name: Option<String>,
    pub role: Option<PasswordRole>,
    /// Lifetime in seconds; unset means the password never expires.
    pub ttl: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordInput {
    pub organization: String,
    pub database: String,
    pub branch: String,
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatePasswordInput {
    pub organization: String,
    pub database: String,
    pub branch: String,
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListPasswordsError {
    #[error("branch not found: {0}")]
    NotFound(BranchScope),
    #[error("access to branch forbidden: {0}")]
    Forbidden(BranchScope),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreatePasswordError {
    #[error("branch not found: {0}")]
    NotFound(BranchScope),
    #[error("access to branch forbidden: {0}")]
    Forbidden(BranchScope),
    #[error("password rejected: {0}")]
    Unprocessable(BranchScope),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("password not found: {0}")]
    NotFound(BranchResource),
    #[error("access to password forbidden: {0}")]
    Forbidden(BranchResource),
}
