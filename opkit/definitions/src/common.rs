//! Types shared across resource modules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Page selection for list operations.
///
/// Unset fields are left out of the query string entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

impl Pagination {
    /// Selects a page with the server's default page size.
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: None,
        }
    }
}

/// One page of a list response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Paginated<T> {
    /// Items on this page.
    pub data: Vec<T>,
    /// The page returned.
    #[serde(default)]
    pub current_page: Option<u32>,
    /// The following page, if any.
    #[serde(default)]
    pub next_page: Option<u32>,
    /// The preceding page, if any.
    #[serde(default)]
    pub prev_page: Option<u32>,
}

impl<T> Paginated<T> {
    /// Returns `true` if another page follows.
    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }
}

/// The user or service token that performed an action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Actor {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Failure context for operations addressed to a database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseScope {
    pub organization: String,
    pub database: String,
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for DatabaseScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.database)?;
        write_message(f, &self.message)
    }
}

/// Failure context for operations addressed to a branch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BranchScope {
    pub organization: String,
    pub database: String,
    pub branch: String,
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for BranchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.organization, self.database, self.branch)?;
        write_message(f, &self.message)
    }
}

/// Failure context for operations addressed to one resource on a branch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BranchResource {
    pub organization: String,
    pub database: String,
    pub branch: String,
    pub id: String,
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for BranchResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} {}",
            self.organization, self.database, self.branch, self.id
        )?;
        write_message(f, &self.message)
    }
}

pub(crate) fn write_message(f: &mut fmt::Formatter<'_>, message: &str) -> fmt::Result {
    if message.is_empty() {
        Ok(())
    } else {
        write!(f, ": {message}")
    }
}
