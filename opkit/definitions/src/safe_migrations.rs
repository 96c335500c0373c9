//! Safe migration toggles for a branch.
//!
//! Enabling is a POST and disabling a DELETE on the same route; both answer
//! with the updated [`Branch`].

use opkit::{
    make, Context, JsonFormat, Operation, OperationDescriptor, OperationError, PathParams,
    RestMethod, Transport,
};
use thiserror::Error;

use crate::branches::{Branch, BranchInput};
use crate::common::BranchScope;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SafeMigrationsError {
    #[error("branch not found: {0}")]
    NotFound(BranchScope),
    #[error("access to branch forbidden: {0}")]
    Forbidden(BranchScope),
    #[error("safe migrations cannot be changed: {0}")]
    Unprocessable(BranchScope),
}

const PARAMS: [&str; 3] = ["organization", "database", "branch"];

fn safe_migrations_path(params: &PathParams) -> String {
    let param = |name: &str| params.get(name).map_or("", String::as_str);
    format!(
        "/organizations/{}/databases/{}/branches/{}/safe-migrations",
        param("organization"),
        param("database"),
        param("branch")
    )
}

pub static ENABLE_SAFE_MIGRATIONS: Operation<BranchInput, JsonFormat<Branch>, SafeMigrationsError> =
    make(|| {
        OperationDescriptor::builder()
            .id("enable_safe_migrations")
            .method(RestMethod::Post)
            .path_fn(&PARAMS, safe_migrations_path)
            .error("not_found", SafeMigrationsError::NotFound)
            .error("forbidden", SafeMigrationsError::Forbidden)
            .error("unprocessable_entity", SafeMigrationsError::Unprocessable)
            .build()
    });

pub static DISABLE_SAFE_MIGRATIONS: Operation<BranchInput, JsonFormat<Branch>, SafeMigrationsError> =
    make(|| {
        OperationDescriptor::builder()
            .id("disable_safe_migrations")
            .method(RestMethod::Delete)
            .path_fn(&PARAMS, safe_migrations_path)
            .error("not_found", SafeMigrationsError::NotFound)
            .error("forbidden", SafeMigrationsError::Forbidden)
            .error("unprocessable_entity", SafeMigrationsError::Unprocessable)
            .build()
    });

pub async fn enable_safe_migrations<T: Transport>(
    ctx: &Context<T>,
    input: &BranchInput,
) -> Result<Branch, OperationError<SafeMigrationsError>> {
    ENABLE_SAFE_MIGRATIONS.call(ctx, input).await
}

pub async fn disable_safe_migrations<T: Transport>(
    ctx: &Context<T>,
    input: &BranchInput,
) -> Result<Branch, OperationError<SafeMigrationsError>> {
    DISABLE_SAFE_MIGRATIONS.call(ctx, input).await
}
