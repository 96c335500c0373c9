//! Database branches.
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | [`LIST_BRANCHES`] | GET | `/organizations/{organization}/databases/{database}/branches` |
//! | [`CREATE_BRANCH`] | POST | `/organizations/{organization}/databases/{database}/branches` |
//! | [`GET_BRANCH`] | GET | `/organizations/{organization}/databases/{database}/branches/{branch}` |
//! | [`DELETE_BRANCH`] | DELETE | `/organizations/{organization}/databases/{database}/branches/{branch}` |
//! | [`PROMOTE_BRANCH`] | POST | `/organizations/{organization}/databases/{database}/branches/{branch}/promote` |
//!
//! A branch that is missing and a branch the token may not see are reported
//! as either `not_found` or `forbidden`. Callers that only care whether the
//! branch is reachable should match both variants.

mod types;

pub use types::*;

use opkit::{
    make, Context, JsonFormat, Operation, OperationDescriptor, OperationError, RestMethod,
    Transport, VoidFormat,
};

use crate::common::Paginated;

const BRANCHES_PATH: &str = "/organizations/{organization}/databases/{database}/branches";
const BRANCH_PATH: &str = "/organizations/{organization}/databases/{database}/branches/{branch}";

pub static LIST_BRANCHES: Operation<
    ListBranchesInput,
    JsonFormat<Paginated<Branch>>,
    ListBranchesError,
> = make(|| {
    OperationDescriptor::builder()
        .id("list_branches")
        .method(RestMethod::Get)
        .path(BRANCHES_PATH)
        .error("not_found", ListBranchesError::NotFound)
        .error("forbidden", ListBranchesError::Forbidden)
        .build()
});

pub static CREATE_BRANCH: Operation<CreateBranchInput, JsonFormat<Branch>, CreateBranchError> =
    make(|| {
        OperationDescriptor::builder()
            .id("create_branch")
            .method(RestMethod::Post)
            .path(BRANCHES_PATH)
            .validate_input(CreateBranchInput::check)
            .error("not_found", CreateBranchError::NotFound)
            .error("forbidden", CreateBranchError::Forbidden)
            .error("unprocessable_entity", CreateBranchError::Unprocessable)
            .build()
    });

pub static GET_BRANCH: Operation<BranchInput, JsonFormat<Branch>, GetBranchError> = make(|| {
    OperationDescriptor::builder()
        .id("get_branch")
        .method(RestMethod::Get)
        .path(BRANCH_PATH)
        .error("not_found", GetBranchError::NotFound)
        .error("forbidden", GetBranchError::Forbidden)
        .build()
});

pub static DELETE_BRANCH: Operation<BranchInput, VoidFormat, DeleteBranchError> = make(|| {
    OperationDescriptor::builder()
        .id("delete_branch")
        .method(RestMethod::Delete)
        .path(BRANCH_PATH)
        .error("not_found", DeleteBranchError::NotFound)
        .error("forbidden", DeleteBranchError::Forbidden)
        .build()
});

pub static PROMOTE_BRANCH: Operation<BranchInput, JsonFormat<Branch>, PromoteBranchError> =
    make(|| {
        OperationDescriptor::builder()
            .id("promote_branch")
            .method(RestMethod::Post)
            .path("/organizations/{organization}/databases/{database}/branches/{branch}/promote")
            .description("Promote a development branch to production")
            .error("not_found", PromoteBranchError::NotFound)
            .error("forbidden", PromoteBranchError::Forbidden)
            .error("unprocessable_entity", PromoteBranchError::Unprocessable)
            .build()
    });

pub async fn list_branches<T: Transport>(
    ctx: &Context<T>,
    input: &ListBranchesInput,
) -> Result<Paginated<Branch>, OperationError<ListBranchesError>> {
    LIST_BRANCHES.call(ctx, input).await
}

/// Creates a branch from `parent_branch`, or from a backup when
/// `backup_id` is set.
pub async fn create_branch<T: Transport>(
    ctx: &Context<T>,
    input: &CreateBranchInput,
) -> Result<Branch, OperationError<CreateBranchError>> {
    CREATE_BRANCH.call(ctx, input).await
}

pub async fn get_branch<T: Transport>(
    ctx: &Context<T>,
    input: &BranchInput,
) -> Result<Branch, OperationError<GetBranchError>> {
    GET_BRANCH.call(ctx, input).await
}

pub async fn delete_branch<T: Transport>(
    ctx: &Context<T>,
    input: &BranchInput,
) -> Result<(), OperationError<DeleteBranchError>> {
    DELETE_BRANCH.call(ctx, input).await
}

pub async fn promote_branch<T: Transport>(
    ctx: &Context<T>,
    input: &BranchInput,
) -> Result<Branch, OperationError<PromoteBranchError>> {
    PROMOTE_BRANCH.call(ctx, input).await
}
