//! Branch backups.
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | [`LIST_BACKUPS`] | GET | `/organizations/{organization}/databases/{database}/branches/{branch}/backups` |
//! | [`CREATE_BACKUP`] | POST | `/organizations/{organization}/databases/{database}/branches/{branch}/backups` |
//! | [`GET_BACKUP`] | GET | `/organizations/{organization}/databases/{database}/branches/{branch}/backups/{id}` |
//! | [`DELETE_BACKUP`] | DELETE | `/organizations/{organization}/databases/{database}/branches/{branch}/backups/{id}` |

mod types;

pub use types::*;

use opkit::{
    make, Context, JsonFormat, Operation, OperationDescriptor, OperationError, RestMethod,
    Transport, VoidFormat,
};

use crate::common::Paginated;

const BACKUPS_PATH: &str = "/organizations/{organization}/databases/{database}/branches/{branch}/backups";
const BACKUP_PATH: &str =
    "/organizations/{organization}/databases/{database}/branches/{branch}/backups/{id}";

pub static LIST_BACKUPS: Operation<ListBackupsInput, JsonFormat<Paginated<Backup>>, ListBackupsError> =
    make(|| {
        OperationDescriptor::builder()
            .id("list_backups")
            .method(RestMethod::Get)
            .path(BACKUPS_PATH)
            .description("List the backups of a branch")
            .error("not_found", ListBackupsError::NotFound)
            .error("forbidden", ListBackupsError::Forbidden)
            .build()
    });

pub static CREATE_BACKUP: Operation<CreateBackupInput, JsonFormat<Backup>, CreateBackupError> =
    make(|| {
        OperationDescriptor::builder()
            .id("create_backup")
            .method(RestMethod::Post)
            .path(BACKUPS_PATH)
            .description("Start a backup of a branch")
            .validate_input(CreateBackupInput::check)
            .error("not_found", CreateBackupError::NotFound)
            .error("forbidden", CreateBackupError::Forbidden)
            .error("unprocessable_entity", CreateBackupError::Unprocessable)
            .build()
    });

pub static GET_BACKUP: Operation<GetBackupInput, JsonFormat<Backup>, GetBackupError> = make(|| {
    OperationDescriptor::builder()
        .id("get_backup")
        .method(RestMethod::Get)
        .path(BACKUP_PATH)
        .error("not_found", GetBackupError::NotFound)
        .error("forbidden", GetBackupError::Forbidden)
        .build()
});

pub static DELETE_BACKUP: Operation<DeleteBackupInput, VoidFormat, DeleteBackupError> = make(|| {
    OperationDescriptor::builder()
        .id("delete_backup")
        .method(RestMethod::Delete)
        .path(BACKUP_PATH)
        .error("not_found", DeleteBackupError::NotFound)
        .error("forbidden", DeleteBackupError::Forbidden)
        .build()
});

/// Lists one page of a branch's backups.
pub async fn list_backups<T: Transport>(
    ctx: &Context<T>,
    input: &ListBackupsInput,
) -> Result<Paginated<Backup>, OperationError<ListBackupsError>> {
    LIST_BACKUPS.call(ctx, input).await
}

/// Starts a backup.
pub async fn create_backup<T: Transport>(
    ctx: &Context<T>,
    input: &CreateBackupInput,
) -> Result<Backup, OperationError<CreateBackupError>> {
    CREATE_BACKUP.call(ctx, input).await
}

pub async fn get_backup<T: Transport>(
    ctx: &Context<T>,
    input: &GetBackupInput,
) -> Result<Backup, OperationError<GetBackupError>> {
    GET_BACKUP.call(ctx, input).await
}

pub async fn delete_backup<T: Transport>(
    ctx: &Context<T>,
    input: &DeleteBackupInput,
) -> Result<(), OperationError<DeleteBackupError>> {
    DELETE_BACKUP.call(ctx, input).await
}
