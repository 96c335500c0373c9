//! Branch passwords.
//!
//! Get, update and delete share one error set, [`PasswordError`].

mod types;

pub use types::*;

use opkit::{
    make, Context, JsonFormat, Operation, OperationDescriptor, OperationError, RestMethod,
    Transport, VoidFormat,
};

use crate::common::Paginated;

const PASSWORDS_PATH: &str =
    "/organizations/{organization}/databases/{database}/branches/{branch}/passwords";
const PASSWORD_PATH: &str =
    "/organizations/{organization}/databases/{database}/branches/{branch}/passwords/{id}";

pub static LIST_PASSWORDS: Operation<
    ListPasswordsInput,
    JsonFormat<Paginated<Password>>,
    ListPasswordsError,
> = make(|| {
    OperationDescriptor::builder()
        .id("list_passwords")
        .method(RestMethod::Get)
        .path(PASSWORDS_PATH)
        .error("not_found", ListPasswordsError::NotFound)
        .error("forbidden", ListPasswordsError::Forbidden)
        .build()
});

pub static CREATE_PASSWORD: Operation<CreatePasswordInput, JsonFormat<Password>, CreatePasswordError> =
    make(|| {
        OperationDescriptor::builder()
            .id("create_password")
            .method(RestMethod::Post)
            .path(PASSWORDS_PATH)
            .error("not_found", CreatePasswordError::NotFound)
            .error("forbidden", CreatePasswordError::Forbidden)
            .error("unprocessable_entity", CreatePasswordError::Unprocessable)
            .build()
    });

pub static GET_PASSWORD: Operation<PasswordInput, JsonFormat<Password>, PasswordError> = make(|| {
    OperationDescriptor::builder()
        .id("get_password")
        .method(RestMethod::Get)
        .path(PASSWORD_PATH)
        .error("not_found", PasswordError::NotFound)
        .error("forbidden", PasswordError::Forbidden)
        .build()
});

pub static UPDATE_PASSWORD: Operation<UpdatePasswordInput, JsonFormat<Password>, PasswordError> =
    make(|| {
        OperationDescriptor::builder()
            .id("update_password")
            .method(RestMethod::Patch)
            .path(PASSWORD_PATH)
            .description("Rename a password")
            .error("not_found", PasswordError::NotFound)
            .error("forbidden", PasswordError::Forbidden)
            .build()
    });

pub static DELETE_PASSWORD: Operation<PasswordInput, VoidFormat, PasswordError> = make(|| {
    OperationDescriptor::builder()
        .id("delete_password")
        .method(RestMethod::Delete)
        .path(PASSWORD_PATH)
        .error("not_found", PasswordError::NotFound)
        .error("forbidden", PasswordError::Forbidden)
        .build()
});

pub async fn list_passwords<T: Transport>(
    ctx: &Context<T>,
    input: &ListPasswordsInput,
) -> Result<Paginated<Password>, OperationError<ListPasswordsError>> {
    LIST_PASSWORDS.call(ctx, input).await
}

/// Creates a password. The plain-text secret is only returned here.
pub async fn create_password<T: Transport>(
    ctx: &Context<T>,
    input: &CreatePasswordInput,
) -> Result<Password, OperationError<CreatePasswordError>> {
    CREATE_PASSWORD.call(ctx, input).await
}

pub async fn get_password<T: Transport>(
    ctx: &Context<T>,
    input: &PasswordInput,
) -> Result<Password, OperationError<PasswordError>> {
    GET_PASSWORD.call(ctx, input).await
}

pub async fn update_password<T: Transport>(
    ctx: &Context<T>,
    input: &UpdatePasswordInput,
) -> Result<Password, OperationError<PasswordError>> {
    UPDATE_PASSWORD.call(ctx, input).await
}

pub async fn delete_password<T: Transport>(
    ctx: &Context<T>,
    input: &PasswordInput,
) -> Result<(), OperationError<PasswordError>> {
    DELETE_PASSWORD.call(ctx, input).await
}
