//! Convenient re-exports for calling operations.
//!
//! ```rust,ignore
//! use opkit_definitions::prelude::*;
//!
//! let ctx = Context::from_env()?;
//! delete_backup(&ctx, &input).await?;
//! ```

// Engine surface
pub use opkit::{Context, Credentials, OperationError, ReqwestTransport, Transport};

// Operations
pub use crate::backups::{create_backup, delete_backup, get_backup, list_backups};
pub use crate::branches::{create_branch, delete_branch, get_branch, list_branches, promote_branch};
pub use crate::passwords::{
    create_password, delete_password, get_password, list_passwords, update_password,
};
pub use crate::safe_migrations::{disable_safe_migrations, enable_safe_migrations};

// Resource types
pub use crate::backups::{Backup, BackupState, RetentionUnit};
pub use crate::branches::{Branch, BranchInput, Region};
pub use crate::common::{Paginated, Pagination};
pub use crate::passwords::{Password, PasswordRole};
