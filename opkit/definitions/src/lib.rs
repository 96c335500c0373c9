//! Concrete operation definitions.
//!
//! Each module declares its operations as `static` [`opkit::Operation`]s plus
//! thin async functions around them. Every operation carries its own closed
//! error enum, one variant per upstream error code it is known to return.
//!
//! ## Available Resources
//!
//! - [`backups`] - Branch backups
//! - [`branches`] - Database branches
//! - [`passwords`] - Branch passwords
//! - [`safe_migrations`] - Safe migration toggles
//!
//! ## Examples
//!
//! ```rust,ignore
//! use opkit::Context;
//! use opkit_definitions::branches::{get_branch, BranchInput, GetBranchError};
//! use opkit::OperationError;
//!
//! let ctx = Context::from_env()?;
//! let input = BranchInput {
//!     organization: "acme".to_string(),
//!     database: "db1".to_string(),
//!     branch: "main".to_string(),
//! };
//! match get_branch(&ctx, &input).await {
//!     Ok(branch) => println!("{} ready={}", branch.name, branch.ready),
//!     Err(OperationError::Declared(GetBranchError::NotFound(_) | GetBranchError::Forbidden(_))) => {
//!         println!("no such branch")
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```

pub mod backups;
pub mod branches;
pub mod common;
pub mod passwords;
pub mod prelude;
pub mod safe_migrations;

pub use common::{Paginated, Pagination};
