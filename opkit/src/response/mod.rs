//! Success payload shapes.
//!
//! The [`ResponseFormat`] trait decides how a 2xx body becomes the
//! operation's output value.

mod format;

pub use format::{JsonFormat, ResponseFormat, VoidFormat};
