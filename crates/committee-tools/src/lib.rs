//! Tool framework for committee-rs
//!
//! Defines the [`Tool`] trait the committee's evidence tools implement and the
//! [`ToolRegistry`] that holds the tools a given role is authorized to call.

pub mod error;
pub mod registry;
pub mod tool;

pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use tool::Tool;
