//! Data model and reference values for cemaden-mcp.
//!
//! This crate defines the records shared by the dataset loader, the control
//! plane, and the MCP tool layer, along with the fixed CEMADEN URLs and
//! figures quoted in tool responses.

pub mod models;
pub mod schema;

pub use models::*;
