//! MCP tool modules.
//!
//! Tools are grouped by concern: the live alert panel check, the municipality
//! dataset, and fixed reference material (system description and links).

pub mod alerts;
pub mod municipalities;
pub mod reference;
