//! Core services for cemaden-mcp.
//!
//! This crate loads the municipality dataset, exposes the control plane that
//! answers lookups over it, and owns the reachability check against the
//! CEMADEN alert panel.

pub mod control;
pub mod dataset;
pub mod panel;
pub mod services;
