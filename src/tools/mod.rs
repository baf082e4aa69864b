//! BAC Planner Tools module
//!
//! MCP tool implementations for the planner.

pub mod planner;
pub mod status;
