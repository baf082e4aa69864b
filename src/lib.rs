//! BAC Planner Library
//!
//! Educational estimate of the ethanol needed to reach and hold a target
//! blood alcohol concentration. Not medical advice.

pub mod build_info;
pub mod config;
pub mod dosing;
pub mod mcp;
pub mod tools;
