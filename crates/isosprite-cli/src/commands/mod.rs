//! CLI command implementations

pub mod catalog;
pub mod json_output;
pub mod plan;
pub mod size;
pub mod smoke;
