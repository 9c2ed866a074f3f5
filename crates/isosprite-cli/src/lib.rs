//! isosprite CLI library.
//!
//! Command implementations and the input loading they share. The binary in
//! `main.rs` only parses arguments and dispatches here.

pub mod commands;
pub mod input;
pub mod logging;
