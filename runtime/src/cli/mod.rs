//! CLI subcommand implementations for the urlcheck binary.

pub mod args;
pub mod doctor;
pub mod run_cmd;
