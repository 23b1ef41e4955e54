//! Subcommand implementations.

pub mod eval;
pub mod generate;
pub mod init;
pub mod list_classes;
pub mod output;
