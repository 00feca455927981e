//! Presentation helpers shared by the subcommands and the shell

pub mod json;
pub mod report;
pub mod table;
