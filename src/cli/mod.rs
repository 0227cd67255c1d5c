//! Command-line interface module.

mod args;
pub mod common;
pub mod extract;
pub mod init;
pub mod inspect;

pub use args::{Cli, Commands, ExtractArgs, InspectArgs};
