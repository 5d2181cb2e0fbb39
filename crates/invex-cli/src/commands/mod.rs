//! CLI subcommands.

pub mod coords;
pub mod inspect;
pub mod run;
