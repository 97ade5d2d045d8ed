//! Subcommand implementations.

mod check;
mod run;

pub use check::Check;
pub use run::Run;
