mod cli;
mod context;
mod error;
mod input;
mod output;

pub use cli::{run, run_cli};
pub use error::CliError;
