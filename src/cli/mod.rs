//! Command-line interface
//!
//! One render pass per invocation:
//! - summary: category totals and breakdown
//! - entities: selectable entity names and threshold maxima
//! - top: highest entities by one metric
//! - category: entities with a positive value for one category
//! - entity: category profile of one entity
//! - export: filtered, sorted table as CSV

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{category, entities, entity, execute, export, run, run_command, summary, top};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{error_envelope, ok_envelope, write_error, write_response};
