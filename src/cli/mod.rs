//! Command-line interface module.

mod args;
pub mod build;
pub mod inspect;
mod session;

pub use args::{Cli, Commands};
pub use session::Session;
