pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ScanArgs};
pub use commands::run;
