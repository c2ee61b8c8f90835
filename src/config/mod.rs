#[cfg(feature = "cli")]
pub mod args;
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::{BatchArgs, CliConfig, Command};

pub const SUPPORTED_FORMATS: [&str; 2] = ["csv", "json"];
