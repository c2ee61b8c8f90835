pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{BatchArgs, CliConfig, Command};

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{batch_pipeline::BatchPipeline, calculator::Calculator, engine::CalcEngine};
pub use domain::model::{Calculation, CalculationOutcome, ErrorPolicy, Operation, OverflowMode};
pub use utils::error::{CalcError, Result};
