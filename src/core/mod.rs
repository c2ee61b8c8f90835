pub mod batch_pipeline;
pub mod calculator;
pub mod engine;

pub use crate::domain::model::{BatchResult, Calculation, CalculationOutcome, Operation};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
