pub use crate::app::pipelines::batch_pipeline::{
    parse_requests, BatchPipeline, FAILURES_JSON, RESULTS_CSV, RESULTS_JSON,
};
