use crate::core::calculator::Calculator;
use crate::core::{
    BatchResult, Calculation, CalculationOutcome, ConfigProvider, Operation, Pipeline, Storage,
};
use crate::domain::model::ErrorPolicy;
use crate::utils::error::{CalcError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const RESULTS_CSV: &str = "results.csv";
pub const RESULTS_JSON: &str = "results.json";
pub const FAILURES_JSON: &str = "failures.json";

const OUTPUT_HEADER: [&str; 6] = ["id", "operation", "a", "b", "result", "error"];

/// 從 CSV 讀取計算請求、逐筆計算並輸出結果的批次管道
pub struct BatchPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> BatchPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, name: &str) -> String {
        format!("{}/{}", self.config.output_path().trim_end_matches('/'), name)
    }
}

/// Parse `operation,a,b[,id]` rows. Column order is taken from the header.
pub fn parse_requests(data: &[u8], max_records: Option<usize>) -> Result<Vec<Calculation>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let missing = |name: &str| CalcError::ParseError {
        line: 1,
        message: format!("missing required column '{}'", name),
    };

    let op_idx = column("operation").ok_or_else(|| missing("operation"))?;
    let a_idx = column("a").ok_or_else(|| missing("a"))?;
    let b_idx = column("b").ok_or_else(|| missing("b"))?;
    let id_idx = column("id");

    let limit = max_records.unwrap_or(usize::MAX);
    let mut requests = Vec::new();

    for (index, record) in reader.records().take(limit).enumerate() {
        // 欄位數不符或非 UTF-8 的列也回報行號
        let record = record.map_err(|e| CalcError::ParseError {
            line: e
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(index + 2),
            message: e.to_string(),
        })?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let operation: Operation = field(op_idx).parse().map_err(|e: CalcError| {
            CalcError::ParseError {
                line,
                message: e.to_string(),
            }
        })?;
        let a = parse_operand(field(a_idx), "a", line)?;
        let b = parse_operand(field(b_idx), "b", line)?;

        let id = match id_idx.map(field) {
            Some(raw) if !raw.is_empty() => {
                Some(raw.parse::<u64>().map_err(|e| CalcError::ParseError {
                    line,
                    message: format!("invalid id '{}': {}", raw, e),
                })?)
            }
            // 沒有 id 時以列序號補上
            _ => Some(index as u64 + 1),
        };

        requests.push(Calculation { id, operation, a, b });
    }

    Ok(requests)
}

fn parse_operand(raw: &str, name: &str, line: usize) -> Result<i64> {
    raw.parse::<i64>().map_err(|e| CalcError::ParseError {
        line,
        message: format!("invalid operand {} '{}': {}", name, raw, e),
    })
}

fn render_csv(outcomes: &[CalculationOutcome]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(OUTPUT_HEADER)?;
    for outcome in outcomes {
        writer.serialize(outcome)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CalcError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        CalcError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BatchPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Calculation>> {
        let input_path = self.config.input_path();
        tracing::info!("📥 Reading calculation requests from: {}", input_path);

        let data = self.storage.read_file(input_path).await?;
        tracing::debug!("Read {} bytes of input", data.len());

        let requests = parse_requests(&data, self.config.max_records())?;
        if let Some(max) = self.config.max_records() {
            tracing::debug!("Request limit: {}", max);
        }

        Ok(requests)
    }

    async fn transform(&self, data: Vec<Calculation>) -> Result<BatchResult> {
        let calculator = Calculator::with_overflow_mode(self.config.overflow_mode());
        let policy = self.config.error_policy();

        tracing::debug!(
            "Evaluating {} requests ({:?} overflow, {:?} on error)",
            data.len(),
            calculator.overflow_mode(),
            policy
        );

        let mut outcomes = Vec::with_capacity(data.len());
        let mut failures = Vec::new();

        for calc in &data {
            let outcome = match calculator.evaluate(calc) {
                Ok(value) => CalculationOutcome::success(calc, value),
                Err(e) if policy == ErrorPolicy::Abort => {
                    tracing::error!("❌ Calculation {:?} failed, aborting: {}", calc.id, e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!("⚠️ Calculation {:?} failed: {}", calc.id, e);
                    CalculationOutcome::failure(calc, &e)
                }
            };

            if outcome.is_failure() {
                failures.push(outcome.clone());
            }
            outcomes.push(outcome);
        }

        let csv_output = render_csv(&outcomes)?;

        Ok(BatchResult {
            outcomes,
            csv_output,
            failures,
        })
    }

    async fn load(&self, result: BatchResult) -> Result<String> {
        let formats = self.config.output_formats();
        let mut files: Vec<(&str, Vec<u8>)> = Vec::new();

        if formats.iter().any(|f| f == "csv") {
            files.push((RESULTS_CSV, result.csv_output.clone().into_bytes()));
        }

        if formats.iter().any(|f| f == "json") {
            let report = serde_json::json!({
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "total": result.outcomes.len(),
                "failed": result.failures.len(),
                "outcomes": result.outcomes,
            });
            files.push((RESULTS_JSON, serde_json::to_vec_pretty(&report)?));
        }

        if !result.failures.is_empty() {
            files.push((FAILURES_JSON, serde_json::to_vec_pretty(&result.failures)?));
        }

        match self.config.archive_name() {
            Some(archive_name) => {
                tracing::debug!("Creating ZIP file with {} files", files.len());

                let zip_data = {
                    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                    for (name, data) in &files {
                        zip.start_file::<_, ()>(*name, FileOptions::default())?;
                        zip.write_all(data)?;
                    }
                    let cursor = zip.finish()?;
                    cursor.into_inner()
                };

                let archive_path = self.output_file(archive_name);
                tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
                self.storage.write_file(&archive_path, &zip_data).await?;
                Ok(archive_path)
            }
            None => {
                for (name, data) in &files {
                    let path = self.output_file(name);
                    tracing::debug!("Writing {} ({} bytes)", path, data.len());
                    self.storage.write_file(&path, data).await?;
                }
                Ok(self.config.output_path().to_string())
            }
        }
    }
}
