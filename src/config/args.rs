use crate::config::SUPPORTED_FORMATS;
use crate::core::{ConfigProvider, Operation};
use crate::domain::model::{ErrorPolicy, OverflowMode};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "small-calc")]
#[command(about = "A small integer calculator with CSV batch evaluation")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Evaluate a single operation and print the result
    Eval {
        /// add | subtract | multiply | divide (or + - x /)
        operation: Operation,
        #[arg(allow_negative_numbers = true)]
        a: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
        /// Report overflow as an error instead of wrapping
        #[arg(long)]
        checked: bool,
    },
    /// Evaluate every row of a CSV file of requests
    Batch(BatchArgs),
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// CSV file with header `operation,a,b` (optional `id`)
    #[arg(long)]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long = "format", value_delimiter = ',', default_value = "csv,json")]
    pub formats: Vec<String>,

    #[arg(long, help = "Bundle all outputs into a single ZIP archive")]
    pub compress: bool,

    #[arg(long, default_value = "calc_output.zip")]
    pub archive_name: String,

    #[arg(long, default_value = "record")]
    pub on_error: ErrorPolicy,

    #[arg(long, help = "Report overflow as an error instead of wrapping")]
    pub checked: bool,

    #[arg(long)]
    pub max_records: Option<usize>,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

impl ConfigProvider for BatchArgs {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn overflow_mode(&self) -> OverflowMode {
        if self.checked {
            OverflowMode::Checked
        } else {
            OverflowMode::Wrapping
        }
    }

    fn error_policy(&self) -> ErrorPolicy {
        self.on_error
    }

    fn max_records(&self) -> Option<usize> {
        self.max_records
    }

    fn archive_name(&self) -> Option<&str> {
        self.compress.then_some(self.archive_name.as_str())
    }
}

impl Validate for BatchArgs {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_one_of("format", &self.formats, &SUPPORTED_FORMATS)?;

        if let Some(max) = self.max_records {
            validation::validate_positive_number("max_records", max, 1)?;
        }

        if self.compress {
            validation::validate_non_empty_string("archive_name", &self.archive_name)?;
        }

        Ok(())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Eval { .. } => Ok(()),
            Command::Batch(args) => args.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eval_with_negative_operands() {
        let config = CliConfig::try_parse_from(["small-calc", "eval", "add", "-2", "1"]).unwrap();

        match config.command {
            Command::Eval {
                operation,
                a,
                b,
                checked,
            } => {
                assert_eq!(operation, Operation::Add);
                assert_eq!(a, -2);
                assert_eq!(b, 1);
                assert!(!checked);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_eval_rejects_unknown_operation() {
        assert!(CliConfig::try_parse_from(["small-calc", "eval", "pow", "2", "3"]).is_err());
    }

    #[test]
    fn test_parse_batch_defaults() {
        let config =
            CliConfig::try_parse_from(["small-calc", "batch", "--input", "requests.csv"]).unwrap();

        let Command::Batch(args) = config.command else {
            panic!("expected batch command");
        };
        assert_eq!(args.output_formats(), ["csv".to_string(), "json".to_string()]);
        assert_eq!(args.error_policy(), ErrorPolicy::Record);
        assert_eq!(args.overflow_mode(), OverflowMode::Wrapping);
        assert_eq!(args.archive_name(), None);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_batch_validation_rejects_unknown_format() {
        let config = CliConfig::try_parse_from([
            "small-calc",
            "batch",
            "--input",
            "requests.csv",
            "--format",
            "xml",
        ])
        .unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_batch_compress_and_abort() {
        let config = CliConfig::try_parse_from([
            "small-calc",
            "batch",
            "--input",
            "requests.csv",
            "--compress",
            "--on-error",
            "abort",
            "--checked",
        ])
        .unwrap();

        let Command::Batch(args) = config.command else {
            panic!("expected batch command");
        };
        assert_eq!(args.archive_name(), Some("calc_output.zip"));
        assert_eq!(args.error_policy(), ErrorPolicy::Abort);
        assert_eq!(args.overflow_mode(), OverflowMode::Checked);
    }
}
