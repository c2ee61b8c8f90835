use crate::utils::error::CalcError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "+" => Ok(Operation::Add),
            "subtract" | "sub" | "-" => Ok(Operation::Subtract),
            "multiply" | "mul" | "*" | "x" => Ok(Operation::Multiply),
            "divide" | "div" | "/" => Ok(Operation::Divide),
            other => Err(CalcError::InvalidArgument {
                message: format!("unknown operation '{}'", other),
            }),
        }
    }
}

/// 溢位處理模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowMode {
    #[default]
    Wrapping,
    Checked,
}

impl FromStr for OverflowMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrapping" => Ok(OverflowMode::Wrapping),
            "checked" => Ok(OverflowMode::Checked),
            other => Err(CalcError::InvalidConfigValueError {
                field: "overflow".to_string(),
                value: other.to_string(),
                reason: "expected 'wrapping' or 'checked'".to_string(),
            }),
        }
    }
}

/// 批次處理中單筆失敗時的處理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    #[default]
    Record,
    Abort,
}

impl FromStr for ErrorPolicy {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "record" => Ok(ErrorPolicy::Record),
            "abort" => Ok(ErrorPolicy::Abort),
            other => Err(CalcError::InvalidConfigValueError {
                field: "on_error".to_string(),
                value: other.to_string(),
                reason: "expected 'record' or 'abort'".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculation {
    #[serde(default)]
    pub id: Option<u64>,
    pub operation: Operation,
    pub a: i64,
    pub b: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationOutcome {
    pub id: Option<u64>,
    pub operation: Operation,
    pub a: i64,
    pub b: i64,
    pub result: Option<i64>,
    pub error: Option<String>,
}

impl CalculationOutcome {
    pub fn success(calc: &Calculation, result: i64) -> Self {
        Self {
            id: calc.id,
            operation: calc.operation,
            a: calc.a,
            b: calc.b,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(calc: &Calculation, error: &CalcError) -> Self {
        Self {
            id: calc.id,
            operation: calc.operation,
            a: calc.a,
            b: calc.b,
            result: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub outcomes: Vec<CalculationOutcome>,
    pub csv_output: String,
    pub failures: Vec<CalculationOutcome>,
}
