//! Stateless integer calculator.
//!
//! The plain operations (`add`, `subtract`, `multiply`, `divide`) wrap on
//! overflow so they stay total in debug and release builds alike. The
//! `checked_*` variants and [`Calculator::evaluate`] honour the configured
//! [`OverflowMode`].

use crate::domain::model::{Calculation, Operation, OverflowMode};
use crate::utils::error::{CalcError, Result};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calculator {
    overflow_mode: OverflowMode,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overflow_mode(overflow_mode: OverflowMode) -> Self {
        Self { overflow_mode }
    }

    pub fn overflow_mode(&self) -> OverflowMode {
        self.overflow_mode
    }

    pub fn add(&self, a: i64, b: i64) -> i64 {
        debug!(a, b, "performing addition");
        a.wrapping_add(b)
    }

    pub fn subtract(&self, a: i64, b: i64) -> i64 {
        debug!(a, b, "performing subtraction");
        a.wrapping_sub(b)
    }

    pub fn multiply(&self, a: i64, b: i64) -> i64 {
        debug!(a, b, "performing multiplication");
        a.wrapping_mul(b)
    }

    /// Integer quotient truncated toward zero.
    ///
    /// Fails with [`CalcError::InvalidArgument`] when `b` is zero.
    pub fn divide(&self, a: i64, b: i64) -> Result<i64> {
        if b == 0 {
            return Err(CalcError::division_by_zero());
        }
        debug!(a, b, "performing division");
        Ok(a.wrapping_div(b))
    }

    pub fn checked_add(&self, a: i64, b: i64) -> Result<i64> {
        a.checked_add(b).ok_or(CalcError::Overflow {
            operation: Operation::Add,
            a,
            b,
        })
    }

    pub fn checked_subtract(&self, a: i64, b: i64) -> Result<i64> {
        a.checked_sub(b).ok_or(CalcError::Overflow {
            operation: Operation::Subtract,
            a,
            b,
        })
    }

    pub fn checked_multiply(&self, a: i64, b: i64) -> Result<i64> {
        a.checked_mul(b).ok_or(CalcError::Overflow {
            operation: Operation::Multiply,
            a,
            b,
        })
    }

    pub fn checked_divide(&self, a: i64, b: i64) -> Result<i64> {
        // 除數檢查必須先於溢位檢查
        if b == 0 {
            return Err(CalcError::division_by_zero());
        }
        a.checked_div(b).ok_or(CalcError::Overflow {
            operation: Operation::Divide,
            a,
            b,
        })
    }

    /// Dispatch a single operation according to the configured overflow mode.
    pub fn apply(&self, operation: Operation, a: i64, b: i64) -> Result<i64> {
        match (self.overflow_mode, operation) {
            (OverflowMode::Wrapping, Operation::Add) => Ok(self.add(a, b)),
            (OverflowMode::Wrapping, Operation::Subtract) => Ok(self.subtract(a, b)),
            (OverflowMode::Wrapping, Operation::Multiply) => Ok(self.multiply(a, b)),
            (OverflowMode::Wrapping, Operation::Divide) => self.divide(a, b),
            (OverflowMode::Checked, Operation::Add) => self.checked_add(a, b),
            (OverflowMode::Checked, Operation::Subtract) => self.checked_subtract(a, b),
            (OverflowMode::Checked, Operation::Multiply) => self.checked_multiply(a, b),
            (OverflowMode::Checked, Operation::Divide) => self.checked_divide(a, b),
        }
    }

    pub fn evaluate(&self, calc: &Calculation) -> Result<i64> {
        self.apply(calc.operation, calc.a, calc.b)
    }
}
