use small_calc::{CalcError, Calculator, Operation, OverflowMode};
use std::sync::Arc;

const SAMPLES: [i64; 11] = [
    0,
    1,
    -1,
    2,
    -3,
    7,
    42,
    -1_000,
    123_456_789,
    i64::MAX,
    i64::MIN,
];

#[test]
fn test_reference_scenarios() {
    let calculator = Calculator::new();

    assert_eq!(calculator.add(2, 3), 5);
    assert_eq!(calculator.add(-2, 1), -1);
    assert_eq!(calculator.subtract(3, 2), 1);
    assert_eq!(calculator.subtract(-2, 1), -3);
    assert_eq!(calculator.multiply(2, 3), 6);
    assert_eq!(calculator.multiply(-1, 2), -2);
    assert_eq!(calculator.divide(6, 3).unwrap(), 2);
    assert!(matches!(
        calculator.divide(1, 0),
        Err(CalcError::InvalidArgument { .. })
    ));
}

#[test]
fn test_add_and_multiply_are_commutative() {
    let calculator = Calculator::new();
    for &a in &SAMPLES {
        for &b in &SAMPLES {
            assert_eq!(calculator.add(a, b), calculator.add(b, a), "add({a}, {b})");
            assert_eq!(
                calculator.multiply(a, b),
                calculator.multiply(b, a),
                "multiply({a}, {b})"
            );
        }
    }
}

#[test]
fn test_subtract_is_anti_commutative() {
    let calculator = Calculator::new();
    for &a in &SAMPLES {
        for &b in &SAMPLES {
            // 只比較沒有溢位的組合
            if a.checked_sub(b).is_none() || b.checked_sub(a).is_none() {
                continue;
            }
            assert_eq!(
                calculator.subtract(a, b),
                -calculator.subtract(b, a),
                "subtract({a}, {b})"
            );
        }
    }
}

#[test]
fn test_divide_inverts_multiply() {
    let calculator = Calculator::new();
    for &a in &SAMPLES {
        for &b in SAMPLES.iter().filter(|&&b| b != 0) {
            if a.checked_mul(b).is_none() {
                continue;
            }
            let product = calculator.multiply(a, b);
            assert_eq!(calculator.divide(product, b).unwrap(), a, "({a} * {b}) / {b}");
        }
    }
}

#[test]
fn test_divide_by_zero_always_fails() {
    for mode in [OverflowMode::Wrapping, OverflowMode::Checked] {
        let calculator = Calculator::with_overflow_mode(mode);
        for &x in &SAMPLES {
            let err = calculator.apply(Operation::Divide, x, 0).unwrap_err();
            assert!(matches!(err, CalcError::InvalidArgument { .. }));
        }
    }
}

#[test]
fn test_operations_are_idempotent() {
    let calculator = Calculator::with_overflow_mode(OverflowMode::Checked);
    for op in Operation::ALL {
        let first = calculator.apply(op, 84, 4).unwrap();
        let second = calculator.apply(op, 84, 4).unwrap();
        assert_eq!(first, second, "{op}");
    }
}

#[test]
fn test_shared_across_threads() {
    let calculator = Arc::new(Calculator::new());

    let handles: Vec<_> = (0..8i64)
        .map(|i| {
            let calculator = Arc::clone(&calculator);
            std::thread::spawn(move || (0..1_000i64).map(|j| calculator.add(i, j)).sum::<i64>())
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let expected = (0..1_000i64).map(|j| i as i64 + j).sum::<i64>();
        assert_eq!(handle.join().unwrap(), expected);
    }
}
