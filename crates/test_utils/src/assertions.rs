//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for ledger types that give
//! more meaningful error messages than standard assertions.

use core_kernel::{Balance, BalanceType, Money};
use rust_decimal::Decimal;

/// Asserts that a Money value equals an expected amount
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "Money mismatch: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Arguments
///
/// * `actual` - The actual Money value
/// * `expected` - The expected Money value
/// * `tolerance` - The allowed difference in the amount
///
/// # Panics
///
/// Panics if the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    let diff = actual.signed_difference(expected).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts a balance's amount and side
pub fn assert_balance_eq(actual: &Balance, amount: Decimal, side: BalanceType) {
    assert!(
        actual.amount.amount() == amount && actual.balance_type == side,
        "Balance mismatch: actual={}, expected={:.2} {}",
        actual,
        amount,
        side.suffix()
    );
}

/// Asserts that a decimal figure is within a tolerance of zero
pub fn assert_near_zero(value: Decimal, tolerance: Decimal) {
    assert!(
        value.abs() <= tolerance,
        "Expected a figure within {} of zero, got {}",
        tolerance,
        value
    );
}
