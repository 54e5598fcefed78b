use std::time::SystemTime;

use chrono::{DateTime, Utc};

const SECS_PER_DAY: i64 = 86_400;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Gt,
    Ge,
    Lt,
    Le,
}

pub fn cmp_u64(lhs: u64, rhs: u64, op: CmpOp) -> bool {
    match op {
        CmpOp::Gt => lhs > rhs,
        CmpOp::Ge => lhs >= rhs,
        CmpOp::Lt => lhs < rhs,
        CmpOp::Le => lhs <= rhs,
    }
}

pub fn cmp_i64(lhs: i64, rhs: i64, op: CmpOp) -> bool {
    match op {
        CmpOp::Gt => lhs > rhs,
        CmpOp::Ge => lhs >= rhs,
        CmpOp::Lt => lhs < rhs,
        CmpOp::Le => lhs <= rhs,
    }
}

/// Whole days elapsed between `then` and `now`, rounded down.
///
/// Timestamps in the future give negative ages, so they never satisfy a
/// minimum-age threshold.
pub fn age_in_days(now: DateTime<Utc>, then: SystemTime) -> i64 {
    let then: DateTime<Utc> = then.into();
    (now - then).num_seconds().div_euclid(SECS_PER_DAY)
}

#[cfg(test)]
#[path = "helpers_tests.rs"]
mod tests;
