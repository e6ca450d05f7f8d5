//! Metric derivation primitives.
//!
//! Every cost-per-lead, percentage, and efficiency figure in the reporting
//! layer goes through these helpers so the zero-division policy is uniform:
//! a ratio or change with a non-positive denominator is `0`.

/// `a / b`, or `0` when `b` is not positive. Never NaN or infinity.
pub fn ratio_or_zero(a: f64, b: f64) -> f64 {
    if b > 0.0 {
        a / b
    } else {
        0.0
    }
}

/// Percentage change from `old` to `new`: `(new - old) / old * 100`,
/// or `0` when `old` is not positive.
pub fn percent_change(old: f64, new: f64) -> f64 {
    if old > 0.0 {
        (new - old) / old * 100.0
    } else {
        0.0
    }
}

/// Rounds to one decimal place. Applied only at the response boundary;
/// intermediate computations stay unrounded so chained derivations do not
/// compound rounding error.
pub fn round1(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    // Normalize -0.0 so payloads never display a negative zero.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
