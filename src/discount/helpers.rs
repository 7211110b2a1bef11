//! Discount Arithmetic Helpers
//!
//! Integer percentage and proportional-share computations. Intermediate
//! products are widened to `i128` and the result clamped back to `i64`, so
//! truncation toward zero matches plain integer division.

fn clamp_to_i64(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// Returns `amount × percent / 100`, truncated toward zero.
pub fn percent_of(amount: i64, percent: i64) -> i64 {
    clamp_to_i64(i128::from(amount) * i128::from(percent) / 100)
}

/// Returns `floor(part × amount / whole)`, or 0 when `whole` is not positive.
pub fn proportional_share(part: i64, amount: i64, whole: i64) -> i64 {
    if whole <= 0 {
        return 0;
    }
    clamp_to_i64(i128::from(part) * i128::from(amount) / i128::from(whole))
}
