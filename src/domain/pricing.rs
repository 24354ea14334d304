//! Effective price computation.
//!
//! Amounts are plain USD-style two-decimal values; every computed price goes
//! through [`round_cents`] so the rest of the crate never carries more
//! precision than the backend stores.

/// Rounds a monetary amount to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Applies a percentage discount to a base price.
///
/// The discount is clamped to `[0, 100]` and the result to `>= 0`, so
/// malformed input can never yield a negative charge.
pub fn effective_price(base_price: f64, discount_percent: f64) -> f64 {
    let discount = if discount_percent.is_finite() {
        discount_percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let price = base_price - base_price * discount / 100.0;
    round_cents(price.max(0.0))
}
