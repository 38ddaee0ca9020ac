use std::time::Duration;

/// Delay before making connect attempt `attempt` (attempt numbers start at
/// 1; this is only meaningful for `attempt >= 2`, since attempt 1 fires
/// immediately with no preceding wait).
///
/// `min(timeout * 2^(attempt - 2), 10 * timeout)`, sticky at the cap once
/// reached. The exponent is clamped well below where `2^n` could overflow
/// a `u32` multiplier — by the time it would, the cap has long since taken
/// over.
pub fn backoff_for_attempt(timeout: Duration, attempt: u32) -> Duration {
    debug_assert!(attempt >= 2, "backoff only applies from attempt 2 onward");
    let exponent = attempt.saturating_sub(2).min(20);
    let multiplier = 1u32.checked_shl(exponent).unwrap_or(u32::MAX);
    let scaled = timeout.saturating_mul(multiplier);
    let cap = timeout.saturating_mul(10);
    scaled.min(cap)
}
