/// Span-weighted average of one optional field across `items`.
///
/// Items whose field is missing (or not finite) are skipped, and their
/// weights are left out of the denominator. Returns `None` when no item
/// has a value. When every contributing weight is zero the plain mean of
/// the present values is returned instead of dividing by zero.
pub fn weighted_average<T, F>(items: &[T], field: F, weights: &[f64]) -> Option<f64>
where
    F: Fn(&T) -> Option<f64>,
{
    if items.len() != weights.len() {
        tracing::warn!(
            items = items.len(),
            weights = weights.len(),
            "weighted average inputs differ in length; extra entries ignored"
        );
    }

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    let mut plain_sum = 0.0;
    let mut present = 0usize;

    for (item, weight) in items.iter().zip(weights.iter()) {
        let Some(value) = field(item).filter(|value| value.is_finite()) else {
            continue;
        };
        weighted_sum += value * weight;
        total_weight += weight;
        plain_sum += value;
        present += 1;
    }

    if present == 0 {
        return None;
    }
    if total_weight == 0.0 {
        return Some(plain_sum / present as f64);
    }
    Some(weighted_sum / total_weight)
}

/// Rounds half-way values towards positive infinity and keeps the sign of
/// zero, so `-0.4` rounds to `-0`.
pub fn round_half_up(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let rounded = (value + 0.5).floor();
    if rounded == 0.0 && value.is_sign_negative() {
        -0.0
    } else {
        rounded
    }
}

pub fn round_optional(value: Option<f64>) -> Option<f64> {
    value.map(round_half_up)
}
