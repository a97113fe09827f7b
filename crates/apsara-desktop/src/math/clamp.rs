//! Scalar clamp used to keep window coordinates inside their bounds

/// Restrict `n` to the closed interval `[min, max]`.
///
/// Callers are expected to pass `min <= max`. Unlike [`f32::clamp`] this
/// never panics: an inverted interval resolves to `min`, which is the margin
/// edge a window pins to when it is larger than the viewport.
#[inline]
pub fn clamp(n: f32, min: f32, max: f32) -> f32 {
    n.min(max).max(min)
}
