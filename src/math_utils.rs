/// Determines whether `actual` is equal to `expected` within `margin`.
///
/// Exact floating-point equality stays the contract of `==` on the value
/// types; callers that need tolerance opt into it explicitly through this.
pub fn approx_equals(expected: f64, actual: f64, margin: f64) -> bool {
    (expected - actual).abs() <= margin
}

/// Euclidean length of the displacement (x, y, z).
pub(crate) fn pythagorean_distance(x: f64, y: f64, z: f64) -> f64 {
    (x * x + y * y + z * z).sqrt()
}

/// Squared Euclidean length of the displacement (x, y, z).
pub(crate) fn sq_pythagorean_distance(x: f64, y: f64, z: f64) -> f64 {
    x * x + y * y + z * z
}
