/// Check that a value is a finite, strictly positive price
pub fn is_valid_price(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Float comparison with absolute tolerance
#[cfg(test)]
pub(crate) fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}
