use super::AssignmentError;

/// width of the final bracket of the step size search.
pub const LAMBDA_PRECISION: f64 = 0.01;

/// finds the step size in [0, 1] where the objective derivative changes sign,
/// by bisection on the sign of `derivative`. returns the step size and the
/// number of derivative evaluations.
///
/// a non-finite derivative fails the search.
pub fn bisect<F>(mut derivative: F) -> Result<(f64, usize), AssignmentError>
where
    F: FnMut(f64) -> Result<f64, AssignmentError>,
{
    let mut lo = 0.0;
    let mut hi = 1.0;
    let mut m = 0.5;
    let mut steps = 0;
    while hi - lo > LAMBDA_PRECISION {
        let value = derivative(m)?;
        steps += 1;
        if !value.is_finite() {
            return Err(AssignmentError::NumericFailure(value));
        }
        if value == 0.0 {
            return Ok((m, steps));
        }
        if value < 0.0 {
            lo = m;
        } else {
            hi = m;
        }
        m = (lo + hi) / 2.0;
    }
    Ok((m, steps))
}
