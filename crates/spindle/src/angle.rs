pub const FULL_TURN: f64 = 360.0;

/// Reduces a signed rotation in degrees to `[0, 360)`.
///
/// This is a true modulo, so `normalize(-10.0)` is `350.0`.
pub fn normalize(degrees: f64) -> f64 {
    let reduced = degrees.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negative inputs up to a full turn
    if reduced >= FULL_TURN { 0.0 } else { reduced }
}
