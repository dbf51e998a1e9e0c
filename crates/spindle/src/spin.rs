use crate::angle::{FULL_TURN, normalize};
use crate::config::SpinConfig;
use crate::error::WheelError;
use crate::options::OptionList;
use crate::resolve::segment_angle;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The outcome of [`generate_spin`], decided before any animation starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spin {
    /// New absolute cumulative rotation.
    pub rotation: f64,
    pub segment_index: usize,
    /// Wheel-local angle that comes to rest under the pointer.
    pub local_angle: f64,
    pub turns: u32,
}

/// Picks a segment uniformly, a landing angle inside it away from both edges, and a
/// number of full turns, then returns the forward rotation that ends there.
///
/// `config` is checked first; settings that leave no landing range fail with
/// [`WheelError::InvalidSettings`].
pub fn generate_spin<R: Rng + ?Sized>(
    options: &OptionList,
    current: f64,
    config: &SpinConfig,
    min_options: usize,
    rng: &mut R,
) -> Result<Spin, WheelError> {
    config
        .validate()
        .map_err(|e| WheelError::InvalidSettings(e.to_string()))?;

    let count = options.len();
    let min = min_options.max(1);
    if count < min {
        return Err(WheelError::InsufficientOptions { min, found: count });
    }

    let width = segment_angle(count);
    let segment_index = rng.random_range(0..count);
    let margin = width * config.margin_fraction;
    let offset = rng.random_range(margin..=width - margin);
    let local_angle = segment_index as f64 * width + offset;
    let turns = rng.random_range(config.min_rotations..=config.max_rotations);

    // residue that puts local_angle under the pointer, reached without turning back
    let resting = normalize(config.pointer_angle - local_angle);
    let advance = normalize(resting - normalize(current));

    Ok(Spin {
        rotation: current + f64::from(turns) * FULL_TURN + advance,
        segment_index,
        local_angle,
        turns,
    })
}
