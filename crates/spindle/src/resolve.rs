//! Which option sits under the pointer, and where each option's segment lies.
//!
//! Angles here are in the wheel's own frame: segment `i` of `n` spans
//! `[i * 360/n, (i + 1) * 360/n)` measured from the wheel's zero mark. Rotating the
//! wheel by `r` degrees moves that zero mark away from the pointer, so the wheel angle
//! under a pointer fixed at `p` is `p - r`.

use crate::angle::{FULL_TURN, normalize};
use crate::config::SpinConfig;
use crate::error::WheelError;
use crate::options::{Label, OptionList};
use serde::{Deserialize, Serialize};

pub fn segment_angle(count: usize) -> f64 {
    FULL_TURN / count as f64
}

/// Index of the segment under the pointer, or `None` for an empty wheel.
pub fn pointer_index(count: usize, rotation: f64, pointer_angle: f64) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let top_angle = normalize(pointer_angle - normalize(rotation));
    // top_angle can round up to exactly 360 after the subtraction
    Some((top_angle / segment_angle(count)).floor() as usize % count)
}

pub fn resolve_winner<'a>(
    options: &'a OptionList,
    rotation: f64,
    config: &SpinConfig,
) -> Result<&'a Label, WheelError> {
    pointer_index(options.len(), rotation, config.pointer_angle)
        .and_then(|index| options.get(index))
        .ok_or(WheelError::InvalidState(
            "cannot resolve a winner on an empty wheel",
        ))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub index: usize,
    pub label: Label,
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn contains(&self, local_angle: f64) -> bool {
        (self.start..self.end).contains(&local_angle)
    }
}

/// The layout renderers must draw for the resolver's answers to match what is shown.
pub fn segments(options: &OptionList) -> Vec<Segment> {
    let width = segment_angle(options.len());
    options
        .iter()
        .enumerate()
        .map(|(index, label)| Segment {
            index,
            label: label.clone(),
            start: index as f64 * width,
            end: (index + 1) as f64 * width,
        })
        .collect()
}
