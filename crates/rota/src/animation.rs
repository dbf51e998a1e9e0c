use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::time::{Duration, Instant};
use strum::{Display as StrumDisplay, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 4000,
            easing: Easing::default(),
        }
    }
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// A spin the renderer is still animating.
#[derive(Debug, Clone)]
pub struct SpinInFlight {
    pub serial: u64,
    pub from: f64,
    pub to: f64,
    pub started: Instant,
    pub duration: Duration,
}

impl SpinInFlight {
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// The rotation on screen at `now`.
    pub fn rotation_at(&self, now: Instant, easing: Easing) -> f64 {
        let eased = easing.apply(self.progress(now));
        self.from + (self.to - self.from) * eased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOutCubic, Easing::EaseInOutCubic] {
            assert!(easing.apply(0.0).abs() < 1e-12, "{easing}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{easing}");
            assert!((easing.apply(2.0) - 1.0).abs() < 1e-12, "{easing}");
        }
        assert!(Easing::EaseOutCubic.apply(0.5) > 0.5);
        assert!((Easing::EaseInOutCubic.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_easing_deserialization() {
        let cases = vec![
            ("\"linear\"", Easing::Linear),
            ("\"ease-out-cubic\"", Easing::EaseOutCubic),
            ("\"Ease-In-Out-Cubic\"", Easing::EaseInOutCubic),
        ];

        for (json, expected) in cases {
            let deserialized: Easing = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_in_flight_interpolation() {
        let started = Instant::now();
        let spin = SpinInFlight {
            serial: 1,
            from: 100.0,
            to: 1900.0,
            started,
            duration: Duration::from_secs(4),
        };

        assert_eq!(spin.rotation_at(started, Easing::Linear), 100.0);
        let halfway = spin.rotation_at(started + Duration::from_secs(2), Easing::Linear);
        assert!((halfway - 1000.0).abs() < 1e-9);
        assert_eq!(
            spin.rotation_at(started + Duration::from_secs(10), Easing::EaseOutCubic),
            1900.0
        );
    }

    #[test]
    fn test_zero_duration_is_already_done() {
        let spin = SpinInFlight {
            serial: 1,
            from: 0.0,
            to: 720.0,
            started: Instant::now(),
            duration: Duration::ZERO,
        };
        assert_eq!(spin.progress(spin.started), 1.0);
    }
}
