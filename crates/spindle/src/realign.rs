use crate::angle::{FULL_TURN, normalize};
use crate::config::SpinConfig;
use crate::options::OptionList;
use crate::resolve::segment_angle;

/// Rotation that puts the middle of `label`'s segment under the pointer, choosing the
/// full-turn representative closest to `rotation`. Returns `rotation` untouched when
/// `label` is no longer on the wheel.
pub fn reconcile(options: &OptionList, rotation: f64, label: &str, config: &SpinConfig) -> f64 {
    let Some(index) = options.position(label) else {
        return rotation;
    };

    let width = segment_angle(options.len());
    let center = index as f64 * width + width / 2.0;
    let base = normalize(config.pointer_angle - center);
    let turns = ((rotation - base) / FULL_TURN).round();

    base + FULL_TURN * turns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListConfig;
    use crate::resolve::resolve_winner;

    fn options(labels: &[&str]) -> OptionList {
        OptionList::from_labels(labels, &ListConfig::default()).unwrap()
    }

    #[test]
    fn test_missing_label_is_a_no_op() {
        let wheel = options(&["A", "B", "C"]);
        let config = SpinConfig::default();
        assert_eq!(reconcile(&wheel, 1234.5, "Z", &config), 1234.5);
    }

    #[test]
    fn test_centers_the_label_under_the_pointer() {
        let config = SpinConfig::default();
        let wheel = options(&["A", "B", "C"]);

        for label in ["A", "B", "C"] {
            let rotation = reconcile(&wheel, 0.0, label, &config);
            assert_eq!(resolve_winner(&wheel, rotation, &config).unwrap(), label);

            let index = wheel.position(label).unwrap() as f64;
            let top = normalize(config.pointer_angle - rotation);
            assert!((top - (index * 120.0 + 60.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_is_idempotent() {
        let config = SpinConfig::default();
        let wheel = options(&["A", "B", "C", "D", "E"]);

        for rotation in [-700.0, 0.0, 13.0, 3601.7, 99_999.0] {
            let once = reconcile(&wheel, rotation, "C", &config);
            let twice = reconcile(&wheel, once, "C", &config);
            assert!((once - twice).abs() < 1e-9);
            assert_eq!(reconcile(&wheel, rotation, "C", &config), once);
        }
    }

    #[test]
    fn test_takes_the_smallest_jump() {
        let config = SpinConfig::default();
        let wheel = options(&["A", "B", "C", "D"]);

        for rotation in [-500.0, 0.0, 179.0, 181.0, 3725.0, 7200.0] {
            let result = reconcile(&wheel, rotation, "B", &config);
            let jump = (result - rotation).abs();
            assert!(jump <= 180.0 + 1e-9, "jump {jump} from {rotation}");
            for k in [-1.0, 1.0] {
                let other = result + k * FULL_TURN;
                assert!(jump <= (other - rotation).abs() + 1e-9);
            }
        }
    }

    #[test]
    fn test_removal_keeps_the_winner() {
        let config = SpinConfig::default();
        let before = options(&["A", "B", "C", "D"]);
        let rotation = 3600.0 + 100.0;
        let winner = resolve_winner(&before, rotation, &config).unwrap().clone();
        assert_eq!(winner, "B");

        let after = options(&["A", "B", "D"]);
        let realigned = reconcile(&after, rotation, &winner, &config);

        assert_eq!(resolve_winner(&after, realigned, &config).unwrap(), &winner);
        assert!((realigned - rotation).abs() <= 180.0);
    }
}
