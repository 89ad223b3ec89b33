//! Direction classification for raw volume samples

use crate::event::Direction;

/// Classify a volume change into a press direction
///
/// Total function: `new > old` is up, `new < old` is down, equal readings
/// return `None` (the OS reported a no-op change, e.g., a press at the top
/// or bottom of the scale) and must not produce an event.
pub fn classify(old: f32, new: f32) -> Option<Direction> {
    if new > old {
        Some(Direction::Up)
    } else if new < old {
        Some(Direction::Down)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_basic() {
        assert_eq!(classify(0.5, 0.65), Some(Direction::Up));
        assert_eq!(classify(0.65, 0.5), Some(Direction::Down));
        assert_eq!(classify(0.5, 0.5), None);
    }

    #[test]
    fn test_classify_scale_edges() {
        // Pressing up at max / down at min reports no change
        assert_eq!(classify(1.0, 1.0), None);
        assert_eq!(classify(0.0, 0.0), None);
        assert_eq!(classify(0.0, 0.0625), Some(Direction::Up));
        assert_eq!(classify(1.0, 0.9375), Some(Direction::Down));
    }

    proptest! {
        #[test]
        fn prop_classify_total(old in 0.0f32..=1.0, new in 0.0f32..=1.0) {
            let direction = classify(old, new);
            if new > old {
                prop_assert_eq!(direction, Some(Direction::Up));
            } else if new < old {
                prop_assert_eq!(direction, Some(Direction::Down));
            } else {
                prop_assert_eq!(direction, None);
            }
        }

        #[test]
        fn prop_classify_antisymmetric(old in 0.0f32..=1.0, new in 0.0f32..=1.0) {
            let forward = classify(old, new);
            let reverse = classify(new, old);
            match forward {
                Some(Direction::Up) => prop_assert_eq!(reverse, Some(Direction::Down)),
                Some(Direction::Down) => prop_assert_eq!(reverse, Some(Direction::Up)),
                None => prop_assert_eq!(reverse, None),
            }
        }
    }
}
