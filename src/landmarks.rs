//! Hand-landmark feature extraction.
//!
//! Flattens per-tick hand observations into the fixed-width feature vectors
//! the classifier window expects. Coordinates are clamped to [0, 1] and a
//! missing hand is zero-filled so the vector width never varies.

/// Landmarks reported per detected hand.
pub const LANDMARKS_PER_HAND: usize = 21;

/// Coordinates per landmark (x, y, z).
pub const COORDS_PER_LANDMARK: usize = 3;

/// Hands tracked per frame.
pub const HANDS_TRACKED: usize = 2;

/// Flattened feature width: 2 hands x 21 landmarks x 3 coordinates.
pub const FEATURE_WIDTH: usize = HANDS_TRACKED * LANDMARKS_PER_HAND * COORDS_PER_LANDMARK;

/// One detected hand: 21 landmarks with (x, y, z) coordinates.
pub type HandPoints = [[f32; COORDS_PER_LANDMARK]; LANDMARKS_PER_HAND];

fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

fn extend_hand(features: &mut Vec<f32>, hand: Option<&HandPoints>) {
    match hand {
        Some(points) => {
            for point in points {
                for coord in point {
                    features.push(clamp01(*coord));
                }
            }
        }
        None => {
            let width = LANDMARKS_PER_HAND * COORDS_PER_LANDMARK;
            features.extend(std::iter::repeat(0.0).take(width));
        }
    }
}

/// Flatten one tick's hand observations into a classifier feature vector.
///
/// Returns `None` when neither hand was detected; the capture loop skips the
/// tick in that case rather than pushing a synthetic frame. With at least one
/// hand present the result is always exactly [`FEATURE_WIDTH`] values, left
/// hand first, a missing hand zero-filled.
pub fn frame_features(left: Option<&HandPoints>, right: Option<&HandPoints>) -> Option<Vec<f32>> {
    if left.is_none() && right.is_none() {
        return None;
    }
    let mut features = Vec::with_capacity(FEATURE_WIDTH);
    extend_hand(&mut features, left);
    extend_hand(&mut features, right);
    Some(features)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_at(value: f32) -> HandPoints {
        [[value; COORDS_PER_LANDMARK]; LANDMARKS_PER_HAND]
    }

    #[test]
    fn no_hands_yields_none() {
        assert!(frame_features(None, None).is_none());
    }

    #[test]
    fn single_hand_zero_fills_the_other() {
        let left = hand_at(0.5);
        let features = frame_features(Some(&left), None).unwrap();
        assert_eq!(features.len(), FEATURE_WIDTH);
        assert!(features[..FEATURE_WIDTH / 2].iter().all(|v| *v == 0.5));
        assert!(features[FEATURE_WIDTH / 2..].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn left_hand_comes_before_right() {
        let left = hand_at(0.25);
        let right = hand_at(0.75);
        let features = frame_features(Some(&left), Some(&right)).unwrap();
        assert_eq!(features[0], 0.25);
        assert_eq!(features[FEATURE_WIDTH / 2], 0.75);
    }

    #[test]
    fn coordinates_are_clamped_to_unit_range() {
        let mut hand = hand_at(0.5);
        hand[0] = [-0.2, 1.5, 0.3];
        let features = frame_features(Some(&hand), None).unwrap();
        assert_eq!(&features[..3], &[0.0, 1.0, 0.3]);
    }
}
