use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::math_utils::pythagorean_distance;

/// A yaw/pitch/roll angle triple, in degrees.
///
/// Angles live in a convention where a full turn spans (-180, 180] rather
/// than [0, 360); nothing is wrapped at construction, wrapping is explicit
/// through [`wrap_to_quadrants`](Rotation::wrap_to_quadrants) and
/// [`shortest_path`](Rotation::shortest_path).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Rotation {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rotation({}, {}, {})", self.yaw, self.pitch, self.roll)
    }
}

impl Rotation {
    /// Identity rotation constant (0, 0, 0)
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new rotation from yaw, pitch, and roll in degrees
    pub const fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Creates a rotation with zero roll
    pub const fn from_yaw_pitch(yaw: f64, pitch: f64) -> Self {
        Self::new(yaw, pitch, 0.0)
    }

    /// Componentwise sum with `other`.
    pub fn add(self, other: Rotation) -> Rotation {
        Rotation::new(
            self.yaw + other.yaw,
            self.pitch + other.pitch,
            self.roll + other.roll,
        )
    }

    /// Componentwise difference with `other`.
    pub fn subtract(self, other: Rotation) -> Rotation {
        Rotation::new(
            self.yaw - other.yaw,
            self.pitch - other.pitch,
            self.roll - other.roll,
        )
    }

    /// Scalar measure of total angular delta: the Euclidean norm over
    /// (yaw, pitch, roll). Not a physically meaningful angle.
    pub fn size(&self) -> f64 {
        pythagorean_distance(self.yaw, self.pitch, self.roll)
    }

    /// Re-expresses yaw and pitch as the angles congruent to them modulo 360
    /// that fall inside the 360-degree window centered on the corresponding
    /// reference angle; roll passes through unchanged.
    ///
    /// This resolves the -180/180 wraparound ambiguity of the bounded angle
    /// representation by anchoring each angle to the reference's quadrant
    /// instead of reading it in isolation.
    pub fn wrap_to_quadrants(&self, reference_yaw: f64, reference_pitch: f64) -> Rotation {
        fn wrap_angle_to_quadrant(angle: f64, reference: f64) -> f64 {
            // Congruent representative in (reference - 180, reference + 180].
            angle + 360.0 * ((reference + 180.0 - angle) / 360.0).floor()
        }

        Rotation::new(
            wrap_angle_to_quadrant(self.yaw, reference_yaw),
            wrap_angle_to_quadrant(self.pitch, reference_pitch),
            self.roll,
        )
    }

    /// Minimal-magnitude angular delta congruent to each component modulo
    /// 360, never exceeding 180 in absolute value.
    ///
    /// On the half-turn boundary, where the positive and negative deltas tie
    /// in magnitude, the negative one is returned; callers rely on that being
    /// deterministic.
    pub fn shortest_path(&self) -> Rotation {
        fn shortest_angle(target: f64) -> f64 {
            // Reduce to [0, 360) first; a single +-360 shift is not enough
            // for angles several turns out.
            let wrapped = target.rem_euclid(360.0);

            if wrapped >= 180.0 {
                wrapped - 360.0
            } else {
                wrapped
            }
        }

        Rotation::new(
            shortest_angle(self.yaw),
            shortest_angle(self.pitch),
            shortest_angle(self.roll),
        )
    }
}

// The inherent methods also take `self` by value, so named calls resolve to
// them ahead of these trait impls.
impl Add for Rotation {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Rotation::add(self, rhs)
    }
}

impl Sub for Rotation {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Rotation::subtract(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math_utils::approx_equals;

    #[test]
    fn test_add_subtract() {
        let a = Rotation::new(10.0, 20.0, 30.0);
        let b = Rotation::new(1.0, -2.0, 3.0);

        assert_eq!(a.add(b), Rotation::new(11.0, 18.0, 33.0));
        assert_eq!(a.subtract(b), Rotation::new(9.0, 22.0, 27.0));
        assert_eq!(a + b, a.add(b));
        assert_eq!(a - b, a.subtract(b));
    }

    #[test]
    fn test_size_is_euclidean_norm() {
        assert_eq!(Rotation::new(2.0, 3.0, 6.0).size(), 7.0);
        assert_eq!(Rotation::IDENTITY.size(), 0.0);
    }

    #[test]
    fn test_shortest_path_reduces_large_angles() {
        let reduced = Rotation::new(270.0, -270.0, 720.0).shortest_path();

        assert_eq!(reduced, Rotation::new(-90.0, 90.0, 0.0));
    }

    #[test]
    fn test_shortest_path_keeps_small_angles() {
        let r = Rotation::new(45.0, -45.0, 179.0);
        assert_eq!(r.shortest_path(), r);
    }

    #[test]
    fn test_shortest_path_tie_breaks_negative() {
        // At the half-turn boundary both candidates have magnitude 180; the
        // negative one wins.
        let wrapped = Rotation::from_yaw_pitch(180.0, -180.0).shortest_path();

        assert_eq!(wrapped.yaw, -180.0);
        assert_eq!(wrapped.pitch, -180.0);
    }

    #[test]
    fn test_shortest_path_is_idempotent_and_bounded() {
        // Includes angles several full turns out, where a single +-360 shift
        // would leave an out-of-range remainder.
        for angle in [
            -1360.0, -1000.0, -900.0, -720.0, -540.0, -361.0, -180.0, -1.0, 0.0, 1.0, 179.5,
            180.0, 359.0, 725.0, 900.0, 1000.0, 1360.0,
        ] {
            let once = Rotation::new(angle, angle, angle).shortest_path();
            let twice = once.shortest_path();

            assert!(once.yaw.abs() <= 180.0, "yaw out of range for {angle}");
            assert_eq!(once, twice, "not idempotent for {angle}");
        }
    }

    #[test]
    fn test_shortest_path_several_turns_out() {
        assert_eq!(
            Rotation::new(1000.0, -1000.0, 1360.0).shortest_path(),
            Rotation::new(-80.0, 80.0, -80.0)
        );
        // Odd multiples of a half turn land on the negative boundary.
        assert_eq!(
            Rotation::new(900.0, -900.0, 0.0).shortest_path(),
            Rotation::new(-180.0, -180.0, 0.0)
        );
    }

    #[test]
    fn test_wrap_to_quadrants_identity_near_reference() {
        for angle in [-179.0, -90.0, 0.0, 45.0, 170.0, 180.0] {
            let wrapped = Rotation::from_yaw_pitch(angle, angle).wrap_to_quadrants(0.0, 0.0);

            assert_eq!(wrapped.yaw, angle);
            assert_eq!(wrapped.pitch, angle);
        }
    }

    #[test]
    fn test_wrap_to_quadrants_is_congruent_mod_360() {
        let wrapped = Rotation::from_yaw_pitch(190.0, -190.0).wrap_to_quadrants(0.0, 0.0);

        assert_eq!(wrapped.yaw, -170.0);
        assert_eq!(wrapped.pitch, 170.0);
    }

    #[test]
    fn test_wrap_to_quadrants_follows_reference() {
        // -170 read next to a reference of 170 is the same heading one turn
        // up: 190.
        let wrapped = Rotation::from_yaw_pitch(-170.0, 0.0).wrap_to_quadrants(170.0, 0.0);

        assert!(approx_equals(190.0, wrapped.yaw, 1e-12));
        assert_eq!(wrapped.pitch, 0.0);
    }

    #[test]
    fn test_wrap_to_quadrants_leaves_roll_untouched() {
        let wrapped = Rotation::new(500.0, 500.0, 500.0).wrap_to_quadrants(0.0, 0.0);

        assert_eq!(wrapped.roll, 500.0);
        assert_eq!(wrapped.yaw, 140.0);
    }

    #[test]
    fn test_serde_round_trip() {
        let r = Rotation::new(12.5, -30.0, 90.0);
        let json = serde_json::to_string(&r).unwrap();
        let back: Rotation = serde_json::from_str(&json).unwrap();

        assert_eq!(back, r);
    }
}
