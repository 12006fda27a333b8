use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::OnceLock;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::math_utils::{approx_equals, pythagorean_distance, sq_pythagorean_distance};
use crate::rotation::Rotation;

/// Read-only arithmetic shared by [`Vector3`] and
/// [`MutableVector3`](crate::mutable_vector3::MutableVector3).
///
/// Both vector types implement this instead of one deriving from the other,
/// so the derived operations dispatch statically and neither type can break
/// the other's invariants.
pub trait Vector3Ops {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn z(&self) -> f64;

    /// Dot product between `self` and `other`.
    fn dot(&self, other: &impl Vector3Ops) -> f64 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    /// Euclidean distance between `self` and `other`.
    fn distance_to(&self, other: &impl Vector3Ops) -> f64 {
        pythagorean_distance(
            self.x() - other.x(),
            self.y() - other.y(),
            self.z() - other.z(),
        )
    }

    /// Squared Euclidean distance; avoids the sqrt when only comparing.
    fn sq_distance_to(&self, other: &impl Vector3Ops) -> f64 {
        sq_pythagorean_distance(
            self.x() - other.x(),
            self.y() - other.y(),
            self.z() - other.z(),
        )
    }

    /// Componentwise comparison within `margin`. Exact comparison stays the
    /// contract of `==`.
    fn approx_eq(&self, other: &impl Vector3Ops, margin: f64) -> bool {
        approx_equals(self.x(), other.x(), margin)
            && approx_equals(self.y(), other.y(), margin)
            && approx_equals(self.z(), other.z(), margin)
    }
}

/// An immutable 3D vector of (x, y, z) doubles.
///
/// The Euclidean magnitude is computed on first access and memoized for the
/// lifetime of the value, which is sound because the components never change
/// after construction.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Vector3 {
    x: f64,
    y: f64,
    z: f64,
    #[serde(skip)]
    magnitude: OnceLock<f64>,
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Vector3 {
    /// Zero vector constant (0, 0, 0)
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Half vector constant (0.5, 0.5, 0.5)
    pub const HALF: Self = Self::new(0.5, 0.5, 0.5);

    /// One vector constant (1, 1, 1)
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a new 3D vector
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            magnitude: OnceLock::new(),
        }
    }

    #[inline]
    pub const fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub const fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub const fn z(&self) -> f64 {
        self.z
    }

    /// Converts this vector into a `glam::DVec3`.
    #[inline]
    pub const fn to_glam(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Creates a `Vector3` from a `glam::DVec3`.
    #[inline]
    pub const fn from_glam(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    // ------------------ Math Ops ------------------

    /// Componentwise sum with `other`.
    pub fn add(&self, other: &Vector3) -> Vector3 {
        self.add_xyz(other.x, other.y, other.z)
    }

    /// Componentwise sum with the displacement (dx, dy, dz).
    pub fn add_xyz(&self, dx: f64, dy: f64, dz: f64) -> Vector3 {
        Vector3::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Componentwise difference with `other`.
    pub fn subtract(&self, other: &Vector3) -> Vector3 {
        self.subtract_xyz(other.x, other.y, other.z)
    }

    /// Componentwise difference with the displacement (dx, dy, dz).
    pub fn subtract_xyz(&self, dx: f64, dy: f64, dz: f64) -> Vector3 {
        Vector3::new(self.x - dx, self.y - dy, self.z - dz)
    }

    /// Uniform scale by `scalar`.
    pub fn scale(&self, scalar: f64) -> Vector3 {
        self.scale_xyz(scalar, scalar, scalar)
    }

    /// Componentwise product with `other`.
    pub fn scale_vec(&self, other: &Vector3) -> Vector3 {
        self.scale_xyz(other.x, other.y, other.z)
    }

    /// Componentwise product with (fx, fy, fz).
    pub fn scale_xyz(&self, fx: f64, fy: f64, fz: f64) -> Vector3 {
        Vector3::new(self.x * fx, self.y * fy, self.z * fz)
    }

    /// Uniform division by `divisor`. Division by zero follows IEEE 754
    /// semantics and produces infinity or NaN.
    pub fn divide(&self, divisor: f64) -> Vector3 {
        self.divide_xyz(divisor, divisor, divisor)
    }

    /// Componentwise quotient with `other`.
    pub fn divide_vec(&self, other: &Vector3) -> Vector3 {
        self.divide_xyz(other.x, other.y, other.z)
    }

    /// Componentwise quotient with (dx, dy, dz).
    pub fn divide_xyz(&self, dx: f64, dy: f64, dz: f64) -> Vector3 {
        Vector3::new(self.x / dx, self.y / dy, self.z / dz)
    }

    /// Euclidean length of the vector, memoized on first access.
    pub fn magnitude(&self) -> f64 {
        *self.magnitude.get_or_init(|| self.to_glam().length())
    }

    /// Returns a unit vector with the same direction.
    ///
    /// A magnitude of exactly 0.0 or 1.0 returns the vector unchanged, so the
    /// zero vector never turns into NaN and unit vectors skip the division.
    pub fn normalize(&self) -> Vector3 {
        let length = self.magnitude();

        if length == 0.0 || length == 1.0 {
            return self.clone();
        }

        self.divide(length)
    }

    /// Componentwise floor.
    pub fn floor(&self) -> Vector3 {
        Self::from_glam(self.to_glam().floor())
    }

    /// Componentwise ceiling.
    pub fn ceil(&self) -> Vector3 {
        Self::from_glam(self.to_glam().ceil())
    }

    /// Centre of the unit grid cell containing this vector.
    pub fn centre(&self) -> Vector3 {
        self.floor().add(&Self::HALF)
    }

    /// Negation of the vector.
    pub fn inverse(&self) -> Vector3 {
        self.scale(-1.0)
    }

    // ------------------ Rotation ------------------

    /// Rotates the X/Z plane by `yaw` radians.
    pub fn rotate_yaw(&self, yaw: f64) -> Vector3 {
        // [ cos(a)  0  sin(a) ]
        // [ 0       1  0      ]
        // [ -sin(a) 0  cos(a) ]
        let (sin, cos) = yaw.sin_cos();

        Vector3::new(
            self.x * cos + self.z * sin,
            self.y,
            -self.x * sin + self.z * cos,
        )
    }

    /// Rotates the X/Y plane by `pitch` radians.
    pub fn rotate_pitch(&self, pitch: f64) -> Vector3 {
        // [ cos(a)  -sin(a)  0 ]
        // [ sin(a)  cos(a)   0 ]
        // [ 0       0        1 ]
        let (sin, cos) = pitch.sin_cos();

        Vector3::new(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
            self.z,
        )
    }

    /// Rotates the Y/Z plane by `roll` radians.
    pub fn rotate_roll(&self, roll: f64) -> Vector3 {
        // [ 1  0       0       ]
        // [ 0  cos(a)  -sin(a) ]
        // [ 0  sin(a)  cos(a)  ]
        let (sin, cos) = roll.sin_cos();

        Vector3::new(
            self.x,
            self.y * cos - self.z * sin,
            self.y * sin + self.z * cos,
        )
    }

    /// Rotates the X/Z plane by `yaw` degrees.
    pub fn rotate_yaw_deg(&self, yaw: f64) -> Vector3 {
        self.rotate_yaw(yaw.to_radians())
    }

    /// Rotates the X/Y plane by `pitch` degrees.
    pub fn rotate_pitch_deg(&self, pitch: f64) -> Vector3 {
        self.rotate_pitch(pitch.to_radians())
    }

    /// Rotates the Y/Z plane by `roll` degrees.
    pub fn rotate_roll_deg(&self, roll: f64) -> Vector3 {
        self.rotate_roll(roll.to_radians())
    }

    /// Applies `rotation` as yaw, then pitch, then roll. The order is part of
    /// the contract.
    pub fn rotate(&self, rotation: &Rotation) -> Vector3 {
        self.rotate_yaw_deg(rotation.yaw)
            .rotate_pitch_deg(rotation.pitch)
            .rotate_roll_deg(rotation.roll)
    }
}

impl Vector3Ops for Vector3 {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn z(&self) -> f64 {
        self.z
    }
}

// Equality and hashing are strictly by component value; the memoized
// magnitude never participates.
impl PartialEq for Vector3 {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl Hash for Vector3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
        self.z.to_bits().hash(state);
    }
}

// ---------------------- Arithmetic Ops ----------------------
// Operators borrow both operands. A by-value `impl Add for Vector3` would
// shadow the inherent `add` during method resolution on owned receivers;
// with the impls on `&Vector3` the named operations always resolve to the
// inherent methods.

impl Add<&Vector3> for &Vector3 {
    type Output = Vector3;
    fn add(self, rhs: &Vector3) -> Vector3 {
        Vector3::add(self, rhs)
    }
}

impl Sub<&Vector3> for &Vector3 {
    type Output = Vector3;
    fn sub(self, rhs: &Vector3) -> Vector3 {
        self.subtract(rhs)
    }
}

// Scalar multiply
impl Mul<f64> for &Vector3 {
    type Output = Vector3;
    fn mul(self, rhs: f64) -> Vector3 {
        self.scale(rhs)
    }
}

// Scalar divide
impl Div<f64> for &Vector3 {
    type Output = Vector3;
    fn div(self, rhs: f64) -> Vector3 {
        self.divide(rhs)
    }
}

// Element-wise multiply/divide
impl Mul<&Vector3> for &Vector3 {
    type Output = Vector3;
    fn mul(self, rhs: &Vector3) -> Vector3 {
        self.scale_vec(rhs)
    }
}

impl Div<&Vector3> for &Vector3 {
    type Output = Vector3;
    fn div(self, rhs: &Vector3) -> Vector3 {
        self.divide_vec(rhs)
    }
}

impl Neg for &Vector3 {
    type Output = Vector3;
    fn neg(self) -> Vector3 {
        self.inverse()
    }
}

// Conversion traits for seamless glam integration
impl From<Vector3> for DVec3 {
    #[inline]
    fn from(v: Vector3) -> Self {
        v.to_glam()
    }
}

impl From<DVec3> for Vector3 {
    #[inline]
    fn from(v: DVec3) -> Self {
        Self::from_glam(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::f64::consts::PI;

    fn hash_of(v: &Vector3) -> u64 {
        let mut hasher = DefaultHasher::new();
        v.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_add_subtract() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(0.5, -2.0, 4.0);

        assert_eq!(a.add(&b), Vector3::new(1.5, 0.0, 7.0));
        assert_eq!(a.subtract(&b), Vector3::new(0.5, 4.0, -1.0));
        assert_eq!(a.add_xyz(1.0, 1.0, 1.0), Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(a.subtract_xyz(1.0, 2.0, 3.0), Vector3::ZERO);
    }

    #[test]
    fn test_scale_divide() {
        let v = Vector3::new(2.0, 4.0, 8.0);

        assert_eq!(v.scale(0.5), Vector3::new(1.0, 2.0, 4.0));
        assert_eq!(
            v.scale_vec(&Vector3::new(1.0, 0.5, 0.25)),
            Vector3::new(2.0, 2.0, 2.0)
        );
        assert_eq!(v.divide(2.0), Vector3::new(1.0, 2.0, 4.0));
        assert_eq!(
            v.divide_vec(&Vector3::new(2.0, 2.0, 2.0)),
            Vector3::new(1.0, 2.0, 4.0)
        );
    }

    #[test]
    fn test_divide_by_zero_follows_float_semantics() {
        let v = Vector3::new(1.0, -1.0, 0.0);
        let divided = v.divide(0.0);

        assert_eq!(divided.x(), f64::INFINITY);
        assert_eq!(divided.y(), f64::NEG_INFINITY);
        assert!(divided.z().is_nan());
    }

    #[test]
    fn test_dot_and_distance() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, -5.0, 6.0);

        assert_eq!(a.dot(&b), 4.0 - 10.0 + 18.0);
        assert_eq!(Vector3::ZERO.distance_to(&Vector3::new(3.0, 4.0, 0.0)), 5.0);
        assert_eq!(
            Vector3::ZERO.sq_distance_to(&Vector3::new(3.0, 4.0, 0.0)),
            25.0
        );
    }

    #[test]
    fn test_magnitude_is_memoized_and_correct() {
        let v = Vector3::new(2.0, 3.0, 6.0);
        assert_eq!(v.magnitude(), 7.0);
        // Second access hits the cache and must agree.
        assert_eq!(v.magnitude(), 7.0);
    }

    #[test]
    fn test_normalize_zero_and_unit() {
        let zero = Vector3::ZERO;
        assert_eq!(zero.normalize(), Vector3::ZERO);
        assert!(!zero.normalize().x().is_nan());

        let unit = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(unit.normalize(), unit);
    }

    #[test]
    fn test_normalize_general() {
        let v = Vector3::new(3.0, 0.0, 4.0);
        let n = v.normalize();
        assert_eq!(n, Vector3::new(0.6, 0.0, 0.8));
        assert!(approx_equals(1.0, n.magnitude(), 1e-12));
    }

    #[test]
    fn test_floor_ceil_centre() {
        let v = Vector3::new(1.2, -0.5, 3.9);

        assert_eq!(v.floor(), Vector3::new(1.0, -1.0, 3.0));
        assert_eq!(v.ceil(), Vector3::new(2.0, 0.0, 4.0));
        assert_eq!(v.centre(), Vector3::new(1.5, -0.5, 3.5));
    }

    #[test]
    fn test_inverse() {
        assert_eq!(
            Vector3::new(1.0, -2.0, 3.0).inverse(),
            Vector3::new(-1.0, 2.0, -3.0)
        );
    }

    #[test]
    fn test_rotate_yaw_quarter_turn() {
        let v = Vector3::new(1.0, 0.0, 0.0);
        let rotated = v.rotate_yaw(PI / 2.0);

        assert!(rotated.approx_eq(&Vector3::new(0.0, 0.0, -1.0), 1e-12));
    }

    #[test]
    fn test_full_turn_returns_original() {
        let v = Vector3::new(1.0, 2.0, 3.0);

        assert!(v.rotate_yaw_deg(360.0).approx_eq(&v, 1e-9));
        assert!(v.rotate_pitch_deg(360.0).approx_eq(&v, 1e-9));
        assert!(v.rotate_roll_deg(360.0).approx_eq(&v, 1e-9));
    }

    #[test]
    fn test_rotate_applies_yaw_then_pitch_then_roll() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let rotation = Rotation::new(30.0, 45.0, 60.0);

        let expected = v
            .rotate_yaw_deg(30.0)
            .rotate_pitch_deg(45.0)
            .rotate_roll_deg(60.0);
        assert_eq!(v.rotate(&rotation), expected);
    }

    #[test]
    fn test_equality_is_exact_and_hash_consistent() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(1.0, 2.0, 3.0);
        let c = Vector3::new(1.0 + 1e-15, 2.0, 3.0);

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);
        // The memoized magnitude never affects equality.
        let _ = b.magnitude();
        assert_eq!(a, b);
    }

    #[test]
    fn test_operator_sugar_matches_named_ops() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);

        assert_eq!(&a + &b, a.add(&b));
        assert_eq!(&a - &b, a.subtract(&b));
        assert_eq!(&a * 2.0, a.scale(2.0));
        assert_eq!(&a / 2.0, a.divide(2.0));
        assert_eq!(&a * &b, a.scale_vec(&b));
        assert_eq!(&a / &b, a.divide_vec(&b));
        assert_eq!(-&a, a.inverse());
    }

    #[test]
    fn test_named_ops_resolve_on_owned_receivers() {
        // Chained named calls on freshly produced values must pick the
        // inherent methods, not the operator traits.
        let v = Vector3::new(1.2, 2.2, 3.2);

        assert_eq!(v.floor().add(&Vector3::HALF), v.centre());
        assert_eq!(v.ceil().subtract(&Vector3::ONE), v.floor());
    }

    #[test]
    fn test_glam_round_trip() {
        let v = Vector3::new(1.5, -2.5, 3.5);
        let g: DVec3 = v.clone().into();
        assert_eq!(Vector3::from(g), v);
    }

    #[test]
    fn test_serde_round_trip_skips_cache() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let _ = v.magnitude();

        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0,"z":3.0}"#);

        let back: Vector3 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
        assert_eq!(back.magnitude(), v.magnitude());
    }
}
