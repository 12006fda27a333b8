use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::math_utils::pythagorean_distance;
use crate::rotation::Rotation;
use crate::vector3::{Vector3, Vector3Ops};

/// In-place variant of [`Vector3`] for callers that step through many
/// positions and must not allocate a value per step, such as grid walks.
///
/// Every mutating operation writes back into this instance and returns
/// `&mut Self` so calls chain. Mutation through any path invalidates the
/// memoized magnitude; a later [`magnitude`](MutableVector3::magnitude) call
/// always reflects the current components.
///
/// Instances are not safe for concurrent mutation and belong to a single
/// logical owner for the duration of their use, which `&mut self` receivers
/// already enforce within safe Rust.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct MutableVector3 {
    x: f64,
    y: f64,
    z: f64,
    #[serde(skip)]
    magnitude: Option<f64>,
}

impl fmt::Display for MutableVector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MutableVector3({}, {}, {})", self.x, self.y, self.z)
    }
}

impl MutableVector3 {
    /// Creates a new mutable 3D vector
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            magnitude: None,
        }
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
        self.magnitude = None;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
        self.magnitude = None;
    }

    pub fn set_z(&mut self, z: f64) {
        self.z = z;
        self.magnitude = None;
    }

    pub fn set_xyz(&mut self, x: f64, y: f64, z: f64) {
        self.x = x;
        self.y = y;
        self.z = z;
        self.magnitude = None;
    }

    /// Immutable snapshot of the current components, safe to retain beyond
    /// the next mutation.
    pub fn to_vector3(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Euclidean length of the vector, cached until the next mutation.
    pub fn magnitude(&mut self) -> f64 {
        match self.magnitude {
            Some(length) => length,
            None => {
                let length = pythagorean_distance(self.x, self.y, self.z);
                self.magnitude = Some(length);
                length
            }
        }
    }

    // ------------------ In-place Math Ops ------------------

    /// Componentwise sum with `other`.
    pub fn add(&mut self, other: &impl Vector3Ops) -> &mut Self {
        self.add_xyz(other.x(), other.y(), other.z())
    }

    /// Componentwise sum with the displacement (dx, dy, dz).
    pub fn add_xyz(&mut self, dx: f64, dy: f64, dz: f64) -> &mut Self {
        self.set_xyz(self.x + dx, self.y + dy, self.z + dz);
        self
    }

    /// Componentwise difference with `other`.
    pub fn subtract(&mut self, other: &impl Vector3Ops) -> &mut Self {
        self.subtract_xyz(other.x(), other.y(), other.z())
    }

    /// Componentwise difference with the displacement (dx, dy, dz).
    pub fn subtract_xyz(&mut self, dx: f64, dy: f64, dz: f64) -> &mut Self {
        self.set_xyz(self.x - dx, self.y - dy, self.z - dz);
        self
    }

    /// Uniform scale by `scalar`.
    pub fn scale(&mut self, scalar: f64) -> &mut Self {
        self.scale_xyz(scalar, scalar, scalar)
    }

    /// Componentwise product with `other`.
    pub fn scale_vec(&mut self, other: &impl Vector3Ops) -> &mut Self {
        self.scale_xyz(other.x(), other.y(), other.z())
    }

    /// Componentwise product with (fx, fy, fz).
    pub fn scale_xyz(&mut self, fx: f64, fy: f64, fz: f64) -> &mut Self {
        self.set_xyz(self.x * fx, self.y * fy, self.z * fz);
        self
    }

    /// Uniform division by `divisor`, with IEEE 754 semantics on zero.
    pub fn divide(&mut self, divisor: f64) -> &mut Self {
        self.divide_xyz(divisor, divisor, divisor)
    }

    /// Componentwise quotient with `other`.
    pub fn divide_vec(&mut self, other: &impl Vector3Ops) -> &mut Self {
        self.divide_xyz(other.x(), other.y(), other.z())
    }

    /// Componentwise quotient with (dx, dy, dz).
    pub fn divide_xyz(&mut self, dx: f64, dy: f64, dz: f64) -> &mut Self {
        self.set_xyz(self.x / dx, self.y / dy, self.z / dz);
        self
    }

    /// Normalizes in place. A magnitude of exactly 0.0 or 1.0 leaves the
    /// components untouched.
    pub fn normalize(&mut self) -> &mut Self {
        let length = self.magnitude();

        if length == 0.0 || length == 1.0 {
            return self;
        }

        self.divide(length)
    }

    /// Componentwise floor, in place.
    pub fn floor(&mut self) -> &mut Self {
        self.set_xyz(self.x.floor(), self.y.floor(), self.z.floor());
        self
    }

    /// Componentwise ceiling, in place.
    pub fn ceil(&mut self) -> &mut Self {
        self.set_xyz(self.x.ceil(), self.y.ceil(), self.z.ceil());
        self
    }

    // ------------------ In-place Rotation ------------------
    // Each rotation reads both affected components before writing either;
    // the two outputs depend on the same two inputs.

    /// Rotates the X/Z plane by `yaw` radians, in place.
    pub fn rotate_yaw(&mut self, yaw: f64) -> &mut Self {
        let (sin, cos) = yaw.sin_cos();
        let (x, z) = (self.x, self.z);

        self.set_xyz(x * cos + z * sin, self.y, -x * sin + z * cos);
        self
    }

    /// Rotates the X/Y plane by `pitch` radians, in place.
    pub fn rotate_pitch(&mut self, pitch: f64) -> &mut Self {
        let (sin, cos) = pitch.sin_cos();
        let (x, y) = (self.x, self.y);

        self.set_xyz(x * cos - y * sin, x * sin + y * cos, self.z);
        self
    }

    /// Rotates the Y/Z plane by `roll` radians, in place.
    pub fn rotate_roll(&mut self, roll: f64) -> &mut Self {
        let (sin, cos) = roll.sin_cos();
        let (y, z) = (self.y, self.z);

        self.set_xyz(self.x, y * cos - z * sin, y * sin + z * cos);
        self
    }

    /// Rotates the X/Z plane by `yaw` degrees, in place.
    pub fn rotate_yaw_deg(&mut self, yaw: f64) -> &mut Self {
        self.rotate_yaw(yaw.to_radians())
    }

    /// Rotates the X/Y plane by `pitch` degrees, in place.
    pub fn rotate_pitch_deg(&mut self, pitch: f64) -> &mut Self {
        self.rotate_pitch(pitch.to_radians())
    }

    /// Rotates the Y/Z plane by `roll` degrees, in place.
    pub fn rotate_roll_deg(&mut self, roll: f64) -> &mut Self {
        self.rotate_roll(roll.to_radians())
    }

    /// Applies `rotation` as yaw, then pitch, then roll, in place.
    pub fn rotate(&mut self, rotation: &Rotation) -> &mut Self {
        self.rotate_yaw_deg(rotation.yaw)
            .rotate_pitch_deg(rotation.pitch)
            .rotate_roll_deg(rotation.roll)
    }
}

impl Vector3Ops for MutableVector3 {
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

impl PartialEq for MutableVector3 {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl PartialEq<Vector3> for MutableVector3 {
    fn eq(&self, other: &Vector3) -> bool {
        self.x == other.x() && self.y == other.y() && self.z == other.z()
    }
}

impl PartialEq<MutableVector3> for Vector3 {
    fn eq(&self, other: &MutableVector3) -> bool {
        other == self
    }
}

impl From<Vector3> for MutableVector3 {
    fn from(v: Vector3) -> Self {
        Self::new(v.x(), v.y(), v.z())
    }
}

impl From<MutableVector3> for Vector3 {
    fn from(v: MutableVector3) -> Self {
        v.to_vector3()
    }
}

impl From<MutableVector3> for DVec3 {
    #[inline]
    fn from(v: MutableVector3) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

impl From<DVec3> for MutableVector3 {
    #[inline]
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}
