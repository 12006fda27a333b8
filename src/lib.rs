pub mod cuboid_region;
pub mod error;
pub mod math_utils;
pub mod mutable_vector3;
pub mod rotation;
pub mod vector3;

pub use cuboid_region::*;
pub use error::*;
pub use math_utils::*;
pub use mutable_vector3::*;
pub use rotation::*;
pub use vector3::*;
