use std::fmt;

use serde::Serialize;

use crate::error::{RegionError, Result};
use crate::mutable_vector3::MutableVector3;
use crate::vector3::{Vector3, Vector3Ops};

/// An axis-aligned box spanned by two corner vectors.
///
/// Construction normalizes the corners so `min` is the componentwise minimum
/// and `max` the componentwise maximum regardless of argument order; a region
/// is always well-formed. Regions are immutable, `offset` and `expand`
/// produce new ones.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CuboidRegion {
    min: Vector3,
    max: Vector3,
    size: Vector3,
}

impl fmt::Display for CuboidRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CuboidRegion({} to {})", self.min, self.max)
    }
}

impl CuboidRegion {
    /// Creates the region spanned by two arbitrary corners.
    pub fn new(pos1: Vector3, pos2: Vector3) -> Self {
        let min = Vector3::new(
            pos1.x().min(pos2.x()),
            pos1.y().min(pos2.y()),
            pos1.z().min(pos2.z()),
        );
        let max = Vector3::new(
            pos1.x().max(pos2.x()),
            pos1.y().max(pos2.y()),
            pos1.z().max(pos2.z()),
        );
        let size = max.subtract(&min);

        Self { min, max, size }
    }

    /// Componentwise minimum corner.
    pub fn min(&self) -> &Vector3 {
        &self.min
    }

    /// Componentwise maximum corner.
    pub fn max(&self) -> &Vector3 {
        &self.max
    }

    /// Extent of the region, `max - min`, cached at construction.
    pub fn size(&self) -> &Vector3 {
        &self.size
    }

    /// Volume of the region.
    pub fn volume(&self) -> f64 {
        self.size.x() * self.size.y() * self.size.z()
    }

    /// Total area of the six faces.
    pub fn surface_area(&self) -> f64 {
        2.0 * (self.size.x() * self.size.y()
            + self.size.x() * self.size.z()
            + self.size.y() * self.size.z())
    }

    /// Whether `position` lies inside the region, inclusive on all six faces.
    pub fn contains(&self, position: &impl Vector3Ops) -> bool {
        (position.x() >= self.min.x() && position.x() <= self.max.x())
            && (position.y() >= self.min.y() && position.y() <= self.max.y())
            && (position.z() >= self.min.z() && position.z() <= self.max.z())
    }

    /// Lazily enumerates every grid-aligned point inside the region, spaced
    /// `grid_size` apart along each axis.
    ///
    /// Points come out in lexicographic (x, y, z) order, x outermost and z
    /// innermost, both ends inclusive; each axis starts and ends on the
    /// lattice line `floor(corner / grid_size) * grid_size`. Every call
    /// begins a fresh traversal. One mutable working vector is stepped
    /// internally and snapshotted at each yield, so the produced [`Vector3`]s
    /// are independent values the consumer may retain.
    ///
    /// Fails fast when `grid_size` is not positive and finite, or is too
    /// small to advance a cursor across the region's coordinates.
    pub fn iter_grid_points(&self, grid_size: f64) -> Result<GridPoints> {
        if !grid_size.is_finite() || grid_size <= 0.0 {
            log::error!("rejecting grid traversal of {self} with grid size {grid_size}");
            return Err(RegionError::InvalidGridSize(grid_size));
        }

        let start = self.min.divide(grid_size).floor().scale(grid_size);
        let end = self.max.divide(grid_size).floor().scale(grid_size);

        // The cursor must actually move when stepped. Once a coordinate's ULP
        // exceeds the step, `c + grid_size == c` and the walk would yield the
        // same point forever; the extreme magnitudes along the walk are the
        // start and end bounds, so checking those covers every cursor state.
        for bound in [
            start.x(),
            start.y(),
            start.z(),
            end.x(),
            end.y(),
            end.z(),
        ] {
            if bound + grid_size == bound {
                log::error!("grid size {grid_size} cannot advance past {bound} in {self}");
                return Err(RegionError::GridSizeTooSmall(grid_size));
            }
        }

        log::trace!("grid traversal of {self} from {start} to {end} step {grid_size}");

        Ok(GridPoints {
            cursor: MutableVector3::from(start.clone()),
            start,
            end,
            grid_size,
            done: false,
        })
    }

    /// Materializes the full ordered sequence of grid-aligned points.
    pub fn grid_points(&self, grid_size: f64) -> Result<Vec<Vector3>> {
        Ok(self.iter_grid_points(grid_size)?.collect())
    }

    /// Translates both corners by `offset`.
    pub fn offset(&self, offset: &Vector3) -> CuboidRegion {
        CuboidRegion::new(self.min.add(offset), self.max.add(offset))
    }

    /// Translates both corners by (dx, dy, dz).
    pub fn offset_xyz(&self, dx: f64, dy: f64, dz: f64) -> CuboidRegion {
        CuboidRegion::new(self.min.add_xyz(dx, dy, dz), self.max.add_xyz(dx, dy, dz))
    }

    /// Grows `max` and shrinks `min` by `expansion` along every axis; a
    /// negative value shrinks the region.
    pub fn expand(&self, expansion: f64) -> CuboidRegion {
        CuboidRegion::new(
            self.min.subtract_xyz(expansion, expansion, expansion),
            self.max.add_xyz(expansion, expansion, expansion),
        )
    }

    /// Per-axis form of [`expand`](CuboidRegion::expand).
    pub fn expand_vec(&self, expansion: &Vector3) -> CuboidRegion {
        CuboidRegion::new(self.min.subtract(expansion), self.max.add(expansion))
    }
}

/// Default iteration walks the unit grid.
impl IntoIterator for &CuboidRegion {
    type Item = Vector3;
    type IntoIter = GridPoints;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_grid_points(1.0)
            .unwrap_or_else(|_| unreachable!("unit grid size is always valid"))
    }
}

/// Lazy producer of the grid-aligned points inside a [`CuboidRegion`].
///
/// Owns its axis bounds and cursor, so it does not borrow the region it came
/// from. Dropping it mid-walk needs no cleanup.
#[derive(Clone, Debug)]
pub struct GridPoints {
    start: Vector3,
    end: Vector3,
    grid_size: f64,
    cursor: MutableVector3,
    done: bool,
}

impl Iterator for GridPoints {
    type Item = Vector3;

    fn next(&mut self) -> Option<Vector3> {
        if self.done {
            return None;
        }

        let point = self.cursor.to_vector3();

        // Advance z fastest, then y, then x; the walk is over once x steps
        // past its end.
        let z = self.cursor.z() + self.grid_size;
        if z <= self.end.z() {
            self.cursor.set_z(z);
            return Some(point);
        }
        self.cursor.set_z(self.start.z());

        let y = self.cursor.y() + self.grid_size;
        if y <= self.end.y() {
            self.cursor.set_y(y);
            return Some(point);
        }
        self.cursor.set_y(self.start.y());

        let x = self.cursor.x() + self.grid_size;
        if x <= self.end.x() {
            self.cursor.set_x(x);
        } else {
            self.done = true;
        }

        Some(point)
    }
}
