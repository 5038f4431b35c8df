//! Geometric primitives for warehouse layout and positioning.
//!
//! This module provides the fundamental geometric types used throughout Rackyard
//! for describing where workstations, aisles and storage cells sit and how large
//! they are.
//!
//! # Overview
//!
//! - [`Point3`] - A 3D coordinate in warehouse space
//! - [`Size3`] - Width, length and height dimensions
//! - [`WallGaps`] - Clearance between racking and the four walls of a side
//!
//! # Coordinate System
//!
//! Rackyard places the origin at the front-left floor corner of the warehouse:
//!
//! ```text
//!          +Z (up)
//!           │   +Y (length, front → back)
//!           │  ╱
//!           │ ╱
//!   (0,0,0) └──────────► +X (width, left → right)
//! ```
//!
//! - **X-axis**: Along the warehouse width, workstations are laid out side by side
//! - **Y-axis**: Along the warehouse length, rows advance away from the front wall
//! - **Z-axis**: Vertical, floors stack upward from the ground
//!
//! Every position is the minimum corner of the element it locates, and all
//! values are in canonical centimeters.

use serde::Serialize;

/// A 3D point representing the minimum corner of an element in warehouse space.
///
/// # Examples
///
/// ```
/// # use rackyard_core::geometry::Point3;
/// let corner = Point3::new(110.0, 20.0, 150.0);
/// assert_eq!(corner.x(), 110.0);
/// assert_eq!(corner.z(), 150.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Point3 {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the z-coordinate of the point
    pub fn z(self) -> f64 {
        self.z
    }
}

/// Represents the dimensions of an element along the three warehouse axes.
///
/// `width` runs along X, `length` along Y and `height` along Z.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size3 {
    width: f64,
    length: f64,
    height: f64,
}

impl Size3 {
    pub fn new(width: f64, length: f64, height: f64) -> Self {
        Self {
            width,
            length,
            height,
        }
    }

    /// Returns the width (X extent)
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the length (Y extent)
    pub fn length(self) -> f64 {
        self.length
    }

    /// Returns the height (Z extent)
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns the footprint reduced by the given wall gaps.
    ///
    /// Width loses the left and right gaps, length loses the front and back
    /// gaps; height is unchanged. Results may be negative when the gaps exceed
    /// the footprint.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rackyard_core::geometry::{Size3, WallGaps};
    /// let side = Size3::new(300.0, 500.0, 450.0);
    /// let inner = side.shrink(WallGaps::new(10.0, 20.0, 5.0, 15.0));
    /// assert_eq!(inner.width(), 280.0);
    /// assert_eq!(inner.length(), 470.0);
    /// assert_eq!(inner.height(), 450.0);
    /// ```
    pub fn shrink(self, gaps: WallGaps) -> Self {
        Self {
            width: self.width - gaps.horizontal_sum(),
            length: self.length - gaps.depth_sum(),
            height: self.height,
        }
    }
}

/// Clearance between a side's racking and its four surrounding walls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WallGaps {
    front: f64,
    back: f64,
    left: f64,
    right: f64,
}

impl WallGaps {
    pub fn new(front: f64, back: f64, left: f64, right: f64) -> Self {
        Self {
            front,
            back,
            left,
            right,
        }
    }

    pub fn front(self) -> f64 {
        self.front
    }

    pub fn back(self) -> f64 {
        self.back
    }

    pub fn left(self) -> f64 {
        self.left
    }

    pub fn right(self) -> f64 {
        self.right
    }

    /// Sum of the left and right gaps
    pub fn horizontal_sum(self) -> f64 {
        self.left + self.right
    }

    /// Sum of the front and back gaps
    pub fn depth_sum(self) -> f64 {
        self.front + self.back
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_new() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(p.x(), 1.0);
        assert_eq!(p.y(), 2.0);
        assert_eq!(p.z(), 3.0);
    }

    #[test]
    fn test_point_default() {
        assert_eq!(Point3::default(), Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_size_shrink_can_go_negative() {
        let inner = Size3::new(10.0, 10.0, 10.0).shrink(WallGaps::new(6.0, 6.0, 6.0, 6.0));
        assert_approx_eq!(f64, inner.width(), -2.0);
        assert_approx_eq!(f64, inner.length(), -2.0);
        assert_approx_eq!(f64, inner.height(), 10.0);
    }

    #[test]
    fn test_wall_gap_sums() {
        let gaps = WallGaps::new(1.0, 2.0, 3.0, 4.0);
        assert_approx_eq!(f64, gaps.depth_sum(), 3.0);
        assert_approx_eq!(f64, gaps.horizontal_sum(), 7.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(Size3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(json["width"], 1.0);
        assert_eq!(json["length"], 2.0);
        assert_eq!(json["height"], 3.0);

        let json = serde_json::to_value(Point3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(json["z"], 3.0);
    }
}
