//! Distribution of the warehouse footprint across workstations.
//!
//! Workstations are laid out side by side along the warehouse width, separated
//! by a fixed gap, and all share the same width:
//!
//! ```text
//! workstation_width = (warehouse_width - gap * (n - 1)) / n
//! ```
//!
//! Each workstation is then split into a left side, the central aisle and a
//! right side, the two sides sharing what the aisle leaves over.

use rackyard_core::geometry::Point3;

/// Width of each of `count` workstations sharing `total_width` with `gap` between them.
///
/// Returns `None` when `count` is zero.
pub fn workstation_width(total_width: f64, count: usize, gap: f64) -> Option<f64> {
    if count == 0 {
        return None;
    }
    let count = count as f64;
    Some((total_width - gap * (count - 1.0)) / count)
}

/// Height available to racking once the ceiling safety margin is removed.
pub fn usable_height(height: f64, safety_margin: f64) -> f64 {
    height - safety_margin
}

/// Width of each storage side once the central aisle is taken out.
pub fn side_width(workstation_width: f64, aisle_width: f64) -> f64 {
    (workstation_width - aisle_width) / 2.0
}

/// The shared geometry of every workstation in a warehouse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarehousePartition {
    workstation_width: f64,
    usable_height: f64,
    gap: f64,
}

impl WarehousePartition {
    pub fn new(workstation_width: f64, usable_height: f64, gap: f64) -> Self {
        Self {
            workstation_width,
            usable_height,
            gap,
        }
    }

    pub fn workstation_width(&self) -> f64 {
        self.workstation_width
    }

    pub fn usable_height(&self) -> f64 {
        self.usable_height
    }

    /// Position of the workstation at the given zero-based index.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rackyard::layout::partition::WarehousePartition;
    /// let partition = WarehousePartition::new(450.0, 450.0, 100.0);
    /// assert_eq!(partition.workstation_origin(0).x(), 0.0);
    /// assert_eq!(partition.workstation_origin(1).x(), 550.0);
    /// ```
    pub fn workstation_origin(&self, index: usize) -> Point3 {
        Point3::new(index as f64 * (self.workstation_width + self.gap), 0.0, 0.0)
    }
}

/// Horizontal split of one workstation into left side, central aisle and right side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkstationSplit {
    origin_x: f64,
    side_width: f64,
    aisle_width: f64,
}

impl WorkstationSplit {
    pub fn new(origin_x: f64, side_width: f64, aisle_width: f64) -> Self {
        Self {
            origin_x,
            side_width,
            aisle_width,
        }
    }

    pub fn side_width(&self) -> f64 {
        self.side_width
    }

    pub fn aisle_width(&self) -> f64 {
        self.aisle_width
    }

    /// X coordinate where the left side starts.
    pub fn left_x(&self) -> f64 {
        self.origin_x
    }

    /// X coordinate where the central aisle starts.
    pub fn central_x(&self) -> f64 {
        self.origin_x + self.side_width
    }

    /// X coordinate where the right side starts.
    pub fn right_x(&self) -> f64 {
        self.origin_x + self.side_width + self.aisle_width
    }
}
