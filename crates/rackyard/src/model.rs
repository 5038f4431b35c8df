//! Input configuration tree.
//!
//! These types describe a warehouse as a configuration source supplies it:
//! raw measurements paired with unit tags, counts for the racking grid, and
//! pallets keyed by the storage cell they occupy. Field names match the
//! external JSON shape.
//!
//! Measurements are kept as [`Scalar`]s; the layout engine normalizes them to
//! centimeters under its [`UnitPolicy`](rackyard_core::units::UnitPolicy).

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use rackyard_core::units::{DEFAULT_UNIT_TAG, Scalar};

fn default_unit() -> String {
    DEFAULT_UNIT_TAG.to_string()
}

fn default_pallet_type() -> String {
    "wooden".to_string()
}

/// A complete warehouse configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseConfig {
    /// Identifier echoed back in layout responses.
    #[serde(default)]
    pub id: String,

    pub warehouse_dimensions: WarehouseDimensions,

    /// Declared workstation count. Defaults to the number of `workstation_configs`.
    #[serde(default)]
    pub num_workstations: Option<u32>,

    /// Gap between neighbouring workstations.
    pub workstation_gap: Scalar,

    #[serde(default = "default_unit")]
    pub workstation_gap_unit: String,

    pub workstation_configs: Vec<WorkstationConfig>,
}

impl WarehouseConfig {
    /// The workstation count used for partitioning the warehouse width.
    pub fn workstation_count(&self) -> usize {
        self.num_workstations
            .map(|n| n as usize)
            .unwrap_or(self.workstation_configs.len())
    }
}

/// Overall warehouse envelope, all in one unit.
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseDimensions {
    pub length: Scalar,
    pub width: Scalar,
    pub height: Scalar,
    /// Clearance kept free below the ceiling.
    pub height_safety_margin: Scalar,
    #[serde(default = "default_unit")]
    pub unit: String,
}

/// One workstation: a central aisle flanked by two storage sides.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkstationConfig {
    #[serde(default)]
    pub workstation_index: Option<u32>,

    /// Width of the central aisle.
    pub aisle_space: Scalar,

    #[serde(default = "default_unit")]
    pub aisle_space_unit: String,

    pub left_side_config: SideConfig,

    pub right_side_config: SideConfig,

    #[serde(default)]
    pub pallet_configs: Vec<PalletConfig>,
}

impl WorkstationConfig {
    /// Returns the configuration of the given side.
    pub fn side(&self, side: Side) -> &SideConfig {
        match side {
            Side::Left => &self.left_side_config,
            Side::Right => &self.right_side_config,
        }
    }
}

/// Racking on one side of a workstation.
///
/// The side is divided into `num_rows` rows along the length, `num_floors`
/// floors up the usable height, and `num_aisles * deep` columns across its
/// width.
#[derive(Debug, Clone, Deserialize)]
pub struct SideConfig {
    pub num_floors: u32,
    pub num_rows: u32,
    pub num_aisles: u32,
    pub deep: u32,

    /// Gaps between consecutive columns, left to right. Missing entries are zero.
    #[serde(default)]
    pub custom_gaps: Vec<Scalar>,

    pub gap_front: Scalar,
    pub gap_back: Scalar,
    pub gap_left: Scalar,
    pub gap_right: Scalar,

    /// Unit of the wall gaps and the custom gaps.
    #[serde(default = "default_unit")]
    pub wall_gap_unit: String,
}

impl SideConfig {
    /// Total number of columns across the side, or `None` on overflow.
    pub fn column_count(&self) -> Option<usize> {
        (self.num_aisles as usize).checked_mul(self.deep as usize)
    }
}

/// A pallet to be placed in a storage cell.
#[derive(Debug, Clone, Deserialize)]
pub struct PalletConfig {
    #[serde(rename = "type", default = "default_pallet_type")]
    pub kind: String,

    #[serde(default)]
    pub weight: Option<f64>,

    #[serde(default, alias = "length_cm")]
    pub length: Scalar,

    #[serde(default, alias = "width_cm")]
    pub width: Scalar,

    #[serde(default, alias = "height_cm")]
    pub height: Scalar,

    #[serde(default = "default_unit")]
    pub dimensions_unit: String,

    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub position: Option<PalletPosition>,
}

/// The storage cell a pallet occupies, as a lookup key.
///
/// `col` is the global column index on the side (1-based across all aisle
/// groups and depth levels). Every field is required for a match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PalletPosition {
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub row: Option<u32>,
    #[serde(default)]
    pub floor: Option<u32>,
    #[serde(default)]
    pub deep: Option<u32>,
    #[serde(default)]
    pub col: Option<u32>,
}

impl PalletPosition {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Names of the fields that are absent, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.side.as_deref().is_none_or(str::is_empty) {
            missing.push("side");
        }
        if self.row.is_none() {
            missing.push("row");
        }
        if self.floor.is_none() {
            missing.push("floor");
        }
        if self.deep.is_none() {
            missing.push("deep");
        }
        if self.col.is_none() {
            missing.push("col");
        }
        missing
    }
}

/// A storage side of a workstation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            _ => Err(format!("unknown side `{s}`")),
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
