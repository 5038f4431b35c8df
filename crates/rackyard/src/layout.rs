//! Warehouse layout calculation and the resolved layout tree.
//!
//! The engine turns a [`WarehouseConfig`](crate::model::WarehouseConfig) into
//! a [`WarehouseLayout`] in four steps:
//!
//! 1. [`partition`] splits the warehouse width into equal workstations.
//! 2. [`side`] resolves each storage side into a grid of [`StorageCell`]s.
//! 3. [`pallets`] attaches declared pallets to the cell matching their position.
//! 4. [`engine`] sequences the above and assembles the tree.
//!
//! Every value in the tree is in canonical centimeters, and positions are the
//! minimum corner of the element (see [`rackyard_core::geometry`]).

mod context;
pub mod engine;
pub mod pallets;
pub mod partition;
pub mod side;

use serde::Serialize;

use rackyard_core::{
    color::PalletColor,
    geometry::{Point3, Size3},
};

use crate::{diagnostics::Diagnostics, model::Side};

/// The fully resolved layout of a warehouse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarehouseLayout {
    warehouse_dimensions: Size3,
    workstations: Vec<WorkstationLayout>,
}

impl WarehouseLayout {
    pub(crate) fn new(warehouse_dimensions: Size3, workstations: Vec<WorkstationLayout>) -> Self {
        Self {
            warehouse_dimensions,
            workstations,
        }
    }

    /// Overall warehouse width, length and full height.
    pub fn warehouse_dimensions(&self) -> Size3 {
        self.warehouse_dimensions
    }

    pub fn workstations(&self) -> &[WorkstationLayout] {
        &self.workstations
    }
}

/// A positioned workstation and the aisles it contains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkstationLayout {
    id: String,
    index: u32,
    position: Point3,
    dimensions: Size3,
    aisles: Vec<AisleLayout>,
}

impl WorkstationLayout {
    pub(crate) fn new(
        id: String,
        index: u32,
        position: Point3,
        dimensions: Size3,
        aisles: Vec<AisleLayout>,
    ) -> Self {
        Self {
            id,
            index,
            position,
            dimensions,
            aisles,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The workstation index declared in the configuration.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn dimensions(&self) -> Size3 {
        self.dimensions
    }

    /// All aisles, the central aisle first, then left and right storage cells.
    pub fn aisles(&self) -> &[AisleLayout] {
        &self.aisles
    }

    /// Returns the central aisle, if present.
    pub fn central_aisle(&self) -> Option<&CentralAisle> {
        self.aisles.iter().find_map(|aisle| match aisle {
            AisleLayout::CentralAisle(central) => Some(central),
            AisleLayout::StorageAisle(_) => None,
        })
    }

    /// Iterates over the storage cells, in construction order.
    pub fn storage_cells(&self) -> impl Iterator<Item = &StorageCell> {
        self.aisles.iter().filter_map(AisleLayout::as_storage)
    }
}

/// An entry in a workstation's aisle list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AisleLayout {
    CentralAisle(CentralAisle),
    StorageAisle(StorageCell),
}

impl AisleLayout {
    /// Returns the storage cell, or `None` for the central aisle.
    pub fn as_storage(&self) -> Option<&StorageCell> {
        match self {
            AisleLayout::StorageAisle(cell) => Some(cell),
            AisleLayout::CentralAisle(_) => None,
        }
    }

    pub(crate) fn as_storage_mut(&mut self) -> Option<&mut StorageCell> {
        match self {
            AisleLayout::StorageAisle(cell) => Some(cell),
            AisleLayout::CentralAisle(_) => None,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            AisleLayout::CentralAisle(central) => &central.id,
            AisleLayout::StorageAisle(cell) => &cell.id,
        }
    }
}

/// The walkway between a workstation's two storage sides.
///
/// It spans the full warehouse length and the usable height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralAisle {
    id: String,
    position: Point3,
    dimensions: Size3,
}

impl CentralAisle {
    pub(crate) fn new(id: String, position: Point3, dimensions: Size3) -> Self {
        Self {
            id,
            position,
            dimensions,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn dimensions(&self) -> Size3 {
        self.dimensions
    }
}

/// Addressing indices of a storage cell. All are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellIndices {
    pub row: u32,
    pub floor: u32,
    /// Global column across every aisle group and depth level of the side.
    pub col: u32,
    pub deep: u32,
    /// Aisle group within the depth level.
    pub aisle: u32,
}

/// The smallest addressable unit of racking space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageCell {
    id: String,
    side: Side,
    position: Point3,
    dimensions: Size3,
    indices: CellIndices,
    pallets: Vec<PlacedPallet>,
}

impl StorageCell {
    pub(crate) fn new(
        id: String,
        side: Side,
        position: Point3,
        dimensions: Size3,
        indices: CellIndices,
    ) -> Self {
        Self {
            id,
            side,
            position,
            dimensions,
            indices,
            pallets: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn dimensions(&self) -> Size3 {
        self.dimensions
    }

    pub fn indices(&self) -> CellIndices {
        self.indices
    }

    /// Pallets stored in this cell, in configuration order.
    pub fn pallets(&self) -> &[PlacedPallet] {
        &self.pallets
    }

    pub(crate) fn add_pallet(&mut self, pallet: PlacedPallet) {
        self.pallets.push(pallet);
    }
}

/// A pallet attached to a storage cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedPallet {
    #[serde(rename = "type")]
    kind: String,
    weight: f64,
    color: PalletColor,
    dims: PalletDims,
}

impl PlacedPallet {
    pub(crate) fn new(kind: String, weight: f64, color: PalletColor, dims: PalletDims) -> Self {
        Self {
            kind,
            weight,
            color,
            dims,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn color(&self) -> &PalletColor {
        &self.color
    }

    pub fn dims(&self) -> PalletDims {
        self.dims
    }
}

/// Pallet footprint and height in centimeters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PalletDims {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// A layout together with the non-fatal findings gathered while computing it.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutReport {
    layout: WarehouseLayout,
    diagnostics: Diagnostics,
}

impl LayoutReport {
    pub(crate) fn new(layout: WarehouseLayout, diagnostics: Diagnostics) -> Self {
        Self {
            layout,
            diagnostics,
        }
    }

    pub fn layout(&self) -> &WarehouseLayout {
        &self.layout
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (WarehouseLayout, Diagnostics) {
        (self.layout, self.diagnostics)
    }
}
