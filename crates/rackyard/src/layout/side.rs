//! Resolution of one workstation side into a grid of storage cells.
//!
//! A side is first shrunk by its four wall gaps. What remains is divided into
//! `num_rows` equal rows along the length and `num_floors` equal floors up the
//! height. Across the width it holds `num_aisles * deep` columns of equal
//! width, separated by the (possibly uneven) custom gaps:
//!
//! ```text
//!  gap_left  col 1   g1  col 2   g2  col 3    gap_right
//! |<------>|<----->|<->|<----->|<->|<----->|<-------->|
//! ```
//!
//! Columns are numbered 1..=n across the whole side. Depth levels are the
//! outer iteration and aisle groups the inner one, so with two aisle groups
//! and two depth levels the columns read `(deep 1, aisle 1)`, `(deep 1, aisle 2)`,
//! `(deep 2, aisle 1)`, `(deep 2, aisle 2)`.

use log::{debug, trace};

use rackyard_core::geometry::{Point3, Size3, WallGaps};

use crate::{
    config::SurplusGapPolicy,
    diagnostics::{Diagnostic, DiagnosticKind},
    error::RackyardError,
    layout::{CellIndices, StorageCell, context::LayoutContext},
    model::{Side, SideConfig},
};

/// Cells narrower than this are reported as undersized.
pub const MIN_CELL_WIDTH: f64 = 1.0;
/// Cells shorter than this are reported as undersized.
pub const MIN_CELL_LENGTH: f64 = 1.0;
/// Floors lower than this are reported as undersized.
pub const MIN_FLOOR_HEIGHT: f64 = 10.0;

/// The footprint of a side within its workstation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideFrame {
    origin_x: f64,
    size: Size3,
}

impl SideFrame {
    /// `size` is the side width, the workstation length and the usable height.
    pub fn new(origin_x: f64, size: Size3) -> Self {
        Self { origin_x, size }
    }

    pub fn origin_x(&self) -> f64 {
        self.origin_x
    }

    pub fn size(&self) -> Size3 {
        self.size
    }
}

/// The custom gaps of a side, fitted to its column count.
#[derive(Debug, Clone, PartialEq)]
pub struct GapPlan {
    between: Vec<f64>,
    reserved: f64,
    surplus: usize,
}

impl GapPlan {
    /// Fits `gaps` to `columns` columns.
    ///
    /// The list is padded with zeros to exactly `columns - 1` placeable gaps.
    /// Entries beyond that are surplus: ignored under
    /// [`SurplusGapPolicy::Truncate`], or still subtracted from the available
    /// width under [`SurplusGapPolicy::Keep`].
    pub fn new(mut gaps: Vec<f64>, columns: usize, policy: SurplusGapPolicy) -> Self {
        let placeable = columns.saturating_sub(1);
        let surplus = gaps.len().saturating_sub(placeable);

        let reserved = match policy {
            SurplusGapPolicy::Keep => gaps.iter().sum(),
            SurplusGapPolicy::Truncate => gaps.iter().take(placeable).sum(),
        };

        gaps.resize(placeable, 0.0);

        Self {
            between: gaps,
            reserved,
            surplus,
        }
    }

    /// The gap before each column after the first; always `columns - 1` long.
    pub fn between(&self) -> &[f64] {
        &self.between
    }

    /// Total width taken from the side by gaps.
    pub fn reserved(&self) -> f64 {
        self.reserved
    }

    /// Number of supplied gaps that could not be placed.
    pub fn surplus(&self) -> usize {
        self.surplus
    }
}

/// Equal width of each of `columns` columns sharing `available` with `reserved` gap space.
pub fn column_width(available: f64, reserved: f64, columns: usize) -> f64 {
    (available - reserved) / columns as f64
}

/// A column on a side and where it starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSlot {
    /// Global column index, 1-based.
    pub col: u32,
    /// Depth level, 1-based.
    pub deep: u32,
    /// Aisle group within the depth level, 1-based.
    pub aisle: u32,
    /// X coordinate of the column's left edge.
    pub x: f64,
}

/// Lays out the columns of one row, left to right, starting at `start_x`.
///
/// Each column is preceded by `between[col - 2]` (nothing for the first) and
/// is `column_width` wide. `between` must hold `num_aisles * deep - 1` entries.
///
/// # Examples
///
/// ```
/// # use rackyard::layout::side::column_slots;
/// let slots = column_slots(5.0, 2, 1, 90.0, &[20.0]);
/// assert_eq!(slots[0].x, 5.0);
/// assert_eq!(slots[1].x, 5.0 + 90.0 + 20.0);
/// ```
pub fn column_slots(
    start_x: f64,
    num_aisles: u32,
    deep: u32,
    column_width: f64,
    between: &[f64],
) -> Vec<ColumnSlot> {
    let (slots, _cursor) = (1..=deep)
        .flat_map(|d| (1..=num_aisles).map(move |a| (d, a)))
        .zip(1u32..)
        .fold(
            (Vec::new(), start_x),
            |(mut slots, cursor), ((deep, aisle), col)| {
                let gap = if col > 1 {
                    between.get(col as usize - 2).copied().unwrap_or(0.0)
                } else {
                    0.0
                };
                let x = cursor + gap;
                slots.push(ColumnSlot {
                    col,
                    deep,
                    aisle,
                    x,
                });
                (slots, x + column_width)
            },
        );
    slots
}

/// Resolves one side of a workstation into its storage cells.
///
/// Cells are emitted row by row, then column by column, then floor by floor.
/// A side without columns yields no cells, whatever its gaps measure.
pub(crate) fn process_side(
    config: &SideConfig,
    frame: SideFrame,
    workstation: usize,
    side: Side,
    ctx: &mut LayoutContext,
) -> Result<Vec<StorageCell>, RackyardError> {
    let path = format!("workstation_configs[{workstation}].{side}_side_config");
    let unit = config.wall_gap_unit.as_str();

    let columns = config.column_count().ok_or_else(|| {
        RackyardError::Validation(format!("{path}: num_aisles * deep is too large"))
    })?;
    if columns == 0 {
        debug!(side = side.as_str(), workstation; "Side has no columns");
        return Ok(Vec::new());
    }

    let walls = WallGaps::new(
        ctx.measure(&format!("{path}.gap_front"), &config.gap_front, unit)?,
        ctx.measure(&format!("{path}.gap_back"), &config.gap_back, unit)?,
        ctx.measure(&format!("{path}.gap_left"), &config.gap_left, unit)?,
        ctx.measure(&format!("{path}.gap_right"), &config.gap_right, unit)?,
    );

    let available = frame.size().shrink(walls);
    let available_width = ctx.extent(&format!("{path} available width"), available.width())?;
    let available_length = ctx.extent(&format!("{path} available length"), available.length())?;

    let gaps = config
        .custom_gaps
        .iter()
        .enumerate()
        .map(|(i, gap)| ctx.measure(&format!("{path}.custom_gaps[{i}]"), gap, unit))
        .collect::<Result<Vec<_>, _>>()?;
    let plan = GapPlan::new(gaps, columns, ctx.surplus_gaps());
    if plan.surplus() > 0 {
        let action = match ctx.surplus_gaps() {
            SurplusGapPolicy::Truncate => "ignored",
            SurplusGapPolicy::Keep => "subtracted from the available width but not placed",
        };
        ctx.note(Diagnostic::new(
            DiagnosticKind::SurplusGaps,
            format!("{path}.custom_gaps"),
            format!(
                "{} gaps supplied for {} columns; {} {action}",
                config.custom_gaps.len(),
                columns,
                plan.surplus()
            ),
        ));
    }

    let cell_width = ctx.extent(
        &format!("{path} column width"),
        column_width(available_width, plan.reserved(), columns),
    )?;
    let row_length = available_length / config.num_rows as f64;
    let floor_height = frame.size().height() / config.num_floors as f64;
    let cell_size = Size3::new(cell_width, row_length, floor_height);

    if cell_width < MIN_CELL_WIDTH
        || row_length < MIN_CELL_LENGTH
        || floor_height < MIN_FLOOR_HEIGHT
    {
        ctx.note(Diagnostic::new(
            DiagnosticKind::UndersizedCell,
            path.as_str(),
            format!(
                "cells are {cell_width} x {row_length} x {floor_height} cm, below the minimum \
                 {MIN_CELL_WIDTH} x {MIN_CELL_LENGTH} x {MIN_FLOOR_HEIGHT} cm"
            ),
        ));
    }

    let slots = column_slots(
        frame.origin_x() + walls.left(),
        config.num_aisles,
        config.deep,
        cell_width,
        plan.between(),
    );

    let mut cells = Vec::new();
    for row in 0..config.num_rows {
        let y = walls.front() + row as f64 * row_length;
        for slot in &slots {
            for floor in 0..config.num_floors {
                let position = Point3::new(slot.x, y, floor as f64 * floor_height);
                let indices = CellIndices {
                    row: row + 1,
                    floor: floor + 1,
                    col: slot.col,
                    deep: slot.deep,
                    aisle: slot.aisle,
                };
                cells.push(StorageCell::new(
                    format!("aisle-{workstation}-{side}-{row}-{}-{floor}", slot.col),
                    side,
                    position,
                    cell_size,
                    indices,
                ));
            }
        }
    }

    debug!(
        side = side.as_str(),
        workstation,
        columns,
        cells = cells.len();
        "Side resolved"
    );
    trace!(cell_size:?, slots:?; "Side geometry");

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use float_cmp::assert_approx_eq;
    use serde_json::json;

    use super::*;
    use crate::config::{EngineConfig, GeometryPolicy};

    fn side_config(value: serde_json::Value) -> SideConfig {
        serde_json::from_value(value).unwrap()
    }

    fn simple_side(num_aisles: u32, deep: u32, gaps: serde_json::Value) -> SideConfig {
        side_config(json!({
            "num_floors": 2, "num_rows": 2, "num_aisles": num_aisles, "deep": deep,
            "custom_gaps": gaps,
            "gap_front": 10, "gap_back": 10, "gap_left": 5, "gap_right": 5
        }))
    }

    fn frame() -> SideFrame {
        // available width 200 after 5 + 5 wall gaps, length 480, height 300
        SideFrame::new(0.0, Size3::new(210.0, 500.0, 300.0))
    }

    fn run(config: &SideConfig, engine: EngineConfig) -> (Vec<StorageCell>, LayoutContext) {
        let mut ctx = LayoutContext::new(&engine);
        let cells = process_side(config, frame(), 0, Side::Left, &mut ctx).unwrap();
        (cells, ctx)
    }

    #[test]
    fn test_gap_plan_pads_with_zeros() {
        let plan = GapPlan::new(vec![20.0], 4, SurplusGapPolicy::Truncate);
        assert_eq!(plan.between(), &[20.0, 0.0, 0.0]);
        assert_approx_eq!(f64, plan.reserved(), 20.0);
        assert_eq!(plan.surplus(), 0);
    }

    #[test]
    fn test_gap_plan_truncates_surplus() {
        let plan = GapPlan::new(vec![20.0, 30.0, 40.0], 2, SurplusGapPolicy::Truncate);
        assert_eq!(plan.between(), &[20.0]);
        assert_approx_eq!(f64, plan.reserved(), 20.0);
        assert_eq!(plan.surplus(), 2);
    }

    #[test]
    fn test_gap_plan_keeps_surplus_width() {
        let plan = GapPlan::new(vec![20.0, 30.0, 40.0], 2, SurplusGapPolicy::Keep);
        assert_eq!(plan.between(), &[20.0]);
        assert_approx_eq!(f64, plan.reserved(), 90.0);
        assert_eq!(plan.surplus(), 2);
    }

    #[test]
    fn test_gap_plan_single_column_has_no_gaps() {
        let plan = GapPlan::new(vec![], 1, SurplusGapPolicy::Truncate);
        assert!(plan.between().is_empty());
        assert_approx_eq!(f64, plan.reserved(), 0.0);
    }

    #[test]
    fn test_column_width_with_gap() {
        assert_approx_eq!(f64, column_width(200.0, 20.0, 2), 90.0);
    }

    #[test]
    fn test_column_slots_positions() {
        let slots = column_slots(5.0, 2, 1, 90.0, &[20.0]);
        assert_eq!(slots.len(), 2);
        assert_approx_eq!(f64, slots[0].x, 5.0);
        assert_approx_eq!(f64, slots[1].x, 115.0);
    }

    #[test]
    fn test_column_slots_deep_is_outer_loop() {
        let slots = column_slots(0.0, 2, 2, 10.0, &[0.0, 0.0, 0.0]);
        let addresses: Vec<_> = slots.iter().map(|s| (s.col, s.deep, s.aisle)).collect();
        assert_eq!(
            addresses,
            vec![(1, 1, 1), (2, 1, 2), (3, 2, 1), (4, 2, 2)]
        );
    }

    #[test]
    fn test_process_side_scenario() {
        let config = simple_side(2, 1, json!([20]));
        let (cells, ctx) = run(&config, EngineConfig::default());
        assert!(ctx.finish().is_empty());

        // 2 rows x 2 columns x 2 floors
        assert_eq!(cells.len(), 8);

        let first = &cells[0];
        assert_eq!(first.id(), "aisle-0-left-0-1-0");
        assert_approx_eq!(f64, first.position().x(), 5.0);
        assert_approx_eq!(f64, first.position().y(), 10.0);
        assert_approx_eq!(f64, first.position().z(), 0.0);
        assert_approx_eq!(f64, first.dimensions().width(), 90.0);
        assert_approx_eq!(f64, first.dimensions().length(), 240.0);
        assert_approx_eq!(f64, first.dimensions().height(), 150.0);

        // Second floor of the first column
        assert_approx_eq!(f64, cells[1].position().z(), 150.0);
        assert_eq!(cells[1].indices().floor, 2);

        // Second column of the first row
        let second_col = &cells[2];
        assert_eq!(second_col.indices().col, 2);
        assert_eq!(second_col.indices().aisle, 2);
        assert_approx_eq!(f64, second_col.position().x(), 5.0 + 90.0 + 20.0);

        // Second row starts back at the left wall gap
        let second_row = &cells[4];
        assert_eq!(second_row.indices().row, 2);
        assert_approx_eq!(f64, second_row.position().x(), 5.0);
        assert_approx_eq!(f64, second_row.position().y(), 250.0);
        assert_eq!(second_row.id(), "aisle-0-left-1-1-0");
    }

    #[test]
    fn test_process_side_without_columns() {
        let config = simple_side(0, 3, json!([]));
        let (cells, _) = run(&config, EngineConfig::default());
        assert!(cells.is_empty());
    }

    #[test]
    fn test_process_side_without_columns_ignores_gaps() {
        let config = side_config(json!({
            "num_floors": 1, "num_rows": 1, "num_aisles": 0, "deep": 1,
            "gap_front": 300, "gap_back": 300, "gap_left": 150, "gap_right": 150
        }));
        let (cells, ctx) = run(&config, EngineConfig::default());
        assert!(cells.is_empty());
        assert!(ctx.finish().is_empty());
    }

    #[test]
    fn test_process_side_rejects_negative_wall_gap() {
        let config = side_config(json!({
            "num_floors": 1, "num_rows": 1, "num_aisles": 1, "deep": 1,
            "gap_front": 0, "gap_back": 0, "gap_left": -5, "gap_right": 0
        }));
        let mut ctx = LayoutContext::new(&EngineConfig::default());
        let err = process_side(&config, frame(), 0, Side::Left, &mut ctx).unwrap_err();
        assert!(matches!(err, RackyardError::Geometry(_)));
        assert!(err.to_string().contains("gap_left"), "{err}");
    }

    #[test]
    fn test_process_side_rejects_negative_custom_gap() {
        let config = simple_side(2, 1, json!([-20]));
        let mut ctx = LayoutContext::new(&EngineConfig::default());
        let err = process_side(&config, frame(), 0, Side::Left, &mut ctx).unwrap_err();
        assert!(matches!(err, RackyardError::Geometry(_)));
        assert!(err.to_string().contains("custom_gaps[0]"), "{err}");
    }

    #[test]
    fn test_process_side_clamps_negative_custom_gap() {
        let config = simple_side(2, 1, json!([-20]));
        let engine = EngineConfig::default().with_negative_geometry(GeometryPolicy::Clamp);
        let (cells, ctx) = run(&config, engine);
        // the clamped gap leaves the full 200 cm to the two columns
        assert_approx_eq!(f64, cells[0].dimensions().width(), 100.0);
        assert_approx_eq!(f64, cells[2].position().x(), 105.0);

        let diagnostics = ctx.finish();
        let clamped: Vec<_> = diagnostics
            .of_kind(DiagnosticKind::ClampedGeometry)
            .collect();
        assert_eq!(clamped.len(), 1);
        assert!(clamped[0].subject().ends_with("custom_gaps[0]"));
    }

    #[test]
    fn test_process_side_indices_are_unique() {
        let config = simple_side(3, 2, json!([1, 2, 3]));
        let (cells, _) = run(&config, EngineConfig::default());
        let keys: HashSet<_> = cells
            .iter()
            .map(|c| {
                let i = c.indices();
                (i.row, i.floor, i.deep, i.col)
            })
            .collect();
        assert_eq!(keys.len(), cells.len());
    }

    #[test]
    fn test_process_side_surplus_gaps_diagnostic() {
        let config = simple_side(2, 1, json!([20, 30]));
        let (cells, ctx) = run(&config, EngineConfig::default());
        assert_approx_eq!(f64, cells[0].dimensions().width(), 90.0);

        let diagnostics = ctx.finish();
        assert_eq!(diagnostics.of_kind(DiagnosticKind::SurplusGaps).count(), 1);
    }

    #[test]
    fn test_process_side_keep_surplus_gaps() {
        let config = simple_side(2, 1, json!([20, 30]));
        let engine = EngineConfig::default().with_surplus_gaps(SurplusGapPolicy::Keep);
        let (cells, _) = run(&config, engine);
        assert_approx_eq!(f64, cells[0].dimensions().width(), 75.0);
        assert_approx_eq!(f64, cells[2].position().x(), 5.0 + 75.0 + 20.0);
    }

    #[test]
    fn test_process_side_rejects_oversized_gaps() {
        let config = simple_side(2, 1, json!([250]));
        let mut ctx = LayoutContext::new(&EngineConfig::default());
        let err = process_side(&config, frame(), 0, Side::Left, &mut ctx).unwrap_err();
        assert!(matches!(err, RackyardError::Geometry(_)));
        assert!(err.to_string().contains("column width"), "{err}");
    }

    #[test]
    fn test_process_side_clamps_oversized_gaps() {
        let config = simple_side(2, 1, json!([250]));
        let engine = EngineConfig::default().with_negative_geometry(GeometryPolicy::Clamp);
        let (cells, ctx) = run(&config, engine);
        assert_approx_eq!(f64, cells[0].dimensions().width(), 0.0);

        let diagnostics = ctx.finish();
        assert_eq!(
            diagnostics.of_kind(DiagnosticKind::ClampedGeometry).count(),
            1
        );
        assert_eq!(diagnostics.of_kind(DiagnosticKind::UndersizedCell).count(), 1);
    }

    #[test]
    fn test_process_side_propagates_oversized_gaps() {
        let config = simple_side(2, 1, json!([250]));
        let engine = EngineConfig::default().with_negative_geometry(GeometryPolicy::Propagate);
        let (cells, _) = run(&config, engine);
        assert_approx_eq!(f64, cells[0].dimensions().width(), -25.0);
    }

    #[test]
    fn test_process_side_converts_gap_units() {
        let config = side_config(json!({
            "num_floors": 1, "num_rows": 1, "num_aisles": 2, "deep": 1,
            "custom_gaps": [0.2],
            "gap_front": 0.1, "gap_back": 0.1, "gap_left": 0.05, "gap_right": 0.05,
            "wall_gap_unit": "m"
        }));
        let (cells, _) = run(&config, EngineConfig::default());
        assert_eq!(cells.len(), 2);
        assert_approx_eq!(f64, cells[0].dimensions().width(), 90.0, epsilon = 1e-9);
        assert_approx_eq!(f64, cells[1].position().x(), 115.0, epsilon = 1e-9);
        assert_approx_eq!(f64, cells[0].position().y(), 10.0, epsilon = 1e-9);
    }
}
