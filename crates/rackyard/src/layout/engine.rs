//! Orchestration of a full layout calculation.
//!
//! The engine is a pure function of its input: it performs no I/O, keeps no
//! state between calls and either returns a complete [`LayoutReport`] or a
//! single [`RackyardError`].

use log::{debug, info};

use rackyard_core::geometry::{Point3, Size3};

use crate::{
    config::EngineConfig,
    diagnostics::{Diagnostic, DiagnosticKind},
    error::RackyardError,
    layout::{
        AisleLayout, CentralAisle, LayoutReport, WarehouseLayout, WorkstationLayout,
        context::LayoutContext,
        pallets::assign_pallets,
        partition::{self, WarehousePartition, WorkstationSplit},
        side::{SideFrame, process_side},
    },
    model::{Side, WarehouseConfig, WorkstationConfig},
    validate::validate,
};

/// Calculates the layout of a warehouse.
///
/// The configuration is validated first; every measurement is then normalized
/// to centimeters and the warehouse is partitioned into workstations, sides
/// and storage cells before pallets are attached.
///
/// # Errors
///
/// Returns [`RackyardError::Validation`] for degenerate configurations,
/// [`RackyardError::Unit`] for measurements rejected under the strict unit
/// policy and [`RackyardError::Geometry`] for negative extents under the
/// reject policy.
pub fn calculate(
    config: &WarehouseConfig,
    engine: &EngineConfig,
) -> Result<LayoutReport, RackyardError> {
    validate(config)?;

    let mut ctx = LayoutContext::new(engine);

    let dims = &config.warehouse_dimensions;
    let unit = dims.unit.as_str();
    let width = ctx.measure("warehouse_dimensions.width", &dims.width, unit)?;
    let length = ctx.measure("warehouse_dimensions.length", &dims.length, unit)?;
    let height = ctx.measure("warehouse_dimensions.height", &dims.height, unit)?;
    let safety_margin = ctx.measure(
        "warehouse_dimensions.height_safety_margin",
        &dims.height_safety_margin,
        unit,
    )?;

    let count = config.workstation_count();
    if count != config.workstation_configs.len() {
        ctx.note(Diagnostic::new(
            DiagnosticKind::WorkstationCountMismatch,
            "num_workstations",
            format!(
                "{count} workstations declared but {} configured; widths use the declared count",
                config.workstation_configs.len()
            ),
        ));
    }

    let gap = ctx.measure(
        "workstation_gap",
        &config.workstation_gap,
        &config.workstation_gap_unit,
    )?;

    let workstation_width = partition::workstation_width(width, count, gap).ok_or_else(|| {
        RackyardError::Validation("num_workstations must be greater than zero".to_string())
    })?;
    let workstation_width = ctx.extent("workstation width", workstation_width)?;
    let usable_height = ctx.extent(
        "usable height",
        partition::usable_height(height, safety_margin),
    )?;
    let partition = WarehousePartition::new(workstation_width, usable_height, gap);

    debug!(
        workstation_width,
        usable_height,
        gap;
        "Warehouse partitioned"
    );

    let workstations = config
        .workstation_configs
        .iter()
        .enumerate()
        .map(|(index, workstation)| {
            layout_workstation(workstation, index, &partition, length, height, &mut ctx)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let layout = WarehouseLayout::new(Size3::new(width, length, height), workstations);
    let diagnostics = ctx.finish();

    info!(
        workstations = layout.workstations().len(),
        diagnostics = diagnostics.len();
        "Layout calculated"
    );

    Ok(LayoutReport::new(layout, diagnostics))
}

/// Lays out one workstation: central aisle, left side, right side, then pallets.
fn layout_workstation(
    workstation: &WorkstationConfig,
    index: usize,
    partition: &WarehousePartition,
    length: f64,
    full_height: f64,
    ctx: &mut LayoutContext,
) -> Result<WorkstationLayout, RackyardError> {
    let path = format!("workstation_configs[{index}]");
    let origin = partition.workstation_origin(index);

    let aisle_width = ctx.measure(
        &format!("{path}.aisle_space"),
        &workstation.aisle_space,
        &workstation.aisle_space_unit,
    )?;
    let side_width = ctx.extent(
        &format!("{path} side width"),
        partition::side_width(partition.workstation_width(), aisle_width),
    )?;
    let split = WorkstationSplit::new(origin.x(), side_width, aisle_width);

    let mut aisles = vec![AisleLayout::CentralAisle(CentralAisle::new(
        format!("central-aisle-{index}"),
        Point3::new(split.central_x(), 0.0, 0.0),
        Size3::new(split.aisle_width(), length, partition.usable_height()),
    ))];

    for side in Side::BOTH {
        let origin_x = match side {
            Side::Left => split.left_x(),
            Side::Right => split.right_x(),
        };
        let frame = SideFrame::new(
            origin_x,
            Size3::new(split.side_width(), length, partition.usable_height()),
        );
        let cells = process_side(workstation.side(side), frame, index, side, ctx)?;
        aisles.extend(cells.into_iter().map(AisleLayout::StorageAisle));
    }

    assign_pallets(&workstation.pallet_configs, &mut aisles, index, ctx)?;

    Ok(WorkstationLayout::new(
        format!("workstation_{}", index + 1),
        workstation.workstation_index.unwrap_or(index as u32),
        origin,
        Size3::new(partition.workstation_width(), length, full_height),
        aisles,
    ))
}
