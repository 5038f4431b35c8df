//! Example: Calculating a layout from the configuration model
//!
//! This example builds a warehouse configuration directly from the model
//! types instead of parsing JSON, then prints a summary of the layout.

use rackyard::{
    LayoutBuilder,
    model::{
        PalletConfig, PalletPosition, SideConfig, WarehouseConfig, WarehouseDimensions,
        WorkstationConfig,
    },
    units::Scalar,
};

fn side(num_aisles: u32, deep: u32) -> SideConfig {
    SideConfig {
        num_floors: 4,
        num_rows: 3,
        num_aisles,
        deep,
        custom_gaps: vec![Scalar::from(15.0)],
        gap_front: Scalar::from(0.2),
        gap_back: Scalar::from(0.2),
        gap_left: Scalar::from(0.1),
        gap_right: Scalar::from(0.1),
        wall_gap_unit: "m".to_string(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building warehouse from the configuration model...\n");

    let pallet = PalletConfig {
        kind: "euro".to_string(),
        weight: Some(22.0),
        length: Scalar::from(1.2),
        width: Scalar::from(0.8),
        height: Scalar::from(0.144),
        dimensions_unit: "m".to_string(),
        color: Some("tan".to_string()),
        position: Some(PalletPosition {
            side: Some("right".to_string()),
            row: Some(2),
            floor: Some(1),
            deep: Some(2),
            col: Some(2),
        }),
    };

    let workstation = WorkstationConfig {
        workstation_index: None,
        aisle_space: Scalar::from(3.0),
        aisle_space_unit: "m".to_string(),
        left_side_config: side(2, 1),
        right_side_config: side(1, 2),
        pallet_configs: vec![pallet],
    };

    let config = WarehouseConfig {
        id: "demo".to_string(),
        warehouse_dimensions: WarehouseDimensions {
            length: Scalar::from(30.0),
            width: Scalar::from(24.0),
            height: Scalar::from(10.0),
            height_safety_margin: Scalar::from(1.0),
            unit: "m".to_string(),
        },
        num_workstations: Some(2),
        workstation_gap: Scalar::from(200.0),
        workstation_gap_unit: "cm".to_string(),
        workstation_configs: vec![workstation.clone(), workstation],
    };

    let builder = LayoutBuilder::default();
    let report = builder.calculate(&config)?;

    for workstation in report.layout().workstations() {
        let position = workstation.position();
        let dimensions = workstation.dimensions();
        println!(
            "{} at x={:.1} cm: {:.1} x {:.1} x {:.1} cm",
            workstation.id(),
            position.x(),
            dimensions.width(),
            dimensions.length(),
            dimensions.height()
        );

        let cells: Vec<_> = workstation.storage_cells().collect();
        let pallets: usize = cells.iter().map(|cell| cell.pallets().len()).sum();
        println!("  {} storage cells, {} pallets", cells.len(), pallets);
    }

    for diagnostic in report.diagnostics() {
        println!("warning: {diagnostic}");
    }

    let json = builder.render_json(&config, &report)?;
    println!("\nResponse is {} bytes of JSON", json.len());

    Ok(())
}
