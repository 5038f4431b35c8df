//! Rackyard CLI library
//!
//! This module contains the core CLI logic for the Rackyard layout tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info};

use rackyard::{LayoutBuilder, RackyardError};

/// Run the Rackyard CLI application
///
/// This function reads the warehouse configuration named by the arguments,
/// calculates its layout and writes the JSON response envelope to the output
/// file. With `--check` the layout is only validated and nothing is written.
/// Policy flags on the command line take precedence over the configuration file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `RackyardError` for:
/// - File I/O errors
/// - Configuration loading and parsing errors
/// - Validation errors
/// - Unit and geometry errors
pub fn run(args: &Args) -> Result<(), RackyardError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        check = args.check;
        "Processing warehouse"
    );

    let app_config = args.apply_overrides(config::load_config(args.config.as_ref())?);
    debug!(
        units:? = app_config.engine().units(),
        negative_geometry:% = app_config.engine().negative_geometry();
        "Engine policies"
    );

    let source = fs::read_to_string(&args.input)?;

    let builder = LayoutBuilder::new(app_config);
    let warehouse = builder.parse(&source)?;

    if args.check {
        builder.validate(&warehouse)?;
        info!(input_path = args.input; "Configuration is valid");
        return Ok(());
    }

    let report = builder.calculate(&warehouse)?;
    let json = builder.render_json(&warehouse, &report)?;

    fs::write(&args.output, json)?;

    info!(
        output_file = args.output,
        diagnostics = report.diagnostics().len();
        "Layout exported successfully"
    );

    Ok(())
}
