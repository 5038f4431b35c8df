//! Rackyard - Warehouse racking layouts from declarative configurations.
//!
//! Turns a warehouse configuration (overall dimensions, a row of workstations,
//! each with left and right storage sides of rows, floors and columns, plus
//! placed pallets) into a fully resolved three-dimensional layout in
//! centimeters, ready for a rendering client.

pub mod config;
pub mod diagnostics;
pub mod layout;
pub mod model;
pub mod validate;

mod error;

pub use rackyard_core::{color, geometry, units};

pub use error::RackyardError;

use log::{debug, info, trace};
use serde::Serialize;

use config::AppConfig;
use diagnostics::Diagnostic;
use layout::{LayoutReport, WarehouseLayout};
use model::WarehouseConfig;

/// Builder for parsing warehouse configurations and calculating layouts.
///
/// # Examples
///
/// ```rust,no_run
/// use rackyard::{LayoutBuilder, config::AppConfig};
///
/// let source = std::fs::read_to_string("warehouse.json").expect("Failed to read");
///
/// let builder = LayoutBuilder::new(AppConfig::default());
///
/// // Parse source to configuration model
/// let config = builder.parse(&source).expect("Failed to parse");
///
/// // Calculate the layout
/// let report = builder.calculate(&config).expect("Failed to calculate");
///
/// // Render the response envelope as JSON
/// let json = builder.render_json(&config, &report).expect("Failed to render");
/// ```
#[derive(Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including engine policies and output settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the application configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a JSON warehouse configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RackyardError::Config`] if the source is not valid JSON or
    /// does not have the expected shape.
    pub fn parse(&self, source: &str) -> Result<WarehouseConfig, RackyardError> {
        info!("Parsing warehouse configuration");

        let config: WarehouseConfig = serde_json::from_str(source)?;

        debug!(
            warehouse_id = config.id.as_str(),
            workstations = config.workstation_configs.len();
            "Configuration parsed successfully"
        );
        trace!(config:?; "Parsed configuration");

        Ok(config)
    }

    /// Calculate the layout of a warehouse.
    ///
    /// # Errors
    ///
    /// Returns [`RackyardError`] for validation, unit or geometry failures.
    /// No partial layout is ever returned.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use rackyard::LayoutBuilder;
    ///
    /// let source = std::fs::read_to_string("warehouse.json").expect("Failed to read");
    /// let builder = LayoutBuilder::default();
    /// let config = builder.parse(&source).expect("Failed to parse");
    /// let report = builder.calculate(&config).expect("Failed to calculate");
    ///
    /// for diagnostic in report.diagnostics() {
    ///     println!("{diagnostic}");
    /// }
    /// ```
    pub fn calculate(&self, config: &WarehouseConfig) -> Result<LayoutReport, RackyardError> {
        info!(warehouse_id = config.id.as_str(); "Calculating layout");
        layout::engine::calculate(config, self.config.engine())
    }

    /// Check that a configuration produces a layout, discarding the result.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`LayoutBuilder::calculate`].
    pub fn validate(&self, config: &WarehouseConfig) -> Result<(), RackyardError> {
        self.calculate(config).map(|report| {
            debug!(diagnostics = report.diagnostics().len(); "Configuration is valid");
        })
    }

    /// Render a calculated layout as a JSON response envelope.
    ///
    /// The envelope holds `success`, `warehouse_id`, `layout` and `diagnostics`.
    ///
    /// # Errors
    ///
    /// Returns [`RackyardError::Config`] if serialization fails.
    pub fn render_json(
        &self,
        config: &WarehouseConfig,
        report: &LayoutReport,
    ) -> Result<String, RackyardError> {
        let response = LayoutResponse {
            success: true,
            warehouse_id: &config.id,
            layout: report.layout(),
            diagnostics: report.diagnostics().as_slice(),
        };

        let json = if self.config.output().pretty() {
            serde_json::to_string_pretty(&response)?
        } else {
            serde_json::to_string(&response)?
        };
        Ok(json)
    }
}

/// The JSON envelope written for a successful calculation.
#[derive(Debug, Serialize)]
struct LayoutResponse<'a> {
    success: bool,
    warehouse_id: &'a str,
    layout: &'a WarehouseLayout,
    diagnostics: &'a [Diagnostic],
}
