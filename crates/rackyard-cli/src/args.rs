//! Command-line argument definitions for the Rackyard CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Besides the input and output paths and the configuration
//! file, the engine policies can be overridden per run.

use clap::Parser;

use rackyard::config::{AppConfig, GeometryPolicy, UnitPolicy};

/// Command-line arguments for the Rackyard layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input warehouse configuration (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output layout file (JSON)
    #[arg(short, long, default_value = "layout.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Only check that the configuration produces a layout; write nothing
    #[arg(long)]
    pub check: bool,

    /// Reject unknown units and non-numeric measurements instead of falling back
    #[arg(long)]
    pub strict_units: bool,

    /// Override the negative geometry policy (reject, clamp, propagate)
    #[arg(long, value_name = "POLICY")]
    pub negative_geometry: Option<GeometryPolicy>,
}

impl Args {
    /// Applies the policy overrides given on the command line to `config`.
    pub fn apply_overrides(&self, config: AppConfig) -> AppConfig {
        let mut engine = *config.engine();
        if self.strict_units {
            engine = engine.with_units(UnitPolicy::Strict);
        }
        if let Some(policy) = self.negative_geometry {
            engine = engine.with_negative_geometry(policy);
        }
        config.with_engine(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_default_to_config() {
        let args = Args::parse_from(["rackyard", "warehouse.json"]);
        let config = args.apply_overrides(AppConfig::default());
        assert_eq!(config.engine().units(), UnitPolicy::Lenient);
        assert_eq!(config.engine().negative_geometry(), GeometryPolicy::Reject);
    }

    #[test]
    fn test_overrides_replace_engine_policies() {
        let args = Args::parse_from([
            "rackyard",
            "warehouse.json",
            "--strict-units",
            "--negative-geometry",
            "clamp",
        ]);
        let config = args.apply_overrides(AppConfig::default());
        assert_eq!(config.engine().units(), UnitPolicy::Strict);
        assert_eq!(config.engine().negative_geometry(), GeometryPolicy::Clamp);
    }

    #[test]
    fn test_unknown_geometry_policy_is_rejected() {
        let result =
            Args::try_parse_from(["rackyard", "in.json", "--negative-geometry", "ignore"]);
        assert!(result.is_err());
    }
}
