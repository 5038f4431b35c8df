//! Configuration types for Rackyard layout calculation.
//!
//! This module provides configuration structures that control how the layout
//! engine treats questionable input and how results are written. All types
//! implement [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining engine and output settings.
//! - [`EngineConfig`] - Selects the [`UnitPolicy`], [`GeometryPolicy`] and [`SurplusGapPolicy`].
//! - [`OutputConfig`] - Controls how layouts are serialized.
//!
//! # Example
//!
//! ```
//! # use rackyard::config::{AppConfig, GeometryPolicy};
//! let config = AppConfig::default();
//! assert_eq!(config.engine().negative_geometry(), GeometryPolicy::Reject);
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

pub use rackyard_core::units::UnitPolicy;

/// Top-level application configuration combining engine and output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Engine configuration section.
    #[serde(default)]
    engine: EngineConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified engine and output configurations.
    pub fn new(engine: EngineConfig, output: OutputConfig) -> Self {
        Self { engine, output }
    }

    /// Returns the engine configuration.
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns a copy with the given engine configuration.
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}

/// What to do when a width, length or height comes out negative.
///
/// This covers negative measurements in the input as well as derived extents
/// that go negative because gaps or the central aisle consume more than the
/// space available to them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryPolicy {
    /// Fail the calculation with a geometry error (default)
    #[default]
    Reject,
    /// Replace the negative extent with zero and record a diagnostic
    Clamp,
    /// Keep the negative extent and record a diagnostic
    Propagate,
}

impl FromStr for GeometryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(Self::Reject),
            "clamp" => Ok(Self::Clamp),
            "propagate" => Ok(Self::Propagate),
            other => Err(format!(
                "unknown geometry policy `{other}`, expected reject, clamp or propagate"
            )),
        }
    }
}

impl fmt::Display for GeometryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reject => "reject",
            Self::Clamp => "clamp",
            Self::Propagate => "propagate",
        };
        f.write_str(name)
    }
}

/// What to do with custom column gaps beyond the `columns - 1` that can be placed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurplusGapPolicy {
    /// Ignore the extra gaps entirely and record a diagnostic (default)
    #[default]
    Truncate,
    /// Subtract the extra gaps from the available width without placing them
    Keep,
}

/// Policies applied by the layout engine.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    units: UnitPolicy,

    #[serde(default)]
    negative_geometry: GeometryPolicy,

    #[serde(default)]
    surplus_gaps: SurplusGapPolicy,
}

impl EngineConfig {
    /// Creates a new [`EngineConfig`] with the specified policies.
    pub fn new(
        units: UnitPolicy,
        negative_geometry: GeometryPolicy,
        surplus_gaps: SurplusGapPolicy,
    ) -> Self {
        Self {
            units,
            negative_geometry,
            surplus_gaps,
        }
    }

    /// Returns the [`UnitPolicy`] used to normalize measurements.
    pub fn units(&self) -> UnitPolicy {
        self.units
    }

    /// Returns the [`GeometryPolicy`] applied to negative extents.
    pub fn negative_geometry(&self) -> GeometryPolicy {
        self.negative_geometry
    }

    /// Returns the [`SurplusGapPolicy`] applied to over-long gap lists.
    pub fn surplus_gaps(&self) -> SurplusGapPolicy {
        self.surplus_gaps
    }

    /// Returns a copy with the given [`UnitPolicy`].
    pub fn with_units(mut self, units: UnitPolicy) -> Self {
        self.units = units;
        self
    }

    /// Returns a copy with the given [`GeometryPolicy`].
    pub fn with_negative_geometry(mut self, policy: GeometryPolicy) -> Self {
        self.negative_geometry = policy;
        self
    }

    /// Returns a copy with the given [`SurplusGapPolicy`].
    pub fn with_surplus_gaps(mut self, policy: SurplusGapPolicy) -> Self {
        self.surplus_gaps = policy;
        self
    }
}

/// Serialization settings for rendered layouts.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    #[serde(default)]
    pretty: bool,
}

impl OutputConfig {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Returns true if JSON output should be pretty-printed.
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.engine().units(), UnitPolicy::Lenient);
        assert_eq!(config.engine().negative_geometry(), GeometryPolicy::Reject);
        assert_eq!(config.engine().surplus_gaps(), SurplusGapPolicy::Truncate);
        assert!(!config.output().pretty());
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let config: AppConfig = serde_json::from_str(
            r#"{"engine": {"negative_geometry": "clamp", "units": "strict"}}"#,
        )
        .unwrap();
        assert_eq!(config.engine().negative_geometry(), GeometryPolicy::Clamp);
        assert_eq!(config.engine().units(), UnitPolicy::Strict);
        assert_eq!(config.engine().surplus_gaps(), SurplusGapPolicy::Truncate);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result: Result<EngineConfig, _> =
            serde_json::from_str(r#"{"negative_geometry": "ignore"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_geometry_policy_from_str() {
        for policy in [
            GeometryPolicy::Reject,
            GeometryPolicy::Clamp,
            GeometryPolicy::Propagate,
        ] {
            assert_eq!(policy.to_string().parse::<GeometryPolicy>(), Ok(policy));
        }
        let err = "ignore".parse::<GeometryPolicy>().unwrap_err();
        assert!(err.contains("ignore"));
    }

    #[test]
    fn test_builder_style_overrides() {
        let engine = EngineConfig::default()
            .with_units(UnitPolicy::Strict)
            .with_negative_geometry(GeometryPolicy::Propagate)
            .with_surplus_gaps(SurplusGapPolicy::Keep);
        assert_eq!(engine.units(), UnitPolicy::Strict);
        assert_eq!(engine.negative_geometry(), GeometryPolicy::Propagate);
        assert_eq!(engine.surplus_gaps(), SurplusGapPolicy::Keep);
    }
}
