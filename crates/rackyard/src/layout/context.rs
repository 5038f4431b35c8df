//! Per-calculation state shared by the layout steps.

use rackyard_core::units::{Fallback, Normalizer, Scalar};

use crate::{
    config::{EngineConfig, GeometryPolicy, SurplusGapPolicy},
    diagnostics::{Diagnostic, DiagnosticKind, Diagnostics},
    error::RackyardError,
};

/// Applies the engine policies and collects diagnostics for one calculation.
///
/// A context lives for exactly one call of the engine.
#[derive(Debug)]
pub(crate) struct LayoutContext {
    normalizer: Normalizer,
    negative_geometry: GeometryPolicy,
    surplus_gaps: SurplusGapPolicy,
    diagnostics: Diagnostics,
}

impl LayoutContext {
    pub(crate) fn new(config: &EngineConfig) -> Self {
        Self {
            normalizer: Normalizer::new(config.units()),
            negative_geometry: config.negative_geometry(),
            surplus_gaps: config.surplus_gaps(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub(crate) fn surplus_gaps(&self) -> SurplusGapPolicy {
        self.surplus_gaps
    }

    /// Normalizes a measurement to centimeters, recording any fallback used.
    ///
    /// Every measurement is a length, so a negative value is subject to the
    /// negative geometry policy like any derived extent. `field` names the
    /// measurement in diagnostics and errors.
    pub(crate) fn measure(
        &mut self,
        field: &str,
        value: &Scalar,
        unit: &str,
    ) -> Result<f64, RackyardError> {
        let normalized = self
            .normalizer
            .normalize(value, unit)
            .map_err(|err| RackyardError::Unit(format!("{field}: {err}")))?;

        let (value, fallbacks) = normalized.into_parts();
        for fallback in fallbacks {
            let kind = match fallback {
                Fallback::UnknownUnit(_) => DiagnosticKind::UnknownUnit,
                Fallback::NonNumeric(_) => DiagnosticKind::NonNumericValue,
                Fallback::Missing => DiagnosticKind::MissingValue,
            };
            self.note(Diagnostic::new(kind, field, fallback.to_string()));
        }
        self.extent(field, value)
    }

    /// Applies the negative geometry policy to a derived extent.
    ///
    /// `quantity` names the extent in diagnostics and errors.
    pub(crate) fn extent(&mut self, quantity: &str, value: f64) -> Result<f64, RackyardError> {
        if value >= 0.0 {
            return Ok(value);
        }

        match self.negative_geometry {
            GeometryPolicy::Reject => Err(RackyardError::Geometry(format!(
                "{quantity} is negative ({value} cm)"
            ))),
            GeometryPolicy::Clamp => {
                self.note(Diagnostic::new(
                    DiagnosticKind::ClampedGeometry,
                    quantity,
                    format!("negative extent {value} cm clamped to 0"),
                ));
                Ok(0.0)
            }
            GeometryPolicy::Propagate => {
                self.note(Diagnostic::new(
                    DiagnosticKind::NegativeGeometry,
                    quantity,
                    format!("negative extent {value} cm kept"),
                ));
                Ok(value)
            }
        }
    }

    pub(crate) fn note(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn finish(self) -> Diagnostics {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use rackyard_core::units::UnitPolicy;

    use super::*;

    fn context(policy: GeometryPolicy) -> LayoutContext {
        LayoutContext::new(&EngineConfig::default().with_negative_geometry(policy))
    }

    #[test]
    fn test_measure_records_fallbacks() {
        let mut ctx = context(GeometryPolicy::Reject);
        let value = ctx.measure("gap", &Scalar::from(4.0), "leagues").unwrap();
        assert_approx_eq!(f64, value, 4.0);

        let value = ctx.measure("other", &Scalar::Null, "cm").unwrap();
        assert_approx_eq!(f64, value, 0.0);

        let diagnostics = ctx.finish();
        let kinds: Vec<_> = diagnostics.iter().map(Diagnostic::kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::UnknownUnit, DiagnosticKind::MissingValue]
        );
        assert_eq!(diagnostics.as_slice()[0].subject(), "gap");
    }

    #[test]
    fn test_measure_strict_error_names_field() {
        let mut ctx = LayoutContext::new(&EngineConfig::default().with_units(UnitPolicy::Strict));
        let err = ctx
            .measure("warehouse_dimensions.width", &Scalar::from("wide"), "cm")
            .unwrap_err();
        assert!(matches!(err, RackyardError::Unit(_)));
        assert!(err.to_string().contains("warehouse_dimensions.width"));
    }

    #[test]
    fn test_negative_measurement_follows_geometry_policy() {
        let mut ctx = context(GeometryPolicy::Reject);
        let err = ctx
            .measure("workstation_configs[0].aisle_space", &Scalar::from(-100.0), "cm")
            .unwrap_err();
        assert!(matches!(err, RackyardError::Geometry(_)));
        assert!(err.to_string().contains("aisle_space"), "{err}");

        let mut ctx = context(GeometryPolicy::Clamp);
        let value = ctx.measure("gap_left", &Scalar::from(-0.5), "m").unwrap();
        assert_approx_eq!(f64, value, 0.0);
        assert_eq!(ctx.finish().as_slice()[0].subject(), "gap_left");

        let mut ctx = context(GeometryPolicy::Propagate);
        let value = ctx.measure("gap_left", &Scalar::from(-0.5), "m").unwrap();
        assert_approx_eq!(f64, value, -50.0);
    }

    #[test]
    fn test_extent_policies() {
        let mut ctx = context(GeometryPolicy::Reject);
        assert_approx_eq!(f64, ctx.extent("width", 3.0).unwrap(), 3.0);
        assert!(matches!(
            ctx.extent("width", -1.0),
            Err(RackyardError::Geometry(_))
        ));

        let mut ctx = context(GeometryPolicy::Clamp);
        assert_approx_eq!(f64, ctx.extent("width", -1.0).unwrap(), 0.0);
        assert_eq!(
            ctx.finish().as_slice()[0].kind(),
            DiagnosticKind::ClampedGeometry
        );

        let mut ctx = context(GeometryPolicy::Propagate);
        assert_approx_eq!(f64, ctx.extent("width", -1.0).unwrap(), -1.0);
        assert_eq!(
            ctx.finish().as_slice()[0].kind(),
            DiagnosticKind::NegativeGeometry
        );
    }
}
