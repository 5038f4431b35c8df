//! Unit tags and normalization to canonical centimeters.
//!
//! Every linear quantity in a warehouse configuration arrives as a raw
//! [`Scalar`] paired with a unit tag. The [`Normalizer`] converts such a pair
//! into centimeters using the fixed multiplier table held by [`Unit`].
//!
//! How bad input is treated is selected by a [`UnitPolicy`]:
//!
//! - [`UnitPolicy::Lenient`] never fails. An unrecognized unit tag uses a
//!   multiplier of `1.0`, a non-numeric value becomes `0.0` and a missing value
//!   becomes `0.0`. Each such substitution is reported as a [`Fallback`].
//! - [`UnitPolicy::Strict`] turns each of those cases into a [`UnitError`].
//!
//! # Examples
//!
//! ```
//! # use rackyard_core::units::{Normalizer, Scalar, UnitPolicy};
//! let normalizer = Normalizer::new(UnitPolicy::Lenient);
//!
//! let width = normalizer.normalize(&Scalar::from(2.5), "m").unwrap();
//! assert_eq!(width.value(), 250.0);
//! assert!(width.fallbacks().is_empty());
//!
//! let odd = normalizer.normalize(&Scalar::from(12.0), "furlong").unwrap();
//! assert_eq!(odd.value(), 12.0);
//! assert_eq!(odd.fallbacks().len(), 1);
//! ```

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use log::debug;
use serde::{
    Deserialize, Deserializer,
    de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor},
};
use thiserror::Error;

/// Tag used when a configuration omits the unit of a measurement.
pub const DEFAULT_UNIT_TAG: &str = "cm";

/// Supported linear units.
///
/// The canonical unit is [`Unit::Centimeter`]; every other unit is defined by
/// its multiplier into centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Centimeter,
    Meter,
    Kilometer,
    Millimeter,
    Inch,
    Foot,
    Yard,
}

impl Unit {
    /// The unit all layout geometry is expressed in.
    pub const CANONICAL: Unit = Unit::Centimeter;

    /// All supported units, in table order.
    pub const ALL: [Unit; 7] = [
        Unit::Centimeter,
        Unit::Meter,
        Unit::Kilometer,
        Unit::Millimeter,
        Unit::Inch,
        Unit::Foot,
        Unit::Yard,
    ];

    /// Number of centimeters in one of this unit.
    pub fn multiplier(self) -> f64 {
        match self {
            Unit::Centimeter => 1.0,
            Unit::Meter => 100.0,
            Unit::Kilometer => 100_000.0,
            Unit::Millimeter => 0.1,
            Unit::Inch => 2.54,
            Unit::Foot => 30.48,
            Unit::Yard => 91.44,
        }
    }

    /// Converts a value expressed in this unit into centimeters.
    pub fn to_canonical(self, value: f64) -> f64 {
        value * self.multiplier()
    }

    /// Converts a value in centimeters back into this unit.
    pub fn from_canonical(self, value: f64) -> f64 {
        value / self.multiplier()
    }

    /// Returns the short tag of this unit as used in configurations.
    pub fn tag(self) -> &'static str {
        match self {
            Unit::Centimeter => "cm",
            Unit::Meter => "m",
            Unit::Kilometer => "km",
            Unit::Millimeter => "mm",
            Unit::Inch => "in",
            Unit::Foot => "ft",
            Unit::Yard => "yd",
        }
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    /// Parses a unit tag, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Unit::ALL
            .into_iter()
            .find(|unit| unit.tag() == tag)
            .ok_or_else(|| UnitError::UnknownUnit(s.to_string()))
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A raw measurement value as supplied by a configuration source.
///
/// Deserialization never fails for a present field: numbers, numeric or
/// non-numeric strings, `null` and any other shape are all captured so the
/// [`Normalizer`] can apply its policy to them.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Scalar {
    /// A numeric value.
    Number(f64),
    /// A string, which may or may not hold a number.
    Text(String),
    /// An explicit `null` or an omitted value.
    #[default]
    Null,
    /// Any other shape (boolean, list, map), described by its kind.
    Invalid(&'static str),
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(value) => write!(f, "{value}"),
            Scalar::Text(text) => write!(f, "{text:?}"),
            Scalar::Null => write!(f, "null"),
            Scalar::Invalid(kind) => write!(f, "<{kind}>"),
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a measurement value")
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Scalar, E> {
        Ok(Scalar::Invalid("boolean"))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
        Ok(Scalar::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
        Ok(Scalar::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
        Ok(Scalar::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
        Ok(Scalar::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
        Ok(Scalar::Text(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Scalar, E> {
        Ok(Scalar::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Scalar, E> {
        Ok(Scalar::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Scalar, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScalarVisitor)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Scalar, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Scalar::Invalid("list"))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Scalar, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Scalar::Invalid("map"))
    }
}

/// How the [`Normalizer`] treats unknown units and unusable values.
///
/// The names match external configuration strings (snake_case).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitPolicy {
    /// Substitute documented defaults and report a [`Fallback`] (default)
    #[default]
    Lenient,
    /// Fail with a [`UnitError`]
    Strict,
}

/// Multiplier used for an unrecognized unit tag under [`UnitPolicy::Lenient`].
pub const FALLBACK_MULTIPLIER: f64 = 1.0;

/// Value used for a missing or non-numeric measurement under [`UnitPolicy::Lenient`].
pub const FALLBACK_VALUE: f64 = 0.0;

/// A default substituted by lenient normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Fallback {
    /// The unit tag was not recognized; [`FALLBACK_MULTIPLIER`] was used.
    UnknownUnit(String),
    /// The value could not be read as a number; [`FALLBACK_VALUE`] was used.
    NonNumeric(String),
    /// The value was absent; [`FALLBACK_VALUE`] was used.
    Missing,
}

impl Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::UnknownUnit(tag) => {
                write!(f, "unknown unit `{tag}`, using multiplier {FALLBACK_MULTIPLIER}")
            }
            Fallback::NonNumeric(value) => {
                write!(f, "non-numeric value {value}, using {FALLBACK_VALUE}")
            }
            Fallback::Missing => write!(f, "missing value, using {FALLBACK_VALUE}"),
        }
    }
}

/// Errors raised by strict normalization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("unknown unit `{0}`")]
    UnknownUnit(String),

    #[error("value {0} is not a number")]
    NonNumeric(String),

    #[error("value is missing")]
    Missing,
}

/// The outcome of normalizing a single measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    value: f64,
    fallbacks: Vec<Fallback>,
}

impl Normalized {
    /// The value in centimeters.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Defaults substituted while producing the value, in the order applied.
    pub fn fallbacks(&self) -> &[Fallback] {
        &self.fallbacks
    }

    /// Splits the outcome into its value and fallbacks.
    pub fn into_parts(self) -> (f64, Vec<Fallback>) {
        (self.value, self.fallbacks)
    }
}

/// Converts raw measurements into canonical centimeters under a [`UnitPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    policy: UnitPolicy,
}

impl Normalizer {
    pub fn new(policy: UnitPolicy) -> Self {
        Self { policy }
    }

    /// Normalizes `value`, expressed in the unit named by `unit_tag`, to centimeters.
    ///
    /// A missing or non-numeric value short-circuits to the fallback value
    /// without consulting the unit tag.
    ///
    /// # Errors
    ///
    /// Returns a [`UnitError`] only under [`UnitPolicy::Strict`].
    pub fn normalize(&self, value: &Scalar, unit_tag: &str) -> Result<Normalized, UnitError> {
        let number = match value {
            Scalar::Number(number) => *number,
            Scalar::Text(text) => match text.trim().parse::<f64>() {
                Ok(number) if number.is_finite() => number,
                _ => return self.fall_back(Fallback::NonNumeric(value.to_string())),
            },
            Scalar::Null => return self.fall_back(Fallback::Missing),
            Scalar::Invalid(_) => return self.fall_back(Fallback::NonNumeric(value.to_string())),
        };

        match unit_tag.parse::<Unit>() {
            Ok(unit) => Ok(Normalized {
                value: unit.to_canonical(number),
                fallbacks: Vec::new(),
            }),
            Err(err) => match self.policy {
                UnitPolicy::Strict => Err(err),
                UnitPolicy::Lenient => {
                    debug!(unit = unit_tag; "Unknown unit, using fallback multiplier");
                    Ok(Normalized {
                        value: number * FALLBACK_MULTIPLIER,
                        fallbacks: vec![Fallback::UnknownUnit(unit_tag.to_string())],
                    })
                }
            },
        }
    }

    fn fall_back(&self, fallback: Fallback) -> Result<Normalized, UnitError> {
        match (self.policy, fallback) {
            (UnitPolicy::Strict, Fallback::Missing) => Err(UnitError::Missing),
            (UnitPolicy::Strict, Fallback::NonNumeric(value)) => Err(UnitError::NonNumeric(value)),
            (UnitPolicy::Strict, Fallback::UnknownUnit(tag)) => Err(UnitError::UnknownUnit(tag)),
            (UnitPolicy::Lenient, fallback) => {
                debug!(fallback:% = fallback; "Using fallback measurement value");
                Ok(Normalized {
                    value: FALLBACK_VALUE,
                    fallbacks: vec![fallback],
                })
            }
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn unit_strategy() -> impl Strategy<Value = Unit> {
        prop::sample::select(Unit::ALL.to_vec())
    }

    /// Converting to centimeters and back reproduces the original value.
    fn check_unit_roundtrip(unit: Unit, value: f64) -> Result<(), TestCaseError> {
        let normalized = Normalizer::default()
            .normalize(&Scalar::from(value), unit.tag())
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let back = unit.from_canonical(normalized.value());

        prop_assert!(approx_eq!(f64, back, value, epsilon = 1e-9, ulps = 4));
        Ok(())
    }

    /// Lenient normalization never fails, whatever the unit tag.
    fn check_lenient_never_fails(tag: &str, value: f64) -> Result<(), TestCaseError> {
        let result = Normalizer::new(UnitPolicy::Lenient).normalize(&Scalar::from(value), tag);
        prop_assert!(result.is_ok());
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_unit_roundtrip(unit in unit_strategy(), value in -1.0e6f64..1.0e6) {
            check_unit_roundtrip(unit, value)?;
        }

        #[test]
        fn prop_lenient_never_fails(tag in "[a-zA-Z ]{0,8}", value in -1.0e6f64..1.0e6) {
            check_lenient_never_fails(&tag, value)?;
        }
    }
}
