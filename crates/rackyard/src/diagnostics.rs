//! Non-fatal findings reported alongside a layout.
//!
//! Degradations that do not abort a calculation (unit fallbacks, dropped
//! pallets, clamped geometry, ...) are collected as [`Diagnostic`]s and
//! returned with the layout. Each one is also logged at `warn` level.

use std::fmt::{self, Display};

use log::warn;
use serde::Serialize;

/// The category of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A unit tag was not recognized and a multiplier of 1.0 was used.
    UnknownUnit,
    /// A measurement was not a number and 0.0 was used.
    NonNumericValue,
    /// A measurement was null and 0.0 was used.
    MissingValue,
    /// The declared workstation count differs from the number of workstation configurations.
    WorkstationCountMismatch,
    /// More custom gaps were supplied than there are spaces between columns.
    SurplusGaps,
    /// A negative extent was kept as-is.
    NegativeGeometry,
    /// A negative extent was replaced with zero.
    ClampedGeometry,
    /// Storage cells are smaller than the practical minimum.
    UndersizedCell,
    /// A pallet color was not a valid CSS color and the default was used.
    InvalidColor,
    /// A pallet was skipped because its position is incomplete.
    IncompletePalletPosition,
    /// A pallet was dropped because no storage cell matches its position.
    UnmatchedPallet,
}

impl DiagnosticKind {
    fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::UnknownUnit => "unknown_unit",
            DiagnosticKind::NonNumericValue => "non_numeric_value",
            DiagnosticKind::MissingValue => "missing_value",
            DiagnosticKind::WorkstationCountMismatch => "workstation_count_mismatch",
            DiagnosticKind::SurplusGaps => "surplus_gaps",
            DiagnosticKind::NegativeGeometry => "negative_geometry",
            DiagnosticKind::ClampedGeometry => "clamped_geometry",
            DiagnosticKind::UndersizedCell => "undersized_cell",
            DiagnosticKind::InvalidColor => "invalid_color",
            DiagnosticKind::IncompletePalletPosition => "incomplete_pallet_position",
            DiagnosticKind::UnmatchedPallet => "unmatched_pallet",
        }
    }
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single non-fatal finding.
///
/// `subject` names the configuration element concerned, for example
/// `workstation_configs[0].left_side_config.gap_front` or
/// `workstation_configs[1].pallet_configs[3]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    subject: String,
    message: String,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.subject, self.message)
    }
}

/// An ordered collection of [`Diagnostic`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic and logs it.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        warn!(
            kind:% = diagnostic.kind,
            subject = diagnostic.subject.as_str();
            "{}", diagnostic.message
        );
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Returns the diagnostics of the given kind, in recording order.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
