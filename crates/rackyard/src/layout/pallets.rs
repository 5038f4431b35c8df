//! Attachment of declared pallets to the storage cells they occupy.
//!
//! A pallet's position is a lookup key, not a transform: it is matched on
//! side, row, floor, depth level and global column against the cells of its
//! workstation. The first matching cell receives the pallet. Pallets with an
//! incomplete position, or whose position matches no cell, are left out of
//! the layout and reported as diagnostics.

use log::debug;

use rackyard_core::color::PalletColor;

use crate::{
    diagnostics::{Diagnostic, DiagnosticKind},
    error::RackyardError,
    layout::{AisleLayout, PalletDims, PlacedPallet, StorageCell, context::LayoutContext},
    model::{PalletConfig, PalletPosition, Side},
};

/// A complete pallet position, ready for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub side: Side,
    pub row: u32,
    pub floor: u32,
    pub deep: u32,
    pub col: u32,
}

impl CellKey {
    /// Returns true if `cell` sits at this key.
    pub fn matches(&self, cell: &StorageCell) -> bool {
        let indices = cell.indices();
        cell.side() == self.side
            && indices.row == self.row
            && indices.floor == self.floor
            && indices.deep == self.deep
            && indices.col == self.col
    }
}

/// Why a pallet position cannot be turned into a [`CellKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// No position was given at all.
    NoPosition,
    /// Some fields are absent.
    Incomplete(Vec<&'static str>),
    /// The side is neither left nor right.
    UnknownSide(String),
}

/// Builds the lookup key for a pallet position.
pub fn cell_key(position: Option<&PalletPosition>) -> Result<CellKey, KeyError> {
    let position = match position {
        Some(position) if !position.is_empty() => position,
        _ => return Err(KeyError::NoPosition),
    };

    let missing = position.missing_fields();
    let (Some(side), Some(row), Some(floor), Some(deep), Some(col)) = (
        position.side.as_deref(),
        position.row,
        position.floor,
        position.deep,
        position.col,
    ) else {
        return Err(KeyError::Incomplete(missing));
    };
    if !missing.is_empty() {
        return Err(KeyError::Incomplete(missing));
    }

    let side = side
        .parse::<Side>()
        .map_err(|_| KeyError::UnknownSide(side.to_string()))?;

    Ok(CellKey {
        side,
        row,
        floor,
        deep,
        col,
    })
}

/// Attaches each pallet to the first storage cell matching its position.
///
/// The central aisle never receives pallets. `workstation` is the zero-based
/// index used to name pallets in diagnostics.
pub(crate) fn assign_pallets(
    pallets: &[PalletConfig],
    aisles: &mut [AisleLayout],
    workstation: usize,
    ctx: &mut LayoutContext,
) -> Result<(), RackyardError> {
    let mut placed = 0usize;

    for (index, pallet) in pallets.iter().enumerate() {
        let subject = format!("workstation_configs[{workstation}].pallet_configs[{index}]");

        let key = match cell_key(pallet.position.as_ref()) {
            Ok(key) => key,
            Err(err) => {
                let (kind, message) = match err {
                    KeyError::NoPosition => (
                        DiagnosticKind::IncompletePalletPosition,
                        "pallet has no position information".to_string(),
                    ),
                    KeyError::Incomplete(missing) => (
                        DiagnosticKind::IncompletePalletPosition,
                        format!("pallet position is missing {}", missing.join(", ")),
                    ),
                    KeyError::UnknownSide(side) => (
                        DiagnosticKind::UnmatchedPallet,
                        format!("pallet side `{side}` is neither left nor right"),
                    ),
                };
                ctx.note(Diagnostic::new(kind, subject, message));
                continue;
            }
        };

        let placement = place(pallet, &subject, ctx)?;

        let target = aisles
            .iter_mut()
            .filter_map(AisleLayout::as_storage_mut)
            .find(|cell| key.matches(cell));

        match target {
            Some(cell) => {
                cell.add_pallet(placement);
                placed += 1;
            }
            None => ctx.note(Diagnostic::new(
                DiagnosticKind::UnmatchedPallet,
                subject,
                format!(
                    "no {} storage cell at row {}, floor {}, deep {}, col {}",
                    key.side, key.row, key.floor, key.deep, key.col
                ),
            )),
        }
    }

    debug!(workstation, declared = pallets.len(), placed; "Pallets assigned");
    Ok(())
}

/// Resolves a pallet's dimensions, weight and color.
fn place(
    pallet: &PalletConfig,
    subject: &str,
    ctx: &mut LayoutContext,
) -> Result<PlacedPallet, RackyardError> {
    let unit = pallet.dimensions_unit.as_str();
    let dims = PalletDims {
        length: ctx.measure(&format!("{subject}.length"), &pallet.length, unit)?,
        width: ctx.measure(&format!("{subject}.width"), &pallet.width, unit)?,
        height: ctx.measure(&format!("{subject}.height"), &pallet.height, unit)?,
    };

    let color = match pallet.color.as_deref() {
        None => PalletColor::default(),
        Some(color) => PalletColor::new(color).unwrap_or_else(|err| {
            ctx.note(Diagnostic::new(
                DiagnosticKind::InvalidColor,
                format!("{subject}.color"),
                format!("{err}, using {}", PalletColor::default()),
            ));
            PalletColor::default()
        }),
    };

    Ok(PlacedPallet::new(
        pallet.kind.clone(),
        pallet.weight.unwrap_or(0.0),
        color,
        dims,
    ))
}
