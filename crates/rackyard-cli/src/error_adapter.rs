//! Error adapter for converting RackyardError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use rackyard::RackyardError;

/// Adapter rendering a [`RackyardError`] through miette.
///
/// Each variant gets a stable diagnostic code and, where the fix is usually
/// the same, a help message.
pub struct ErrorAdapter<'a>(pub &'a RackyardError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            RackyardError::Io(_) => "rackyard::io",
            RackyardError::Config(_) => "rackyard::config",
            RackyardError::Validation(_) => "rackyard::validation",
            RackyardError::Unit(_) => "rackyard::unit",
            RackyardError::Geometry(_) => "rackyard::geometry",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            RackyardError::Io(_) => return None,
            RackyardError::Config(_) => {
                "check that the input is JSON with every required field present"
            }
            RackyardError::Validation(_) => {
                "workstation, row and floor counts must all be greater than zero"
            }
            RackyardError::Unit(_) => {
                "use one of cm, mm, m, km, in, ft or yd, or set `engine.units = \"lenient\"`"
            }
            RackyardError::Geometry(_) => {
                "reduce the gaps or aisle widths, or set `engine.negative_geometry` to \"clamp\""
            }
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
