//! Error taxonomy for the optimization pipeline (spec.md §7).
//!
//! Structural violations are *not* represented here: per spec.md §7 they are
//! non-fatal and accumulate as strings in [`crate::OptimizationResult::warnings`].

use thiserror::Error;

/// Fatal error raised while solving. Every variant names the offending
/// entity (bar mark or diameter) so callers can surface it directly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No stock lengths are configured for this diameter and no fallback applies.
    #[error("no stock catalog entry for diameter {dia}mm")]
    EmptyCatalog {
        /// Nominal bar diameter in mm.
        dia: u32,
    },

    /// A `ProjectSettings` value is out of range.
    #[error("invalid project settings: {reason}")]
    InvalidSettings {
        /// Human-readable description of the violated constraint.
        reason: String,
    },

    /// A `BarRun`'s geometry is inconsistent (unsorted/overlapping zones, etc).
    #[error("invalid run {bar_mark}: {reason}")]
    InvalidRun {
        /// Bar mark of the offending run.
        bar_mark: String,
        /// Human-readable description of the violated constraint.
        reason: String,
    },

    /// The required lap length is greater than or equal to the largest available stock length.
    #[error(
        "bar mark {bar_mark}: lap length {lap_mm}mm >= max stock length {max_stock_mm}mm for diameter {dia}mm"
    )]
    LapGeMaxStock {
        /// Bar mark of the offending run.
        bar_mark: String,
        /// Nominal bar diameter in mm.
        dia: u32,
        /// Required lap length in mm.
        lap_mm: u32,
        /// Largest stock length available for this diameter, in mm.
        max_stock_mm: u32,
    },

    /// A proposed splice piece would not make forward progress (`piece_len <= lap`).
    #[error(
        "bar mark {bar_mark}: splice planner produced a non-progressing cut ({piece_len_mm}mm <= lap {lap_mm}mm)"
    )]
    DegenerateCut {
        /// Bar mark of the offending run.
        bar_mark: String,
        /// Proposed piece length in mm.
        piece_len_mm: u32,
        /// Required lap length in mm.
        lap_mm: u32,
    },

    /// A cut request could not be satisfied by any available supply, new or inventory.
    #[error("no stock or inventory available to satisfy a {len_mm}mm cut request for diameter {dia}mm")]
    UnservedRequest {
        /// Nominal bar diameter in mm.
        dia: u32,
        /// Requested cut length in mm.
        len_mm: u32,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
