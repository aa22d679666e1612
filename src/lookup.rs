//! Pure lookups over the lap-rule and stock-catalog tables (spec.md §4.1).

use crate::error::{Error, Result};
use crate::types::{LapCase, LapRule, StockCatalogItem};

/// Stock length used when a diameter has no catalog entry at all.
const FALLBACK_STOCK_LENGTH_MM: u32 = 12_000;

/// Multiplier applied to diameter for the fallback lap rule.
const FALLBACK_LAP_MULTIPLIER: u32 = 50;

/// Looks up the lap length for `(dia, lap_case)`, falling back to `50 * dia`
/// when no explicit rule exists.
pub(crate) fn lap_length(rules: &[LapRule], dia: u32, lap_case: LapCase) -> u32 {
    rules
        .iter()
        .find(|r| r.dia == dia && r.lap_case == lap_case)
        .map(|r| r.length_mm)
        .unwrap_or(dia * FALLBACK_LAP_MULTIPLIER)
}

/// Looks up the descending stock length list for `dia`, falling back to a
/// single `12000`mm entry when no catalog item exists. Fails loudly if the
/// matching catalog item exists but carries no lengths.
pub(crate) fn stock_lengths(catalog: &[StockCatalogItem], dia: u32) -> Result<Vec<u32>> {
    match catalog.iter().find(|c| c.dia == dia) {
        Some(item) => {
            if item.stock_lengths.is_empty() {
                return Err(Error::EmptyCatalog { dia });
            }
            let mut lengths = item.stock_lengths.clone();
            lengths.sort_unstable_by(|a, b| b.cmp(a));
            Ok(lengths)
        }
        None => Ok(vec![FALLBACK_STOCK_LENGTH_MM]),
    }
}

/// Largest stock length available for `dia`.
pub(crate) fn max_stock_length(catalog: &[StockCatalogItem], dia: u32) -> Result<u32> {
    Ok(stock_lengths(catalog, dia)?
        .into_iter()
        .next()
        .expect("stock_lengths always returns a non-empty list"))
}
