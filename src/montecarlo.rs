//! Monte Carlo driver: repeats the packing pass with shuffled request
//! orders and keeps the best result (spec.md §4.5).

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::error::Result;
use crate::packing::{self, Bin, InventoryUnit};
use crate::request::CutReq;
use crate::types::OptimizationLevel;

/// Runs the seeded Monte Carlo search for one diameter's request set and
/// returns the lowest-total-remainder bin set found.
#[allow(clippy::too_many_arguments)]
pub(crate) fn search(
    dia: u32,
    requests: &[CutReq],
    new_stock_lengths: &[u32],
    inventory_units: &[InventoryUnit],
    kerf_mm: u32,
    prefer_new_stock_on_exact_tie: bool,
    level: OptimizationLevel,
    seed: u64,
) -> Result<Vec<Bin>> {
    let mut rng: StdRng = SeedableRng::seed_from_u64(seed);

    // Seed pass: requests sorted descending by length (BFD).
    let mut sorted = requests.to_vec();
    sorted.sort_by_key(|r| std::cmp::Reverse(r.len_mm));

    let mut best = packing::pack(
        dia,
        &sorted,
        new_stock_lengths,
        inventory_units,
        kerf_mm,
        prefer_new_stock_on_exact_tie,
    )?;
    let mut best_quality = packing::total_remaining(&best);

    for _ in 1..level.iterations() {
        let mut shuffled = requests.to_vec();
        shuffled.shuffle(&mut rng);

        let bins = packing::pack(
            dia,
            &shuffled,
            new_stock_lengths,
            inventory_units,
            kerf_mm,
            prefer_new_stock_on_exact_tie,
        )?;
        let quality = packing::total_remaining(&bins);

        if quality < best_quality {
            log::debug!(
                "diameter {dia}mm: Monte Carlo improved quality {best_quality} -> {quality}"
            );
            best_quality = quality;
            best = bins;
        }
    }

    Ok(best)
}
