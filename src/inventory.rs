//! Supply-shaping strategies: SEQUENTIAL (inventory-first) and MIXED
//! (single combined pool) (spec.md §4.6).

use crate::error::Result;
use crate::montecarlo;
use crate::packing::{self, Bin, InventoryUnit};
use crate::request::CutReq;
use crate::types::{InventoryStrategy, OptimizationLevel};

/// Dispatches to the configured inventory strategy for one diameter's request set.
#[allow(clippy::too_many_arguments)]
pub(crate) fn solve_diameter(
    dia: u32,
    requests: &[CutReq],
    new_stock_lengths: &[u32],
    inventory_units: &[InventoryUnit],
    kerf_mm: u32,
    level: OptimizationLevel,
    strategy: InventoryStrategy,
    seed: u64,
) -> Result<Vec<Bin>> {
    match strategy {
        InventoryStrategy::Sequential => sequential(
            dia,
            requests,
            new_stock_lengths,
            inventory_units,
            kerf_mm,
            level,
            seed,
        ),
        InventoryStrategy::Mixed => montecarlo::search(
            dia,
            requests,
            new_stock_lengths,
            inventory_units,
            kerf_mm,
            true,
            level,
            seed,
        ),
    }
}

/// SEQUENTIAL: consume inventory first (smallest usable unit first), then
/// hand whatever doesn't fit to the Monte Carlo driver over new stock only.
fn sequential(
    dia: u32,
    requests: &[CutReq],
    new_stock_lengths: &[u32],
    inventory_units: &[InventoryUnit],
    kerf_mm: u32,
    level: OptimizationLevel,
    seed: u64,
) -> Result<Vec<Bin>> {
    let mut units = inventory_units.to_vec();
    units.sort_by_key(|u| u.len_mm);

    let mut sorted_requests = requests.to_vec();
    sorted_requests.sort_by_key(|r| std::cmp::Reverse(r.len_mm));

    let mut inventory_bins: Vec<Bin> = Vec::new();
    let mut used = vec![false; units.len()];
    let mut deferred: Vec<CutReq> = Vec::new();

    for req in &sorted_requests {
        let needed = req.len_mm + kerf_mm;

        let reuse = inventory_bins
            .iter()
            .enumerate()
            .filter(|(_, b)| b.remaining_mm >= needed)
            .min_by_key(|(_, b)| b.remaining_mm - needed)
            .map(|(i, _)| i);

        if let Some(idx) = reuse {
            inventory_bins[idx].remaining_mm -= needed;
            inventory_bins[idx].cuts.push(req.len_mm);
            continue;
        }

        let best = units
            .iter()
            .enumerate()
            .filter(|(i, u)| !used[*i] && u.len_mm >= needed)
            .min_by_key(|(_, u)| u.len_mm - needed);

        if let Some((i, unit)) = best {
            used[i] = true;
            let mut bin = Bin::new(unit.len_mm, true, Some((unit.item_id, unit.unit_index)));
            bin.remaining_mm -= needed;
            bin.cuts.push(req.len_mm);
            inventory_bins.push(bin);
            continue;
        }

        deferred.push(*req);
    }

    log::debug!(
        "diameter {dia}mm SEQUENTIAL: {} request(s) served from inventory, {} deferred to new stock",
        sorted_requests.len() - deferred.len(),
        deferred.len()
    );

    let new_stock_bins = montecarlo::search(
        dia,
        &deferred,
        new_stock_lengths,
        &[],
        kerf_mm,
        false,
        level,
        seed,
    )?;

    inventory_bins.extend(new_stock_bins);
    Ok(inventory_bins)
}
