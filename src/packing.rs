//! One-dimensional best-fit-decreasing bin packer with kerf and mixed
//! new-stock / inventory supply (spec.md §4.4).
//!
//! This generalizes the teacher crate's `guillotine`/`maxrects` best-area-fit
//! family of heuristics from 2D rectangle placement down to 1D length
//! placement: "best fit" here means minimizing leftover length rather than
//! leftover area.

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::request::CutReq;

/// A single finite, uniquely-consumable offcut unit offered to the packer.
#[derive(Copy, Clone, Debug)]
pub(crate) struct InventoryUnit {
    /// Identity of the inventory item this unit was expanded from.
    pub(crate) item_id: usize,
    /// Index of this unit within its item's quantity, for per-unit uniqueness.
    pub(crate) unit_index: u32,
    /// Length of this unit in mm.
    pub(crate) len_mm: u32,
}

/// A stock bar (new or reused) that has been opened and may still accept cuts.
#[derive(Clone, Debug)]
pub(crate) struct Bin {
    pub(crate) stock_length_mm: u32,
    pub(crate) remaining_mm: u32,
    pub(crate) cuts: SmallVec<[u32; 8]>,
    pub(crate) is_inventory: bool,
    pub(crate) inventory_unit: Option<(usize, u32)>,
}

impl Bin {
    pub(crate) fn new(stock_length_mm: u32, is_inventory: bool, inventory_unit: Option<(usize, u32)>) -> Self {
        Bin {
            stock_length_mm,
            remaining_mm: stock_length_mm,
            cuts: SmallVec::new(),
            is_inventory,
            inventory_unit,
        }
    }
}

/// Sum of residual (post-kerf) headroom across every bin. The Monte Carlo
/// driver's quality metric (spec §4.5 step 3); lower is better.
pub(crate) fn total_remaining(bins: &[Bin]) -> u64 {
    bins.iter().map(|b| u64::from(b.remaining_mm)).sum()
}

/// Best candidate seen so far while choosing which supply option to open a
/// new bin from: `(diff, is_inventory, inventory index, length)`.
struct BestCandidate {
    diff: u32,
    is_inventory: bool,
    inventory_idx: usize,
    len_mm: u32,
}

fn consider(
    best: &mut Option<BestCandidate>,
    diff: u32,
    is_inventory: bool,
    inventory_idx: usize,
    len_mm: u32,
    prefer_new_stock_on_exact_tie: bool,
) {
    let replace = match best {
        None => true,
        Some(b) if diff < b.diff => true,
        Some(b) if diff == b.diff => {
            // Spec §9 tie-break: prefer inventory on any tie, except a
            // strict MIXED-mode exact-fit tie, which prefers new stock so
            // an interchangeable fit doesn't burn a unique inventory piece.
            let prefer_inventory = !(diff == 0 && prefer_new_stock_on_exact_tie);
            if prefer_inventory {
                is_inventory && !b.is_inventory
            } else {
                !is_inventory && b.is_inventory
            }
        }
        _ => false,
    };
    if replace {
        *best = Some(BestCandidate {
            diff,
            is_inventory,
            inventory_idx,
            len_mm,
        });
    }
}

/// Runs one best-fit-decreasing packing pass over `requests` in the given
/// order (the caller controls ordering; the Monte Carlo driver shuffles it).
pub(crate) fn pack(
    dia: u32,
    requests: &[CutReq],
    new_stock_lengths: &[u32],
    inventory_units: &[InventoryUnit],
    kerf_mm: u32,
    prefer_new_stock_on_exact_tie: bool,
) -> Result<Vec<Bin>> {
    let mut bins: Vec<Bin> = Vec::new();
    let mut used = vec![false; inventory_units.len()];

    for req in requests {
        let needed = req.len_mm + kerf_mm;

        // Step 1: reuse an already-open bin, tightest fit first.
        let reuse = bins
            .iter()
            .enumerate()
            .filter(|(_, b)| b.remaining_mm >= needed)
            .min_by_key(|(_, b)| b.remaining_mm - needed)
            .map(|(i, _)| i);

        if let Some(idx) = reuse {
            log::debug!(
                "dia {dia}mm: reusing open bin {idx} ({}mm remaining) for {needed}mm cut",
                bins[idx].remaining_mm
            );
            bins[idx].remaining_mm -= needed;
            bins[idx].cuts.push(req.len_mm);
            continue;
        }

        // Step 2: open a new bin from the best-fitting unused supply option.
        let mut best: Option<BestCandidate> = None;
        for &len in new_stock_lengths {
            if len >= needed {
                consider(&mut best, len - needed, false, 0, len, prefer_new_stock_on_exact_tie);
            }
        }
        for (i, unit) in inventory_units.iter().enumerate() {
            if !used[i] && unit.len_mm >= needed {
                consider(
                    &mut best,
                    unit.len_mm - needed,
                    true,
                    i,
                    unit.len_mm,
                    prefer_new_stock_on_exact_tie,
                );
            }
        }

        if let Some(c) = best {
            let inventory_unit = if c.is_inventory {
                used[c.inventory_idx] = true;
                Some((
                    inventory_units[c.inventory_idx].item_id,
                    inventory_units[c.inventory_idx].unit_index,
                ))
            } else {
                None
            };
            log::debug!(
                "dia {dia}mm: opening new {}mm bin ({}) for {needed}mm cut, diff {}mm",
                c.len_mm,
                if c.is_inventory { "inventory" } else { "new stock" },
                c.diff
            );
            let mut bin = Bin::new(c.len_mm, c.is_inventory, inventory_unit);
            bin.remaining_mm -= needed;
            bin.cuts.push(req.len_mm);
            bins.push(bin);
            continue;
        }

        // No option comfortably fits; force-oversize onto the largest
        // new-stock length regardless of fit (spec §4.4 step 2 — this should
        // never require inventory). `remaining_mm` is clamped to 0 rather
        // than underflowing, per the source's `max(0, remaining)` residual
        // (spec §9) — this is also why a cut exactly equal to its stock
        // length (no room left for its own kerf) still reports 0 remainder
        // instead of failing.
        match new_stock_lengths.iter().copied().max() {
            Some(len) => {
                let mut bin = Bin::new(len, false, None);
                bin.remaining_mm = bin.remaining_mm.saturating_sub(needed);
                bin.cuts.push(req.len_mm);
                bins.push(bin);
            }
            None => {
                log::error!("no supply can satisfy a {}mm cut for diameter {dia}mm", req.len_mm);
                return Err(Error::UnservedRequest {
                    dia,
                    len_mm: req.len_mm,
                });
            }
        }
    }

    Ok(bins)
}
