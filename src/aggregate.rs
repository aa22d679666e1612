//! Collapses packed bins into display patterns and computes summary
//! metrics (spec.md §4.7).

use fnv::FnvHashMap;

use crate::packing::Bin;
use crate::types::{CuttingPlanItem, OptimizationSummary, ProcurementItem, SourceType};
use crate::ProjectSettings;

/// Groups bins by `(dia, isInventory, stockLength, sorted cut pattern)`,
/// classifies residuals as offcut/waste, and derives procurement quantities
/// and global metrics.
pub(crate) fn aggregate(
    per_dia_bins: &[(u32, Vec<Bin>)],
    settings: &ProjectSettings,
) -> (Vec<CuttingPlanItem>, Vec<ProcurementItem>, OptimizationSummary) {
    let mut cutting_plan = Vec::new();
    let mut procurement: FnvHashMap<(u32, u32), u32> = FnvHashMap::default();

    let mut total_input_length_mm: u64 = 0;
    let mut total_parts_length_mm: u64 = 0;
    let mut total_weight_kg: f64 = 0.0;
    let mut total_bars: u32 = 0;

    for (dia, bins) in per_dia_bins {
        let mut patterns: FnvHashMap<(bool, u32, Vec<u32>), (u32, u32)> = FnvHashMap::default();

        for bin in bins {
            total_input_length_mm += u64::from(bin.stock_length_mm);
            total_parts_length_mm += bin.cuts.iter().map(|&c| u64::from(c)).sum::<u64>();
            total_weight_kg +=
                (f64::from(*dia).powi(2) / 162.0) * (f64::from(bin.stock_length_mm) / 1000.0);
            total_bars += 1;

            if !bin.is_inventory {
                *procurement.entry((*dia, bin.stock_length_mm)).or_insert(0) += 1;
            }

            let mut cut_pattern_mm: Vec<u32> = bin.cuts.iter().copied().collect();
            cut_pattern_mm.sort_unstable();

            let key = (bin.is_inventory, bin.stock_length_mm, cut_pattern_mm);
            let entry = patterns.entry(key).or_insert((0, bin.remaining_mm));
            entry.0 += 1;
        }

        for ((is_inventory, stock_length_mm, cut_pattern_mm), (count, remaining_mm)) in patterns {
            let (waste_mm, offcut_mm) = if remaining_mm >= settings.min_leftover_mm {
                (0, remaining_mm)
            } else {
                (remaining_mm, 0)
            };
            cutting_plan.push(CuttingPlanItem {
                dia: *dia,
                source_type: if is_inventory {
                    SourceType::ExistingInventory
                } else {
                    SourceType::NewStock
                },
                stock_length_mm,
                cut_pattern_mm,
                count,
                waste_mm,
                offcut_mm,
            });
        }
    }

    let procurement_items = procurement
        .into_iter()
        .map(|((dia, stock_length_mm), quantity)| ProcurementItem {
            dia,
            stock_length_mm,
            quantity,
            total_length_mm: u64::from(quantity) * u64::from(stock_length_mm),
        })
        .collect();

    let total_waste_mm = total_input_length_mm.saturating_sub(total_parts_length_mm);
    let waste_percent = if total_input_length_mm > 0 {
        round2(total_waste_mm as f64 / total_input_length_mm as f64 * 100.0)
    } else {
        0.0
    };

    let summary = OptimizationSummary {
        total_input_length_mm,
        total_parts_length_mm,
        total_waste_mm,
        waste_percent,
        total_weight_kg: round2(total_weight_kg),
        total_bars,
    };

    (cutting_plan, procurement_items, summary)
}

/// Rounds to two decimal places (0.01 precision), matching spec.md §4.7.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
