//! Splice planner: walks a bar run and chooses where to cut and overlap it
//! into stock-length pieces (spec.md §4.2).

use crate::error::{Error, Result};
use crate::lookup;
use crate::types::{BarRun, LapRule, ProjectSettings, SplicePiece, SplicePlanItem, StockCatalogItem};

/// Safety-minimum piece length enforced after rounding (spec §4.2 step 6).
const MIN_PIECE_LEN_MM: u32 = 1000;

/// "Long zone" safety buffer pushed back from the zone's end (spec §4.2 step 4).
const LONG_ZONE_BUFFER_MM: f64 = 100.0;

/// Plans splices for a single run, appending any structural-violation
/// warnings to `warnings`. Fatal errors (`LapGeMaxStock`, `DegenerateCut`)
/// abort the whole solve per spec.md §7.
pub(crate) fn plan_run(
    run: &BarRun,
    rules: &[LapRule],
    catalog: &[StockCatalogItem],
    settings: &ProjectSettings,
    warnings: &mut Vec<String>,
) -> Result<SplicePlanItem> {
    let lap = lookup::lap_length(rules, run.dia, run.lap_case);
    let max_stock = lookup::max_stock_length(catalog, run.dia)?;

    if lap >= max_stock {
        let err = Error::LapGeMaxStock {
            bar_mark: run.bar_mark.clone(),
            dia: run.dia,
            lap_mm: lap,
            max_stock_mm: max_stock,
        };
        log::error!("{err}");
        return Err(err);
    }

    let step = settings.rounding_step_mm.max(1);
    let mut pieces = Vec::new();
    let mut cursor: u32 = 0;
    let mut remaining: u32 = run.total_length_mm;

    loop {
        if remaining <= max_stock {
            pieces.push(SplicePiece {
                length_mm: remaining,
                start_mm: cursor,
                end_mm: cursor + remaining,
            });
            break;
        }

        let center_target = cursor as f64 + max_stock as f64 - lap as f64 / 2.0;
        let center_target_pos = center_target.round().max(0.0) as u32;

        let chosen_zone = run
            .allowed_zones
            .iter()
            .find(|z| z.contains(center_target_pos))
            .or_else(|| {
                run.allowed_zones
                    .iter()
                    .filter(|z| u64::from(z.end_mm) < u64::from(cursor) + u64::from(max_stock))
                    .max_by_key(|z| (z.end_mm, z.start_mm))
            });

        log::debug!(
            "[{}] cursor {cursor}mm: center target {center_target_pos}mm, chosen zone {:?}",
            run.bar_mark,
            chosen_zone.map(|z| (z.start_mm, z.end_mm))
        );

        let (raw_piece_len, violation) = match chosen_zone {
            Some(zone) => {
                let mut center = (zone.start_mm as f64 + zone.end_mm as f64) / 2.0;
                if zone.is_long() {
                    center = zone.end_mm as f64 - lap as f64 / 2.0 - LONG_ZONE_BUFFER_MM;
                }
                if center + lap as f64 / 2.0 - cursor as f64 > max_stock as f64 {
                    center = cursor as f64 + max_stock as f64 - lap as f64 / 2.0;
                }
                (center + lap as f64 / 2.0 - cursor as f64, false)
            }
            None => (max_stock as f64, true),
        };

        let piece_len = round_piece_len(raw_piece_len, step);

        log::debug!(
            "[{}] piece at [{cursor}, {}) len {piece_len}mm (raw {raw_piece_len:.1}mm)",
            run.bar_mark,
            cursor + piece_len
        );

        if piece_len <= lap {
            let err = Error::DegenerateCut {
                bar_mark: run.bar_mark.clone(),
                piece_len_mm: piece_len,
                lap_mm: lap,
            };
            log::error!("{err}");
            return Err(err);
        }

        if violation {
            let splice_pos = (cursor as f64 + piece_len as f64 - lap as f64 / 2.0).round() as u32;
            let msg = format!(
                "STRUCTURAL WARNING [{}]: Forced splice at {} mm. No allowed zone reachable with stock {} mm.",
                run.bar_mark, splice_pos, max_stock
            );
            log::warn!("{msg}");
            warnings.push(msg);
        }

        pieces.push(SplicePiece {
            length_mm: piece_len,
            start_mm: cursor,
            end_mm: cursor + piece_len,
        });

        cursor += piece_len - lap;
        remaining -= piece_len - lap;
    }

    Ok(SplicePlanItem {
        run_id: run.id,
        bar_mark: run.bar_mark.clone(),
        group_id: 0,
        pieces,
    })
}

/// Rounds `raw` down to a multiple of `step`, then clamps it up to the
/// [`MIN_PIECE_LEN_MM`] safety minimum.
fn round_piece_len(raw: f64, step: u32) -> u32 {
    let floored = (raw.max(0.0) / step as f64).floor() * step as f64;
    (floored as u32).max(MIN_PIECE_LEN_MM)
}
