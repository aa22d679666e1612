//! Flattens splice-plan pieces and direct pieces into per-diameter cut
//! requests (spec.md §4.3).

use fnv::FnvHashMap;

use crate::types::{BarRun, DirectPiece, SplicePlanItem};

/// A single length that needs to be sawn from a stock bar of the same diameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct CutReq {
    pub(crate) len_mm: u32,
}

/// Expands splice-plan pieces (×`qty_parallel` from the originating run) and
/// direct pieces (×`qty`) into cut requests, partitioned by diameter.
pub(crate) fn flatten(
    runs: &[BarRun],
    splice_plan: &[SplicePlanItem],
    direct_pieces: &[DirectPiece],
) -> FnvHashMap<u32, Vec<CutReq>> {
    let runs_by_id: FnvHashMap<usize, &BarRun> = runs.iter().map(|r| (r.id, r)).collect();
    let mut by_dia: FnvHashMap<u32, Vec<CutReq>> = FnvHashMap::default();

    for item in splice_plan {
        let run = runs_by_id
            .get(&item.run_id)
            .expect("every splice plan item is generated from a run in `runs`");
        let reqs = by_dia.entry(run.dia).or_default();
        for _ in 0..run.qty_parallel {
            for piece in &item.pieces {
                reqs.push(CutReq {
                    len_mm: piece.length_mm,
                });
            }
        }
    }

    for piece in direct_pieces {
        let reqs = by_dia.entry(piece.dia).or_default();
        for _ in 0..piece.qty {
            reqs.push(CutReq {
                len_mm: piece.length_mm,
            });
        }
    }

    by_dia
}
