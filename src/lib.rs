//! Splice planning and cutting-stock optimization for reinforcing-bar
//! ("rebar") fabrication.
//!
//! Given a stock catalog, lap-splice rules, on-site offcut inventory, bar
//! runs that require splicing, and already-detailed direct pieces, [`Solver`]
//! produces a splice plan, a cutting plan, a procurement list, and any
//! structural warnings.

#![deny(missing_docs)]

mod aggregate;
mod error;
mod inventory;
mod lookup;
mod montecarlo;
mod packing;
mod request;
mod splice;
mod types;


pub use error::{Error, Result};
pub use types::*;

use packing::{Bin, InventoryUnit};

/// Builder and entry point for optimizing a set of bar runs and direct
/// pieces against a configured stock catalog, lap rules, and offcut
/// inventory.
pub struct Solver {
    settings: ProjectSettings,
    catalog: Vec<StockCatalogItem>,
    rules: Vec<LapRule>,
    inventory: Vec<OffcutInventoryItem>,
    random_seed: u64,
}

impl Default for Solver {
    fn default() -> Self {
        Solver {
            settings: ProjectSettings::default(),
            catalog: Vec::new(),
            rules: Vec::new(),
            inventory: Vec::new(),
            random_seed: 1,
        }
    }
}

impl Solver {
    /// Creates a new solver with default settings and no catalog, rules, or inventory.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project-wide settings used by every stage of the solve.
    pub fn set_settings(&mut self, settings: ProjectSettings) -> &mut Self {
        self.settings = settings;
        self
    }

    /// Adds a stock catalog entry for one diameter. A later call for the
    /// same diameter replaces the earlier one.
    pub fn add_stock_catalog_item(&mut self, item: StockCatalogItem) -> &mut Self {
        self.catalog.retain(|c| c.dia != item.dia);
        self.catalog.push(item);
        self
    }

    /// Adds stock catalog entries. See [`Solver::add_stock_catalog_item`].
    pub fn add_stock_catalog_items<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = StockCatalogItem>,
    {
        for item in items {
            self.add_stock_catalog_item(item);
        }
        self
    }

    /// Adds a lap-splice rule. `(dia, lap_case)` is unique; a later call for
    /// the same pair replaces the earlier one.
    pub fn add_lap_rule(&mut self, rule: LapRule) -> &mut Self {
        self.rules
            .retain(|r| !(r.dia == rule.dia && r.lap_case == rule.lap_case));
        self.rules.push(rule);
        self
    }

    /// Adds lap-splice rules. See [`Solver::add_lap_rule`].
    pub fn add_lap_rules<I>(&mut self, rules: I) -> &mut Self
    where
        I: IntoIterator<Item = LapRule>,
    {
        for rule in rules {
            self.add_lap_rule(rule);
        }
        self
    }

    /// Adds an on-site offcut inventory item.
    pub fn add_offcut(&mut self, item: OffcutInventoryItem) -> &mut Self {
        self.inventory.push(item);
        self
    }

    /// Adds on-site offcut inventory items. See [`Solver::add_offcut`].
    pub fn add_offcuts<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = OffcutInventoryItem>,
    {
        for item in items {
            self.add_offcut(item);
        }
        self
    }

    /// Sets the random seed driving the Monte Carlo packing search. The same
    /// seed over the same input always produces the same result.
    pub fn set_random_seed(&mut self, seed: u64) -> &mut Self {
        self.random_seed = seed;
        self
    }

    /// Solves for a splice plan, cutting plan, procurement list, and
    /// structural warnings, given the configured catalog, rules, and
    /// inventory.
    pub fn solve(&self, runs: &[BarRun], direct_pieces: &[DirectPiece]) -> Result<OptimizationResult> {
        validate_settings(&self.settings)?;
        for run in runs {
            validate_run(run)?;
        }

        let mut warnings = Vec::new();
        let mut splice_plan = Vec::with_capacity(runs.len());
        for run in runs {
            let item = splice::plan_run(run, &self.rules, &self.catalog, &self.settings, &mut warnings)?;
            splice_plan.push(item);
        }

        let requests_by_dia = request::flatten(runs, &splice_plan, direct_pieces);

        let mut per_dia_bins: Vec<(u32, Vec<Bin>)> = Vec::with_capacity(requests_by_dia.len());
        for (&dia, requests) in &requests_by_dia {
            let new_stock_lengths = lookup::stock_lengths(&self.catalog, dia)?;
            let inventory_units = inventory_units_for(&self.inventory, dia);

            let bins = inventory::solve_diameter(
                dia,
                requests,
                &new_stock_lengths,
                &inventory_units,
                self.settings.kerf_mm,
                self.settings.optimization_level,
                self.settings.inventory_strategy,
                self.random_seed,
            )?;
            per_dia_bins.push((dia, bins));
        }

        let (cutting_plan, procurement, summary) = aggregate::aggregate(&per_dia_bins, &self.settings);

        Ok(OptimizationResult {
            splice_plan,
            cutting_plan,
            procurement,
            summary,
            warnings,
        })
    }
}

/// Expands an offcut inventory item's `quantity` into distinct, individually
/// consumable units, filtered to one diameter.
fn inventory_units_for(inventory: &[OffcutInventoryItem], dia: u32) -> Vec<InventoryUnit> {
    inventory
        .iter()
        .filter(|item| item.dia == dia)
        .flat_map(|item| {
            let item_id = item.id;
            let len_mm = item.length_mm;
            (0..item.quantity).map(move |unit_index| InventoryUnit {
                item_id,
                unit_index,
                len_mm,
            })
        })
        .collect()
}

fn validate_settings(settings: &ProjectSettings) -> Result<()> {
    if settings.rounding_step_mm < 1 {
        return Err(Error::InvalidSettings {
            reason: "roundingStepMm must be >= 1".into(),
        });
    }
    Ok(())
}

fn validate_run(run: &BarRun) -> Result<()> {
    for zone in &run.allowed_zones {
        if zone.start_mm >= zone.end_mm {
            return Err(Error::InvalidRun {
                bar_mark: run.bar_mark.clone(),
                reason: format!("zone [{}, {}) has start >= end", zone.start_mm, zone.end_mm),
            });
        }
    }
    for pair in run.allowed_zones.windows(2) {
        if pair[1].start_mm < pair[0].end_mm {
            return Err(Error::InvalidRun {
                bar_mark: run.bar_mark.clone(),
                reason: "allowed zones must be ascending and non-overlapping".into(),
            });
        }
    }
    Ok(())
}
