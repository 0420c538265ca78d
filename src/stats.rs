//! Opt-in render statistics: `lazy_static`-backed counters printed
//! through `prettytable-rs`. Gathering is behind an explicit
//! `StatsCollector` that a caller passes in (or doesn't) rather than an
//! always-on global, so the integrator itself carries no implicit
//! global mutable state — a `GLOBAL_STATS` instance is provided for
//! callers who want drop-in-singleton convenience, but nothing in this
//! crate touches it unless asked to.

use std::collections::HashMap;
use std::sync::Mutex;

use prettytable::{cell, row, Table};

lazy_static::lazy_static! {
    /// A ready-made global collector. Entirely optional: pass `&GLOBAL_STATS` to the
    /// integrator if you want it, or build a private `StatsCollector`
    /// per render instead.
    pub static ref GLOBAL_STATS: StatsCollector = StatsCollector::new();
}

#[derive(Default)]
struct Counters {
    rays_traced: u64,
    strategies_evaluated: HashMap<(usize, usize), u64>,
    splats_produced: u64,
}

/// Counts rays traced and strategies evaluated across a render. Cheap to
/// construct; every method takes `&self` (interior `Mutex`) so it can be
/// shared across worker threads the way the tile renderer's samplers are.
pub struct StatsCollector {
    counters: Mutex<Counters>,
}

impl StatsCollector {
    pub fn new() -> Self {
        StatsCollector {
            counters: Mutex::new(Counters::default()),
        }
    }

    pub fn record_ray(&self) {
        self.counters.lock().unwrap().rays_traced += 1;
    }

    pub fn record_strategy(&self, s: usize, t: usize) {
        *self
            .counters
            .lock()
            .unwrap()
            .strategies_evaluated
            .entry((s, t))
            .or_insert(0) += 1;
    }

    pub fn record_splat(&self) {
        self.counters.lock().unwrap().splats_produced += 1;
    }

    pub fn rays_traced(&self) -> u64 {
        self.counters.lock().unwrap().rays_traced
    }

    pub fn splats_produced(&self) -> u64 {
        self.counters.lock().unwrap().splats_produced
    }

    pub fn strategy_count(&self, s: usize, t: usize) -> u64 {
        *self
            .counters
            .lock()
            .unwrap()
            .strategies_evaluated
            .get(&(s, t))
            .unwrap_or(&0)
    }

    /// Renders the counters as a `prettytable` table, one row per (s, t)
    /// strategy plus a summary row.
    pub fn table(&self) -> Table {
        let counters = self.counters.lock().unwrap();
        let mut table = Table::new();
        table.add_row(row!["strategy (s, t)", "evaluations"]);
        let mut keys: Vec<_> = counters.strategies_evaluated.keys().copied().collect();
        keys.sort_unstable();
        for (s, t) in keys {
            let count = counters.strategies_evaluated[&(s, t)];
            table.add_row(row![format!("s={}, t={}", s, t), count]);
        }
        table.add_row(row!["rays traced", counters.rays_traced]);
        table.add_row(row!["splats produced", counters.splats_produced]);
        table
    }

    pub fn print(&self) {
        self.table().printstd();
    }
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new()
    }
}
