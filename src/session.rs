use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};
use tracing::debug;

use crate::{
    deck::{
        self,
        DeckResult,
    },
    pool::CardPool,
    synergy::{
        CompatibilityScore,
        PackOption,
        SweepReport,
    },
};

/// Identifies the pack-1 selection a sweep was started for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepTicket {
    pub pack1: String,
    pub generation: u64,
}

/// Per-user draft state: the chosen packs, the cube variant, and the
/// compatibility indicators of the latest accepted sweep.
#[derive(Debug, Default)]
pub struct DraftSession {
    pack1: Option<String>,
    pack2: Option<String>,
    is_commander: bool,
    generation: u64,
    indicators: HashMap<String, CompatibilityScore>,
}

impl DraftSession {
    pub fn new(is_commander: bool) -> Self {
        Self { is_commander, ..Default::default() }
    }

    pub fn pack1(&self) -> Option<&str> {
        self.pack1.as_deref()
    }

    pub fn pack2(&self) -> Option<&str> {
        self.pack2.as_deref()
    }

    pub fn is_commander(&self) -> bool {
        self.is_commander
    }

    /// Choosing a new first pack invalidates every sweep started before it.
    pub fn select_pack1(&mut self, pack: &str) -> SweepTicket {
        self.generation += 1;
        self.pack1 = Some(pack.to_string());
        self.pack2 = None;
        self.indicators.clear();
        SweepTicket { pack1: pack.to_string(), generation: self.generation }
    }

    pub fn select_pack2(&mut self, pack: &str) {
        self.pack2 = Some(pack.to_string());
    }

    pub fn is_current(&self, ticket: &SweepTicket) -> bool {
        ticket.generation == self.generation && self.pack1.as_deref() == Some(ticket.pack1.as_str())
    }

    /// Every other pack in the pool, keyed by its own name.
    pub fn candidates(&self, pool: &CardPool) -> Vec<PackOption> {
        pool.pack_names()
            .into_iter()
            .filter(|pack| self.pack1.as_deref() != Some(pack.as_str()))
            .map(|pack| PackOption::new(pack.clone(), pack))
            .collect()
    }

    /// Stores the report's indicators if it belongs to the current selection.
    /// Stale reports are dropped and `None` is returned.
    pub fn accept(&mut self, report: SweepReport) -> Option<&HashMap<String, CompatibilityScore>> {
        let ticket = SweepTicket { pack1: report.pack1, generation: report.generation };
        if !self.is_current(&ticket) {
            debug!(
                "Dropping stale sweep for '{}' (generation {}, current {})",
                ticket.pack1, ticket.generation, self.generation
            );
            return None;
        }

        self.indicators = report.results.into_iter().collect();
        Some(&self.indicators)
    }

    pub fn indicator(&self, option_id: &str) -> Option<&CompatibilityScore> {
        self.indicators.get(option_id)
    }

    /// The two-pack deck, once both packs are chosen.
    pub fn build_deck(&self, pool: &CardPool) -> Option<DeckResult> {
        let (pack1, pack2) = (self.pack1.as_deref()?, self.pack2.as_deref()?);
        Some(deck::build_basic_deck(pool, pack1, pack2, self.is_commander))
    }
}
