use std::{
    collections::BTreeMap,
    fmt,
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::debug;

use super::categories::PowerCategory;
use crate::{
    core::CardRecord,
    pool::PoolCard,
};

pub const MAX_POWER_SCORE: u32 = 100;

/// What the meter needs to know about a card.
pub trait DeckCard {
    fn card_name(&self) -> &str;
    fn card_type_line(&self) -> &str;
    fn card_oracle_text(&self) -> &str {
        ""
    }
}

impl DeckCard for CardRecord {
    fn card_name(&self) -> &str {
        &self.name
    }

    fn card_type_line(&self) -> &str {
        &self.type_line
    }

    fn card_oracle_text(&self) -> &str {
        &self.oracle_text
    }
}

impl DeckCard for PoolCard {
    fn card_name(&self) -> &str {
        &self.name
    }

    fn card_type_line(&self) -> &str {
        &self.card_type
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerLevel {
    Nice,
    Mild,
    Moderate,
    Strong,
    Bully,
    BigBully,
}

impl PowerLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 100 => PowerLevel::BigBully,
            s if s >= 80 => PowerLevel::Bully,
            s if s >= 60 => PowerLevel::Strong,
            s if s >= 40 => PowerLevel::Moderate,
            s if s >= 20 => PowerLevel::Mild,
            _ => PowerLevel::Nice,
        }
    }
}

impl fmt::Display for PowerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PowerLevel::Nice => "Nice",
            PowerLevel::Mild => "Mild",
            PowerLevel::Moderate => "Moderate",
            PowerLevel::Strong => "Strong",
            PowerLevel::Bully => "Bully",
            PowerLevel::BigBully => "Big Bully",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckPowerResult {
    /// Weighted category total, capped at 100.
    pub score: u32,
    /// Raw count for every category, zeros included.
    pub category_counts: BTreeMap<PowerCategory, u32>,
}

impl DeckPowerResult {
    pub fn level(&self) -> PowerLevel {
        PowerLevel::from_score(self.score)
    }

    pub fn count(&self, category: PowerCategory) -> u32 {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }
}

fn count_category<C: DeckCard + ?Sized>(cards: &[&C], category: PowerCategory) -> u32 {
    if category == PowerCategory::Planeswalkers {
        return cards
            .iter()
            .filter(|card| card.card_type_line().to_lowercase().contains("planeswalker"))
            .count() as u32;
    }

    let names = category.card_names();
    let by_name = cards
        .iter()
        .filter(|card| {
            let name = card.card_name().to_lowercase();
            names.iter().any(|target| name.contains(target))
        })
        .count();

    // Name and text hits are separate tallies, so a card can count twice
    let by_text = match category.text_pattern() {
        Some(pattern) => {
            cards.iter().filter(|card| pattern.is_match(card.card_oracle_text())).count()
        }
        None => 0,
    };

    (by_name + by_text) as u32
}

/// Power of the deck and its commanders taken together.
pub fn score<C: DeckCard>(deck: &[C], commanders: &[C]) -> DeckPowerResult {
    let cards: Vec<&C> = deck.iter().chain(commanders).collect();

    let category_counts: BTreeMap<PowerCategory, u32> = PowerCategory::ALL
        .iter()
        .map(|&category| (category, count_category(&cards, category)))
        .collect();

    let total: u32 =
        category_counts.iter().map(|(category, count)| category.weight() * count).sum();
    let score = total.min(MAX_POWER_SCORE);
    debug!("Deck power: {} cards, raw {}, score {}", cards.len(), total, score);

    DeckPowerResult { score, category_counts }
}
