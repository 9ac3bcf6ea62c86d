use std::{
    cmp::Ordering,
    collections::HashMap,
    fmt,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::{
    detector::{
        self,
        SynergyFinding,
    },
    taxonomy::{
        self,
        StrategyPattern,
        CREATURE_TYPES,
        MECHANICS,
        STRATEGY_PATTERNS,
    },
};
use crate::core::{
    utils::count_occurrences,
    CardRecord,
    ColorSet,
};

/// Below this the pattern match is considered noise and a fallback label is used.
pub const MIN_THEME_STRENGTH: f32 = 5.0;
pub const FALLBACK_THEME_STRENGTH: f32 = 3.0;
pub const SUB_THEME_RATIO: f32 = 0.3;
const KEYWORD_MATCH_CAP: usize = 3;
const DENSITY_MIN_CARDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveArchetype {
    Aggressive,
    BigMana,
    Midrange,
    Balanced,
}

impl fmt::Display for CurveArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CurveArchetype::Aggressive => "Aggressive",
            CurveArchetype::BigMana => "Big Mana",
            CurveArchetype::Midrange => "Midrange",
            CurveArchetype::Balanced => "Balanced",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeProfile {
    pub card_count: usize,
    pub color_identity: ColorSet,
    pub average_cmc: f32,
    pub primary_strategy: String,
    pub theme_strength: f32,
    pub sub_themes: Vec<String>,
    pub tribes: Vec<String>,
    pub keywords: Vec<String>,
    pub curve_archetype: CurveArchetype,
    pub card_synergies: Vec<SynergyFinding>,
}

/// Builds the theme profile of one pack.
///
/// `cards` must not be empty; for an empty slice the average mana value is NaN
/// and the curve is meaningless. Callers filter empty packs out first.
pub fn profile(cards: &[CardRecord]) -> ThemeProfile {
    let color_identity: ColorSet =
        cards.iter().flat_map(|card| card.color_identity.iter().copied()).collect();
    let average_cmc = cards.iter().map(|card| card.cmc).sum::<f32>() / cards.len() as f32;

    let tribes = frequent_matches(cards, CREATURE_TYPES, |card, tribe| {
        card.type_lower().contains(tribe)
    });
    let keywords = frequent_matches(cards, MECHANICS, |card, mechanic| {
        card.oracle_lower().contains(mechanic)
            || card.keywords.iter().any(|k| k.to_lowercase().contains(mechanic))
    });

    let ranked = rank_strategies(cards);
    let (mut primary_strategy, mut theme_strength, sub_themes) = match ranked.first() {
        Some(&(name, top)) => {
            let subs = ranked[1..]
                .iter()
                .filter(|(_, score)| *score >= top * SUB_THEME_RATIO)
                .map(|(name, _)| name.to_string())
                .collect();
            (name.to_string(), top, subs)
        }
        None => (String::new(), 0.0, Vec::new()),
    };

    if theme_strength < MIN_THEME_STRENGTH {
        primary_strategy = fallback_strategy(average_cmc, &keywords, &tribes);
        theme_strength = FALLBACK_THEME_STRENGTH;
    }

    ThemeProfile {
        card_count: cards.len(),
        color_identity,
        average_cmc,
        primary_strategy,
        theme_strength,
        sub_themes,
        tribes,
        keywords,
        curve_archetype: curve_archetype(cards),
        card_synergies: detector::detect(cards),
    }
}

pub fn curve_archetype(cards: &[CardRecord]) -> CurveArchetype {
    let total = cards.len() as f32;
    let (mut low, mut mid, mut high) = (0usize, 0usize, 0usize);

    for card in cards {
        match card.cmc.floor() as i64 {
            1 | 2 => low += 1,
            3 | 4 => mid += 1,
            n if n >= 5 => high += 1,
            _ => {}
        }
    }

    if low as f32 / total > 0.6 {
        CurveArchetype::Aggressive
    } else if high as f32 / total > 0.4 {
        CurveArchetype::BigMana
    } else if mid as f32 / total > 0.5 {
        CurveArchetype::Midrange
    } else {
        CurveArchetype::Balanced
    }
}

fn pattern_score(card: &CardRecord, pattern: &StrategyPattern) -> f32 {
    let text = card.oracle_lower();
    let type_line = card.type_lower();
    let name = card.name_lower();
    let mut score = 0.0;

    for keyword in pattern.keywords {
        let hits = count_occurrences(&text, keyword).min(KEYWORD_MATCH_CAP);
        score += pattern.weight * hits as f32;
    }

    for creature_type in pattern.types {
        if type_line.contains(creature_type) {
            score += pattern.weight * 1.5;
        }
    }

    for signature in pattern.card_names {
        if name.contains(signature) || text.contains(signature) {
            score += pattern.weight * 2.0;
        }
    }

    score
}

/// Positive pattern totals, best first. Ties keep taxonomy order.
pub fn rank_strategies(cards: &[CardRecord]) -> Vec<(&'static str, f32)> {
    let mut ranked: Vec<(&'static str, f32)> = STRATEGY_PATTERNS
        .iter()
        .filter_map(|pattern| {
            let mut total = 0.0;
            let mut matching_cards = 0usize;
            for card in cards {
                let card_score = pattern_score(card, pattern);
                if card_score > 0.0 {
                    total += card_score;
                    matching_cards += 1;
                }
            }

            if matching_cards >= DENSITY_MIN_CARDS {
                total += matching_cards as f32 * 0.5;
            }

            (total > 0.0).then_some((pattern.name, total))
        })
        .collect();

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked
}

fn fallback_strategy(average_cmc: f32, keywords: &[String], tribes: &[String]) -> String {
    let has = |mechanic: &str| keywords.iter().any(|k| k == mechanic);

    let label = if average_cmc <= 2.5 && has("flying") {
        taxonomy::AGGRO_FLYERS
    } else if average_cmc <= 2.5 {
        taxonomy::AGGRO
    } else if average_cmc >= 4.5 {
        taxonomy::BIG_MANA_RAMP
    } else if has("counter") || has("draw") {
        taxonomy::CONTROL
    } else if has("sacrifice") || has("graveyard") {
        taxonomy::SACRIFICE_GRAVEYARD
    } else if has("artifact") {
        taxonomy::ARTIFACTS_MATTER
    } else if let Some(tribe) = tribes.first() {
        return format!("{}{}", capitalize(tribe), taxonomy::TRIBAL_SUFFIX);
    } else {
        taxonomy::MIDRANGE
    };

    label.to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Labels matched by at least two cards, most frequent first (ties keep list order).
fn frequent_matches<F>(cards: &[CardRecord], labels: &[&str], matches: F) -> Vec<String>
where
    F: Fn(&CardRecord, &str) -> bool,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for card in cards {
        for label in labels {
            if matches(card, label) {
                *counts.entry(*label).or_insert(0) += 1;
            }
        }
    }

    let mut frequent: Vec<(&str, usize)> = labels
        .iter()
        .filter_map(|l| counts.get(l).map(|&c| (*l, c)))
        .filter(|(_, c)| *c >= 2)
        .collect();
    frequent.sort_by(|a, b| b.1.cmp(&a.1));
    frequent.into_iter().map(|(label, _)| label.to_string()).collect()
}
