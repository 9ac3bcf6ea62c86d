use std::{
    collections::{
        BTreeMap,
        HashSet,
    },
    fmt,
    sync::OnceLock,
};

use regex::Regex;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::debug;

use crate::{
    core::{
        utils::count_occurrences,
        Color,
    },
    pool::{
        CardPool,
        PoolCard,
        COMMANDER_TAG,
    },
};

/// Names in the pool that are never dealt into a deck.
pub const EXCLUDED_CARDS: &[&str] = &[
    "Dungeon of the Mad Mage",
    "Lost Mine of Phandelver",
    "Tomb of Annihilation",
    "The Ring",
    "Undercity",
    "Cragflame",
];

pub const COMMAND_TOWER: &str = "Command Tower";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeGroup {
    Creature,
    InstantSorcery,
    ArtifactEnchantment,
    Planeswalker,
    Other,
}

impl TypeGroup {
    pub const ALL: [TypeGroup; 5] = [
        TypeGroup::Creature,
        TypeGroup::InstantSorcery,
        TypeGroup::ArtifactEnchantment,
        TypeGroup::Planeswalker,
        TypeGroup::Other,
    ];

    /// First match wins, so an artifact creature is a creature.
    pub fn of(type_line: &str) -> Self {
        let type_line = type_line.to_lowercase();
        if type_line.contains("creature") {
            TypeGroup::Creature
        } else if type_line.contains("instant") || type_line.contains("sorcery") {
            TypeGroup::InstantSorcery
        } else if type_line.contains("artifact") || type_line.contains("enchantment") {
            TypeGroup::ArtifactEnchantment
        } else if type_line.contains("planeswalker") {
            TypeGroup::Planeswalker
        } else {
            TypeGroup::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TypeGroup::Creature => "Creature",
            TypeGroup::InstantSorcery => "Instant / Sorcery",
            TypeGroup::ArtifactEnchantment => "Artifact / Enchantment",
            TypeGroup::Planeswalker => "Planeswalker",
            TypeGroup::Other => "Other",
        }
    }
}

impl fmt::Display for TypeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

pub type TypeGroups = BTreeMap<TypeGroup, Vec<PoolCard>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckResult {
    pub deck: Vec<PoolCard>,
    pub commanders: Vec<PoolCard>,
    pub type_groups: TypeGroups,
    pub decklist_text: String,
    pub card_count: usize,
}

fn in_either_pack(card: &PoolCard, pack1: &str, pack2: &str) -> bool {
    card.tag_list().iter().any(|tag| *tag == pack1 || *tag == pack2)
}

/// Cards tagged with either pack, in pool order. Unlike pack profiling, tags
/// must match exactly here.
pub fn cards_from_packs(pool: &CardPool, pack1: &str, pack2: &str) -> Vec<PoolCard> {
    pool.cards()
        .iter()
        .filter(|card| !card.maybe)
        .filter(|card| in_either_pack(card, pack1, pack2))
        .filter(|card| {
            let name = card.name.trim();
            !name.is_empty() && !EXCLUDED_CARDS.contains(&card.name.as_str())
        })
        .cloned()
        .collect()
}

/// Commander-tagged cards whose pack tag is one of the two packs, first row per name.
pub fn extract_commanders(pool: &CardPool, pack1: &str, pack2: &str) -> Vec<PoolCard> {
    let mut seen = HashSet::new();
    pool.cards()
        .iter()
        .filter(|card| {
            let tags = card.tag_list();
            if !tags.contains(&COMMANDER_TAG) {
                return false;
            }
            let pack = tags.iter().find(|tag| **tag != COMMANDER_TAG);
            matches!(pack, Some(pack) if *pack == pack1 || *pack == pack2)
        })
        .filter(|card| seen.insert(card.name.clone()))
        .cloned()
        .collect()
}

pub fn categorize(deck: &[PoolCard]) -> TypeGroups {
    let mut groups: TypeGroups = TypeGroup::ALL.iter().map(|&group| (group, Vec::new())).collect();
    for card in deck {
        groups.entry(TypeGroup::of(&card.card_type)).or_default().push(card.clone());
    }
    groups
}

fn decklist_lines(cards: &[PoolCard]) -> Vec<String> {
    let mut lines: Vec<String> = cards.iter().map(|card| format!("1 {}", card.name)).collect();
    lines.sort();
    lines
}

/// One `1 <name>` line per card, sorted; commanders follow after a blank line.
pub fn format_decklist(deck: &[PoolCard], commanders: &[PoolCard]) -> String {
    let main = decklist_lines(deck).join("\n");
    if commanders.is_empty() {
        return main;
    }
    format!("{}\n\n{}", main, decklist_lines(commanders).join("\n"))
}

pub fn build_basic_deck(
    pool: &CardPool,
    pack1: &str,
    pack2: &str,
    is_commander: bool,
) -> DeckResult {
    let deck = cards_from_packs(pool, pack1, pack2);
    let commanders = if is_commander { extract_commanders(pool, pack1, pack2) } else { Vec::new() };
    debug!(
        "Built deck from '{}' + '{}': {} cards, {} commanders",
        pack1,
        pack2,
        deck.len(),
        commanders.len()
    );

    DeckResult {
        type_groups: categorize(&deck),
        decklist_text: format_decklist(&deck, &commanders),
        card_count: deck.len(),
        deck,
        commanders,
    }
}

/// Adds the Koffers pick and Command Tower, then swaps basics for fixing lands.
/// Each fixing land replaces the first copy of the basic at the same index in
/// `lands_to_remove`; the fixing land is added even if that basic is missing.
pub fn apply_commander_additions(
    deck: &[PoolCard],
    koffers: PoolCard,
    fixing_lands: &[String],
    lands_to_remove: &[String],
) -> Vec<PoolCard> {
    let mut updated = deck.to_vec();
    updated.push(koffers);
    updated.push(PoolCard::new(COMMAND_TOWER, "Land", "", ""));

    for (index, land) in fixing_lands.iter().enumerate() {
        if let Some(basic) = lands_to_remove.get(index) {
            if let Some(position) = updated.iter().position(|card| &card.name == basic) {
                updated.remove(position);
            }
        }
        updated.push(PoolCard::new(land, "Land", "", ""));
    }

    updated
}

fn hybrid_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([WUBRG])/([WUBRG])\}").unwrap())
}

/// Colored pip counts over the non-land cards. Hybrid pips count once for each
/// color. Colors with no pips are left out.
pub fn mana_distribution(deck: &[PoolCard]) -> BTreeMap<Color, u32> {
    let mut counts: BTreeMap<Color, u32> = BTreeMap::new();

    for card in deck.iter().filter(|card| !card.card_type.to_lowercase().contains("land")) {
        for color in Color::ALL {
            let symbol = format!("{{{}}}", color.symbol());
            let pips = count_occurrences(&card.mana_cost, &symbol) as u32;
            if pips > 0 {
                *counts.entry(color).or_insert(0) += pips;
            }
        }

        for hybrid in hybrid_re().captures_iter(&card.mana_cost) {
            for symbol in [&hybrid[1], &hybrid[2]] {
                if let Some(color) = symbol.chars().next().and_then(Color::from_symbol) {
                    *counts.entry(color).or_insert(0) += 1;
                }
            }
        }
    }

    counts
}
