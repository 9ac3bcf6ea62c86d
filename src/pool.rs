use std::{
    collections::{
        HashMap,
        HashSet,
    },
    fs,
    path::Path,
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::info;

use crate::core::{
    utils::{
        colors_in_mana_cost,
        deserialize_bool_or_string,
        mana_value,
    },
    CardRecord,
    CubeError,
};

pub const COMMANDER_TAG: &str = "zz_Commander";

/// One row of the cube list as handed over by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoolCard {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Type", alias = "type")]
    pub card_type: String,
    #[serde(default, alias = "Mana", alias = "manacost")]
    pub mana_cost: String,
    #[serde(default, alias = "Tags")]
    pub tags: String,
    #[serde(
        default,
        alias = "Maybe",
        alias = "maybeboard",
        deserialize_with = "deserialize_bool_or_string"
    )]
    pub maybe: bool,
}

impl PoolCard {
    pub fn new(name: &str, card_type: &str, mana_cost: &str, tags: &str) -> Self {
        Self {
            name: name.to_string(),
            card_type: card_type.to_string(),
            mana_cost: mana_cost.to_string(),
            tags: tags.to_string(),
            maybe: false,
        }
    }

    pub fn tag_list(&self) -> Vec<&str> {
        self.tags.split(';').map(|t| t.trim()).filter(|t| !t.is_empty()).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CardPool {
    cards: Vec<PoolCard>,
    by_name: HashMap<String, usize>,
}

impl CardPool {
    pub fn new(cards: Vec<PoolCard>) -> Self {
        let mut by_name = HashMap::new();
        for (index, card) in cards.iter().enumerate() {
            // First row wins, matching a linear scan
            by_name.entry(card.name.clone()).or_insert(index);
        }
        Self { cards, by_name }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CubeError> {
        let content = fs::read_to_string(path).map_err(|e| {
            CubeError::FailedToLoadPool(format!("{}: {}", path.display(), e))
        })?;
        let cards: Vec<PoolCard> = serde_json::from_str(&content)?;
        info!("Loaded {} pool rows from {}", cards.len(), path.display());
        Ok(Self::new(cards))
    }

    pub fn cards(&self) -> &[PoolCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn row(&self, name: &str) -> Option<&PoolCard> {
        self.by_name.get(name).map(|&index| &self.cards[index])
    }

    /// Names of every card whose tag string mentions the pack.
    pub fn pack_card_names(&self, pack: &str) -> Vec<String> {
        self.cards
            .iter()
            .filter(|card| card.tags.contains(pack))
            .map(|card| card.name.clone())
            .collect()
    }

    pub fn pack_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut packs = Vec::new();
        for card in &self.cards {
            for tag in card.tag_list() {
                if tag != COMMANDER_TAG && seen.insert(tag) {
                    packs.push(tag.to_string());
                }
            }
        }
        packs
    }
}

/// Metadata built from the pool row alone: no rules text, colors and mana value
/// guessed from the printed cost.
pub fn fallback_record(name: &str, row: Option<&PoolCard>) -> CardRecord {
    let (type_line, mana_cost) = match row {
        Some(row) => (row.card_type.clone(), row.mana_cost.clone()),
        None => (String::new(), String::new()),
    };

    CardRecord {
        name: name.to_string(),
        oracle_text: String::new(),
        color_identity: colors_in_mana_cost(&mana_cost),
        cmc: mana_value(&mana_cost),
        type_line,
        mana_cost,
        keywords: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    fn sample_pool() -> CardPool {
        CardPool::new(vec![
            PoolCard::new("Soul Warden", "Creature - Human Cleric", "{W}", "W - Lifegain"),
            PoolCard::new("Counterspell", "Instant", "{U}{U}", "U - Control; W - Lifegain 2"),
            PoolCard::new("Ajani", "Legendary Creature", "{1}{W}", "W - Lifegain;zz_Commander"),
        ])
    }

    #[test]
    fn test_pack_membership_is_substring() {
        let pool = sample_pool();
        let names = pool.pack_card_names("W - Lifegain");
        assert_eq!(names, vec!["Soul Warden", "Counterspell", "Ajani"]);
        assert_eq!(pool.pack_card_names("U - Control"), vec!["Counterspell"]);
    }

    #[test]
    fn test_pack_names_skip_commander_marker() {
        let pool = sample_pool();
        assert_eq!(pool.pack_names(), vec!["W - Lifegain", "U - Control", "W - Lifegain 2"]);
    }

    #[test]
    fn test_fallback_record() {
        let pool = sample_pool();
        let record = fallback_record("Counterspell", pool.row("Counterspell"));
        assert_eq!(record.oracle_text, "");
        assert_eq!(record.type_line, "Instant");
        assert_eq!(record.cmc, 2.0);
        assert_eq!(record.color_identity.iter().copied().collect::<Vec<_>>(), vec![Color::Blue]);

        let unknown = fallback_record("Mystery Card", None);
        assert_eq!(unknown.cmc, 0.0);
        assert!(unknown.color_identity.is_empty());
        assert_eq!(unknown.type_line, "");
    }

    #[test]
    fn test_rows_accept_capitalized_keys() {
        let json =
            r#"[{ "Name": "Sol Ring", "Type": "Artifact", "Mana": "{1}", "Tags": "C - Rocks" }]"#;
        let cards: Vec<PoolCard> = serde_json::from_str(json).unwrap();
        assert_eq!(cards[0].name, "Sol Ring");
        assert_eq!(cards[0].card_type, "Artifact");
        assert!(!cards[0].maybe);
    }

    #[test]
    fn test_maybe_flag_accepts_strings_and_booleans() {
        let json = r#"[
            { "Name": "Sol Ring", "Maybe": "true" },
            { "Name": "Mana Crypt", "Maybe": "False" },
            { "Name": "Mox Diamond", "maybe": true },
            { "Name": "Chrome Mox" }
        ]"#;
        let cards: Vec<PoolCard> = serde_json::from_str(json).unwrap();
        let flags: Vec<bool> = cards.iter().map(|card| card.maybe).collect();
        assert_eq!(flags, vec![true, false, true, false]);

        let bad = r#"[{ "Name": "Sol Ring", "Maybe": "sometimes" }]"#;
        assert!(serde_json::from_str::<Vec<PoolCard>>(bad).is_err());
    }

    #[test]
    fn test_pool_file_with_string_maybe_flags_loads() {
        let path = std::env::temp_dir().join(format!("rosscube-pool-{}.json", std::process::id()));
        let json = r#"[
            { "Name": "Serra Angel", "Tags": "W - Angels", "Maybe": "false" },
            { "Name": "Baneslayer Angel", "Tags": "W - Angels", "Maybe": "true" }
        ]"#;
        fs::write(&path, json).unwrap();

        let pool = CardPool::from_json_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(pool.len(), 2);
        assert!(!pool.row("Serra Angel").unwrap().maybe);
        assert!(pool.row("Baneslayer Angel").unwrap().maybe);
    }
}
