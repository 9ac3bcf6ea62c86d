use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    CardRecord,
    ColorSet,
};

#[derive(Debug, Serialize)]
pub struct Identifier<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CollectionRequest<'a> {
    pub identifiers: Vec<Identifier<'a>>,
}

impl<'a> CollectionRequest<'a> {
    pub fn for_names(names: &'a [String]) -> Self {
        Self { identifiers: names.iter().map(|name| Identifier { name }).collect() }
    }
}

#[derive(Debug, Deserialize)]
pub struct CollectionResponse {
    #[serde(default)]
    pub data: Vec<ScryfallCard>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardFace {
    #[serde(default)]
    pub oracle_text: Option<String>,
}

/// Only the fields the profiler reads. Everything is optional on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct ScryfallCard {
    pub name: String,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub color_identity: ColorSet,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub cmc: Option<f32>,
    #[serde(default)]
    pub card_faces: Vec<CardFace>,
}

impl From<ScryfallCard> for CardRecord {
    fn from(card: ScryfallCard) -> Self {
        // Modal and split cards keep their rules text on the faces
        let oracle_text = card.oracle_text.unwrap_or_else(|| {
            card.card_faces
                .iter()
                .filter_map(|face| face.oracle_text.as_deref())
                .collect::<Vec<&str>>()
                .join("\n")
        });

        CardRecord {
            name: card.name,
            oracle_text,
            type_line: card.type_line.unwrap_or_default(),
            mana_cost: card.mana_cost.unwrap_or_default(),
            color_identity: card.color_identity,
            keywords: card.keywords,
            cmc: card.cmc.unwrap_or(0.0),
        }
    }
}
