use std::{
    collections::BTreeSet,
    fmt,
};

use serde::{
    Deserialize,
    Serialize,
};

/// The five colors, ordered WUBRG so sets of them print the conventional way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
}

impl Color {
    pub const ALL: [Color; 5] = [Color::White, Color::Blue, Color::Black, Color::Red, Color::Green];

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'W' => Some(Color::White),
            'U' => Some(Color::Blue),
            'B' => Some(Color::Black),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

pub type ColorSet = BTreeSet<Color>;

/// Normalized card metadata. Once a record is in the metadata cache it is never mutated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    pub oracle_text: String,
    pub type_line: String,
    pub mana_cost: String,
    pub color_identity: ColorSet,
    pub keywords: Vec<String>,
    pub cmc: f32,
}

impl CardRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn oracle_lower(&self) -> String {
        self.oracle_text.to_lowercase()
    }

    pub fn type_lower(&self) -> String {
        self.type_line.to_lowercase()
    }

    pub fn name_lower(&self) -> String {
        self.name.to_lowercase()
    }
}
