use std::sync::OnceLock;

use regex::Regex;
use serde::{
    de,
    Deserialize,
    Deserializer,
};

use super::models::{
    Color,
    ColorSet,
};

fn digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").unwrap())
}

/// Colors named anywhere in a raw mana cost string. Best effort: any W/U/B/R/G letter counts.
pub fn colors_in_mana_cost(mana_cost: &str) -> ColorSet {
    mana_cost.chars().filter_map(Color::from_symbol).collect()
}

/// Digit runs add their value, every colored symbol adds one. `{X}` and friends add nothing.
pub fn mana_value(mana_cost: &str) -> f32 {
    if mana_cost.is_empty() {
        return 0.0;
    }

    let generic: u32 =
        digits_re().find_iter(mana_cost).filter_map(|m| m.as_str().parse::<u32>().ok()).sum();
    let colored = mana_cost.chars().filter(|c| Color::from_symbol(*c).is_some()).count() as u32;

    (generic + colored) as f32
}

/// Non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

pub fn join_colors<'a>(colors: impl IntoIterator<Item = &'a Color>) -> String {
    colors.into_iter().map(|c| c.symbol()).collect()
}

/// Accepts `true`/`false` as JSON booleans or as strings such as `"true"` or `"FALSE"`.
pub fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(value) => Ok(value),
        BoolOrString::Text(text) => match text.trim().to_lowercase().as_str() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            other => Err(de::Error::custom(format!("expected a boolean, got \"{}\"", other))),
        },
    }
}
