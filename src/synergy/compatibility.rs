use serde::{
    Deserialize,
    Serialize,
};

use super::{
    profile::ThemeProfile,
    taxonomy::{
        strategy_fit,
        StrategyFit,
    },
};
use crate::core::{
    utils::join_colors,
    CardRecord,
    Color,
    ColorSet,
};

pub const MIN_SCORE: f32 = -3.0;
pub const MAX_SCORE: f32 = 3.0;
pub const BASELINE_PENALTY: f32 = 0.5;
pub const NO_SYNERGY_REASON: &str = "No significant synergies detected";

/// Reasons carrying these fragments are filler and never shown.
const FILLER_FRAGMENTS: &[&str] = &["Compatible", "Similar", "Limited synergies"];

/// Extra inputs beyond the two profiles.
#[derive(Debug, Clone, Default)]
pub struct ScoringContext {
    pub commanders: Vec<CardRecord>,
}

impl ScoringContext {
    pub fn with_commanders(commanders: Vec<CardRecord>) -> Self {
        Self { commanders }
    }

    fn commander_identity(&self) -> Option<ColorSet> {
        if self.commanders.is_empty() {
            return None;
        }
        Some(self.commanders.iter().flat_map(|c| c.color_identity.iter().copied()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityScore {
    /// A multiple of 0.5 in [-3, 3].
    pub value: f32,
    /// Never empty.
    pub reasons: Vec<String>,
}

impl CompatibilityScore {
    pub fn tier(&self) -> SynergyTier {
        SynergyTier::from_score(self.value)
    }

    pub fn tooltip(&self) -> String {
        format!("{} synergy ({}): {}", self.tier().label(), self.value, self.reasons.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SynergyTier {
    Terrible,
    Bad,
    Poor,
    Neutral,
    Good,
    Excellent,
    Amazing,
}

impl SynergyTier {
    pub fn from_score(score: f32) -> Self {
        if score >= 3.0 {
            SynergyTier::Amazing
        } else if score >= 2.0 {
            SynergyTier::Excellent
        } else if score >= 1.0 {
            SynergyTier::Good
        } else if score >= 0.0 {
            SynergyTier::Neutral
        } else if score >= -1.0 {
            SynergyTier::Poor
        } else if score >= -2.0 {
            SynergyTier::Bad
        } else {
            SynergyTier::Terrible
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SynergyTier::Amazing => "Amazing",
            SynergyTier::Excellent => "Excellent",
            SynergyTier::Good => "Good",
            SynergyTier::Neutral => "Neutral",
            SynergyTier::Poor => "Poor",
            SynergyTier::Bad => "Bad",
            SynergyTier::Terrible => "Terrible",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            SynergyTier::Amazing => "🔥",
            SynergyTier::Excellent => "✨",
            SynergyTier::Good => "👍",
            SynergyTier::Neutral => "➖",
            SynergyTier::Poor => "👎",
            SynergyTier::Bad => "⚠️",
            SynergyTier::Terrible => "💀",
        }
    }
}

/// Running total plus the reasons collected so far, in evaluation order.
#[derive(Default)]
struct Tally {
    total: f32,
    reasons: Vec<String>,
}

impl Tally {
    fn add(&mut self, amount: f32, reason: impl Into<String>) {
        self.total += amount;
        self.reasons.push(reason.into());
    }
}

fn shared<'a>(a: &'a [String], b: &[String]) -> Vec<&'a str> {
    a.iter().filter(|item| b.contains(item)).map(|item| item.as_str()).collect()
}

fn score_colors(a: &ThemeProfile, b: &ThemeProfile, tally: &mut Tally) {
    let shared: Vec<&Color> = a.color_identity.intersection(&b.color_identity).collect();
    let total = a.color_identity.union(&b.color_identity).count();

    if shared.len() >= 2 && total <= 2 {
        tally.add(1.0, format!("Perfect color overlap ({})", join_colors(shared)));
    } else if !shared.is_empty() && total <= 3 {
        tally.add(0.3, format!("Good color synergy ({})", join_colors(shared)));
    } else if total == 4 {
        tally.add(-1.0, "Four colors - mana concerns");
    } else if total >= 5 {
        tally.add(-2.0, "Five colors - serious mana issues");
    } else if shared.is_empty() && a.color_identity.len() > 1 && b.color_identity.len() > 1 {
        tally.add(-0.5, "No color overlap in multicolor packs");
    }
}

fn score_shared_traits(a: &ThemeProfile, b: &ThemeProfile, tally: &mut Tally) {
    let tribes = shared(&a.tribes, &b.tribes);
    if !tribes.is_empty() {
        tally.add(0.5, format!("Shared tribes: {}", tribes.join(", ")));
    }

    let mechanics = shared(&a.keywords, &b.keywords);
    if mechanics.len() >= 3 {
        tally.add(0.7, format!("Many shared mechanics: {}...", mechanics[..3].join(", ")));
    } else if !mechanics.is_empty() {
        tally.add(0.3, format!("Shared mechanics: {}", mechanics.join(", ")));
    }

    let average_strength = (a.theme_strength + b.theme_strength) / 2.0;
    if average_strength > 20.0 {
        tally.add(0.3, "Both packs have strong, focused themes");
    } else if average_strength < 3.0 {
        tally.add(-0.5, "Weak theme coherence");
    }

    let sub_themes = shared(&a.sub_themes, &b.sub_themes);
    if !sub_themes.is_empty() {
        tally.add(0.4, format!("Shared sub-themes: {}", sub_themes.join(", ")));
    }

    let combined = a.card_synergies.len() + b.card_synergies.len();
    if combined > 2 {
        let total_strength: f32 =
            a.card_synergies.iter().chain(&b.card_synergies).map(|s| s.strength).sum();
        if total_strength / combined as f32 > 2.0 {
            tally.add(0.3, "Strong internal card synergies detected");
        }
    }
}

fn score_strategies(a: &ThemeProfile, b: &ThemeProfile, tally: &mut Tally) {
    match strategy_fit(&a.primary_strategy, &b.primary_strategy) {
        StrategyFit::Good => tally.add(0.8, "Complementary strategies"),
        StrategyFit::Okay => tally.add(0.2, "Compatible strategies"),
        StrategyFit::Neutral => tally.add(0.0, "Neutral strategies"),
        StrategyFit::Bad => tally.add(-1.0, "Conflicting strategies"),
        StrategyFit::Unknown => tally.add(-0.2, "Unknown strategy interaction"),
    }
}

fn score_commander_identity(
    a: &ThemeProfile,
    b: &ThemeProfile,
    context: &ScoringContext,
    tally: &mut Tally,
) {
    let Some(identity) = context.commander_identity() else {
        return;
    };

    let outside: Vec<&Color> = a
        .color_identity
        .union(&b.color_identity)
        .filter(|color| !identity.contains(color))
        .collect();
    if !outside.is_empty() {
        tally.add(-0.5, format!("Colors outside commander identity ({})", join_colors(outside)));
    }
}

/// JS-style rounding to the nearest half: ties go up.
fn round_to_half(value: f32) -> f32 {
    (value * 2.0 + 0.5).floor() / 2.0
}

/// Deterministic compatibility of pack `a` with pack `b`. Not symmetric: the
/// strategy table is read from `a`'s side.
pub fn score(a: &ThemeProfile, b: &ThemeProfile, context: &ScoringContext) -> CompatibilityScore {
    let mut tally = Tally::default();

    score_colors(a, b, &mut tally);
    score_shared_traits(a, b, &mut tally);
    score_strategies(a, b, &mut tally);
    score_commander_identity(a, b, context, &mut tally);

    if (a.average_cmc - b.average_cmc).abs() >= 3.0 {
        tally.add(-0.1, "Extreme mana curve mismatch");
    }

    tally.total -= BASELINE_PENALTY;

    let mut reasons: Vec<String> = tally
        .reasons
        .into_iter()
        .filter(|reason| !FILLER_FRAGMENTS.iter().any(|filler| reason.contains(filler)))
        .collect();
    if reasons.is_empty() {
        reasons.push(NO_SYNERGY_REASON.to_string());
    }

    CompatibilityScore { value: round_to_half(tally.total.clamp(MIN_SCORE, MAX_SCORE)), reasons }
}
