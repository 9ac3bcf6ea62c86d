use serde::{
    Deserialize,
    Serialize,
};

use crate::core::CardRecord;

pub const MAX_FINDINGS: usize = 5;

const ENABLER_MARKERS: &[&str] = &["create", "put", "search", "when", "whenever"];
const PAYOFF_MARKERS: &[&str] =
    &["for each", "if you control", "gets +", "whenever a", "whenever you"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynergyType {
    Token,
    Artifact,
    Graveyard,
    Spell,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynergyFinding {
    pub enabler: String,
    pub payoff: String,
    pub strength: f32,
    pub synergy_type: SynergyType,
}

/// Lowercased views of a card, computed once per detection pass.
struct CardText<'a> {
    name: &'a str,
    text: String,
    type_line: String,
}

impl<'a> CardText<'a> {
    fn new(card: &'a CardRecord) -> Self {
        Self { name: &card.name, text: card.oracle_lower(), type_line: card.type_lower() }
    }

    fn has(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    fn is_enabler(&self) -> bool {
        ENABLER_MARKERS.iter().any(|m| self.has(m))
    }

    fn is_payoff(&self) -> bool {
        PAYOFF_MARKERS.iter().any(|m| self.has(m))
    }

    fn makes_tokens(&self) -> bool {
        self.has("create") && self.has("token")
    }

    fn counts_creatures(&self) -> bool {
        self.has("creatures you control") || self.has("for each creature")
    }

    fn references_artifacts(&self) -> bool {
        self.has("artifact") || self.type_line.contains("artifact")
    }

    fn counts_artifacts(&self) -> bool {
        self.has("artifacts you control") || self.has("metalcraft")
    }

    fn fills_graveyard(&self) -> bool {
        self.has("graveyard") || self.has("mill")
    }

    fn uses_graveyard(&self) -> bool {
        self.has("graveyard") || self.has("threshold")
    }

    fn is_spell(&self) -> bool {
        self.type_line.contains("instant") || self.type_line.contains("sorcery")
    }

    fn rewards_spells(&self) -> bool {
        self.has("noncreature spell") || self.has("prowess")
    }
}

fn pair_strength(enabler: &CardText, payoff: &CardText) -> f32 {
    let mut strength = 0.0;

    if enabler.makes_tokens() && payoff.counts_creatures() {
        strength += 2.0;
    }

    if (enabler.references_artifacts() && payoff.counts_artifacts())
        || (payoff.references_artifacts() && enabler.counts_artifacts())
    {
        strength += 2.0;
    }

    if (enabler.fills_graveyard() && payoff.uses_graveyard())
        || (payoff.fills_graveyard() && enabler.uses_graveyard())
    {
        strength += 2.0;
    }

    if enabler.is_spell() && payoff.rewards_spells() {
        strength += 1.0;
    }

    strength
}

fn synergy_type(enabler: &CardText, payoff: &CardText) -> SynergyType {
    let either = |needle: &str| enabler.has(needle) || payoff.has(needle);

    if either("token") {
        SynergyType::Token
    } else if either("artifact") {
        SynergyType::Artifact
    } else if either("graveyard") {
        SynergyType::Graveyard
    } else if either("spell") {
        SynergyType::Spell
    } else {
        SynergyType::Generic
    }
}

/// Enabler/payoff pairs in discovery order (enablers outer, payoffs inner),
/// cut off at the first five. A card that is both may pair with itself.
pub fn detect(cards: &[CardRecord]) -> Vec<SynergyFinding> {
    let texts: Vec<CardText> = cards.iter().map(CardText::new).collect();
    let enablers: Vec<&CardText> = texts.iter().filter(|c| c.is_enabler()).collect();
    let payoffs: Vec<&CardText> = texts.iter().filter(|c| c.is_payoff()).collect();

    let mut findings = Vec::new();
    for enabler in &enablers {
        for payoff in &payoffs {
            let strength = pair_strength(enabler, payoff);
            if strength > 0.0 {
                findings.push(SynergyFinding {
                    enabler: enabler.name.to_string(),
                    payoff: payoff.name.to_string(),
                    strength,
                    synergy_type: synergy_type(enabler, payoff),
                });
                if findings.len() == MAX_FINDINGS {
                    return findings;
                }
            }
        }
    }

    findings
}
