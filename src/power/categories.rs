use std::{
    fmt,
    sync::OnceLock,
};

use regex::{
    Regex,
    RegexBuilder,
};
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerCategory {
    FastMana,
    Tutors,
    Countermagic,
    Removal,
    CardDraw,
    Combos,
    Stax,
    LandDestruction,
    ExtraTurns,
    Planeswalkers,
}

impl PowerCategory {
    pub const ALL: [PowerCategory; 10] = [
        PowerCategory::FastMana,
        PowerCategory::Tutors,
        PowerCategory::Countermagic,
        PowerCategory::Removal,
        PowerCategory::CardDraw,
        PowerCategory::Combos,
        PowerCategory::Stax,
        PowerCategory::LandDestruction,
        PowerCategory::ExtraTurns,
        PowerCategory::Planeswalkers,
    ];

    pub fn weight(&self) -> u32 {
        match self {
            PowerCategory::FastMana => 15,
            PowerCategory::Tutors => 12,
            PowerCategory::Countermagic => 8,
            PowerCategory::Removal => 6,
            PowerCategory::CardDraw => 5,
            PowerCategory::Combos => 20,
            PowerCategory::Stax => 18,
            PowerCategory::LandDestruction => 15,
            PowerCategory::ExtraTurns => 25,
            PowerCategory::Planeswalkers => 8,
        }
    }

    /// Lowercase name fragments; a card counts when its name contains any of them.
    pub fn card_names(&self) -> &'static [&'static str] {
        match self {
            PowerCategory::FastMana => &[
                "sol ring",
                "mana crypt",
                "mana vault",
                "chrome mox",
                "mox diamond",
                "mox opal",
                "lotus petal",
                "dark ritual",
                "cabal ritual",
                "seething song",
                "simian spirit guide",
                "elvish spirit guide",
                "jeweled lotus",
            ],
            PowerCategory::Tutors => &[
                "demonic tutor",
                "vampiric tutor",
                "imperial seal",
                "diabolic intent",
                "enlightened tutor",
                "mystical tutor",
                "worldly tutor",
                "survival of the fittest",
                "natural order",
                "green sun's zenith",
                "chord of calling",
            ],
            PowerCategory::Countermagic => &[
                "counterspell",
                "force of will",
                "force of negation",
                "mana drain",
                "swan song",
                "negate",
                "spell pierce",
                "mental misstep",
            ],
            PowerCategory::Removal => &[
                "wrath of god",
                "damnation",
                "cyclonic rift",
                "toxic deluge",
                "swords to plowshares",
                "path to exile",
                "lightning bolt",
                "fatal push",
            ],
            PowerCategory::CardDraw => &[
                "rhystic study",
                "mystic remora",
                "necropotence",
                "sylvan library",
                "phyrexian arena",
                "consecrated sphinx",
                "tymna the weaver",
            ],
            PowerCategory::Combos => &[
                "thassa's oracle",
                "demonic consultation",
                "tainted pact",
                "hermit druid",
                "dockside extortionist",
                "temur sabertooth",
                "kiki-jiki",
                "splinter twin",
                "exquisite blood",
                "sanguine bond",
                "mikaeus",
                "walking ballista",
            ],
            PowerCategory::Stax => &[
                "winter orb",
                "static orb",
                "smokestack",
                "tangle wire",
                "sphere of resistance",
                "trinisphere",
                "null rod",
                "collector ouphe",
            ],
            PowerCategory::LandDestruction => &[
                "armageddon",
                "ravages of war",
                "catastrophe",
                "strip mine",
                "wasteland",
                "ghost quarter",
                "tectonic edge",
            ],
            PowerCategory::ExtraTurns => &[
                "time walk",
                "ancestral recall",
                "time warp",
                "temporal manipulation",
                "capture of jingzhou",
                "temporal mastery",
                "nexus of fate",
            ],
            PowerCategory::Planeswalkers => &[],
        }
    }

    /// Rules-text pattern counted on top of the name list, if the category has one.
    pub fn text_pattern(&self) -> Option<&'static Regex> {
        let patterns = text_patterns();
        match self {
            PowerCategory::Tutors => Some(&patterns.tutors),
            PowerCategory::Countermagic => Some(&patterns.countermagic),
            PowerCategory::Removal => Some(&patterns.removal),
            PowerCategory::CardDraw => Some(&patterns.card_draw),
            PowerCategory::ExtraTurns => Some(&patterns.extra_turns),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerCategory::FastMana => "Fast mana",
            PowerCategory::Tutors => "Tutors",
            PowerCategory::Countermagic => "Countermagic",
            PowerCategory::Removal => "Removal",
            PowerCategory::CardDraw => "Card draw",
            PowerCategory::Combos => "Combo pieces",
            PowerCategory::Stax => "Stax",
            PowerCategory::LandDestruction => "Land destruction",
            PowerCategory::ExtraTurns => "Extra turns",
            PowerCategory::Planeswalkers => "Planeswalkers",
        }
    }
}

impl fmt::Display for PowerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

struct TextPatterns {
    tutors: Regex,
    countermagic: Regex,
    removal: Regex,
    card_draw: Regex,
    extra_turns: Regex,
}

fn case_insensitive(pattern: &str) -> Regex {
    RegexBuilder::new(pattern).case_insensitive(true).build().unwrap()
}

fn text_patterns() -> &'static TextPatterns {
    static PATTERNS: OnceLock<TextPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| TextPatterns {
        tutors: case_insensitive("search your library"),
        countermagic: case_insensitive("counter target"),
        removal: case_insensitive("destroy all|exile target|return all"),
        card_draw: case_insensitive("draw.*card"),
        extra_turns: case_insensitive("extra turn"),
    })
}
