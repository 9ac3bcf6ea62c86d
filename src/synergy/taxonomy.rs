//! Fixed pattern tables the profiler and scorer match against.

pub const LIFEGAIN: &str = "Lifegain";
pub const ARTIFACTS: &str = "Artifacts";
pub const GRAVEYARD_VALUE: &str = "Graveyard Value";
pub const TOKEN_SWARM: &str = "Token Swarm";
pub const SPELL_VELOCITY: &str = "Spell Velocity";
pub const BURN: &str = "Burn/Direct Damage";
pub const RAMP: &str = "Ramp/Big Mana";
pub const CONTROL_COUNTERSPELLS: &str = "Control/Counterspells";
pub const ARISTOCRATS: &str = "Sacrifice/Aristocrats";
pub const ENCHANTMENTS: &str = "Enchantments Matter";

// Labels only handed out when no pattern matches strongly
pub const AGGRO_FLYERS: &str = "Aggro Flyers";
pub const AGGRO: &str = "Aggro";
pub const BIG_MANA_RAMP: &str = "Big Mana/Ramp";
pub const CONTROL: &str = "Control";
pub const SACRIFICE_GRAVEYARD: &str = "Sacrifice/Graveyard";
pub const ARTIFACTS_MATTER: &str = "Artifacts Matter";
pub const MIDRANGE: &str = "Midrange";
pub const TRIBAL_SUFFIX: &str = " Tribal";

#[derive(Debug)]
pub struct StrategyPattern {
    pub name: &'static str,
    pub weight: f32,
    /// Oracle text substrings, scored per occurrence (capped).
    pub keywords: &'static [&'static str],
    /// Type line substrings.
    pub types: &'static [&'static str],
    /// Signature cards, matched against the name or the rules text.
    pub card_names: &'static [&'static str],
}

pub const STRATEGY_PATTERNS: [StrategyPattern; 10] = [
    StrategyPattern {
        name: LIFEGAIN,
        weight: 2.5,
        keywords: &["lifegain", "life", "heal", "lifelink"],
        types: &["cleric", "angel"],
        card_names: &["soul warden", "ajani's pridemate", "serra ascendant"],
    },
    StrategyPattern {
        name: ARTIFACTS,
        weight: 2.5,
        keywords: &["artifact", "equipment", "metalcraft", "affinity"],
        types: &["artificer", "construct", "thopter"],
        card_names: &["servo", "myr", "vault skirge"],
    },
    StrategyPattern {
        name: GRAVEYARD_VALUE,
        weight: 3.0,
        keywords: &["graveyard", "flashback", "delve", "escape", "dredge", "threshold"],
        types: &["zombie", "skeleton", "spirit"],
        card_names: &["raise dead", "reanimate", "buried alive"],
    },
    StrategyPattern {
        name: TOKEN_SWARM,
        weight: 2.5,
        keywords: &["token", "create", "populate", "convoke"],
        types: &["soldier", "goblin", "saproling", "elf"],
        card_names: &["gather the townsfolk", "krenko", "doubling season"],
    },
    StrategyPattern {
        name: SPELL_VELOCITY,
        weight: 2.5,
        keywords: &["instant", "sorcery", "prowess", "storm", "flashback"],
        types: &["wizard", "monk", "shaman"],
        card_names: &["young pyromancer", "monastery swiftspear"],
    },
    StrategyPattern {
        name: BURN,
        weight: 2.0,
        keywords: &["damage", "burn", "shock", "bolt"],
        types: &["wizard", "elemental"],
        card_names: &["lightning bolt", "lava spike", "flame rift"],
    },
    StrategyPattern {
        name: RAMP,
        weight: 2.0,
        keywords: &["ramp", "mana", "land", "search", "accelerate"],
        types: &["druid", "elf"],
        card_names: &["llanowar elves", "rampant growth", "cultivate"],
    },
    StrategyPattern {
        name: CONTROL_COUNTERSPELLS,
        weight: 2.0,
        keywords: &["counter", "draw", "exile", "bounce"],
        types: &["wizard", "sphinx"],
        card_names: &["counterspell", "fact or fiction", "wrath of god"],
    },
    StrategyPattern {
        name: ARISTOCRATS,
        weight: 2.5,
        keywords: &["sacrifice", "death", "dies", "enters"],
        types: &["vampire", "demon", "cleric"],
        card_names: &["blood artist", "zulaport cutthroat", "viscera seer"],
    },
    StrategyPattern {
        name: ENCHANTMENTS,
        weight: 2.0,
        keywords: &["enchantment", "aura", "constellation"],
        types: &["spirit", "nymph"],
        card_names: &["enchantress", "eidolon", "sphere of safety"],
    },
];

pub const CREATURE_TYPES: &[&str] = &[
    "human", "elf", "goblin", "wizard", "zombie", "angel", "dragon", "beast", "spirit", "knight",
    "soldier", "warrior", "vampire", "demon", "elemental", "construct", "thopter", "servo",
    "cleric", "artificer", "shaman", "druid", "merfolk", "faerie", "rogue", "cat", "dinosaur",
    "pirate", "sliver", "rat",
];

pub const MECHANICS: &[&str] = &[
    "flying", "trample", "lifelink", "deathtouch", "sacrifice", "draw", "counter", "artifact",
    "enchantment", "graveyard", "exile", "token", "equipment", "aura", "flash", "storm", "cascade",
    "delve", "prowess", "landfall", "flashback", "dredge", "threshold", "metalcraft", "affinity",
    "convoke", "populate",
];

/// How one primary strategy feels about another.
#[derive(Debug)]
pub struct StrategyRelations {
    pub good: &'static [&'static str],
    pub okay: &'static [&'static str],
    pub neutral: &'static [&'static str],
    pub bad: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyFit {
    Good,
    Okay,
    Neutral,
    Bad,
    Unknown,
}

const STRATEGY_RELATIONS: &[(&str, StrategyRelations)] = &[
    (
        AGGRO,
        StrategyRelations {
            good: &[AGGRO_FLYERS],
            okay: &[BURN],
            neutral: &[MIDRANGE],
            bad: &[CONTROL_COUNTERSPELLS, RAMP],
        },
    ),
    (
        AGGRO_FLYERS,
        StrategyRelations {
            good: &[AGGRO],
            okay: &[BURN],
            neutral: &[MIDRANGE],
            bad: &[CONTROL_COUNTERSPELLS, RAMP],
        },
    ),
    (
        CONTROL_COUNTERSPELLS,
        StrategyRelations {
            good: &[RAMP],
            okay: &[ENCHANTMENTS],
            neutral: &[MIDRANGE],
            bad: &[AGGRO, BURN, TOKEN_SWARM],
        },
    ),
    (
        RAMP,
        StrategyRelations {
            good: &[CONTROL_COUNTERSPELLS],
            okay: &[GRAVEYARD_VALUE],
            neutral: &[MIDRANGE],
            bad: &[AGGRO, BURN],
        },
    ),
    (
        ARISTOCRATS,
        StrategyRelations {
            good: &[TOKEN_SWARM, GRAVEYARD_VALUE],
            okay: &[ARTIFACTS],
            neutral: &[MIDRANGE],
            bad: &[LIFEGAIN],
        },
    ),
    (
        TOKEN_SWARM,
        StrategyRelations {
            good: &[ARISTOCRATS],
            okay: &[ARTIFACTS],
            neutral: &[MIDRANGE],
            bad: &[CONTROL_COUNTERSPELLS],
        },
    ),
    (
        GRAVEYARD_VALUE,
        StrategyRelations {
            good: &[ARISTOCRATS],
            okay: &[SPELL_VELOCITY],
            neutral: &[MIDRANGE],
            bad: &[AGGRO],
        },
    ),
    (
        ARTIFACTS,
        StrategyRelations {
            good: &[ARISTOCRATS],
            okay: &[TOKEN_SWARM, CONTROL_COUNTERSPELLS],
            neutral: &[MIDRANGE],
            bad: &[],
        },
    ),
    (
        SPELL_VELOCITY,
        StrategyRelations {
            good: &[BURN],
            okay: &[GRAVEYARD_VALUE],
            neutral: &[MIDRANGE],
            bad: &[TOKEN_SWARM],
        },
    ),
    (
        BURN,
        StrategyRelations {
            good: &[SPELL_VELOCITY, AGGRO],
            okay: &[AGGRO_FLYERS],
            neutral: &[MIDRANGE],
            bad: &[LIFEGAIN, CONTROL_COUNTERSPELLS],
        },
    ),
    (
        LIFEGAIN,
        StrategyRelations {
            good: &[],
            okay: &[CONTROL_COUNTERSPELLS],
            neutral: &[MIDRANGE],
            bad: &[BURN, ARISTOCRATS],
        },
    ),
    (
        ENCHANTMENTS,
        StrategyRelations {
            good: &[],
            okay: &[CONTROL_COUNTERSPELLS],
            neutral: &[MIDRANGE],
            bad: &[AGGRO],
        },
    ),
    (
        MIDRANGE,
        StrategyRelations {
            good: &[],
            okay: &[],
            neutral: &[
                MIDRANGE,
                AGGRO,
                CONTROL_COUNTERSPELLS,
                ARISTOCRATS,
                ARTIFACTS,
                TOKEN_SWARM,
                GRAVEYARD_VALUE,
            ],
            bad: &[],
        },
    ),
];

pub fn strategy_relations(strategy: &str) -> Option<&'static StrategyRelations> {
    STRATEGY_RELATIONS.iter().find(|(name, _)| *name == strategy).map(|(_, relations)| relations)
}

/// Lists are checked good, okay, neutral, bad; the first hit decides.
pub fn strategy_fit(own: &str, other: &str) -> StrategyFit {
    let Some(relations) = strategy_relations(own) else {
        return StrategyFit::Unknown;
    };

    if relations.good.contains(&other) {
        StrategyFit::Good
    } else if relations.okay.contains(&other) {
        StrategyFit::Okay
    } else if relations.neutral.contains(&other) {
        StrategyFit::Neutral
    } else if relations.bad.contains(&other) {
        StrategyFit::Bad
    } else {
        StrategyFit::Unknown
    }
}

pub fn is_known_label(label: &str) -> bool {
    STRATEGY_PATTERNS.iter().any(|p| p.name == label)
        || [
            AGGRO_FLYERS,
            AGGRO,
            BIG_MANA_RAMP,
            CONTROL,
            SACRIFICE_GRAVEYARD,
            ARTIFACTS_MATTER,
            MIDRANGE,
        ]
        .contains(&label)
        || label.ends_with(TRIBAL_SUFFIX)
}
