#[cfg(test)]
mod tests {
    use crate::{
        core::{
            CardRecord,
            Color,
        },
        synergy::{
            compatibility::{
                score,
                CompatibilityScore,
                ScoringContext,
                SynergyTier,
                NO_SYNERGY_REASON,
            },
            detector::{
                SynergyFinding,
                SynergyType,
            },
            profile::{
                profile,
                CurveArchetype,
                ThemeProfile,
            },
            taxonomy::{
                self,
                is_known_label,
            },
        },
    };

    fn base_profile(colors: &[Color], strategy: &str) -> ThemeProfile {
        ThemeProfile {
            card_count: 12,
            color_identity: colors.iter().copied().collect(),
            average_cmc: 3.0,
            primary_strategy: strategy.to_string(),
            theme_strength: 10.0,
            sub_themes: Vec::new(),
            tribes: Vec::new(),
            keywords: Vec::new(),
            curve_archetype: CurveArchetype::Balanced,
            card_synergies: Vec::new(),
        }
    }

    fn finding(strength: f32) -> SynergyFinding {
        SynergyFinding {
            enabler: "Enabler".to_string(),
            payoff: "Payoff".to_string(),
            strength,
            synergy_type: SynergyType::Generic,
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn plain_score(a: &ThemeProfile, b: &ThemeProfile) -> CompatibilityScore {
        score(a, b, &ScoringContext::default())
    }

    fn assert_bounded(result: &CompatibilityScore) {
        assert!(result.value >= -3.0 && result.value <= 3.0, "out of range: {}", result.value);
        assert_eq!((result.value * 2.0).fract(), 0.0, "not a half step: {}", result.value);
        assert!(!result.reasons.is_empty());
    }

    #[test]
    fn test_perfect_color_match() {
        let a = base_profile(&[Color::White, Color::Blue], taxonomy::MIDRANGE);
        let b = base_profile(&[Color::Blue, Color::White], taxonomy::MIDRANGE);

        let result = plain_score(&a, &b);

        assert_eq!(result.reasons[0], "Perfect color overlap (WU)");
        assert_eq!(result.reasons[1], "Neutral strategies");
        // +1.0 colors, 0 strategy, -0.5 baseline
        assert_eq!(result.value, 0.5);
        assert_bounded(&result);
    }

    #[test]
    fn test_five_color_clash() {
        let a = base_profile(&[Color::White, Color::Blue], taxonomy::MIDRANGE);
        let b = base_profile(&[Color::Black, Color::Red, Color::Green], taxonomy::AGGRO);

        let result = plain_score(&a, &b);

        assert_eq!(result.reasons[0], "Five colors - serious mana issues");
        assert_eq!(result.value, -2.5);
        assert_eq!(result.tier(), SynergyTier::Terrible);
    }

    #[test]
    fn test_four_colors_and_multicolor_without_overlap() {
        let a = base_profile(&[Color::White, Color::Blue], taxonomy::MIDRANGE);
        let b = base_profile(&[Color::Black, Color::Red], taxonomy::MIDRANGE);
        assert_eq!(plain_score(&a, &b).reasons[0], "Four colors - mana concerns");

        let a = base_profile(&[Color::White], taxonomy::MIDRANGE);
        let b = base_profile(&[Color::White, Color::Red], taxonomy::MIDRANGE);
        assert_eq!(plain_score(&a, &b).reasons[0], "Good color synergy (W)");
    }

    #[test]
    fn test_score_is_deterministic() {
        let mut a = base_profile(&[Color::Black], taxonomy::ARISTOCRATS);
        a.keywords = strings(&["sacrifice", "token"]);
        let mut b = base_profile(&[Color::Black, Color::Green], taxonomy::TOKEN_SWARM);
        b.keywords = strings(&["token"]);

        let first = plain_score(&a, &b);
        for _ in 0..10 {
            assert_eq!(plain_score(&a, &b), first);
        }
    }

    #[test]
    fn test_upper_clamp() {
        let mut a = base_profile(&[Color::Black, Color::Green], taxonomy::ARISTOCRATS);
        a.theme_strength = 25.0;
        a.tribes = strings(&["zombie"]);
        a.keywords = strings(&["sacrifice", "token", "draw"]);
        a.sub_themes = strings(&[taxonomy::GRAVEYARD_VALUE]);
        a.card_synergies = vec![finding(4.0), finding(4.0)];
        let mut b = a.clone();
        b.primary_strategy = taxonomy::TOKEN_SWARM.to_string();

        let result = plain_score(&a, &b);

        assert_eq!(result.value, 3.0);
        assert_eq!(result.tier(), SynergyTier::Amazing);
        assert_eq!(
            result.reasons,
            strings(&[
                "Perfect color overlap (BG)",
                "Shared tribes: zombie",
                "Many shared mechanics: sacrifice, token, draw...",
                "Both packs have strong, focused themes",
                "Shared sub-themes: Graveyard Value",
                "Strong internal card synergies detected",
                "Complementary strategies",
            ])
        );
    }

    #[test]
    fn test_lower_clamp() {
        let mut a = base_profile(&[Color::White, Color::Blue], taxonomy::LIFEGAIN);
        a.theme_strength = 1.0;
        a.average_cmc = 1.5;
        let mut b = base_profile(&[Color::Black, Color::Red, Color::Green], taxonomy::BURN);
        b.theme_strength = 1.0;
        b.average_cmc = 5.0;

        let result = plain_score(&a, &b);

        assert_eq!(result.value, -3.0);
        assert!(result.reasons.contains(&"Weak theme coherence".to_string()));
        assert!(result.reasons.contains(&"Conflicting strategies".to_string()));
        assert_eq!(result.reasons.last().map(String::as_str), Some("Extreme mana curve mismatch"));
    }

    #[test]
    fn test_filler_only_reasons_are_replaced() {
        let a = base_profile(&[], taxonomy::ARTIFACTS);
        let b = base_profile(&[], taxonomy::TOKEN_SWARM);

        let result = plain_score(&a, &b);

        assert_eq!(result.reasons, vec![NO_SYNERGY_REASON.to_string()]);
        // 0.2 - 0.5 rounds to -0.5
        assert_eq!(result.value, -0.5);
    }

    #[test]
    fn test_weak_internal_synergies_earn_nothing() {
        let mut a = base_profile(&[], taxonomy::MIDRANGE);
        a.card_synergies = vec![finding(1.0), finding(2.0)];
        let mut b = base_profile(&[], taxonomy::MIDRANGE);
        b.card_synergies = vec![finding(2.0)];

        let result = plain_score(&a, &b);
        assert!(!result.reasons.iter().any(|r| r.contains("internal card synergies")));
    }

    #[test]
    fn test_commander_identity_penalty() {
        let a = base_profile(&[Color::White, Color::Blue], taxonomy::MIDRANGE);
        let b = base_profile(&[Color::White, Color::Blue], taxonomy::MIDRANGE);
        let commander = CardRecord {
            color_identity: [Color::White].into_iter().collect(),
            ..CardRecord::named("Lone Paladin")
        };

        let with = score(&a, &b, &ScoringContext::with_commanders(vec![commander]));
        let without = plain_score(&a, &b);

        assert_eq!(without.value - with.value, 0.5);
        assert!(with.reasons.contains(&"Colors outside commander identity (U)".to_string()));
    }

    fn pack(
        prefix: &str,
        type_line: &str,
        text: &str,
        cmc: f32,
        colors: &[Color],
    ) -> Vec<CardRecord> {
        (0..6)
            .map(|i| CardRecord {
                oracle_text: text.to_string(),
                type_line: type_line.to_string(),
                cmc,
                color_identity: colors.iter().copied().collect(),
                ..CardRecord::named(format!("{prefix} {i}"))
            })
            .collect()
    }

    #[test]
    fn test_identical_packs_beat_clashing_packs() {
        let tokens = profile(&pack(
            "Rally",
            "Creature - Human Soldier",
            "When this enters, create a 1/1 Soldier token. \
             Creatures you control get +1/+1 for each token.",
            2.0,
            &[Color::White, Color::Green],
        ));
        let counters = profile(&pack(
            "Deny",
            "Instant",
            "Counter target spell. Draw a card.",
            6.0,
            &[Color::Blue, Color::Black, Color::Red],
        ));

        let same = plain_score(&tokens, &tokens);
        let clash = plain_score(&tokens, &counters);

        assert_bounded(&same);
        assert_bounded(&clash);
        assert!(same.value >= clash.value, "{} < {}", same.value, clash.value);
    }

    #[test]
    fn test_profiles_always_get_a_label() {
        let packs = vec![
            pack("Vanilla", "Creature", "", 3.0, &[]),
            pack("Land", "Land", "", 0.0, &[]),
            pack("Goblin", "Creature - Goblin", "Haste", 1.0, &[Color::Red]),
            pack("Big", "Creature - Dragon", "Flying", 7.0, &[Color::Red]),
            pack("Thinker", "Sorcery", "Draw two cards.", 3.0, &[Color::Blue]),
        ];

        for cards in packs {
            let profile = profile(&cards);
            assert!(!profile.primary_strategy.is_empty());
            assert!(is_known_label(&profile.primary_strategy), "{}", profile.primary_strategy);
        }
    }

    #[test]
    fn test_tooltip_format() {
        let a = base_profile(&[Color::White, Color::Blue], taxonomy::MIDRANGE);
        let result = plain_score(&a, &a);
        assert_eq!(
            result.tooltip(),
            "Neutral synergy (0.5): Perfect color overlap (WU), Neutral strategies"
        );
    }
}
