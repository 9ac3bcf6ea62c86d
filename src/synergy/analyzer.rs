use std::{
    collections::HashMap,
    sync::{
        atomic::{
            AtomicBool,
            Ordering,
        },
        Arc,
        Mutex,
        MutexGuard,
    },
    time::{
        Duration,
        Instant,
    },
};

use futures::future::join_all;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    debug,
    info,
    warn,
};

use super::{
    compatibility::{
        self,
        CompatibilityScore,
        ScoringContext,
    },
    profile::{
        self,
        ThemeProfile,
    },
};
use crate::{
    metadata::CardMetadataCache,
    pool::CardPool,
    scryfall::CardDatabase,
    session::SweepTicket,
    settings::SynergySettings,
};

/// A second-pack choice as the caller presents it: a stable handle plus the pack name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackOption {
    pub option_id: String,
    pub pack: String,
}

impl PackOption {
    pub fn new(option_id: impl Into<String>, pack: impl Into<String>) -> Self {
        Self { option_id: option_id.into(), pack: pack.into() }
    }
}

/// Results of one sweep, stamped with the ticket it was started under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub pack1: String,
    pub generation: u64,
    pub results: Vec<(String, CompatibilityScore)>,
}

impl SweepReport {
    fn empty(ticket: &SweepTicket) -> Self {
        Self { pack1: ticket.pack1.clone(), generation: ticket.generation, results: Vec::new() }
    }
}

struct CachedTheme {
    profile: Arc<ThemeProfile>,
    stored_at: Instant,
}

pub struct PackSynergyAnalyzer {
    metadata: CardMetadataCache,
    themes: Mutex<HashMap<String, CachedTheme>>,
    ttl: Duration,
    enabled: AtomicBool,
}

impl PackSynergyAnalyzer {
    pub fn new(database: Arc<dyn CardDatabase>, settings: &SynergySettings) -> Self {
        Self {
            metadata: CardMetadataCache::new(database, settings),
            themes: Mutex::new(HashMap::new()),
            ttl: settings.theme_cache_ttl(),
            enabled: AtomicBool::new(settings.enabled),
        }
    }

    pub fn metadata(&self) -> &CardMetadataCache {
        &self.metadata
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
        info!("Pack synergy analysis {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn themes(&self) -> MutexGuard<'_, HashMap<String, CachedTheme>> {
        self.themes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn fresh_theme(&self, pack: &str) -> Option<Arc<ThemeProfile>> {
        let mut themes = self.themes();
        match themes.get(pack) {
            Some(cached) if cached.stored_at.elapsed() < self.ttl => Some(cached.profile.clone()),
            Some(_) => {
                themes.remove(pack);
                None
            }
            None => None,
        }
    }

    /// Theme profile of a pack, cached by pack name until the TTL runs out.
    /// `None` when the pool has no cards for the pack.
    pub async fn analyze_pack(&self, pack: &str, pool: &CardPool) -> Option<Arc<ThemeProfile>> {
        if let Some(profile) = self.fresh_theme(pack) {
            return Some(profile);
        }

        let names = pool.pack_card_names(pack);
        if names.is_empty() {
            debug!("Pack '{}' has no cards, skipping profile", pack);
            return None;
        }

        let cards = self.metadata.get(&names, pool).await;
        let profile = Arc::new(profile::profile(&cards));
        debug!(
            "Pack '{}': {} cards, {} (strength {:.1}), colors {:?}, curve {}",
            pack,
            profile.card_count,
            profile.primary_strategy,
            profile.theme_strength,
            profile.color_identity,
            profile.curve_archetype
        );

        let cached = CachedTheme { profile: profile.clone(), stored_at: Instant::now() };
        self.themes().insert(pack.to_string(), cached);
        Some(profile)
    }

    pub async fn compare_packs(
        &self,
        pack_a: &str,
        pack_b: &str,
        pool: &CardPool,
        context: &ScoringContext,
    ) -> Option<CompatibilityScore> {
        let a = self.analyze_pack(pack_a, pool).await?;
        let b = self.analyze_pack(pack_b, pool).await?;
        Some(compatibility::score(&a, &b, context))
    }

    /// Scores the ticket's first pack against every candidate. The first pack is
    /// profiled before any comparison starts; comparisons then run concurrently
    /// and each result stays keyed by its own option id. Candidates that cannot
    /// be profiled are left out.
    pub async fn sweep(
        &self,
        ticket: &SweepTicket,
        candidates: &[PackOption],
        pool: &CardPool,
        context: &ScoringContext,
    ) -> SweepReport {
        let mut report = SweepReport::empty(ticket);
        if !self.is_enabled() {
            debug!("Synergy analysis disabled, skipping sweep for '{}'", ticket.pack1);
            return report;
        }

        let start = Instant::now();
        info!("Synergy sweep for '{}' against {} candidates", ticket.pack1, candidates.len());

        let Some(pack1) = self.analyze_pack(&ticket.pack1, pool).await else {
            warn!("Could not profile pack '{}', no indicators this sweep", ticket.pack1);
            return report;
        };

        let comparisons = candidates.iter().map(|option| {
            let pack1 = &pack1;
            async move {
                let candidate = self.analyze_pack(&option.pack, pool).await?;
                Some((option.option_id.clone(), compatibility::score(pack1, &candidate, context)))
            }
        });
        report.results = join_all(comparisons).await.into_iter().flatten().collect();

        info!(
            "Synergy sweep for '{}' scored {} of {} candidates in {:?}",
            ticket.pack1,
            report.results.len(),
            candidates.len(),
            start.elapsed()
        );
        report
    }

    pub fn clear_cache(&self) {
        self.metadata.clear();
        let mut themes = self.themes();
        let dropped = themes.len();
        themes.clear();
        info!("Theme profile cache cleared ({} packs)", dropped);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::{
        core::{
            CardRecord,
            Color,
        },
        metadata::cache::tests::FakeDatabase,
        pool::PoolCard,
    };

    fn record(name: &str, type_line: &str, text: &str, cmc: f32, colors: &[Color]) -> CardRecord {
        CardRecord {
            oracle_text: text.to_string(),
            type_line: type_line.to_string(),
            cmc,
            color_identity: colors.iter().copied().collect(),
            ..CardRecord::named(name)
        }
    }

    fn fixture() -> (Arc<FakeDatabase>, CardPool) {
        let db = FakeDatabase::new(vec![
            record("Serra Angel", "Creature - Angel", "Flying, vigilance", 5.0, &[Color::White]),
            record(
                "Soul Warden",
                "Creature - Human Cleric",
                "Whenever another creature enters, you gain 1 life.",
                1.0,
                &[Color::White],
            ),
            record("Counterspell", "Instant", "Counter target spell.", 2.0, &[Color::Blue]),
            record(
                "Fact or Fiction",
                "Instant",
                "Reveal the top five cards. Draw a card.",
                4.0,
                &[Color::Blue],
            ),
            record("Goblin Guide", "Creature - Goblin Scout", "Haste", 1.0, &[Color::Red]),
            record(
                "Goblin Bushwhacker",
                "Creature - Goblin Warrior",
                "Kicker {R}",
                1.0,
                &[Color::Red],
            ),
        ]);
        let pool = CardPool::new(vec![
            PoolCard::new("Serra Angel", "Creature - Angel", "{3}{W}{W}", "W - Angels"),
            PoolCard::new("Soul Warden", "Creature - Human Cleric", "{W}", "W - Angels"),
            PoolCard::new("Counterspell", "Instant", "{U}{U}", "U - Wizards"),
            PoolCard::new("Fact or Fiction", "Instant", "{3}{U}", "U - Wizards"),
            PoolCard::new("Goblin Guide", "Creature - Goblin Scout", "{R}", "R - Goblins"),
            PoolCard::new("Goblin Bushwhacker", "Creature - Goblin Warrior", "{R}", "R - Goblins"),
        ]);
        (Arc::new(db), pool)
    }

    fn ticket(pack1: &str, generation: u64) -> SweepTicket {
        SweepTicket { pack1: pack1.to_string(), generation }
    }

    #[tokio::test]
    async fn test_empty_pack_has_no_profile() {
        let (db, pool) = fixture();
        let analyzer = PackSynergyAnalyzer::new(db.clone(), &SynergySettings::default());

        assert!(analyzer.analyze_pack("G - Elves", &pool).await.is_none());
        assert_eq!(db.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_profiles_are_cached_per_pack() {
        let (db, pool) = fixture();
        let analyzer = PackSynergyAnalyzer::new(db.clone(), &SynergySettings::default());

        let first = analyzer.analyze_pack("U - Wizards", &pool).await.unwrap();
        let second = analyzer.analyze_pack("U - Wizards", &pool).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.card_count, 2);
        assert_eq!(db.calls.load(Ordering::SeqCst), 1);

        analyzer.clear_cache();
        assert!(analyzer.metadata().is_empty());
        let third = analyzer.analyze_pack("U - Wizards", &pool).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(*first, *third);
        assert_eq!(db.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_expired_profile_is_rebuilt_from_cached_metadata() {
        let (db, pool) = fixture();
        let settings = SynergySettings { theme_cache_ttl_secs: 0, ..Default::default() };
        let analyzer = PackSynergyAnalyzer::new(db.clone(), &settings);

        let first = analyzer.analyze_pack("R - Goblins", &pool).await.unwrap();
        let second = analyzer.analyze_pack("R - Goblins", &pool).await.unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(db.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sweep_attributes_results_to_options() {
        let (db, pool) = fixture();
        let analyzer = PackSynergyAnalyzer::new(db.clone(), &SynergySettings::default());
        let candidates = vec![
            PackOption::new("opt-wizards", "U - Wizards"),
            PackOption::new("opt-missing", "G - Elves"),
            PackOption::new("opt-goblins", "R - Goblins"),
        ];

        let report = analyzer
            .sweep(&ticket("W - Angels", 7), &candidates, &pool, &ScoringContext::default())
            .await;

        assert_eq!(report.pack1, "W - Angels");
        assert_eq!(report.generation, 7);
        let ids: Vec<&str> = report.results.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["opt-wizards", "opt-goblins"]);

        for (option_id, result) in &report.results {
            let pack = candidates.iter().find(|c| &c.option_id == option_id).unwrap();
            let direct = analyzer
                .compare_packs("W - Angels", &pack.pack, &pool, &ScoringContext::default())
                .await
                .unwrap();
            assert_eq!(*result, direct);
            assert!(!result.reasons.is_empty());
        }
    }

    #[tokio::test]
    async fn test_disabled_or_empty_pack1_yields_empty_report() {
        let (db, pool) = fixture();
        let analyzer = PackSynergyAnalyzer::new(db.clone(), &SynergySettings::default());
        let candidates = vec![PackOption::new("opt-wizards", "U - Wizards")];

        analyzer.set_enabled(false);
        let report = analyzer
            .sweep(&ticket("W - Angels", 1), &candidates, &pool, &ScoringContext::default())
            .await;
        assert!(report.results.is_empty());
        assert_eq!(db.calls.load(Ordering::SeqCst), 0);

        analyzer.set_enabled(true);
        let report = analyzer
            .sweep(&ticket("G - Elves", 2), &candidates, &pool, &ScoringContext::default())
            .await;
        assert!(report.results.is_empty());
    }

    #[tokio::test]
    async fn test_sweep_survives_database_outage() {
        let (_, pool) = fixture();
        let db = Arc::new(FakeDatabase::failing());
        let analyzer = PackSynergyAnalyzer::new(db, &SynergySettings::default());
        let candidates = vec![PackOption::new("opt-goblins", "R - Goblins")];

        let report = analyzer
            .sweep(&ticket("W - Angels", 1), &candidates, &pool, &ScoringContext::default())
            .await;

        assert_eq!(report.results.len(), 1);
        let (_, result) = &report.results[0];
        assert!(result.value >= -3.0 && result.value <= 3.0);
    }
}
