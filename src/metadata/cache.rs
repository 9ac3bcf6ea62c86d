use std::{
    collections::{
        HashMap,
        HashSet,
    },
    sync::{
        Arc,
        Mutex,
        MutexGuard,
    },
    time::{
        Duration,
        Instant,
    },
};

use tokio::time::sleep;
use tracing::{
    debug,
    info,
    warn,
};

use crate::{
    core::CardRecord,
    pool::{
        fallback_record,
        CardPool,
    },
    scryfall::CardDatabase,
    settings::SynergySettings,
};

/// Session-wide name -> metadata map. Entries are insert-once: the first record
/// stored for a name is the one every later caller sees.
pub struct CardMetadataCache {
    database: Arc<dyn CardDatabase>,
    entries: Mutex<HashMap<String, CardRecord>>,
    batch_size: usize,
    max_batches: usize,
    batch_delay: Duration,
}

impl CardMetadataCache {
    pub fn new(database: Arc<dyn CardDatabase>, settings: &SynergySettings) -> Self {
        Self {
            database,
            entries: Mutex::new(HashMap::new()),
            batch_size: settings.batch_size(),
            max_batches: settings.max_batches_per_call,
            batch_delay: settings.batch_delay(),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CardRecord>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// One record per requested name, in request order. Never fails: names the
    /// database cannot answer for are filled from the pool.
    pub async fn get(&self, names: &[String], pool: &CardPool) -> Vec<CardRecord> {
        let uncached: Vec<String> = {
            let entries = self.entries();
            let mut seen = HashSet::new();
            names
                .iter()
                .filter(|name| !entries.contains_key(name.as_str()))
                .filter(|name| seen.insert(name.as_str()))
                .cloned()
                .collect()
        };

        if !uncached.is_empty() {
            self.fetch_uncached(&uncached, pool).await;
        }

        let entries = self.entries();
        names
            .iter()
            .map(|name| match entries.get(name) {
                Some(record) => record.clone(),
                // Only reachable if the cache was cleared mid-call
                None => fallback_record(name, pool.row(name)),
            })
            .collect()
    }

    async fn fetch_uncached(&self, uncached: &[String], pool: &CardPool) {
        let start = Instant::now();
        let batches: Vec<&[String]> = uncached.chunks(self.batch_size).collect();
        let processed = batches.len().min(self.max_batches);

        if processed < batches.len() {
            debug!(
                "Batch cap reached: {} of {} uncached names left to pool data",
                uncached.len() - processed * self.batch_size,
                uncached.len()
            );
        }

        for (batch_index, batch) in batches.iter().take(processed).enumerate() {
            if batch_index > 0 {
                sleep(self.batch_delay).await;
            }

            match self.database.fetch_collection(batch).await {
                Ok(records) => {
                    let returned = records.len();
                    let mut entries = self.entries();
                    for record in records {
                        entries.entry(record.name.clone()).or_insert(record);
                    }
                    let missing = Self::fill_from_pool(&mut entries, batch, pool);
                    debug!(
                        "Batch {}: {} returned, {} filled from pool",
                        batch_index + 1,
                        returned,
                        missing
                    );
                }
                Err(e) => {
                    warn!("Batch fetch failed, using pool data for {} cards: {}", batch.len(), e);
                    let mut entries = self.entries();
                    Self::fill_from_pool(&mut entries, batch, pool);
                }
            }
        }

        // Names past the cap converge to pool data like any other miss
        let mut entries = self.entries();
        for batch in &batches[processed..] {
            Self::fill_from_pool(&mut entries, batch, pool);
        }

        debug!("Fetched metadata for {} names in {:?}", uncached.len(), start.elapsed());
    }

    fn fill_from_pool(
        entries: &mut HashMap<String, CardRecord>,
        batch: &[String],
        pool: &CardPool,
    ) -> usize {
        let mut filled = 0;
        for name in batch {
            if !entries.contains_key(name) {
                entries.insert(name.clone(), fallback_record(name, pool.row(name)));
                filled += 1;
            }
        }
        filled
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn clear(&self) {
        let mut entries = self.entries();
        let dropped = entries.len();
        entries.clear();
        info!("Card metadata cache cleared ({} entries)", dropped);
    }
}
