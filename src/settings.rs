use std::{
    path::{
        Path,
        PathBuf,
    },
    time::Duration,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::CubeError,
    persistence,
};

pub const SETTINGS_FILE: &str = "synergy_settings.json";

pub const SCRYFALL_COLLECTION_URL: &str = "https://api.scryfall.com/cards/collection";

/// The card database asks for at least this much breathing room between batches.
pub const MIN_BATCH_DELAY_MS: u64 = 150;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynergySettings {
    pub enabled: bool,
    pub collection_endpoint: String,
    pub batch_size: usize,
    pub max_batches_per_call: usize,
    pub batch_delay_ms: u64,
    pub theme_cache_ttl_secs: u64,
    pub http_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SynergySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            collection_endpoint: SCRYFALL_COLLECTION_URL.to_string(),
            batch_size: 25,
            max_batches_per_call: 2,
            batch_delay_ms: 200,
            theme_cache_ttl_secs: 30 * 60,
            http_timeout_secs: 30,
            user_agent: "rosscube/0.3 (+reqwest)".to_string(),
        }
    }
}

impl SynergySettings {
    pub fn save(&self) -> Result<(), CubeError> {
        persistence::save_json(self, SETTINGS_FILE)
    }

    pub fn settings_path() -> PathBuf {
        persistence::get_data_file_path(SETTINGS_FILE)
    }

    /// Writes the defaults on first run so there is a file to edit.
    pub fn load_or_init() -> Result<Self, CubeError> {
        let path = Self::settings_path();
        let settings = Self::load_from(&path)?;
        if !path.exists() {
            settings.save()?;
        }
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Self, CubeError> {
        persistence::read_json(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), CubeError> {
        persistence::write_json(self, path)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms.max(MIN_BATCH_DELAY_MS))
    }

    pub fn theme_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.theme_cache_ttl_secs)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: SynergySettings =
            serde_json::from_str(r#"{ "batch_size": 10, "batch_delay_ms": 20 }"#).unwrap();

        assert_eq!(settings.batch_size, 10);
        assert_eq!(settings.max_batches_per_call, 2);
        assert_eq!(settings.collection_endpoint, SCRYFALL_COLLECTION_URL);
        assert!(settings.enabled);
        // Rate limit floor still applies
        assert_eq!(settings.batch_delay(), Duration::from_millis(MIN_BATCH_DELAY_MS));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let file_name = format!("rosscube-settings-{}.json", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        let settings = SynergySettings { enabled: false, batch_size: 10, ..Default::default() };

        settings.save_to(&path).unwrap();
        assert_eq!(SynergySettings::load_from(&path).unwrap(), settings);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_default_ttl_is_thirty_minutes() {
        assert_eq!(SynergySettings::default().theme_cache_ttl(), Duration::from_secs(1800));
    }
}
