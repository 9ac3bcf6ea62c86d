pub mod core;
pub mod deck;
pub mod metadata;
pub mod persistence;
pub mod pool;
pub mod power;
pub mod scryfall;
pub mod session;
pub mod settings;
pub mod synergy;

pub use crate::core::{
    CardRecord,
    Color,
    ColorSet,
    CubeError,
};
pub use metadata::CardMetadataCache;
pub use pool::{
    CardPool,
    PoolCard,
};
pub use session::{
    DraftSession,
    SweepTicket,
};
pub use settings::SynergySettings;
pub use synergy::{
    CompatibilityScore,
    PackSynergyAnalyzer,
    ScoringContext,
    ThemeProfile,
};
