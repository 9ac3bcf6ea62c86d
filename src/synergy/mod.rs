pub mod analyzer;
pub mod compatibility;
pub mod detector;
pub mod profile;
pub mod taxonomy;

#[cfg(test)]
mod compatibility_tests;

pub use analyzer::{
    PackOption,
    PackSynergyAnalyzer,
    SweepReport,
};
pub use compatibility::{
    CompatibilityScore,
    ScoringContext,
    SynergyTier,
};
pub use detector::{
    SynergyFinding,
    SynergyType,
};
pub use profile::{
    CurveArchetype,
    ThemeProfile,
};
