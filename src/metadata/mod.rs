pub mod cache;

pub use cache::CardMetadataCache;
