pub mod api;
pub mod types;

pub use api::{
    CardDatabase,
    ScryfallClient,
    UnavailableDatabase,
};
