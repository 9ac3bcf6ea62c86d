pub mod categories;
pub mod meter;

pub use categories::PowerCategory;
pub use meter::{
    score,
    DeckCard,
    DeckPowerResult,
    PowerLevel,
};
