pub mod error;
pub mod types;

pub use error::{HarvestError, Result};
pub use types::{ItemCategory, PlayerId, Rarity, SkinId};
