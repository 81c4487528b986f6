pub mod activity;
pub mod api;
pub mod core;
pub mod extraction;

// --- Primary core exports ---
pub use crate::core::types;
pub use crate::core::types::*;
pub use crate::core::AppState;

pub use extraction::{
    extract, extract_with_strategy, Extraction, Locator, Strategy, StrategyRegistry,
};
