pub mod capacity;
pub mod commitment;
pub mod cost;
pub mod engine;
pub mod merit;
pub mod types;

pub use commitment::{Commitment, CommitmentSearch, SearchOutcome};
pub use engine::DispatchEngine;
pub use types::*;
