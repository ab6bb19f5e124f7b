//! Board interaction adapter and its collaborators

mod adapter;
mod rules;
mod types;

pub use adapter::{BoardAdapter, BoardRenderer};
pub use rules::{RulesEngine, ShakmatyRules, STARTING_FEN};
pub use types::{BoardConfig, BoardMode, DestinationMap, InteractionPolicy, MoveRecord};
