pub mod core {
	pub mod color;
	pub mod config;
	pub mod game;
	pub mod palette;
	pub mod renderer;
	pub mod timer;
}

pub mod cli;
pub mod engine;

// Re-export for convenience
pub use crate::core::color::{similar_color, Color};
pub use crate::core::game::{GameEngine, GameState, GuessOutcome, Status};
