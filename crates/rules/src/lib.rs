pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod logger;
pub mod types;

pub use board::*;
pub use config::GameConfig;
pub use error::Error;
pub use events::{GameEvent, Intent};
pub use game::{GameState, Snapshot};
pub use logger::GameLogger;
pub use types::*;
