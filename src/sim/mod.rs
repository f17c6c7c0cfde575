//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or terminal dependencies

pub mod collision;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::first_collision;
pub use rect::Rect;
pub use spawn::{SpawnTimer, make_block};
pub use state::{Block, GameEvent, GameState, Mode, Player, Rgb, Session};
pub use tick::{TickInput, tick};
