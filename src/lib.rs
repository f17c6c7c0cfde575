//! Dodge the Blocks - a tiny falling-block arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences
//! - `config`: JSON config file loading
//! - `frontend`: Terminal renderer, input sampler and frame driver

pub mod config;
pub mod frontend;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use config::{Config, ConfigError};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`] and [`Settings`])
pub mod consts {
    /// Logical canvas size in pixels
    pub const SCREEN_WIDTH: i32 = 480;
    pub const SCREEN_HEIGHT: i32 = 720;

    /// Target frame rate of the driver loop
    pub const TARGET_FPS: u32 = 60;

    /// Player rectangle
    pub const PLAYER_WIDTH: i32 = 50;
    pub const PLAYER_HEIGHT: i32 = 20;
    /// Horizontal movement per frame (not scaled by dt)
    pub const PLAYER_SPEED: i32 = 6;
    /// Distance of the player's top edge from the bottom of the screen
    pub const PLAYER_BOTTOM_OFFSET: i32 = 80;

    /// Block size range (inclusive, applies to width and height independently)
    pub const BLOCK_MIN_SIZE: i32 = 20;
    pub const BLOCK_MAX_SIZE: i32 = 60;
    /// Block fall speed range in pixels per frame (inclusive)
    pub const BLOCK_MIN_SPEED: i32 = 3;
    pub const BLOCK_MAX_SPEED: i32 = 8;

    /// Wall-clock interval between block spawns
    pub const SPAWN_EVERY_MS: u32 = 700;

    /// Horizontal margin the player is clamped to
    pub const MARGIN: i32 = 8;

    /// Ground line distance from the bottom of the screen
    pub const GROUND_OFFSET: i32 = 50;
}
