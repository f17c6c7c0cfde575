//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here, so a config file
//! can override it. Defaults come from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::consts::*;
use crate::sim::Rect;

/// Largest accepted screen dimension; keeps all coordinate sums well inside
/// `i32`
pub const MAX_SCREEN_DIM: i32 = 1 << 14;

/// Gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Logical canvas width in pixels
    pub screen_width: i32,
    /// Logical canvas height in pixels
    pub screen_height: i32,

    // === Player ===
    pub player_width: i32,
    pub player_height: i32,
    /// Pixels per frame
    pub player_speed: i32,
    /// Player top edge sits this far above the bottom of the screen
    pub player_bottom_offset: i32,
    /// Horizontal clamp margin
    pub margin: i32,

    // === Blocks ===
    pub block_min_size: i32,
    pub block_max_size: i32,
    /// Pixels per frame
    pub block_min_speed: i32,
    pub block_max_speed: i32,
    /// Spawn interval in milliseconds of real time
    pub spawn_every_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,
            margin: MARGIN,

            block_min_size: BLOCK_MIN_SIZE,
            block_max_size: BLOCK_MAX_SIZE,
            block_min_speed: BLOCK_MIN_SPEED,
            block_max_speed: BLOCK_MAX_SPEED,
            spawn_every_ms: SPAWN_EVERY_MS,
        }
    }
}

impl Tuning {
    /// Leftmost allowed player x
    #[inline]
    pub fn player_min_x(&self) -> i32 {
        self.margin
    }

    /// Rightmost allowed player x
    #[inline]
    pub fn player_max_x(&self) -> i32 {
        self.screen_width - self.player_width - self.margin
    }

    /// Player rectangle at the start of a session: centered, near the bottom
    pub fn player_spawn_rect(&self) -> Rect {
        Rect::new(
            self.screen_width / 2 - self.player_width / 2,
            self.screen_height - self.player_bottom_offset,
            self.player_width,
            self.player_height,
        )
    }

    /// Spawn interval in seconds
    #[inline]
    pub fn spawn_interval_secs(&self) -> f32 {
        self.spawn_every_ms as f32 / 1000.0
    }

    /// Reject combinations the simulation cannot honor (player wider than
    /// the playfield, empty random ranges, blocks that never fall, ...)
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(ok: bool, msg: &str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid(msg.to_string()))
            }
        }

        check(
            self.screen_width > 0 && self.screen_height > 0,
            "screen dimensions must be positive",
        )?;
        check(
            self.screen_width <= MAX_SCREEN_DIM && self.screen_height <= MAX_SCREEN_DIM,
            "screen dimensions are too large",
        )?;
        check(
            self.player_width > 0 && self.player_height > 0,
            "player dimensions must be positive",
        )?;
        check(
            self.player_width <= self.screen_width && self.player_height <= self.screen_height,
            "player must fit on screen",
        )?;
        check(
            (0..=self.screen_width).contains(&self.player_speed),
            "player_speed must be between 0 and screen_width",
        )?;
        check(
            (0..=self.screen_width).contains(&self.margin),
            "margin must be between 0 and screen_width",
        )?;
        check(
            self.player_width + 2 * self.margin <= self.screen_width,
            "player plus margins must fit within screen_width",
        )?;
        check(
            self.player_bottom_offset >= self.player_height
                && self.player_bottom_offset <= self.screen_height,
            "player_bottom_offset must keep the player on screen",
        )?;
        check(self.block_min_size > 0, "block_min_size must be positive")?;
        check(
            self.block_min_size <= self.block_max_size,
            "block_min_size must not exceed block_max_size",
        )?;
        check(
            self.block_max_size <= self.screen_width,
            "block_max_size must not exceed screen_width",
        )?;
        check(self.block_min_speed > 0, "block_min_speed must be positive")?;
        check(
            self.block_min_speed <= self.block_max_speed,
            "block_min_speed must not exceed block_max_speed",
        )?;
        check(
            self.block_max_speed <= self.screen_height,
            "block_max_speed must not exceed screen_height",
        )?;
        check(self.spawn_every_ms > 0, "spawn_every_ms must be positive")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_default_player_spawn() {
        let tuning = Tuning::default();
        let rect = tuning.player_spawn_rect();
        assert_eq!(rect, Rect::new(215, 640, 50, 20));
        assert_eq!(tuning.player_min_x(), 8);
        assert_eq!(tuning.player_max_x(), 422);
    }

    #[test]
    fn test_rejects_inverted_ranges() {
        let tuning = Tuning {
            block_min_size: 70,
            block_max_size: 60,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(ConfigError::Invalid(_))));

        let tuning = Tuning {
            block_min_speed: 9,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_unplayable_geometry() {
        let cases = [
            Tuning {
                player_width: 470,
                ..Default::default()
            },
            Tuning {
                block_max_size: 500,
                ..Default::default()
            },
            Tuning {
                block_min_speed: 0,
                ..Default::default()
            },
            Tuning {
                spawn_every_ms: 0,
                ..Default::default()
            },
            Tuning {
                player_bottom_offset: 10,
                ..Default::default()
            },
            Tuning {
                screen_height: 0,
                ..Default::default()
            },
            Tuning {
                player_speed: i32::MAX,
                ..Default::default()
            },
            Tuning {
                block_max_speed: i32::MAX,
                ..Default::default()
            },
            Tuning {
                margin: i32::MAX,
                ..Default::default()
            },
            Tuning {
                screen_width: i32::MAX,
                ..Default::default()
            },
        ];
        for tuning in cases {
            assert!(tuning.validate().is_err(), "accepted {tuning:?}");
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "player_speed": 9 }"#).unwrap();
        assert_eq!(tuning.player_speed, 9);
        assert_eq!(tuning.screen_width, SCREEN_WIDTH);
        assert_eq!(tuning.spawn_every_ms, SPAWN_EVERY_MS);
    }
}
