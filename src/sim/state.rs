//! Game state and core simulation types
//!
//! `GameState` is the single context object the driver owns: mode, session,
//! RNG, spawn timer and tuning. Phases receive it explicitly.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::spawn::{SpawnTimer, make_block};
use crate::tuning::Tuning;

/// Coarse game phase, gating which systems run each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Title screen, waiting for confirm
    Start,
    /// Active gameplay
    Playing,
    /// Session ended by a collision, waiting for confirm to retry
    GameOver,
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Title screen dismissed
    Started,
    /// Fresh session after a game over
    Restarted,
    /// A block entered play
    Spawned,
    /// Blocks removed below the screen
    Pruned(usize),
    /// Player hit a block; session is over
    Collided,
    /// Quit key or window close
    QuitRequested,
}

/// 24-bit display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            rect: tuning.player_spawn_rect(),
        }
    }

    /// Move horizontally by `direction` (-1, 0 or 1) times `speed`, then
    /// clamp into `[min_x, max_x]`
    pub fn steer(&mut self, direction: i32, speed: i32, min_x: i32, max_x: i32) {
        let x = self.rect.pos.x.saturating_add(direction.saturating_mul(speed));
        self.rect.pos.x = x.clamp(min_x, max_x);
    }
}

/// A falling block. Only `rect.pos.y` changes after spawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    /// Pixels per frame
    pub speed: i32,
    pub color: Rgb,
}

impl Block {
    /// Advance one frame
    #[inline]
    pub fn fall(&mut self) {
        self.rect.pos.y = self.rect.pos.y.saturating_add(self.speed);
    }

    /// Top edge strictly below the bottom of the screen
    #[inline]
    pub fn is_below(&self, screen_height: i32) -> bool {
        self.rect.top() > screen_height
    }
}

/// One run from reset to collision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub player: Player,
    /// Live blocks in spawn order (later ones are drawn on top)
    pub blocks: Vec<Block>,
    /// Survived time in seconds
    pub score: f64,
    pub alive: bool,
}

impl Session {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            player: Player::new(tuning),
            blocks: Vec::new(),
            score: 0.0,
            alive: true,
        }
    }

    /// Score as shown on screen: tenths of a second, truncated
    pub fn display_score(&self) -> u64 {
        (self.score * 10.0).floor() as u64
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Still showing the title screen
    pub on_title: bool,
    pub session: Session,
    pub spawn_timer: SpawnTimer,
    pub rng: Pcg32,
    /// Frames ticked since construction
    pub time_ticks: u64,
    /// Quit was requested; the driver should stop
    pub terminated: bool,
}

impl GameState {
    /// Create a new game state on the title screen
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let session = Session::new(&tuning);
        let spawn_timer = SpawnTimer::new(tuning.spawn_interval_secs());
        Self {
            seed,
            tuning,
            on_title: true,
            session,
            spawn_timer,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            terminated: false,
        }
    }

    /// Current mode, derived so it can never disagree with `session.alive`
    pub fn mode(&self) -> Mode {
        if self.on_title {
            Mode::Start
        } else if self.session.alive {
            Mode::Playing
        } else {
            Mode::GameOver
        }
    }

    /// Whether the update engine and spawner should run
    #[inline]
    pub fn is_active(&self) -> bool {
        self.mode() == Mode::Playing
    }

    /// Replace the session wholesale
    pub fn reset_session(&mut self) {
        self.session = Session::new(&self.tuning);
    }

    /// Generate a block and append it to the live set
    pub fn spawn_block(&mut self) {
        let block = make_block(&mut self.rng, &self.tuning);
        log::debug!(
            "Spawned {}x{} block at x={} speed={}",
            block.rect.width(),
            block.rect.height(),
            block.rect.x(),
            block.speed
        );
        self.session.blocks.push(block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_on_title() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.mode(), Mode::Start);
        assert!(state.session.alive);
        assert!(state.session.blocks.is_empty());
        assert_eq!(state.session.score, 0.0);
        assert!(!state.terminated);
    }

    #[test]
    fn test_mode_derivation() {
        let mut state = GameState::new(1, Tuning::default());
        state.on_title = false;
        assert_eq!(state.mode(), Mode::Playing);
        state.session.alive = false;
        assert_eq!(state.mode(), Mode::GameOver);
        state.reset_session();
        assert_eq!(state.mode(), Mode::Playing);
    }

    #[test]
    fn test_display_score_truncates() {
        let mut session = Session::new(&Tuning::default());
        session.score = 1.29;
        assert_eq!(session.display_score(), 12);
        session.score = 0.099;
        assert_eq!(session.display_score(), 0);
    }

    #[test]
    fn test_steer_clamps() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.steer(-1, 1000, tuning.player_min_x(), tuning.player_max_x());
        assert_eq!(player.rect.x(), tuning.player_min_x());
        player.steer(1, 1000, tuning.player_min_x(), tuning.player_max_x());
        assert_eq!(player.rect.x(), tuning.player_max_x());
    }

    #[test]
    fn test_steer_huge_speed_still_clamps() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.steer(1, i32::MAX, tuning.player_min_x(), tuning.player_max_x());
        assert_eq!(player.rect.x(), tuning.player_max_x());
        player.steer(-1, i32::MAX, tuning.player_min_x(), tuning.player_max_x());
        assert_eq!(player.rect.x(), tuning.player_min_x());
    }

    #[test]
    fn test_block_fall_and_below() {
        let mut block = Block {
            rect: Rect::new(0, 715, 20, 20),
            speed: 5,
            color: Rgb(200, 100, 100),
        };
        assert!(!block.is_below(720));
        block.fall();
        assert_eq!(block.rect.y(), 720);
        // Top edge exactly at the bottom is still "on" the screen edge
        assert!(!block.is_below(720));
        block.fall();
        assert!(block.is_below(720));
    }
}
