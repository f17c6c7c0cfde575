//! Per-frame simulation tick
//!
//! Runs the state machine (confirm/quit), polls the spawn timer and, while
//! playing, the update engine. Motion is per frame; only score and the spawn
//! timer consume `dt`.

use super::collision::first_collision;
use super::state::{GameEvent, GameState, Mode};

/// Input sampled for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left held (continuous)
    pub left: bool,
    /// Right held (continuous)
    pub right: bool,
    /// Confirm key pressed this frame (Enter/Space)
    pub confirm: bool,
    /// Quit key pressed this frame, or the window was closed
    pub quit: bool,
}

impl TickInput {
    /// Horizontal direction in {-1, 0, 1}; both keys held cancel out
    #[inline]
    pub fn direction(&self) -> i32 {
        self.right as i32 - self.left as i32
    }
}

/// Advance the game by one frame of `dt` real seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.terminated {
        return events;
    }
    if input.quit {
        log::info!("Quit requested");
        state.terminated = true;
        events.push(GameEvent::QuitRequested);
        return events;
    }

    if input.confirm {
        match state.mode() {
            Mode::Start => {
                state.on_title = false;
                log::info!("Game started (seed {})", state.seed);
                events.push(GameEvent::Started);
            }
            Mode::GameOver => {
                state.reset_session();
                log::info!("Game restarted");
                events.push(GameEvent::Restarted);
            }
            Mode::Playing => {}
        }
    }

    // The timer keeps running in every mode; fires outside play are dropped
    let fired = state.spawn_timer.advance(dt);
    if state.is_active() {
        for _ in 0..fired {
            state.spawn_block();
            events.push(GameEvent::Spawned);
        }
    }

    if state.is_active() {
        update(state, input, dt, &mut events);
    }

    state.time_ticks += 1;
    events
}

/// Update engine: steer, fall, prune, collide, score (in that order)
fn update(state: &mut GameState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    let tuning = &state.tuning;
    let session = &mut state.session;

    session.player.steer(
        input.direction(),
        tuning.player_speed,
        tuning.player_min_x(),
        tuning.player_max_x(),
    );

    for block in &mut session.blocks {
        block.fall();
    }

    let before = session.blocks.len();
    let screen_height = tuning.screen_height;
    session.blocks.retain(|block| !block.is_below(screen_height));
    let pruned = before - session.blocks.len();
    if pruned > 0 {
        log::debug!("Pruned {} blocks", pruned);
        events.push(GameEvent::Pruned(pruned));
    }

    if first_collision(&session.player.rect, &session.blocks).is_some() {
        session.alive = false;
        log::info!("Game over: score {}", session.display_score());
        events.push(GameEvent::Collided);
        return;
    }

    session.score += f64::from(dt.max(0.0));
}
