//! Terminal frontend
//!
//! The external collaborators around the simulation: terminal setup, the
//! frame driver, input sampling and rendering. Single-threaded; each frame
//! runs sample -> tick -> draw in order, then sleeps to the frame cap.

pub mod canvas;
pub mod draw;
pub mod input;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{cursor, execute, queue, terminal};

use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, tick};
use canvas::Canvas;
use input::KeySampler;

/// Longest frame the simulation is fed; longer stalls (suspend, debugger)
/// are cut short so they do not flood the spawner
pub const MAX_FRAME_DT: f32 = 0.25;

/// Puts the terminal into game mode and restores it on drop
pub struct TerminalGuard<W: Write> {
    out: W,
    enhanced: bool,
}

impl<W: Write> TerminalGuard<W> {
    pub fn enter(mut out: W, want_enhancement: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            terminal::SetTitle("Dodge the Blocks"),
            cursor::Hide,
            terminal::DisableLineWrap,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let enhanced = want_enhancement
            && terminal::supports_keyboard_enhancement().unwrap_or(false)
            && execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .is_ok();
        if want_enhancement && !enhanced {
            log::warn!("Keyboard enhancement unavailable; using key hold window");
        }

        Ok(Self { out, enhanced })
    }

    /// Key release events are reported
    pub fn enhanced(&self) -> bool {
        self.enhanced
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            self.out,
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen,
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Frame rate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [Option<Instant>; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [None; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn record(&mut self, now: Instant) {
        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Slot after the newest is the oldest once the ring has filled
        if let Some(oldest) = self.frame_times[self.frame_index] {
            let elapsed = now.duration_since(oldest).as_secs_f64();
            if elapsed > 0.0 {
                self.fps = ((self.frame_times.len() - 1) as f64 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// The frame driver: owns the game context and the terminal collaborators
pub struct App<W: Write> {
    term: TerminalGuard<W>,
    state: GameState,
    settings: Settings,
    sampler: KeySampler,
    canvas: Canvas,
    fps: FpsCounter,
}

impl<W: Write> App<W> {
    pub fn new(out: W, state: GameState, settings: Settings) -> io::Result<Self> {
        let term = TerminalGuard::enter(out, settings.keyboard_enhancement)?;
        let sampler = KeySampler::new(
            term.enhanced(),
            Duration::from_millis(settings.key_hold_ms),
        );
        let (cols, rows) = terminal::size()?;
        let canvas = Canvas::fit(
            cols,
            rows,
            state.tuning.screen_width,
            state.tuning.screen_height,
        );
        log::info!(
            "Terminal {}x{}, canvas scale 1:{}",
            cols,
            rows,
            canvas.scale()
        );
        Ok(Self {
            term,
            state,
            settings,
            sampler,
            canvas,
            fps: FpsCounter::default(),
        })
    }

    /// Run until quit. Returns the final state.
    pub fn run(mut self) -> io::Result<GameState> {
        let frame_dur = self.settings.frame_duration();
        let mut last = Instant::now();

        while !self.state.terminated {
            let frame_start = Instant::now();
            let dt = frame_start
                .duration_since(last)
                .as_secs_f32()
                .min(MAX_FRAME_DT);
            last = frame_start;

            let sample = self.sampler.sample(frame_start)?;
            if let Some((cols, rows)) = sample.resized {
                self.resize(cols, rows)?;
            }

            for event in tick(&mut self.state, &sample.input, dt) {
                if event == GameEvent::Collided {
                    log::info!(
                        "Survived {:.1}s over {} frames",
                        self.state.session.score,
                        self.state.time_ticks
                    );
                }
            }
            if self.state.terminated {
                break;
            }

            self.fps.record(frame_start);
            self.draw()?;

            // Frame pacing
            let elapsed = frame_start.elapsed();
            if elapsed < frame_dur {
                std::thread::sleep(frame_dur - elapsed);
            }
        }

        Ok(self.state)
    }

    fn resize(&mut self, cols: u16, rows: u16) -> io::Result<()> {
        self.canvas = Canvas::fit(
            cols,
            rows,
            self.state.tuning.screen_width,
            self.state.tuning.screen_height,
        );
        log::debug!("Resized to {}x{}, scale 1:{}", cols, rows, self.canvas.scale());
        queue!(self.term.out(), terminal::Clear(terminal::ClearType::All))
    }

    fn draw(&mut self) -> io::Result<()> {
        let fps = self.settings.show_fps.then(|| self.fps.fps());
        let out = self.term.out();
        queue!(out, terminal::BeginSynchronizedUpdate)?;
        draw::draw_frame(out, &mut self.canvas, &self.state, fps)?;
        queue!(out, terminal::EndSynchronizedUpdate)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_counter_steady_rate() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::default();
        for i in 0..120 {
            fps.record(t0 + Duration::from_micros(16_667 * i));
        }
        assert_eq!(fps.fps(), 60);
    }

    #[test]
    fn test_fps_counter_waits_for_full_ring() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::default();
        for i in 0..30 {
            fps.record(t0 + Duration::from_millis(10 * i));
        }
        assert_eq!(fps.fps(), 0);
    }
}
