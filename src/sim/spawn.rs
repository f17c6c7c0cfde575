//! Block spawning
//!
//! The spawn cadence is an explicit accumulator of real elapsed time, polled
//! once per tick, so spawning stays deterministic under a fixed dt sequence.

use rand::Rng;

use super::rect::Rect;
use super::state::{Block, Rgb};
use crate::tuning::Tuning;

/// Color channel ranges (inclusive)
const RED_RANGE: (u8, u8) = (120, 255);
const GREEN_RANGE: (u8, u8) = (80, 200);
const BLUE_RANGE: (u8, u8) = (80, 200);

/// Repeating wall-clock timer
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTimer {
    /// Seconds between fires
    interval: f32,
    /// Seconds accumulated since the last fire
    elapsed: f32,
}

impl SpawnTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Seconds accumulated toward the next fire
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Add `dt` seconds and return how many times the timer fired
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += dt.max(0.0);
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }
}

/// Generate a block fully above the visible area, horizontally inside the
/// screen
pub fn make_block(rng: &mut impl Rng, tuning: &Tuning) -> Block {
    let w = rng.random_range(tuning.block_min_size..=tuning.block_max_size);
    let h = rng.random_range(tuning.block_min_size..=tuning.block_max_size);
    let x = rng.random_range(0..=tuning.screen_width - w);
    let speed = rng.random_range(tuning.block_min_speed..=tuning.block_max_speed);
    let color = Rgb(
        rng.random_range(RED_RANGE.0..=RED_RANGE.1),
        rng.random_range(GREEN_RANGE.0..=GREEN_RANGE.1),
        rng.random_range(BLUE_RANGE.0..=BLUE_RANGE.1),
    );
    Block {
        rect: Rect::new(x, -h, w, h),
        speed,
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_timer_fires_on_interval() {
        let mut timer = SpawnTimer::new(0.7);
        assert_eq!(timer.advance(0.5), 0);
        assert_eq!(timer.advance(0.25), 1);
        assert!((timer.elapsed() - 0.05).abs() < 1e-5);
        assert_eq!(timer.advance(0.6), 0);
        assert_eq!(timer.advance(0.1), 1);
    }

    #[test]
    fn test_timer_fires_repeatedly_on_long_frame() {
        let mut timer = SpawnTimer::new(0.7);
        assert_eq!(timer.advance(2.2), 3);
        assert!(timer.elapsed() < timer.interval());
    }

    #[test]
    fn test_timer_ignores_negative_dt() {
        let mut timer = SpawnTimer::new(0.7);
        assert_eq!(timer.advance(-5.0), 0);
        assert_eq!(timer.elapsed(), 0.0);
    }

    #[test]
    fn test_timer_at_60hz() {
        let mut timer = SpawnTimer::new(0.7);
        let fired: u32 = (0..600).map(|_| timer.advance(1.0 / 60.0)).sum();
        // 10 seconds of frames
        assert!((14..=15).contains(&fired), "fired {fired}");
    }

    #[test]
    fn test_make_block_ranges() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let block = make_block(&mut rng, &tuning);
            let r = block.rect;
            assert!((20..=60).contains(&r.width()));
            assert!((20..=60).contains(&r.height()));
            assert!(r.x() >= 0);
            assert!(r.right() <= tuning.screen_width);
            assert_eq!(r.y(), -r.height());
            assert!((3..=8).contains(&block.speed));
            assert!(block.color.0 >= 120);
            assert!((80..=200).contains(&block.color.1));
            assert!((80..=200).contains(&block.color.2));
        }
    }

    #[test]
    fn test_make_block_deterministic() {
        let tuning = Tuning::default();
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(make_block(&mut a, &tuning), make_block(&mut b, &tuning));
        }
    }
}
