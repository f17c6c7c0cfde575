//! Scene drawing
//!
//! Reads a finished `GameState` and paints it; never mutates game state.

use std::io::{self, Write};

use crossterm::{cursor, queue, style};

use super::canvas::{Canvas, color};
use crate::consts::GROUND_OFFSET;
use crate::sim::{GameState, Mode, Rgb};

pub const BACKGROUND: Rgb = Rgb(18, 18, 22);
pub const GROUND: Rgb = Rgb(40, 40, 48);
pub const PLAYER: Rgb = Rgb(240, 240, 255);

const TITLE: Rgb = Rgb(255, 255, 255);
const PROMPT: Rgb = Rgb(200, 200, 210);
const SCORE: Rgb = Rgb(230, 230, 235);
const GAME_OVER: Rgb = Rgb(255, 200, 200);
const RETRY: Rgb = Rgb(220, 220, 230);
const FPS: Rgb = Rgb(120, 120, 130);

const PLAYER_RADIUS: i32 = 6;
const BLOCK_RADIUS: i32 = 4;
const GROUND_THICKNESS: i32 = 2;

/// Horizontal placement of a text overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Starts at this logical x
    Left(i32),
    /// Centered on the canvas
    Center,
    /// Ends at the right edge of the canvas
    Right,
}

/// A line of overlay text positioned in logical pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub y: i32,
    pub anchor: Anchor,
    pub color: Rgb,
    pub bold: bool,
}

impl Label {
    fn new(text: impl Into<String>, y: i32, anchor: Anchor, color: Rgb) -> Self {
        Self {
            text: text.into(),
            y,
            anchor,
            color,
            bold: false,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Mode-dependent text overlays
pub fn labels(state: &GameState, fps: Option<u32>) -> Vec<Label> {
    let tuning = &state.tuning;
    let h = tuning.screen_height;
    let mut labels = Vec::new();

    match state.mode() {
        Mode::Start => {
            labels.push(Label::new("DODGE THE BLOCKS", h / 3, Anchor::Center, TITLE).bold());
            labels.push(Label::new(
                "Press Enter/Space to start",
                h / 3 + 48,
                Anchor::Center,
                PROMPT,
            ));
        }
        Mode::Playing | Mode::GameOver => {
            labels.push(Label::new(
                format!("Score: {}", state.session.display_score()),
                tuning.margin,
                Anchor::Left(tuning.margin),
                SCORE,
            ));
        }
    }

    if state.mode() == Mode::GameOver {
        labels.push(Label::new("Game Over", h / 2 - 20, Anchor::Center, GAME_OVER).bold());
        labels.push(Label::new(
            "Press Enter/Space to retry",
            h / 2 + 20,
            Anchor::Center,
            RETRY,
        ));
    }

    if let Some(fps) = fps {
        labels.push(Label::new(
            format!("{fps} FPS"),
            tuning.margin,
            Anchor::Right,
            FPS,
        ));
    }

    labels
}

/// Paint background, ground line, player and blocks into the canvas
pub fn paint(canvas: &mut Canvas, state: &GameState) {
    let tuning = &state.tuning;
    canvas.clear(BACKGROUND);
    canvas.hline(
        tuning.screen_height - GROUND_OFFSET,
        GROUND_THICKNESS,
        GROUND,
    );
    canvas.fill_rect(&state.session.player.rect, PLAYER_RADIUS, PLAYER);
    for block in &state.session.blocks {
        canvas.fill_rect(&block.rect, BLOCK_RADIUS, block.color);
    }
}

/// Terminal column where a label starts
pub fn label_column(canvas: &Canvas, label: &Label) -> u16 {
    let (start, end) = canvas.columns();
    let len = label.text.chars().count() as u16;
    match label.anchor {
        Anchor::Left(x) => canvas.cell_at(x, label.y).0,
        Anchor::Center => {
            let width = end - start;
            start + width.saturating_sub(len) / 2
        }
        Anchor::Right => end.saturating_sub(len + 1).max(start),
    }
}

/// Paint, render and overlay text for one frame
pub fn draw_frame(
    out: &mut impl Write,
    canvas: &mut Canvas,
    state: &GameState,
    fps: Option<u32>,
) -> io::Result<()> {
    paint(canvas, state);
    canvas.render(out)?;

    for label in labels(state, fps) {
        let (_, row) = canvas.cell_at(0, label.y);
        let col = label_column(canvas, &label);
        queue!(
            out,
            cursor::MoveTo(col, row),
            style::SetBackgroundColor(color(BACKGROUND)),
            style::SetForegroundColor(color(label.color)),
        )?;
        if label.bold {
            queue!(out, style::SetAttribute(style::Attribute::Bold))?;
        }
        queue!(
            out,
            style::Print(&label.text),
            style::SetAttribute(style::Attribute::Reset),
            style::ResetColor
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};
    use crate::tuning::Tuning;

    fn texts(labels: &[Label]) -> Vec<&str> {
        labels.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_start_screen_labels() {
        let state = GameState::new(1, Tuning::default());
        let labels = labels(&state, None);
        assert_eq!(
            texts(&labels),
            vec!["DODGE THE BLOCKS", "Press Enter/Space to start"]
        );
        assert_eq!(labels[0].y, 240);
        assert_eq!(labels[1].y, 288);
    }

    #[test]
    fn test_playing_and_game_over_labels() {
        let mut state = GameState::new(1, Tuning::default());
        let confirm = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &confirm, 0.0);
        tick(&mut state, &TickInput::default(), 0.55);
        assert_eq!(texts(&labels(&state, None)), vec!["Score: 5"]);

        state.session.alive = false;
        assert_eq!(
            texts(&labels(&state, Some(60))),
            vec![
                "Score: 5",
                "Game Over",
                "Press Enter/Space to retry",
                "60 FPS"
            ]
        );
    }

    #[test]
    fn test_paint_draws_player_and_ground() {
        let state = GameState::new(1, Tuning::default());
        let mut canvas = Canvas::fit(480, 360, 480, 720);
        paint(&mut canvas, &state);
        assert_eq!(canvas.get(0, 0), BACKGROUND);
        assert_eq!(canvas.get(240, 650), PLAYER);
        assert_eq!(canvas.get(100, 670), GROUND);
    }

    #[test]
    fn test_label_columns() {
        let canvas = Canvas::fit(120, 45, 480, 720);
        let centered = Label::new("Game Over", 0, Anchor::Center, TITLE);
        // 60 columns starting at 30; 9 chars
        assert_eq!(label_column(&canvas, &centered), 30 + 25);
        let left = Label::new("Score: 0", 8, Anchor::Left(8), TITLE);
        assert_eq!(label_column(&canvas, &left), 31);
        let right = Label::new("60 FPS", 8, Anchor::Right, TITLE);
        assert_eq!(label_column(&canvas, &right), 90 - 7);
    }
}
