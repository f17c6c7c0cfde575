//! Pixel buffer with half-block rendering
//!
//! The logical canvas (480x720 by default) is shrunk by an integer factor to
//! fit the terminal. Each terminal cell shows two vertical pixels using the
//! upper-half-block glyph, foreground for the top pixel and background for
//! the bottom one.

use std::io::{self, Write};

use crossterm::{cursor, queue, style};

use crate::sim::{Rect, Rgb};

/// Terminal pixel buffer mapped onto a logical canvas
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Buffer width in terminal pixels (= columns)
    w: usize,
    /// Buffer height in terminal pixels (= rows * 2)
    h: usize,
    px: Vec<Rgb>,
    /// Logical pixels per terminal pixel
    scale: i32,
    /// Top-left terminal cell of the buffer, to center it
    col_offset: u16,
    row_offset: u16,
}

impl Canvas {
    /// Fit a `logical_w` x `logical_h` canvas into a `cols` x `rows`
    /// terminal
    pub fn fit(cols: u16, rows: u16, logical_w: i32, logical_h: i32) -> Self {
        let cols = i32::from(cols.max(1));
        let rows = i32::from(rows.max(1));
        let logical_w = logical_w.max(1);
        let logical_h = logical_h.max(1);

        let scale = div_ceil(logical_w, cols)
            .max(div_ceil(logical_h, rows * 2))
            .max(1);
        let w = div_ceil(logical_w, scale);
        let mut h = div_ceil(logical_h, scale);
        if h % 2 == 1 {
            h += 1;
        }

        Self {
            w: w as usize,
            h: h as usize,
            px: vec![Rgb(0, 0, 0); (w * h) as usize],
            scale,
            col_offset: ((cols - w).max(0) / 2) as u16,
            row_offset: ((rows - h / 2).max(0) / 2) as u16,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    pub fn clear(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    /// Map a logical rectangle to buffer pixels `[x0, x1) x [y0, y1)`. Any
    /// non-empty rectangle covers at least one pixel.
    fn to_pixels(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let x0 = rect.left().div_euclid(self.scale);
        let y0 = rect.top().div_euclid(self.scale);
        let x1 = div_ceil(rect.right(), self.scale).max(x0 + 1);
        let y1 = div_ceil(rect.bottom(), self.scale).max(y0 + 1);
        (x0, y0, x1, y1)
    }

    /// Fill a logical rectangle; `radius` (logical pixels) trims the corners
    pub fn fill_rect(&mut self, rect: &Rect, radius: i32, c: Rgb) {
        let (x0, y0, x1, y1) = self.to_pixels(rect);
        let r = radius / self.scale;
        // Only round when the shape is big enough to keep its body
        let r = if x1 - x0 > 2 * r && y1 - y0 > 2 * r { r } else { 0 };

        for y in y0..y1 {
            for x in x0..x1 {
                if r > 0 && outside_corner(x - x0, y - y0, x1 - x0, y1 - y0, r) {
                    continue;
                }
                self.set(x, y, c);
            }
        }
    }

    /// Horizontal line across the whole canvas at logical `y`
    pub fn hline(&mut self, y: i32, thickness: i32, c: Rgb) {
        let rect = Rect::new(0, y, self.w as i32 * self.scale, thickness.max(1));
        self.fill_rect(&rect, 0, c);
    }

    /// Terminal cell holding logical point (`x`, `y`)
    pub fn cell_at(&self, x: i32, y: i32) -> (u16, u16) {
        let col = (x.div_euclid(self.scale)).clamp(0, self.w as i32 - 1);
        let row = (y.div_euclid(self.scale) / 2).clamp(0, (self.h / 2) as i32 - 1);
        (self.col_offset + col as u16, self.row_offset + row as u16)
    }

    /// Terminal column range covered by the buffer
    pub fn columns(&self) -> (u16, u16) {
        (self.col_offset, self.col_offset + self.w as u16)
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let rows = self.h / 2;
        for row in 0..rows {
            queue!(
                out,
                cursor::MoveTo(self.col_offset, self.row_offset + row as u16)
            )?;
            let mut prev_fg = None;
            let mut prev_bg = None;

            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if prev_bg != Some(bot) {
                    queue!(out, style::SetBackgroundColor(color(bot)))?;
                    prev_bg = Some(bot);
                }
                if top == bot {
                    queue!(out, style::Print(' '))?;
                } else {
                    if prev_fg != Some(top) {
                        queue!(out, style::SetForegroundColor(color(top)))?;
                        prev_fg = Some(top);
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
        }
        queue!(out, style::ResetColor)?;
        Ok(())
    }
}

pub fn color(c: Rgb) -> style::Color {
    style::Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

#[inline]
fn div_ceil(a: i32, b: i32) -> i32 {
    (a + b - 1).div_euclid(b)
}

/// Whether local pixel (`x`, `y`) of a `w` x `h` shape falls outside a
/// corner rounded with radius `r`
fn outside_corner(x: i32, y: i32, w: i32, h: i32, r: i32) -> bool {
    let cx = if x < r {
        r
    } else if x >= w - r {
        w - r - 1
    } else {
        return false;
    };
    let cy = if y < r {
        r
    } else if y >= h - r {
        h - r - 1
    } else {
        return false;
    };
    let (dx, dy) = (x - cx, y - cy);
    dx * dx + dy * dy > r * r
}
