use itertools::iproduct;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::canvas::{DrawingSurface, Ink, PenColor, Point};

const UPPER_HALF_BLOCK: &str = "▀";

pub fn ink_color(ink: Ink) -> Color {
    match ink {
        Ink::Background => Color::White,
        Ink::Pen(color) => pen_color(color),
    }
}

pub fn pen_color(color: PenColor) -> Color {
    match color {
        PenColor::Black => Color::Black,
        PenColor::Red => Color::Red,
        PenColor::Blue => Color::Blue,
        PenColor::Green => Color::Green,
        PenColor::Purple => Color::Magenta,
        PenColor::Orange => Color::Rgb(255, 165, 0),
    }
}

/// Pixel grid the segments are painted into, two pixels per cell vertically
#[derive(Debug, Clone)]
pub struct Raster {
    width: u16,
    height: u16,
    pixels: Vec<Ink>,
}

impl Raster {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![Ink::Background; width as usize * height as usize],
        }
    }

    /// Paint every visible segment in order; later segments cover earlier ones
    pub fn paint(surface: &DrawingSurface, width: u16, height: u16) -> Self {
        let mut raster = Self::new(width, height);
        for segment in surface.segments() {
            raster.line(segment.from, segment.to, segment.width, segment.ink);
        }
        raster
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Ink> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    fn set(&mut self, x: i32, y: i32, ink: Ink) {
        if x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32 {
            self.pixels[y as usize * self.width as usize + x as usize] = ink;
        }
    }

    /// Round brush `width` pixels across
    fn stamp(&mut self, cx: i32, cy: i32, width: u8, ink: Ink) {
        let w = width.max(1) as i32;
        let reach = w / 2;
        for (dx, dy) in iproduct!(-reach..=reach, -reach..=reach) {
            if (2 * dx).pow(2) + (2 * dy).pow(2) <= w * w {
                self.set(cx + dx, cy + dy, ink);
            }
        }
    }

    /// Bresenham walk from `from` to `to`, stamping the brush at every step
    fn line(&mut self, from: Point, to: Point, width: u8, ink: Ink) {
        let (mut x, mut y) = (from.x as i32, from.y as i32);
        let (x1, y1) = (to.x as i32, to.y as i32);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.stamp(x, y, width, ink);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Renders a drawing surface with half-block cells
pub struct CanvasView<'a> {
    surface: &'a DrawingSurface,
}

impl<'a> CanvasView<'a> {
    pub fn new(surface: &'a DrawingSurface) -> Self {
        Self { surface }
    }
}

impl Widget for CanvasView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let raster = Raster::paint(self.surface, area.width, area.height.saturating_mul(2));

        for (row, col) in iproduct!(0..area.height, 0..area.width) {
            let top = raster.get(col, row * 2).unwrap_or(Ink::Background);
            let bottom = raster.get(col, row * 2 + 1).unwrap_or(Ink::Background);

            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_symbol(UPPER_HALF_BLOCK)
                    .set_fg(ink_color(top))
                    .set_bg(ink_color(bottom));
            }
        }
    }
}
