use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

use crate::canvas::{PenColor, Point, Thickness, PALETTE};

const GUESS_PANEL_WIDTH: u16 = 34;
const SWATCH_WIDTH: u16 = 3;
pub const SLIDER_WIDTH: u16 = Thickness::MAX as u16;

/// Something on screen a click can land on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Canvas(Point),
    Swatch(PenColor),
    Thinner,
    Thicker,
    Slider(Thickness),
    Undo,
    Clear,
    GuessBox,
}

/// Screen regions, recomputed from the terminal size whenever needed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub canvas_block: Rect,
    pub canvas: Rect,
    pub instructions: Rect,
    pub swatches: Vec<(PenColor, Rect)>,
    pub thinner: Rect,
    pub slider: Rect,
    pub thicker: Rect,
    pub thickness_label: Rect,
    pub undo: Rect,
    pub clear: Rect,
    pub guess_label: Rect,
    pub guess_block: Rect,
    pub guess_input: Rect,
    pub result: Rect,
    pub log_block: Rect,
}

/// Lays widgets out left to right along a one-line strip, clipped to it
struct Strip {
    area: Rect,
    x: u16,
}

impl Strip {
    fn new(area: Rect) -> Self {
        Self { area, x: area.x }
    }

    fn take(&mut self, width: u16) -> Rect {
        let rect = Rect::new(self.x, self.area.y, width, self.area.height).intersection(self.area);
        self.x = self.x.saturating_add(width);
        rect
    }

    fn gap(&mut self, width: u16) {
        self.x = self.x.saturating_add(width);
    }
}

fn inner(rect: Rect) -> Rect {
    Rect::new(
        rect.x.saturating_add(1),
        rect.y.saturating_add(1),
        rect.width.saturating_sub(2),
        rect.height.saturating_sub(2),
    )
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(GUESS_PANEL_WIDTH)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // timer + word
                Constraint::Min(4),    // canvas
                Constraint::Length(1), // instructions
                Constraint::Length(1), // toolbar
            ])
            .split(columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(1)
            .constraints([
                Constraint::Length(1), // prompt label
                Constraint::Length(3), // input box
                Constraint::Length(1), // result
                Constraint::Min(3),    // guess log
            ])
            .split(columns[1]);

        let mut toolbar = Strip::new(left[3]);
        let swatches = PALETTE
            .iter()
            .map(|&color| {
                let rect = toolbar.take(SWATCH_WIDTH);
                toolbar.gap(1);
                (color, rect)
            })
            .collect();
        toolbar.gap(1);
        let thinner = toolbar.take(3);
        let slider = toolbar.take(SLIDER_WIDTH);
        let thicker = toolbar.take(3);
        let thickness_label = toolbar.take(3);
        toolbar.gap(1);
        let undo = toolbar.take(6);
        toolbar.gap(1);
        let clear = toolbar.take(7);

        Self {
            header: left[0],
            canvas_block: left[1],
            canvas: inner(left[1]),
            instructions: left[2],
            swatches,
            thinner,
            slider,
            thicker,
            thickness_label,
            undo,
            clear,
            guess_label: right[0],
            guess_block: right[1],
            guess_input: inner(right[1]),
            result: right[2],
            log_block: right[3],
        }
    }

    /// Canvas pixel under a terminal cell. Cells outside the canvas are
    /// clamped to its nearest edge, so drags that wander off keep drawing
    /// along the border.
    pub fn canvas_point(&self, column: u16, row: u16) -> Point {
        let max_x = self.canvas.width.saturating_sub(1);
        let max_y = self.canvas.height.saturating_sub(1);
        let x = column.saturating_sub(self.canvas.x).min(max_x);
        let y = row.saturating_sub(self.canvas.y).min(max_y);
        // each cell holds two pixels stacked vertically; aim at the lower one
        Point::new(x, y * 2 + 1)
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<Target> {
        let pos = Position::new(column, row);

        if self.canvas.contains(pos) {
            return Some(Target::Canvas(self.canvas_point(column, row)));
        }

        if let Some((color, _)) = self.swatches.iter().find(|(_, rect)| rect.contains(pos)) {
            return Some(Target::Swatch(*color));
        }

        if self.slider.contains(pos) {
            let offset = (column - self.slider.x) as u8;
            return Some(Target::Slider(Thickness::new(offset + 1)));
        }

        [
            (self.thinner, Target::Thinner),
            (self.thicker, Target::Thicker),
            (self.undo, Target::Undo),
            (self.clear, Target::Clear),
            (self.guess_block, Target::GuessBox),
        ]
        .into_iter()
        .find(|(rect, _)| rect.contains(pos))
        .map(|(_, target)| target)
    }
}
