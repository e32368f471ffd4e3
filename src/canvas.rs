//! Freehand drawing surface.
//!
//! Pointer gestures become line segments. All segments produced between a
//! press and the matching release form one stroke, and strokes are the unit
//! of undo. Erasing paints over with the background ink and shares the same
//! stroke bookkeeping.

use std::collections::HashSet;

/// Width used by every erase segment, regardless of the pen thickness
pub const ERASE_WIDTH: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Selectable pen colors, in toolbar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum PenColor {
    Black,
    Red,
    Blue,
    Green,
    Purple,
    Orange,
}

pub const PALETTE: [PenColor; 6] = [
    PenColor::Black,
    PenColor::Red,
    PenColor::Blue,
    PenColor::Green,
    PenColor::Purple,
    PenColor::Orange,
];

/// What a segment is painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Pen(PenColor),
    Background,
}

/// Pen thickness, always within `MIN..=MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Thickness(u8);

impl Thickness {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Out of range values are clamped
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    pub fn thicker(&self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    pub fn thinner(&self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for Thickness {
    fn default() -> Self {
        Self(3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub id: SegmentId,
    pub from: Point,
    pub to: Point,
    pub ink: Ink,
    pub width: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    Draw,
    Erase,
}

/// Segment ids produced by one gesture
pub type Stroke = Vec<SegmentId>;

#[derive(Debug, Clone)]
struct ActiveGesture {
    last: Point,
    mode: GestureMode,
    stroke: Stroke,
}

#[derive(Debug, Clone)]
pub struct DrawingSurface {
    segments: Vec<Segment>,
    history: Vec<Stroke>,
    active: Option<ActiveGesture>,
    pen_color: PenColor,
    thickness: Thickness,
    next_id: u64,
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new(Thickness::default())
    }
}

impl DrawingSurface {
    pub fn new(thickness: Thickness) -> Self {
        Self {
            segments: Vec::new(),
            history: Vec::new(),
            active: None,
            pen_color: PenColor::Black,
            thickness,
            next_id: 0,
        }
    }

    /// Open a new, empty stroke at `point`. A gesture that is still open is
    /// ended first.
    pub fn begin_gesture(&mut self, point: Point, mode: GestureMode) {
        if self.active.is_some() {
            self.end_gesture();
        }

        self.active = Some(ActiveGesture {
            last: point,
            mode,
            stroke: Vec::new(),
        });
    }

    /// Extend the open gesture to `point`, returning the new segment id.
    /// Does nothing when no gesture is open.
    pub fn continue_gesture(&mut self, point: Point) -> Option<SegmentId> {
        let (ink, width) = match self.active.as_ref()?.mode {
            GestureMode::Draw => (Ink::Pen(self.pen_color), self.thickness.get()),
            GestureMode::Erase => (Ink::Background, ERASE_WIDTH),
        };

        let id = SegmentId(self.next_id);
        self.next_id += 1;

        let gesture = self.active.as_mut()?;
        self.segments.push(Segment {
            id,
            from: gesture.last,
            to: point,
            ink,
            width,
        });
        gesture.stroke.push(id);
        gesture.last = point;

        Some(id)
    }

    /// Close the open gesture. Only strokes with at least one segment are
    /// kept in the history.
    pub fn end_gesture(&mut self) {
        if let Some(gesture) = self.active.take() {
            if gesture.stroke.is_empty() {
                log::trace!("discarded empty {:?} gesture", gesture.mode);
            } else {
                log::debug!(
                    "sealed {:?} stroke of {} segments",
                    gesture.mode,
                    gesture.stroke.len()
                );
                self.history.push(gesture.stroke);
            }
        }
    }

    /// Remove the most recently sealed stroke. Returns false on empty history.
    pub fn undo(&mut self) -> bool {
        let Some(stroke) = self.history.pop() else {
            return false;
        };

        let removed: HashSet<SegmentId> = stroke.into_iter().collect();
        self.segments.retain(|segment| !removed.contains(&segment.id));
        log::debug!("undid stroke of {} segments", removed.len());
        true
    }

    /// Wipe everything, including any open gesture. Not undoable.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.history.clear();
        self.active = None;
        log::debug!("canvas cleared");
    }

    pub fn set_pen_color(&mut self, color: PenColor) {
        self.pen_color = color;
    }

    pub fn set_thickness(&mut self, thickness: Thickness) {
        self.thickness = thickness;
    }

    pub fn pen_color(&self) -> PenColor {
        self.pen_color
    }

    pub fn thickness(&self) -> Thickness {
        self.thickness
    }

    /// Visible segments in paint order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn history(&self) -> &[Stroke] {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn gesture_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_blank(&self) -> bool {
        self.segments.is_empty()
    }
}
