use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::canvas::{DrawingSurface, GestureMode, PenColor, Thickness, PALETTE};
use crate::config::Config;
use crate::error::GameError;
use crate::guess::{GuessEvaluator, Verdict};
use crate::input::InputText;
use crate::runtime::GameEvent;
use crate::timer::{Countdown, Tick};
use crate::ui::layout::{ScreenLayout, Target};
use crate::words::{self, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Canvas,
    Guess,
}

/// Text of the result label under the guess box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Judged(Verdict),
    TimeUp,
}

/// One word, one canvas, one countdown
#[derive(Debug)]
pub struct Round {
    pub surface: DrawingSurface,
    pub countdown: Countdown,
    pub guesses: GuessEvaluator,
    pub status: Option<Status>,
}

impl Round {
    fn new(word: Word, time_limit_secs: u32, surface: DrawingSurface) -> Self {
        Self {
            surface,
            countdown: Countdown::start(time_limit_secs),
            guesses: GuessEvaluator::new(word),
            status: None,
        }
    }

    pub fn word(&self) -> &Word {
        self.guesses.word()
    }
}

#[derive(Debug)]
pub struct App {
    pub config: Config,
    words: Vec<Word>,
    pub round: Round,
    pub input: InputText,
    pub focus: Focus,
    pub selected_color: Option<PenColor>,
    /// One-time "time's up" notice, shown until dismissed
    pub time_up_notice: bool,
    pub viewport: Rect,
    pub should_quit: bool,
    round_started: bool,
}

impl App {
    pub fn new(config: Config, words: Vec<Word>, viewport: Rect) -> Result<Self, GameError> {
        let word = pick_word(&words)?;
        let surface = DrawingSurface::new(config.thickness());
        let round = Round::new(word, config.time_limit_secs, surface);
        log::info!(
            "round started: {} letter word, {}s on the clock",
            round.word().as_str().chars().count(),
            config.time_limit_secs
        );

        let mut app = Self {
            config,
            words,
            round,
            input: InputText::new(),
            focus: Focus::Canvas,
            selected_color: None,
            time_up_notice: false,
            viewport,
            should_quit: false,
            round_started: false,
        };
        // a zero second round is over before it starts
        if app.round.countdown.is_expired() {
            app.expire();
        }
        Ok(app)
    }

    /// Fresh word, canvas, timer and guess log. Pen settings carry over.
    pub fn new_round(&mut self) -> Result<(), GameError> {
        let word = pick_word(&self.words)?;
        let mut surface = DrawingSurface::new(self.round.surface.thickness());
        surface.set_pen_color(self.round.surface.pen_color());

        self.round = Round::new(word, self.config.time_limit_secs, surface);
        self.input = InputText::new();
        self.focus = Focus::Canvas;
        self.time_up_notice = false;
        self.round_started = true;
        log::info!("new round started");

        if self.round.countdown.is_expired() {
            self.expire();
        }
        Ok(())
    }

    /// True once after `new_round`, so the runtime can re-arm its tick deadline
    pub fn take_round_started(&mut self) -> bool {
        std::mem::take(&mut self.round_started)
    }

    /// Whether the runtime should keep delivering timer ticks
    pub fn wants_ticks(&self) -> bool {
        !self.round.countdown.is_expired()
    }

    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::new(self.viewport)
    }

    pub fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::Tick => self.on_tick(),
            GameEvent::Resize(width, height) => self.viewport = Rect::new(0, 0, width, height),
            GameEvent::Key(key) => self.on_key(key),
            GameEvent::Mouse(mouse) => self.on_mouse(mouse),
        }
    }

    pub fn on_tick(&mut self) {
        match self.round.countdown.tick() {
            Tick::Running(remaining) => log::trace!("{remaining}s left"),
            Tick::Expired => self.expire(),
            Tick::Idle => {}
        }
    }

    fn expire(&mut self) {
        self.round.guesses.lock();
        self.round.status = Some(Status::TimeUp);
        self.time_up_notice = true;
        log::info!(
            "time is up after {} guesses",
            self.round.guesses.log().len()
        );
    }

    pub fn select_color(&mut self, color: PenColor) {
        self.selected_color = Some(color);
        self.round.surface.set_pen_color(color);
    }

    pub fn set_thickness(&mut self, thickness: Thickness) {
        self.round.surface.set_thickness(thickness);
    }

    pub fn undo(&mut self) {
        self.round.surface.undo();
    }

    pub fn clear_canvas(&mut self) {
        self.round.surface.clear();
    }

    pub fn submit_guess(&mut self) {
        let text = self.input.take();
        match self.round.guesses.submit(&text) {
            Ok(Some(verdict)) => self.round.status = Some(Status::Judged(verdict)),
            Ok(None) => {}
            Err(err) => log::debug!("guess ignored: {err}"),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('n') => {
                    if let Err(err) = self.new_round() {
                        log::error!("could not start a new round: {err}");
                    }
                }
                _ => {}
            }
            return;
        }

        if self.time_up_notice {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
                self.time_up_notice = false;
            }
            return;
        }

        if key.code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }

        match self.focus {
            Focus::Canvas => self.on_canvas_key(key.code),
            Focus::Guess => self.on_guess_key(key.code),
        }
    }

    fn on_canvas_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('c') => self.clear_canvas(),
            KeyCode::Char('u') => self.undo(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.set_thickness(self.round.surface.thickness().thicker())
            }
            KeyCode::Char('-') => self.set_thickness(self.round.surface.thickness().thinner()),
            KeyCode::Char(c @ '1'..='6') => {
                let idx = c as usize - '1' as usize;
                self.select_color(PALETTE[idx]);
            }
            KeyCode::Tab | KeyCode::Enter => self.focus = Focus::Guess,
            _ => {}
        }
    }

    fn on_guess_key(&mut self, code: KeyCode) {
        if code == KeyCode::Tab {
            self.focus = Focus::Canvas;
            return;
        }

        if self.round.guesses.is_locked() {
            return;
        }

        match code {
            KeyCode::Enter => self.submit_guess(),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.left(),
            KeyCode::Right => self.input.right(),
            KeyCode::Home => self.input.home(),
            KeyCode::End => self.input.end(),
            KeyCode::Char(c) => self.input.insert(c),
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        let layout = self.layout();

        match mouse.kind {
            MouseEventKind::Down(button) => {
                if self.time_up_notice {
                    self.time_up_notice = false;
                    return;
                }

                match (layout.hit(mouse.column, mouse.row), button) {
                    (Some(Target::Canvas(point)), MouseButton::Left) => {
                        self.focus = Focus::Canvas;
                        self.round.surface.begin_gesture(point, GestureMode::Draw);
                    }
                    (Some(Target::Canvas(point)), MouseButton::Right) => {
                        self.focus = Focus::Canvas;
                        self.round.surface.begin_gesture(point, GestureMode::Erase);
                    }
                    (Some(target), MouseButton::Left) => self.on_click(target),
                    _ => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left | MouseButton::Right) => {
                if self.round.surface.gesture_open() {
                    let point = layout.canvas_point(mouse.column, mouse.row);
                    self.round.surface.continue_gesture(point);
                }
            }
            MouseEventKind::Up(_) => self.round.surface.end_gesture(),
            _ => {}
        }
    }

    fn on_click(&mut self, target: Target) {
        match target {
            Target::Swatch(color) => self.select_color(color),
            Target::Thinner => self.set_thickness(self.round.surface.thickness().thinner()),
            Target::Thicker => self.set_thickness(self.round.surface.thickness().thicker()),
            Target::Slider(thickness) => self.set_thickness(thickness),
            Target::Undo => self.undo(),
            Target::Clear => self.clear_canvas(),
            Target::GuessBox => self.focus = Focus::Guess,
            Target::Canvas(_) => {}
        }
    }
}

fn pick_word(words: &[Word]) -> Result<Word, GameError> {
    words::pick(words, &mut rand::thread_rng())
        .cloned()
        .ok_or_else(|| GameError::EmptyWordList {
            origin: "session".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::parse;
    use assert_matches::assert_matches;

    fn app_with_word(word: &str, secs: u32) -> App {
        let config = Config {
            time_limit_secs: secs,
            ..Config::default()
        };
        App::new(config, parse(word, "test").unwrap(), Rect::new(0, 0, 100, 30)).unwrap()
    }

    fn key(code: KeyCode) -> GameEvent {
        GameEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> GameEvent {
        GameEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> GameEvent {
        GameEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn type_guess(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle(key(KeyCode::Char(c)));
        }
        app.handle(key(KeyCode::Enter));
    }

    fn drag(app: &mut App, button: MouseButton, cells: &[(u16, u16)]) {
        let canvas = app.layout().canvas;
        let (first, rest) = cells.split_first().unwrap();
        app.handle(mouse(
            MouseEventKind::Down(button),
            canvas.x + first.0,
            canvas.y + first.1,
        ));
        for &(x, y) in rest {
            app.handle(mouse(MouseEventKind::Drag(button), canvas.x + x, canvas.y + y));
        }
        let last = cells.last().unwrap();
        app.handle(mouse(MouseEventKind::Up(button), canvas.x + last.0, canvas.y + last.1));
    }

    #[test]
    fn empty_word_list_is_rejected() {
        let result = App::new(Config::default(), Vec::new(), Rect::new(0, 0, 80, 24));
        assert_matches!(result, Err(GameError::EmptyWordList { .. }));
    }

    #[test]
    fn correct_guess_through_the_guess_box() {
        let mut app = app_with_word("sunset", 10);
        app.handle(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Guess);

        type_guess(&mut app, "Sunset");
        assert_eq!(app.round.status, Some(Status::Judged(Verdict::Correct)));
        assert_eq!(app.round.guesses.log(), ["Sunset"]);
        assert_eq!(app.input.text(), "");
    }

    #[test]
    fn empty_enter_keeps_previous_status() {
        let mut app = app_with_word("sunset", 10);
        app.handle(key(KeyCode::Tab));
        type_guess(&mut app, "sun set");
        app.handle(key(KeyCode::Enter));

        assert_eq!(app.round.status, Some(Status::Judged(Verdict::Incorrect)));
        assert_eq!(app.round.guesses.log().len(), 1);
    }

    #[test]
    fn canvas_shortcuts_do_not_fire_while_typing() {
        let mut app = app_with_word("cat", 10);
        drag(&mut app, MouseButton::Left, &[(1, 1), (4, 1)]);

        app.handle(key(KeyCode::Tab));
        type_guess(&mut app, "cu");
        assert_eq!(app.round.surface.history_len(), 1);

        app.handle(key(KeyCode::Tab));
        app.handle(key(KeyCode::Char('c')));
        assert!(app.round.surface.is_blank());
    }

    #[test]
    fn expiry_locks_guessing_and_shows_notice() {
        let mut app = app_with_word("kite", 2);
        app.handle(GameEvent::Tick);
        assert!(app.wants_ticks());
        app.handle(GameEvent::Tick);

        assert!(!app.wants_ticks());
        assert!(app.time_up_notice);
        assert_eq!(app.round.status, Some(Status::TimeUp));

        // any key dismisses the notice first
        app.handle(key(KeyCode::Enter));
        assert!(!app.time_up_notice);

        app.handle(key(KeyCode::Tab));
        type_guess(&mut app, "kite");
        assert!(app.round.guesses.log().is_empty());
        assert_eq!(app.round.status, Some(Status::TimeUp));

        app.handle(GameEvent::Tick);
        assert!(!app.time_up_notice);
    }

    #[test]
    fn mouse_gestures_draw_and_erase() {
        let mut app = app_with_word("cat", 10);
        drag(&mut app, MouseButton::Left, &[(1, 1), (5, 1), (5, 3)]);
        drag(&mut app, MouseButton::Right, &[(3, 1), (3, 2)]);

        assert_eq!(app.round.surface.history_len(), 2);
        assert_eq!(app.round.surface.segments().len(), 3);

        app.undo();
        assert_eq!(app.round.surface.segments().len(), 2);
    }

    #[test]
    fn click_without_drag_records_nothing() {
        let mut app = app_with_word("cat", 10);
        drag(&mut app, MouseButton::Left, &[(2, 2)]);
        assert_eq!(app.round.surface.history_len(), 0);
    }

    #[test]
    fn toolbar_clicks() {
        let mut app = app_with_word("cat", 10);
        let layout = app.layout();

        let (color, rect) = layout.swatches[2];
        app.handle(mouse(MouseEventKind::Down(MouseButton::Left), rect.x, rect.y));
        assert_eq!(app.selected_color, Some(color));
        assert_eq!(app.round.surface.pen_color(), color);

        app.handle(mouse(
            MouseEventKind::Down(MouseButton::Left),
            layout.slider.x + 6,
            layout.slider.y,
        ));
        assert_eq!(app.round.surface.thickness().get(), 7);

        app.handle(mouse(
            MouseEventKind::Down(MouseButton::Left),
            layout.thicker.x,
            layout.thicker.y,
        ));
        assert_eq!(app.round.surface.thickness().get(), 8);

        drag(&mut app, MouseButton::Left, &[(1, 1), (2, 2)]);
        app.handle(mouse(MouseEventKind::Down(MouseButton::Left), layout.undo.x, layout.undo.y));
        assert!(app.round.surface.is_blank());

        drag(&mut app, MouseButton::Left, &[(1, 1), (2, 2)]);
        app.handle(mouse(MouseEventKind::Down(MouseButton::Left), layout.clear.x, layout.clear.y));
        assert!(app.round.surface.is_blank());
        assert_eq!(app.round.surface.history_len(), 0);

        app.handle(mouse(
            MouseEventKind::Down(MouseButton::Left),
            layout.guess_input.x,
            layout.guess_input.y,
        ));
        assert_eq!(app.focus, Focus::Guess);
    }

    #[test]
    fn keyboard_pen_controls() {
        let mut app = app_with_word("cat", 10);
        app.handle(key(KeyCode::Char('2')));
        assert_eq!(app.selected_color, Some(PenColor::Red));

        app.handle(key(KeyCode::Char('+')));
        app.handle(key(KeyCode::Char('+')));
        assert_eq!(app.round.surface.thickness().get(), 5);
        app.handle(key(KeyCode::Char('-')));
        assert_eq!(app.round.surface.thickness().get(), 4);
    }

    #[test]
    fn new_round_resets_state_and_keeps_pen() {
        let mut app = app_with_word("cat", 1);
        app.handle(key(KeyCode::Char('3')));
        drag(&mut app, MouseButton::Left, &[(1, 1), (2, 2)]);
        app.handle(GameEvent::Tick);
        assert!(!app.wants_ticks());

        app.handle(ctrl('n'));
        assert!(app.wants_ticks());
        assert!(!app.time_up_notice);
        assert!(app.round.surface.is_blank());
        assert!(app.round.guesses.log().is_empty());
        assert_eq!(app.round.surface.pen_color(), PenColor::Blue);
        assert_eq!(app.round.word().as_str(), "cat");
        assert!(app.take_round_started());
        assert!(!app.take_round_started());
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let mut app = app_with_word("cat", 10);
        app.handle(key(KeyCode::Esc));
        assert!(app.should_quit);

        let mut app = app_with_word("cat", 10);
        app.handle(key(KeyCode::Tab));
        app.handle(ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn escape_first_dismisses_notice() {
        let mut app = app_with_word("cat", 1);
        app.handle(GameEvent::Tick);
        app.handle(key(KeyCode::Esc));
        assert!(!app.should_quit);
        app.handle(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn resize_moves_hit_targets() {
        let mut app = app_with_word("cat", 10);
        app.handle(GameEvent::Resize(120, 40));
        assert_eq!(app.viewport, Rect::new(0, 0, 120, 40));
        assert_eq!(app.layout(), ScreenLayout::new(Rect::new(0, 0, 120, 40)));
    }

    #[test]
    fn zero_second_round_starts_locked() {
        let app = app_with_word("cat", 0);
        assert!(!app.wants_ticks());
        assert!(app.round.guesses.is_locked());
    }
}
