pub mod canvas;
pub mod layout;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

use crate::{
    app::{App, Focus, Status},
    canvas::Thickness,
    guess::Verdict,
    ui::canvas::{pen_color, CanvasView},
    ui::layout::ScreenLayout,
};

const INSTRUCTIONS: &str = "Left click to draw | Right click to erase | Press 'c' to clear";
const NOTICE_WIDTH: u16 = 40;
const NOTICE_HEIGHT: u16 = 7;

/// Draw the whole screen and place the text cursor in the guess box
pub fn draw(app: &App, f: &mut Frame) {
    let area = f.area();
    f.render_widget(app, area);

    if app.focus == Focus::Guess && !app.round.guesses.is_locked() && !app.time_up_notice {
        let input = ScreenLayout::new(area).guess_input;
        let cursor = app.input.cursor_width() as u16;
        let x = input.x + (cursor - input_scroll(cursor, input.width)).min(input.width.saturating_sub(1));
        f.set_cursor_position(Position::new(x, input.y));
    }
}

/// Columns the guess text is shifted left so the cursor stays inside the box
fn input_scroll(cursor: u16, width: u16) -> u16 {
    cursor.saturating_sub(width.saturating_sub(1))
}

fn focused_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = ScreenLayout::new(area);
        let round = &self.round;

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        // header: timer on the left, word on the right
        let timer_style = if round.countdown.remaining() <= 3 {
            bold_style.fg(Color::Red)
        } else {
            bold_style
        };
        let [timer_area, word_area] = Layout::horizontal([Constraint::Percentage(50); 2])
            .areas(layout.header);
        Paragraph::new(Span::styled(round.countdown.remaining().to_string(), timer_style))
            .render(timer_area, buf);
        Paragraph::new(Span::styled(round.word().capitalized(), bold_style))
            .alignment(Alignment::Right)
            .render(word_area, buf);

        Block::default()
            .borders(Borders::ALL)
            .title("Canvas")
            .border_style(focused_border(self.focus == Focus::Canvas))
            .render(layout.canvas_block, buf);
        CanvasView::new(&round.surface).render(layout.canvas, buf);

        Paragraph::new(Span::styled(INSTRUCTIONS, italic_style))
            .alignment(Alignment::Center)
            .render(layout.instructions, buf);

        render_toolbar(self, &layout, buf);

        // guess panel
        Paragraph::new("Enter your guess: ").render(layout.guess_label, buf);

        let locked = round.guesses.is_locked();
        let input_style = if locked { dim_style } else { Style::default() };
        let scroll = input_scroll(self.input.cursor_width() as u16, layout.guess_input.width);
        Paragraph::new(Span::styled(self.input.text(), input_style))
            .scroll((0, scroll))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(if locked { "Guess (locked)" } else { "Guess" })
                    .border_style(focused_border(self.focus == Focus::Guess && !locked)),
            )
            .render(layout.guess_block, buf);

        let result = match round.status {
            Some(Status::Judged(Verdict::Correct)) => {
                Span::styled("Correct!", bold_style.fg(Color::Green))
            }
            Some(Status::Judged(Verdict::Incorrect)) => {
                Span::styled("Incorrect.", bold_style.fg(Color::Red))
            }
            Some(Status::TimeUp) => Span::styled("Time's up!", bold_style.fg(Color::Yellow)),
            None => Span::raw(""),
        };
        Paragraph::new(result).render(layout.result, buf);

        let log_block = Block::default().borders(Borders::ALL).title("Guesses");
        let visible = log_block.inner(layout.log_block).height as usize;
        let entries = round.guesses.log();
        let lines: Vec<Line> = entries
            .iter()
            .skip(entries.len().saturating_sub(visible))
            .map(|guess| Line::from(format!("Guess: {guess}")))
            .collect();
        Paragraph::new(lines)
            .block(log_block)
            .render(layout.log_block, buf);

        if self.time_up_notice {
            render_notice(area, buf);
        }
    }
}

fn render_toolbar(app: &App, layout: &ScreenLayout, buf: &mut Buffer) {
    for (color, rect) in &layout.swatches {
        // the selected swatch is compared by id, not held as a handle
        let symbol = if app.selected_color == Some(*color) {
            "[█]"
        } else {
            "███"
        };
        Paragraph::new(Span::styled(symbol, Style::default().fg(pen_color(*color))))
            .render(*rect, buf);
    }

    let thickness = app.round.surface.thickness().get();
    let slider: String = (Thickness::MIN..=Thickness::MAX)
        .map(|step| if step <= thickness { '█' } else { '░' })
        .collect();

    Paragraph::new("[-]").render(layout.thinner, buf);
    Paragraph::new(Span::styled(slider, Style::default().fg(Color::Cyan))).render(layout.slider, buf);
    Paragraph::new("[+]").render(layout.thicker, buf);
    Paragraph::new(format!("{thickness:>2}"))
        .alignment(Alignment::Right)
        .render(layout.thickness_label, buf);
    Paragraph::new("[Undo]").render(layout.undo, buf);
    Paragraph::new("[Clear]").render(layout.clear, buf);
}

fn render_notice(area: Rect, buf: &mut Buffer) {
    let width = NOTICE_WIDTH.min(area.width);
    let height = NOTICE_HEIGHT.min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    Clear.render(popup, buf);
    Paragraph::new(vec![
        Line::from(""),
        Line::from("You didn't guess the word in time."),
        Line::from(""),
        Line::from(Span::styled(
            "(enter) close / (ctrl+n) new round",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Time's Up!")
            .border_style(Style::default().fg(Color::Yellow)),
    )
    .render(popup, buf);
}
