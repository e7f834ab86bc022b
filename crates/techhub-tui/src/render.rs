//! Pure view functions.
//!
//! Functions here take `&AppState` by immutable reference and draw to
//! a ratatui frame. They never mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::notice::{Notice, NoticeKind};
use crate::screens;
use crate::state::{AppState, Screen};

/// Width of the centered content card.
const CARD_WIDTH: u16 = 56;

/// Height reserved for the notice banner.
const NOTICE_HEIGHT: u16 = 4;

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let card = centered_card(area);

    match app.nav.current() {
        Screen::Splash(state) => screens::splash::render(state, frame, card),
        Screen::Login(state) => screens::login::render(state, frame, card),
        Screen::Register(state) => screens::register::render(state, frame, card),
        Screen::Home(state) => screens::home::render(state, frame, card),
        Screen::Scanner => screens::scanner::render(frame, card),
    }

    if let Some(notice) = app.shared.notices.current() {
        render_notice(notice, frame, area);
    }
}

/// A fixed-width card centered in the terminal; content screens draw
/// inside it.
fn centered_card(area: Rect) -> Rect {
    let width = CARD_WIDTH.min(area.width);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(NOTICE_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(rows[1]);
    cols[1]
}

/// Draws the current notice as a banner along the top edge.
fn render_notice(notice: &Notice, frame: &mut Frame, area: Rect) {
    let color = match notice.kind {
        NoticeKind::Success => Color::Green,
        NoticeKind::Error => Color::Red,
    };
    let width = CARD_WIDTH.min(area.width);
    let banner = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y,
        width,
        height: NOTICE_HEIGHT.min(area.height),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", notice.title));
    let body = Paragraph::new(Line::from(notice.message.clone()))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(Clear, banner);
    frame.render_widget(body, banner);
}
