//! Home screen: the signed-in technician's profile card and the entry
//! point to the scanner.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use techhub_core::session::{AVATAR_GLYPH, SessionUser};

use super::{ScreenUpdate, stay};
use crate::state::{NavAction, Screen};

#[derive(Debug)]
pub struct HomeState {
    pub user: SessionUser,
}

impl HomeState {
    pub fn new(user: SessionUser) -> Self {
        Self { user }
    }
}

pub fn handle_key(_state: &mut HomeState, key: KeyEvent) -> ScreenUpdate {
    match key.code {
        KeyCode::Char('s') | KeyCode::Enter => {
            (vec![], Some(NavAction::Navigate(Screen::Scanner)))
        }
        _ => stay(),
    }
}

pub fn render(state: &HomeState, frame: &mut Frame, area: Rect) {
    let user = &state.user;
    let lines = vec![
        Line::from(""),
        Line::styled(
            format!("{AVATAR_GLYPH}  {}", user.full_name()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Department: {}", user.department)),
        Line::from(format!("Task: {}", user.task)),
        Line::from(""),
        Line::styled(
            "[s] Open Scanner  [Ctrl+C] Quit",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    let block = Block::default().borders(Borders::ALL).title("Home");
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}
