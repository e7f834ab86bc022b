//! Scanner screen. Capture hardware is out of reach from a terminal,
//! so this screen is a placeholder that keeps the home → scanner → home
//! round trip intact.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::{ScreenUpdate, stay};
use crate::state::NavAction;

pub fn handle_key(key: KeyEvent) -> ScreenUpdate {
    match key.code {
        KeyCode::Esc => (vec![], Some(NavAction::Pop)),
        _ => stay(),
    }
}

pub fn render(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from("Screen Scanner"),
        Line::from(""),
        Line::styled(
            "Point the device camera at an embroidery screen",
            Style::default().fg(Color::DarkGray),
        ),
        Line::from(""),
        Line::styled("[Esc] Back", Style::default().fg(Color::DarkGray)),
    ];
    let block = Block::default().borders(Borders::ALL).title("Scanner");
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_pops_back() {
        let (effects, nav) = handle_key(KeyEvent::from(KeyCode::Esc));
        assert!(effects.is_empty());
        assert!(matches!(nav, Some(NavAction::Pop)));
    }
}
