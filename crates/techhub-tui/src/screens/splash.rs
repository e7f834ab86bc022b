//! Animated splash screen: a title card shown for a fixed delay, then
//! replaced by the login screen.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

/// How long the splash stays up before the login screen replaces it.
pub const SPLASH_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug)]
pub struct SplashState {
    shown_at: Instant,
}

impl SplashState {
    pub fn new() -> Self {
        Self {
            shown_at: Instant::now(),
        }
    }

    #[cfg(test)]
    pub fn shown_at(instant: Instant) -> Self {
        Self { shown_at: instant }
    }

    /// True once the fixed delay has elapsed.
    pub fn should_advance(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= SPLASH_DURATION
    }
}

impl Default for SplashState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(_state: &SplashState, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::styled(
            "✦ Embroidery Tech Hub ✦",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(
            "Screen Scanner & Repair Tracker",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_only_after_the_delay() {
        let start = Instant::now();
        let splash = SplashState::shown_at(start);
        assert!(!splash.should_advance(start + Duration::from_secs(3)));
        assert!(splash.should_advance(start + SPLASH_DURATION));
    }
}
