//! Login screen: form state, submit/settle flow, render.
//!
//! Submission cycle per attempt: validate, mark busy, spawn the call,
//! settle on the result event. Validation failures settle immediately
//! with a specific notice and no network traffic. While a call is in
//! flight all inputs are disabled and re-entrant submits are swallowed
//! by the lifecycle guard.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use techhub_core::client::ApiResult;
use techhub_core::flow::{Outcome, RequestLifecycle};
use techhub_core::session::{Credentials, LoginPayload, SessionUser};
use techhub_core::validate::{self, FieldError};
use tokio_util::sync::CancellationToken;

use super::home::HomeState;
use super::register::RegisterState;
use super::{ScreenUpdate, stay};
use crate::effects::UiEffect;
use crate::form::FieldBuffer;
use crate::state::{NavAction, Screen, SharedState};

const REJECTED_FALLBACK: &str = "Please check your credentials";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

impl LoginField {
    fn next(self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        }
    }

    fn prev(self) -> Self {
        // Two fields: previous and next coincide.
        self.next()
    }
}

#[derive(Debug)]
pub struct LoginState {
    pub email: FieldBuffer,
    pub password: FieldBuffer,
    pub show_password: bool,
    pub focus: LoginField,
    pub lifecycle: RequestLifecycle,
}

impl LoginState {
    pub fn new() -> Self {
        Self {
            email: FieldBuffer::default(),
            password: FieldBuffer::default(),
            show_password: false,
            focus: LoginField::Email,
            lifecycle: RequestLifecycle::new(),
        }
    }
}

impl Default for LoginState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn handle_key(
    state: &mut LoginState,
    shared: &mut SharedState,
    key: KeyEvent,
) -> ScreenUpdate {
    match key.code {
        KeyCode::Enter => (submit(state, shared), None),
        // Inputs and the register link are disabled while a call is in
        // flight.
        _ if state.lifecycle.is_busy() => stay(),
        KeyCode::Tab | KeyCode::Down => {
            state.focus = state.focus.next();
            stay()
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus = state.focus.prev();
            stay()
        }
        KeyCode::F(2) => {
            state.show_password = !state.show_password;
            stay()
        }
        KeyCode::F(3) => (
            vec![],
            Some(NavAction::Navigate(Screen::Register(RegisterState::new()))),
        ),
        KeyCode::Backspace => {
            field_mut(state).backspace();
            stay()
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            field_mut(state).push_char(c);
            stay()
        }
        _ => stay(),
    }
}

fn field_mut(state: &mut LoginState) -> &mut FieldBuffer {
    match state.focus {
        LoginField::Email => &mut state.email,
        LoginField::Password => &mut state.password,
    }
}

/// One submit attempt. Returns the spawn effect on the happy path and
/// nothing otherwise.
fn submit(state: &mut LoginState, shared: &mut SharedState) -> Vec<UiEffect> {
    // Re-entrant submit while a call is in flight: swallowed, never
    // queued, never user-visible.
    if state.lifecycle.begin().is_err() {
        return vec![];
    }

    let credentials = Credentials {
        email: state.email.value().to_string(),
        password: state.password.value().to_string(),
    };

    if let Err(reason) = validate::validate_login(&credentials) {
        state.lifecycle.complete(Outcome::ValidationFailure(reason));
        let (title, message) = validation_notice(reason);
        shared.notices.error(title, message);
        return vec![];
    }

    let task = shared.task_seq.next_id();
    let cancel = CancellationToken::new();
    shared.tasks.login.on_started(task, cancel.clone());
    vec![UiEffect::SpawnLogin {
        task,
        credentials,
        cancel,
    }]
}

fn validation_notice(reason: FieldError) -> (&'static str, &'static str) {
    match reason {
        FieldError::MissingFields => (
            "Missing Information",
            "Please enter both email and password",
        ),
        FieldError::InvalidEmail => ("Invalid Email", "Please enter a valid email address"),
        // Login enforces no strength floor; unreachable, but the match
        // must be total.
        FieldError::WeakPassword => ("Invalid Password", "Please enter a valid password"),
    }
}

/// Routes a settled login call: notice plus, on success, navigation to
/// home with the composed session user as payload.
pub fn handle_settled(
    state: &mut LoginState,
    shared: &mut SharedState,
    result: Result<ApiResult<LoginPayload>, String>,
) -> ScreenUpdate {
    match result {
        Ok(ApiResult::Ok(payload)) => {
            state.lifecycle.complete(Outcome::Success);
            shared
                .notices
                .success("Welcome Back!", "You have successfully logged in");
            let user = SessionUser::from(payload);
            (
                vec![],
                Some(NavAction::Replace(Screen::Home(HomeState::new(user)))),
            )
        }
        Ok(ApiResult::Rejected { message, .. }) => {
            let message = message.unwrap_or_else(|| REJECTED_FALLBACK.to_string());
            state.lifecycle.complete(Outcome::ServerRejected {
                message: message.clone(),
            });
            shared.notices.error("Login Failed", message);
            stay()
        }
        Err(transport) => {
            // Transport detail goes to the log only; the user gets the
            // fixed generic text.
            tracing::warn!(error = %transport, "login request failed");
            state.lifecycle.complete(Outcome::TransportError);
            shared
                .notices
                .error("Connection Error", "Unable to connect to the server");
            stay()
        }
    }
}

pub fn render(state: &LoginState, frame: &mut Frame, area: Rect) {
    let password_display = if state.show_password {
        state.password.value().to_string()
    } else {
        state.password.masked()
    };

    let mut lines = vec![
        Line::styled(
            "Welcome Back",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            "Sign in to continue your journey",
            Style::default().fg(Color::DarkGray),
        ),
        Line::from(""),
        field_line(
            "Email Address",
            state.email.value(),
            state.focus == LoginField::Email,
        ),
        field_line(
            "Password",
            &password_display,
            state.focus == LoginField::Password,
        ),
        Line::from(""),
    ];

    if state.lifecycle.is_busy() {
        lines.push(Line::styled(
            "Signing in...",
            Style::default().fg(Color::Yellow),
        ));
    } else {
        lines.push(Line::styled(
            "[Enter] Sign In  [F2] Show/Hide Password  [F3] Register",
            Style::default().fg(Color::DarkGray),
        ));
        lines.push(Line::styled(
            "Don't have an account? Register with F3",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), area);
}

pub(crate) fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let marker = if focused { "▸ " } else { "  " };
    let label_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("{marker}{label:<14}"), label_style),
        Span::raw(value),
    ])
}

#[cfg(test)]
mod tests {
    use techhub_core::session::TechnicianRecord;

    use super::*;
    use crate::notice::NoticeKind;
    use crate::state::ScreenKind;

    fn filled(email: &str, password: &str) -> LoginState {
        let mut state = LoginState::new();
        for c in email.chars() {
            state.email.push_char(c);
        }
        for c in password.chars() {
            state.password.push_char(c);
        }
        state
    }

    fn submit_key() -> KeyEvent {
        KeyEvent::from(KeyCode::Enter)
    }

    #[test]
    fn empty_fields_fail_validation_without_network_call() {
        let mut state = filled("", "");
        let mut shared = SharedState::default();
        let (effects, nav) = handle_key(&mut state, &mut shared, submit_key());
        assert!(effects.is_empty());
        assert!(nav.is_none());
        assert_eq!(
            state.lifecycle.last_outcome(),
            Some(&Outcome::ValidationFailure(FieldError::MissingFields))
        );
        let notice = shared.notices.current().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.title, "Missing Information");
        assert!(!state.lifecycle.is_busy());
    }

    #[test]
    fn bad_email_fails_before_spawn() {
        let mut state = filled("not-an-email", "secret");
        let mut shared = SharedState::default();
        let (effects, _) = handle_key(&mut state, &mut shared, submit_key());
        assert!(effects.is_empty());
        assert_eq!(shared.notices.current().unwrap().title, "Invalid Email");
    }

    #[test]
    fn valid_submit_spawns_exactly_one_call() {
        let mut state = filled("ann@example.com", "secret");
        let mut shared = SharedState::default();
        let (effects, _) = handle_key(&mut state, &mut shared, submit_key());
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], UiEffect::SpawnLogin { .. }));
        assert!(state.lifecycle.is_busy());
        assert!(shared.tasks.login.is_running());
    }

    #[test]
    fn second_submit_while_busy_is_swallowed() {
        let mut state = filled("ann@example.com", "secret");
        let mut shared = SharedState::default();
        let (first, _) = handle_key(&mut state, &mut shared, submit_key());
        assert_eq!(first.len(), 1);
        let (second, _) = handle_key(&mut state, &mut shared, submit_key());
        assert!(second.is_empty());
        // No notice either: AlreadyBusy is not user-visible.
        assert!(shared.notices.current().is_none());
    }

    #[test]
    fn edits_are_ignored_while_busy() {
        let mut state = filled("ann@example.com", "secret");
        let mut shared = SharedState::default();
        handle_key(&mut state, &mut shared, submit_key());
        handle_key(&mut state, &mut shared, KeyEvent::from(KeyCode::Char('x')));
        assert_eq!(state.email.value(), "ann@example.com");
    }

    #[test]
    fn success_composes_session_user_and_replaces_to_home() {
        let mut state = filled("ann@example.com", "secret");
        let mut shared = SharedState::default();
        handle_key(&mut state, &mut shared, submit_key());

        let payload = LoginPayload {
            technician: Some(TechnicianRecord {
                name: Some("Ann".to_string()),
                ..TechnicianRecord::default()
            }),
        };
        let (effects, nav) = handle_settled(&mut state, &mut shared, Ok(ApiResult::Ok(payload)));
        assert!(effects.is_empty());
        assert!(!state.lifecycle.is_busy());
        assert_eq!(shared.notices.current().unwrap().title, "Welcome Back!");

        match nav {
            Some(NavAction::Replace(screen)) => {
                assert_eq!(screen.kind(), ScreenKind::Home);
                let Screen::Home(home) = screen else {
                    unreachable!()
                };
                assert_eq!(home.user.name, "Ann");
                assert_eq!(home.user.surname, "User");
                assert_eq!(home.user.department, "Unknown Department");
                assert_eq!(home.user.task, "Unknown Task");
            }
            _ => panic!("expected replace to home"),
        }
    }

    #[test]
    fn rejection_uses_server_message_when_present() {
        let mut state = filled("ann@example.com", "secret");
        let mut shared = SharedState::default();
        handle_key(&mut state, &mut shared, submit_key());

        let (_, nav) = handle_settled(
            &mut state,
            &mut shared,
            Ok(ApiResult::Rejected {
                status: 401,
                message: Some("Invalid credentials".to_string()),
            }),
        );
        assert!(nav.is_none());
        assert!(!state.lifecycle.is_busy());
        let notice = shared.notices.current().unwrap();
        assert_eq!(notice.title, "Login Failed");
        assert_eq!(notice.message, "Invalid credentials");
        // Field values survive for correction.
        assert_eq!(state.email.value(), "ann@example.com");
    }

    #[test]
    fn rejection_without_message_uses_generic_text() {
        let mut state = filled("ann@example.com", "secret");
        let mut shared = SharedState::default();
        handle_key(&mut state, &mut shared, submit_key());

        handle_settled(
            &mut state,
            &mut shared,
            Ok(ApiResult::Rejected {
                status: 401,
                message: None,
            }),
        );
        assert_eq!(
            shared.notices.current().unwrap().message,
            "Please check your credentials"
        );
        assert_eq!(
            state.lifecycle.last_outcome(),
            Some(&Outcome::ServerRejected {
                message: "Please check your credentials".to_string()
            })
        );
    }

    #[test]
    fn transport_failure_never_leaks_detail() {
        let mut state = filled("ann@example.com", "secret");
        let mut shared = SharedState::default();
        handle_key(&mut state, &mut shared, submit_key());

        handle_settled(
            &mut state,
            &mut shared,
            Err("dns error: no such host".to_string()),
        );
        assert!(!state.lifecycle.is_busy());
        assert_eq!(state.lifecycle.last_outcome(), Some(&Outcome::TransportError));
        let notice = shared.notices.current().unwrap();
        assert_eq!(notice.title, "Connection Error");
        assert_eq!(notice.message, "Unable to connect to the server");
        assert!(!notice.message.contains("dns"));
    }

    #[test]
    fn busy_clears_on_every_settle_branch() {
        for result in [
            Ok(ApiResult::Ok(LoginPayload::default())),
            Ok(ApiResult::Rejected {
                status: 500,
                message: None,
            }),
            Err("boom".to_string()),
        ] {
            let mut state = filled("ann@example.com", "secret");
            let mut shared = SharedState::default();
            handle_key(&mut state, &mut shared, submit_key());
            assert!(state.lifecycle.is_busy());
            handle_settled(&mut state, &mut shared, result);
            assert!(!state.lifecycle.is_busy());
        }
    }

    #[test]
    fn register_link_disabled_while_busy() {
        let mut state = filled("ann@example.com", "secret");
        let mut shared = SharedState::default();
        handle_key(&mut state, &mut shared, submit_key());
        let (_, nav) = handle_key(&mut state, &mut shared, KeyEvent::from(KeyCode::F(3)));
        assert!(nav.is_none());
    }
}
