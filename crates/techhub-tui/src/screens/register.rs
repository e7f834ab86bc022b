//! Registration screen.
//!
//! Same submission cycle as login with two differences: the password
//! strength floor applies, and success clears the form and navigates
//! back to login instead of authenticating.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use techhub_core::client::ApiResult;
use techhub_core::flow::{Outcome, RequestLifecycle};
use techhub_core::session::RegistrationProfile;
use techhub_core::validate::{self, FieldError};
use tokio_util::sync::CancellationToken;

use super::login::{LoginState, field_line};
use super::{ScreenUpdate, stay};
use crate::effects::UiEffect;
use crate::form::FieldBuffer;
use crate::state::{NavAction, Screen, SharedState};

const REJECTED_FALLBACK: &str = "Unknown error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Name,
    Surname,
    Email,
    Password,
    Department,
    Task,
}

impl RegisterField {
    const ORDER: [RegisterField; 6] = [
        RegisterField::Name,
        RegisterField::Surname,
        RegisterField::Email,
        RegisterField::Password,
        RegisterField::Department,
        RegisterField::Task,
    ];

    fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug)]
pub struct RegisterState {
    pub name: FieldBuffer,
    pub surname: FieldBuffer,
    pub email: FieldBuffer,
    pub password: FieldBuffer,
    pub department: FieldBuffer,
    pub task: FieldBuffer,
    pub show_password: bool,
    pub focus: RegisterField,
    pub lifecycle: RequestLifecycle,
}

impl RegisterState {
    pub fn new() -> Self {
        Self {
            name: FieldBuffer::default(),
            surname: FieldBuffer::default(),
            email: FieldBuffer::default(),
            password: FieldBuffer::default(),
            department: FieldBuffer::default(),
            task: FieldBuffer::default(),
            show_password: false,
            focus: RegisterField::Name,
            lifecycle: RequestLifecycle::new(),
        }
    }

    fn profile(&self) -> RegistrationProfile {
        RegistrationProfile {
            name: self.name.value().to_string(),
            surname: self.surname.value().to_string(),
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
            department: self.department.value().to_string(),
            task: self.task.value().to_string(),
        }
    }

    fn clear_fields(&mut self) {
        self.name.clear();
        self.surname.clear();
        self.email.clear();
        self.password.clear();
        self.department.clear();
        self.task.clear();
        self.focus = RegisterField::Name;
    }
}

impl Default for RegisterState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn handle_key(
    state: &mut RegisterState,
    shared: &mut SharedState,
    key: KeyEvent,
) -> ScreenUpdate {
    match key.code {
        KeyCode::Enter => (submit(state, shared), None),
        // Everything, the password toggle included, is disabled while
        // the call is in flight.
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
            Some(NavAction::Navigate(Screen::Login(LoginState::new()))),
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

fn field_mut(state: &mut RegisterState) -> &mut FieldBuffer {
    match state.focus {
        RegisterField::Name => &mut state.name,
        RegisterField::Surname => &mut state.surname,
        RegisterField::Email => &mut state.email,
        RegisterField::Password => &mut state.password,
        RegisterField::Department => &mut state.department,
        RegisterField::Task => &mut state.task,
    }
}

fn submit(state: &mut RegisterState, shared: &mut SharedState) -> Vec<UiEffect> {
    if state.lifecycle.begin().is_err() {
        return vec![];
    }

    let profile = state.profile();
    if let Err(reason) = validate::validate_registration(&profile) {
        state.lifecycle.complete(Outcome::ValidationFailure(reason));
        let (title, message) = validation_notice(reason);
        shared.notices.error(title, message);
        return vec![];
    }

    let task = shared.task_seq.next_id();
    let cancel = CancellationToken::new();
    shared.tasks.register.on_started(task, cancel.clone());
    vec![UiEffect::SpawnRegister {
        task,
        profile,
        cancel,
    }]
}

fn validation_notice(reason: FieldError) -> (&'static str, &'static str) {
    match reason {
        FieldError::MissingFields => ("Missing Info", "Please fill in all fields"),
        FieldError::InvalidEmail => ("Invalid Email", "Please enter a valid email address"),
        FieldError::WeakPassword => (
            "Weak Password",
            "Password must be at least 6 characters long",
        ),
    }
}

/// Routes a settled registration call. Success clears the form and
/// navigates back to login; the user signs in explicitly.
pub fn handle_settled(
    state: &mut RegisterState,
    shared: &mut SharedState,
    result: Result<ApiResult<()>, String>,
) -> ScreenUpdate {
    match result {
        Ok(ApiResult::Ok(())) => {
            state.lifecycle.complete(Outcome::Success);
            state.clear_fields();
            shared.notices.success(
                "Registration Successful",
                "Your account has been created successfully!",
            );
            (
                vec![],
                Some(NavAction::Navigate(Screen::Login(LoginState::new()))),
            )
        }
        Ok(ApiResult::Rejected { message, .. }) => {
            let message = message.unwrap_or_else(|| REJECTED_FALLBACK.to_string());
            state.lifecycle.complete(Outcome::ServerRejected {
                message: message.clone(),
            });
            shared.notices.error("Registration Failed", message);
            stay()
        }
        Err(transport) => {
            tracing::warn!(error = %transport, "registration request failed");
            state.lifecycle.complete(Outcome::TransportError);
            shared.notices.error(
                "Network Error",
                "Please check your internet connection and try again",
            );
            stay()
        }
    }
}

pub fn render(state: &RegisterState, frame: &mut Frame, area: Rect) {
    let password_display = if state.show_password {
        state.password.value().to_string()
    } else {
        state.password.masked()
    };

    let mut lines = vec![
        Line::styled(
            "Create Account",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            "Fill in your details",
            Style::default().fg(Color::DarkGray),
        ),
        Line::from(""),
        field_line(
            "First Name",
            state.name.value(),
            state.focus == RegisterField::Name,
        ),
        field_line(
            "Last Name",
            state.surname.value(),
            state.focus == RegisterField::Surname,
        ),
        field_line(
            "Email Address",
            state.email.value(),
            state.focus == RegisterField::Email,
        ),
        field_line(
            "Password",
            &password_display,
            state.focus == RegisterField::Password,
        ),
        field_line(
            "Department",
            state.department.value(),
            state.focus == RegisterField::Department,
        ),
        field_line(
            "Task/Role",
            state.task.value(),
            state.focus == RegisterField::Task,
        ),
        Line::from(""),
    ];

    if state.lifecycle.is_busy() {
        lines.push(Line::styled(
            "Creating account...",
            Style::default().fg(Color::Yellow),
        ));
    } else {
        lines.push(Line::styled(
            "[Enter] Create Account  [F2] Show/Hide Password  [F3] Sign In",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), area);
}
