//! The reducer: one event in, state mutated, effects out.
//!
//! All state transitions funnel through [`update`]. The runtime owns
//! the loop and the I/O; this module owns the rules. Navigation
//! requested by a screen handler is applied here, after the handler
//! has released its borrow of the screen it runs on.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::screens::{self, login::LoginState};
use crate::state::{AppState, NavAction, Screen, ScreenKind};
use crate::task::TaskKind;

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => on_tick(app, Instant::now()),
        UiEvent::Terminal(Event::Key(key)) => on_key(app, key),
        UiEvent::Terminal(_) => vec![],
        UiEvent::LoginSettled { task, result } => {
            if !app.shared.tasks.login.finish_if_active(task) {
                tracing::debug!(?task, "dropping stale login completion");
                return vec![];
            }
            let AppState { nav, shared } = app;
            let (effects, nav_action) = match nav.current_mut() {
                Screen::Login(state) => screens::login::handle_settled(state, shared, result),
                _ => {
                    tracing::debug!(?task, "login settled after its screen was torn down");
                    return vec![];
                }
            };
            settle_nav(app, effects, nav_action)
        }
        UiEvent::RegisterSettled { task, result } => {
            if !app.shared.tasks.register.finish_if_active(task) {
                tracing::debug!(?task, "dropping stale registration completion");
                return vec![];
            }
            let AppState { nav, shared } = app;
            let (effects, nav_action) = match nav.current_mut() {
                Screen::Register(state) => screens::register::handle_settled(state, shared, result),
                _ => {
                    tracing::debug!(?task, "registration settled after its screen was torn down");
                    return vec![];
                }
            };
            settle_nav(app, effects, nav_action)
        }
    }
}

fn on_tick(app: &mut AppState, now: Instant) -> Vec<UiEffect> {
    app.shared.notices.tick();
    if let Screen::Splash(splash) = app.nav.current()
        && splash.should_advance(now)
    {
        app.nav.replace(Screen::Login(LoginState::new()));
    }
    vec![]
}

fn on_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.shared.should_quit = true;
        return vec![];
    }

    let AppState { nav, shared } = app;
    let (effects, nav_action) = match nav.current_mut() {
        // The splash ignores input; it advances on its own.
        Screen::Splash(_) => screens::stay(),
        Screen::Login(state) => screens::login::handle_key(state, shared, key),
        Screen::Register(state) => screens::register::handle_key(state, shared, key),
        Screen::Home(state) => screens::home::handle_key(state, key),
        Screen::Scanner => screens::scanner::handle_key(key),
    };
    settle_nav(app, effects, nav_action)
}

/// Applies a handler's navigation request and sweeps for tasks whose
/// owning screen just left the stack.
fn settle_nav(
    app: &mut AppState,
    mut effects: Vec<UiEffect>,
    nav_action: Option<NavAction>,
) -> Vec<UiEffect> {
    let Some(action) = nav_action else {
        return effects;
    };
    match action {
        NavAction::Navigate(screen) => app.nav.navigate(screen),
        NavAction::Replace(screen) => app.nav.replace(screen),
        NavAction::Pop => app.nav.pop(),
    }
    effects.extend(cancel_orphaned_tasks(app));
    effects
}

/// A call whose screen is gone can never settle into anything the user
/// sees; cancel it and forget the id so a late completion is stale.
fn cancel_orphaned_tasks(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for (kind, owner) in [
        (TaskKind::Login, ScreenKind::Login),
        (TaskKind::Register, ScreenKind::Register),
    ] {
        let state = app.shared.tasks.state_mut(kind);
        if state.is_running() && !app.nav.contains(owner) {
            if let Some(cancel) = state.cancel.take() {
                effects.push(UiEffect::CancelTask { cancel });
            }
            state.clear();
        }
    }
    effects
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use techhub_core::client::ApiResult;
    use techhub_core::session::LoginPayload;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::screens::splash::{SPLASH_DURATION, SplashState};
    use crate::task::TaskId;

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::from(code)))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            update(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn splash_advances_to_login_on_tick_after_delay() {
        let shown = Instant::now() - SPLASH_DURATION - Duration::from_millis(1);
        let mut app = AppState::starting_on(Screen::Splash(SplashState::shown_at(shown)));
        on_tick(&mut app, Instant::now());
        assert_eq!(app.nav.current().kind(), ScreenKind::Login);
        assert_eq!(app.nav.depth(), 1);
    }

    #[test]
    fn splash_stays_before_the_delay() {
        let mut app = AppState::starting_on(Screen::Splash(SplashState::shown_at(Instant::now())));
        on_tick(&mut app, Instant::now());
        assert_eq!(app.nav.current().kind(), ScreenKind::Splash);
    }

    #[test]
    fn ctrl_c_requests_quit_from_any_screen() {
        let mut app = AppState::starting_on(Screen::Scanner);
        let event = UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        update(&mut app, event);
        assert!(app.shared.should_quit);
    }

    #[test]
    fn full_login_flow_lands_on_home() {
        let mut app = AppState::starting_on(Screen::Login(LoginState::new()));
        type_text(&mut app, "ann@example.com");
        update(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "secret");

        let effects = update(&mut app, key(KeyCode::Enter));
        assert_eq!(effects.len(), 1);
        let UiEffect::SpawnLogin { task, .. } = &effects[0] else {
            panic!("expected a login spawn");
        };

        update(
            &mut app,
            UiEvent::LoginSettled {
                task: *task,
                result: Ok(ApiResult::Ok(LoginPayload::default())),
            },
        );
        assert_eq!(app.nav.current().kind(), ScreenKind::Home);
        assert!(!app.shared.tasks.login.is_running());
    }

    #[test]
    fn stale_login_completion_is_dropped() {
        let mut app = AppState::starting_on(Screen::Login(LoginState::new()));
        type_text(&mut app, "ann@example.com");
        update(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "secret");
        update(&mut app, key(KeyCode::Enter));

        update(
            &mut app,
            UiEvent::LoginSettled {
                task: TaskId(999),
                result: Ok(ApiResult::Ok(LoginPayload::default())),
            },
        );
        // Still on login, still busy, no notice: the event never
        // reached the screen.
        assert_eq!(app.nav.current().kind(), ScreenKind::Login);
        assert!(app.shared.tasks.login.is_running());
        assert!(app.shared.notices.current().is_none());
    }

    #[test]
    fn navigation_cancels_tasks_whose_screen_left_the_stack() {
        let mut app = AppState::starting_on(Screen::Login(LoginState::new()));
        let cancel = CancellationToken::new();
        app.shared
            .tasks
            .login
            .on_started(TaskId(7), cancel.clone());

        let effects = settle_nav(
            &mut app,
            vec![],
            Some(NavAction::Replace(Screen::Scanner)),
        );
        assert!(matches!(effects[..], [UiEffect::CancelTask { .. }]));
        assert!(!app.shared.tasks.login.is_running());
    }

    #[test]
    fn home_to_scanner_and_back() {
        let mut app = AppState::starting_on(Screen::Home(
            crate::screens::home::HomeState::new(LoginPayload::default().into()),
        ));
        update(&mut app, key(KeyCode::Char('s')));
        assert_eq!(app.nav.current().kind(), ScreenKind::Scanner);
        assert_eq!(app.nav.depth(), 2);
        update(&mut app, key(KeyCode::Esc));
        assert_eq!(app.nav.current().kind(), ScreenKind::Home);
    }

    #[test]
    fn login_register_round_trip_preserves_login_state() {
        let mut app = AppState::starting_on(Screen::Login(LoginState::new()));
        type_text(&mut app, "ann@");
        update(&mut app, key(KeyCode::F(3)));
        assert_eq!(app.nav.current().kind(), ScreenKind::Register);
        update(&mut app, key(KeyCode::F(3)));
        assert_eq!(app.nav.current().kind(), ScreenKind::Login);
        match app.nav.current() {
            Screen::Login(login) => assert_eq!(login.email.value(), "ann@"),
            _ => unreachable!(),
        }
    }
}
