//! Application state composition.
//!
//! State is split in two so screen handlers can borrow their own state
//! and the shared pieces simultaneously:
//! - `NavStack` — the screen stack (each entry owns its screen state)
//! - `SharedState` — everything screens share: quit flag, notices,
//!   task bookkeeping
//!
//! Screen transitions mirror the stack navigator of the app: `replace`
//! swaps the top entry (splash→login, login→home), `navigate` returns
//! to an existing instance of the target when one is on the stack and
//! pushes otherwise (login↔register, home→scanner).

use crate::notice::NoticeState;
use crate::screens::home::HomeState;
use crate::screens::login::LoginState;
use crate::screens::register::RegisterState;
use crate::screens::splash::SplashState;
use crate::task::{TaskSeq, Tasks};

/// Combined application state.
pub struct AppState {
    pub nav: NavStack,
    pub shared: SharedState,
}

impl AppState {
    /// Fresh state, starting on the splash screen.
    pub fn new() -> Self {
        Self {
            nav: NavStack::new(Screen::Splash(SplashState::new())),
            shared: SharedState::default(),
        }
    }

    /// Fresh state starting on an arbitrary screen (tests).
    #[cfg(test)]
    pub fn starting_on(screen: Screen) -> Self {
        Self {
            nav: NavStack::new(screen),
            shared: SharedState::default(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-screen state shared across the whole app.
#[derive(Default)]
pub struct SharedState {
    pub should_quit: bool,
    pub notices: NoticeState,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
}

/// One entry on the navigation stack, owning its screen's state.
///
/// Per-screen form state and submission lifecycle live inside the
/// variant and are destroyed when the entry leaves the stack.
pub enum Screen {
    Splash(SplashState),
    Login(LoginState),
    Register(RegisterState),
    Home(HomeState),
    Scanner,
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Splash(_) => ScreenKind::Splash,
            Screen::Login(_) => ScreenKind::Login,
            Screen::Register(_) => ScreenKind::Register,
            Screen::Home(_) => ScreenKind::Home,
            Screen::Scanner => ScreenKind::Scanner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Splash,
    Login,
    Register,
    Home,
    Scanner,
}

/// Navigation request returned by a screen handler; applied by the
/// reducer after the handler releases its borrow of the current screen.
pub enum NavAction {
    /// Return to an existing instance of the target, or push one.
    Navigate(Screen),
    /// Swap the top entry for the target.
    Replace(Screen),
    /// Pop the top entry (no-op at the root).
    Pop,
}

/// The screen stack.
pub struct NavStack {
    stack: Vec<Screen>,
}

impl NavStack {
    pub fn new(initial: Screen) -> Self {
        Self {
            stack: vec![initial],
        }
    }

    pub fn current(&self) -> &Screen {
        self.stack.last().expect("nav stack is never empty")
    }

    pub fn current_mut(&mut self) -> &mut Screen {
        self.stack.last_mut().expect("nav stack is never empty")
    }

    pub fn contains(&self, kind: ScreenKind) -> bool {
        self.stack.iter().any(|s| s.kind() == kind)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns to an existing instance of the target's screen kind
    /// (preserving its state) when one is on the stack; otherwise
    /// pushes the given instance.
    pub fn navigate(&mut self, target: Screen) {
        if let Some(pos) = self.stack.iter().position(|s| s.kind() == target.kind()) {
            self.stack.truncate(pos + 1);
        } else {
            self.stack.push(target);
        }
    }

    /// Discards the current entry and replaces it with the target.
    pub fn replace(&mut self, target: Screen) {
        self.stack.pop();
        self.stack.push(target);
    }

    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }
}
