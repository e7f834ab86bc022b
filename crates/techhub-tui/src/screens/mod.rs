//! Screen modules: per-screen state, key handling, and render.
//!
//! Each handler takes its own screen state plus the shared state and
//! returns effects and an optional navigation request. Handlers never
//! touch the stack directly; the reducer applies navigation after the
//! handler returns.

pub mod home;
pub mod login;
pub mod register;
pub mod scanner;
pub mod splash;

use crate::effects::UiEffect;
use crate::state::NavAction;

/// What a screen key handler hands back to the reducer.
pub type ScreenUpdate = (Vec<UiEffect>, Option<NavAction>);

pub(crate) fn stay() -> ScreenUpdate {
    (vec![], None)
}
