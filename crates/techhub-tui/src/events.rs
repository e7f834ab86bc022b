//! Input events consumed by the reducer.

use techhub_core::client::ApiResult;
use techhub_core::session::LoginPayload;

use crate::task::TaskId;

/// Everything that can drive a state change.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic timer: notice expiry, splash advance.
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// A spawned login call finished. `Err` is the transport failure's
    /// description (logged, never shown to the user).
    LoginSettled {
        task: TaskId,
        result: Result<ApiResult<LoginPayload>, String>,
    },
    /// A spawned registration call finished.
    RegisterSettled {
        task: TaskId,
        result: Result<ApiResult<()>, String>,
    },
}
