//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime
//! executes. They represent I/O and task spawning only; the reducer
//! stays pure — it mutates state and returns effects, never performs
//! network calls itself.

use techhub_core::session::{Credentials, RegistrationProfile};
use tokio_util::sync::CancellationToken;

use crate::task::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Spawn the async login call. The token is cancelled if the owning
    /// screen is torn down before the call settles.
    SpawnLogin {
        task: TaskId,
        credentials: Credentials,
        cancel: CancellationToken,
    },

    /// Spawn the async registration call.
    SpawnRegister {
        task: TaskId,
        profile: RegistrationProfile,
        cancel: CancellationToken,
    },

    /// Cancel an in-flight task (owning screen left the stack).
    CancelTask { cancel: CancellationToken },
}
