//! Submission lifecycle state machine.
//!
//! Each form screen owns one [`RequestLifecycle`]. It guards against
//! concurrent submissions and records how the last attempt ended. The
//! liveness contract: every path out of an in-flight request must call
//! [`RequestLifecycle::complete`], so `busy` can never stick.

use crate::validate::FieldError;

/// How one authentication attempt ended.
///
/// Consumed once by the notice/navigation layer, then only kept as
/// `last_outcome` for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Rejected locally before any network call.
    ValidationFailure(FieldError),
    /// The server answered with a non-success status.
    ServerRejected {
        /// Server-provided message, or the screen's generic fallback.
        message: String,
    },
    /// The call never produced a usable response (connect failure,
    /// timeout, non-JSON body). Detail goes to the log, not the user.
    TransportError,
    /// The server accepted the request.
    Success,
}

/// Returned by [`RequestLifecycle::begin`] when a submission is already
/// in flight. Callers ignore it silently; it is an internal guard, not
/// a user-visible error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyBusy;

/// Per-screen submission state: a busy flag plus the last outcome.
///
/// The busy guard is independent of the UI layer, so the invariant
/// holds even if a submit control fails to disable itself.
#[derive(Debug, Default)]
pub struct RequestLifecycle {
    busy: bool,
    last_outcome: Option<Outcome>,
}

impl RequestLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a submission as in flight.
    ///
    /// Fails with [`AlreadyBusy`] if one already is; at most one
    /// submission per screen instance can be outstanding.
    pub fn begin(&mut self) -> Result<(), AlreadyBusy> {
        if self.busy {
            return Err(AlreadyBusy);
        }
        self.busy = true;
        Ok(())
    }

    /// Settles the current attempt: clears busy and records the outcome.
    ///
    /// Must be called on every exit path of an in-flight call. Also
    /// used for validation failures, which settle without ever having
    /// been busy.
    pub fn complete(&mut self, outcome: Outcome) {
        self.busy = false;
        self.last_outcome = Some(outcome);
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }
}
