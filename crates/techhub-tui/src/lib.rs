//! Full-screen TUI for the Embroidery Tech Hub client.

pub mod effects;
pub mod events;
pub mod form;
pub mod notice;
pub mod render;
pub mod runtime;
pub mod screens;
pub mod state;
pub mod task;
pub mod terminal;
pub mod update;

use anyhow::Result;
pub use runtime::TuiRuntime;
use techhub_core::client::AuthClient;

/// Runs the interactive authentication flow.
pub async fn run_app(auth: AuthClient) -> Result<()> {
    let mut runtime = TuiRuntime::new(auth)?;
    runtime.run()
}
