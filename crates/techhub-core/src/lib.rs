//! Core library for the Embroidery Tech Hub client.
//!
//! UI-free building blocks: configuration, field validation, the
//! submission lifecycle state machine, the session data model, and the
//! HTTP client for the remote authentication service.

pub mod client;
pub mod config;
pub mod flow;
pub mod session;
pub mod validate;
