//! Terminal GitHub browser.
//!
//! [`screens`] holds the view-state machine. [`host`] is the seam to the network,
//! [`runtime`] and [`tui`] connect the state machine to the toolkit runtime.

pub mod app;
pub mod cli;
pub mod host;
pub mod msg;
pub mod runtime;
pub mod screens;
pub mod theme;
pub mod tui;
