//! Runtime orchestration.

pub mod tui;

pub use tui::{
    Command, CustomCommand, CustomCommandCtx, CustomCommandError, RuntimeHandle, TuiRuntime,
};
