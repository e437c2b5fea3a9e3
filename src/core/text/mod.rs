//! Text helpers (ANSI scanning, width calculations, truncation and padding).
//!
//! Everything here is string in, string out so widgets can share it without touching the
//! render layer.

pub mod ansi;
pub mod utils;
pub mod width;
