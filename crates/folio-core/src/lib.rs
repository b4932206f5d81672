#![forbid(unsafe_code)]

//! Core: geometry, canonical input events, terminal lifecycle, and logging.

pub mod event;
pub mod geometry;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal_session;
