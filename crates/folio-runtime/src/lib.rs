#![forbid(unsafe_code)]

//! Runtime: the Elm-style [`Model`] contract, commands, host capabilities,
//! the blocking terminal [`Program`] and the deterministic
//! [`ProgramSimulator`](simulator::ProgramSimulator).

pub mod host;
pub mod program;
pub mod simulator;

pub use host::{RecordingUriOpener, UriOpener};
#[cfg(not(target_arch = "wasm32"))]
pub use host::SystemUriOpener;
pub use program::{Cmd, Model, ProgramConfig};
#[cfg(not(target_arch = "wasm32"))]
pub use program::Program;
pub use simulator::ProgramSimulator;
