//! Interactive editing session
//!
//! Organized TEA style:
//! - `state`: the single session state object and its phases
//! - `message`: inputs to the state machine and the line parser
//! - `update`: the transition function
//! - `runner`: event loop wiring input, fetch tasks and drawing

pub mod message;
pub mod runner;
pub mod state;
pub mod update;

pub use state::Session;
