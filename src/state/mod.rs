//! State module for tracking link verification progress
//!
//! # Components
//!
//! - `Attempt`: Whether a link task is the first try or the GET retry
//! - `LinkState`: The per-link state machine driven by the link verifier

mod link_state;

// Re-export main types
pub use link_state::{Attempt, LinkState};
