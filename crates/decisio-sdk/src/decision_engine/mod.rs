//! DecisionEngine - Main API for evaluating decisions
//!
//! The module is organized into:
//! - `engine`: parse, locate and evaluate entry points
//! - `tests`: Unit tests (test-only)

mod engine;

pub use engine::DecisionEngine;

// Tests module (only compiled in test mode)
#[cfg(test)]
mod tests;
