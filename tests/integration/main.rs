//! Cross-layer integration tests for Stowage
//!
//! Tests that verify correct interaction between multiple crates.

mod save_load;
mod tick_cycle;
