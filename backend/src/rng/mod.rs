//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! All randomness in the scheduler (RANDOM_ONE target selection) goes through
//! the single generator owned by the `Scheduler`.

mod xorshift;

pub use xorshift::RngManager;
