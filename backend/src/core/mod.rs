//! Time scales and next-fire tick arithmetic

pub mod schedule;
pub mod time;
