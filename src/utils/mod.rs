//! Utility modules shared by the compiler and the feed callbacks.

pub mod date;
pub mod path;
