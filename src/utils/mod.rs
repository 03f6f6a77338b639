//! Utility functions and helpers

pub mod atomic;

pub use atomic::{atomic_write, remove_temp};
