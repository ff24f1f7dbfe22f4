//! Utility functions and helpers.
//!
//! This module contains the size measurement and formatting helpers used
//! throughout the application.

pub mod size;

pub use size::{compute_size, format_size};
