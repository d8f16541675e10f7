//! Formatting helpers for display and speech.

pub mod num;
