//! Shared utilities used across modules.

pub mod fmt;
