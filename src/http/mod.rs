//! HTTP client layer: `SpotHttp`, single-attempt requests.

pub mod client;

pub use client::SpotHttp;
