//! # Spot Price Skill
//!
//! Backend for a voice skill that reads out the current electricity spot price.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: price types, wire parsing and hourly selection logic (pure)
//! 2. **HTTP**: `SpotHttp`, one bounded request per call, no retry
//! 3. **Client**: `SpotPriceClient` with the `prices()` sub-client
//! 4. **Speech**: plain-text and SSML formatters (pure)
//! 5. **Skill**: voice envelope adapter translating errors into speech
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spot_price_skill::prelude::*;
//!
//! let client = SpotPriceClient::builder().region("FI").build()?;
//! let price = client.fetch_current_price().await?;
//! println!("{}", speech::format_plain(price)?);
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared formatting utilities.
pub mod shared;

/// Domain modules: price types, wire parsing, schedule logic.
pub mod domain;

/// Unified error types.
pub mod error;

/// Upstream endpoint constants.
pub mod network;

// ── Layer 2: HTTP ────────────────────────────────────────────────────────────

/// HTTP client for the pricing API.
pub mod http;

// ── Layer 3: Client ──────────────────────────────────────────────────────────

/// `SpotPriceClient`: the primary entry point.
pub mod client;

// ── Layer 4: Speech ──────────────────────────────────────────────────────────

/// Plain-text and SSML response formatting.
pub mod speech;

// ── Layer 5: Skill ───────────────────────────────────────────────────────────

/// Voice-skill envelope handling.
pub mod skill;

pub use client::{global, init_global, spot_price_ssml, spot_price_text};

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Domain types
    pub use crate::domain::price::{
        PriceEntry, PriceUnit, RunWindowAdvice, SpotPrice, UpstreamSchema,
    };

    // Errors
    pub use crate::error::{HttpError, SpotError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_REGION};

    // Client
    pub use crate::client::{PricesClient, SpotPriceClient, SpotPriceClientBuilder};

    // Formatting
    pub use crate::speech::{self, FormattedResponse};

    // Skill
    pub use crate::skill::{RequestEnvelope, ResponseEnvelope};
}
