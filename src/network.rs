//! Upstream endpoint constants.

/// Default pricing API base URL.
pub const DEFAULT_API_URL: &str = "https://api.spot-hinta.fi";

/// Path returning today's and (after publication) tomorrow's hourly prices.
pub const PRICES_PATH: &str = "/TodayAndDayForward";

/// Default price region.
pub const DEFAULT_REGION: &str = "FI";

/// Price resolution in minutes requested from the upstream.
pub const PRICE_RESOLUTION_MINUTES: u32 = 60;

/// Default outbound request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
