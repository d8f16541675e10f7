//! Response formatting: plain sentences and SSML for voice playback.
//!
//! Every formatter is pure: same input, same output, no I/O. Prices are
//! rendered in cents per kWh with two decimals; a NaN or infinite price is
//! rejected with [`SpotError::InvalidPriceValue`].
//!
//! ```rust,ignore
//! use spot_price_skill::speech;
//!
//! let text = speech::format_plain(5.237.into())?;
//! assert_eq!(text, "The current electricity spot price is 5.24 cents per kilowatt-hour.");
//! ```

pub mod ssml;

use crate::domain::price::{PriceEntry, RunWindowAdvice, SpotPrice};
use crate::error::SpotError;
use crate::shared::fmt::num;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

pub use ssml::Utterance;

const OUTLOOK_LABELS: [&str; 3] = ["Next hour", "in two hours", "in three hours"];

const OUTLOOK_INCOMPLETE: &str =
    "I couldn't find price information for all of the next three hours.";

/// Spoken when the local day has no price slots left.
pub const NO_REMAINING_TODAY: &str =
    "I'm sorry, I couldn't find any remaining electricity price entries for today.";

/// Plain text and SSML rendering of the same answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedResponse {
    pub plain: String,
    pub speech: String,
}

impl From<Utterance> for FormattedResponse {
    fn from(u: Utterance) -> Self {
        Self {
            plain: u.plain(),
            speech: u.ssml(),
        }
    }
}

fn cents(price: SpotPrice) -> Result<String, SpotError> {
    let value = price.cents_per_kwh();
    num::price(value).ok_or(SpotError::InvalidPriceValue(value))
}

/// `HH:MM` in the entry's own offset.
pub fn hh_mm(at: &DateTime<FixedOffset>) -> String {
    at.format("%H:%M").to_string()
}

// ── Current price ────────────────────────────────────────────────────────────

fn current_price(price: SpotPrice) -> Result<Utterance, SpotError> {
    Ok(Utterance::new()
        .text("The current electricity spot price is")
        .pause(200)
        .cardinal(cents(price)?)
        .text("cents per kilowatt-hour")
        .punct(".")
        .pause(100))
}

/// "The current electricity spot price is X.XX cents per kilowatt-hour."
pub fn format_plain(price: SpotPrice) -> Result<String, SpotError> {
    Ok(current_price(price)?.plain())
}

/// SSML variant of [`format_plain`].
pub fn format_speech(price: SpotPrice) -> Result<String, SpotError> {
    Ok(current_price(price)?.ssml())
}

pub fn format(price: SpotPrice) -> Result<FormattedResponse, SpotError> {
    Ok(current_price(price)?.into())
}

// ── Outlook ──────────────────────────────────────────────────────────────────

fn outlook(entries: &[PriceEntry]) -> Result<Utterance, SpotError> {
    let (current, rest) = entries
        .split_first()
        .ok_or_else(|| SpotError::data("no price entries to describe"))?;

    let mut u = current_price(current.price)?;

    let later: Vec<(&PriceEntry, &str)> = rest.iter().zip(OUTLOOK_LABELS).collect();
    for (i, (entry, label)) in later.iter().enumerate() {
        if i > 0 {
            u = u.punct(",");
            if i == later.len() - 1 {
                u = u.text("and");
            }
        }
        u = u
            .text(*label)
            .pause(150)
            .cardinal(cents(entry.price)?)
            .text("cents");
    }
    if !later.is_empty() {
        u = u.punct(".").pause(100);
    }

    if later.len() < OUTLOOK_LABELS.len() {
        u = u.pause(200).text(OUTLOOK_INCOMPLETE);
    }
    Ok(u)
}

/// Current price plus the next three hours, as plain text.
///
/// `entries` starts at the current hour; only the first four are used.
pub fn format_outlook_plain(entries: &[PriceEntry]) -> Result<String, SpotError> {
    Ok(outlook(entries)?.plain())
}

pub fn format_outlook_speech(entries: &[PriceEntry]) -> Result<String, SpotError> {
    Ok(outlook(entries)?.ssml())
}

// ── Cheapest hour ────────────────────────────────────────────────────────────

fn cheapest(entry: Option<&PriceEntry>) -> Result<Utterance, SpotError> {
    let Some(entry) = entry else {
        return Ok(Utterance::new().text(NO_REMAINING_TODAY));
    };
    Ok(Utterance::new()
        .text("The lowest electricity spot price today is")
        .cardinal(cents(entry.price)?)
        .text("cents per kilowatt-hour at")
        .time(hh_mm(&entry.starts_at))
        .punct("."))
}

pub fn format_cheapest_plain(entry: Option<&PriceEntry>) -> Result<String, SpotError> {
    Ok(cheapest(entry)?.plain())
}

pub fn format_cheapest_speech(entry: Option<&PriceEntry>) -> Result<String, SpotError> {
    Ok(cheapest(entry)?.ssml())
}

// ── Run window ───────────────────────────────────────────────────────────────

fn run_window(advice: &RunWindowAdvice, threshold_cents: f64) -> Result<Utterance, SpotError> {
    let u = Utterance::new();
    let u = match advice {
        RunWindowAdvice::NowIsGood => {
            let threshold = num::price(threshold_cents)
                .ok_or(SpotError::InvalidPriceValue(threshold_cents))?;
            u.text("Yes, now is a good time.")
                .pause(100)
                .text("Prices stay at or below")
                .cardinal(threshold)
                .text("cents per kilowatt-hour for the next three hours")
                .punct(".")
        }
        RunWindowAdvice::LaterToday(at) => u
            .text("Not right now.")
            .pause(100)
            .text("The next cheap three-hour window starts at")
            .time(hh_mm(at))
            .punct("."),
        RunWindowAdvice::Tomorrow(starts) if !starts.is_empty() => {
            let mut u = u
                .text("No cheap three-hour window remains today.")
                .pause(100)
                .text("Tomorrow run it at");
            for (i, at) in starts.iter().enumerate() {
                if i > 0 {
                    u = if i == starts.len() - 1 {
                        u.text("or")
                    } else {
                        u.punct(",")
                    };
                }
                u = u.time(hh_mm(at));
            }
            u.punct(".")
        }
        RunWindowAdvice::NoWindowRemaining => {
            u.text("I couldn't find a three-hour window remaining today.")
        }
        RunWindowAdvice::NoGoodTimeToday => u.text("No good times remaining today."),
        RunWindowAdvice::Tomorrow(_) | RunWindowAdvice::NoGoodTimeTodayOrTomorrow => {
            u.text("No good times today or tomorrow.")
        }
    };
    Ok(u)
}

pub fn format_run_window_plain(
    advice: &RunWindowAdvice,
    threshold_cents: f64,
) -> Result<String, SpotError> {
    Ok(run_window(advice, threshold_cents)?.plain())
}

pub fn format_run_window_speech(
    advice: &RunWindowAdvice,
    threshold_cents: f64,
) -> Result<String, SpotError> {
    Ok(run_window(advice, threshold_cents)?.ssml())
}
