//! Voice-skill adapter: envelope in, fetch → format, envelope out.
//!
//! Errors never leave this module. A failed fetch or format is logged and
//! spoken as an apology; no fallback price is ever invented.

pub mod wire;

use crate::client::{SpotPriceClient, OUTLOOK_HOURS};
use crate::error::SpotError;
use crate::speech::{self, ssml, Utterance};

pub use wire::{RequestEnvelope, ResponseEnvelope};

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;

/// Follow-up questions appended to intent answers.
pub const CLOSING_CUES: &[&str] = &[
    "Anything else?",
    "What else would you like to know?",
    "Is there anything else I can help you with?",
];

const WELCOME: &str = "Welcome to Spot Price. \
    Ask me for the current electricity price or the cheapest hour today. \
    I can also tell you when to run your washing machine.";

const HELP: &str = "You can say: what is the electricity price, \
    when is electricity cheapest today, or should I run my machine now.";

const GOODBYE: &str = "Goodbye.";

/// Spoken instead of an answer when the price could not be produced.
pub const APOLOGY: &str =
    "Sorry, I couldn't get the electricity price right now. Please try again later.";

/// Intents the skill model defines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillIntent {
    GetSpotPrice,
    CheapestPrice,
    ShouldIRunMachine,
    Help,
    /// Stop and Cancel.
    Stop,
    Fallback,
    Other(String),
}

impl SkillIntent {
    pub fn from_name(name: &str) -> Self {
        match name {
            "GetSpotPriceIntent" => SkillIntent::GetSpotPrice,
            "CheapestPriceIntent" => SkillIntent::CheapestPrice,
            "ShouldIRunMachineIntent" => SkillIntent::ShouldIRunMachine,
            "AMAZON.HelpIntent" => SkillIntent::Help,
            "AMAZON.StopIntent" | "AMAZON.CancelIntent" => SkillIntent::Stop,
            "AMAZON.FallbackIntent" => SkillIntent::Fallback,
            other => SkillIntent::Other(other.to_string()),
        }
    }
}

/// Classified inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillRequest {
    Launch,
    Intent(SkillIntent),
    SessionEnded,
    Other,
}

impl From<&RequestEnvelope> for SkillRequest {
    fn from(envelope: &RequestEnvelope) -> Self {
        match envelope.request.request_type.as_deref() {
            Some("LaunchRequest") => SkillRequest::Launch,
            Some("SessionEndedRequest") => SkillRequest::SessionEnded,
            Some("IntentRequest") => {
                let name = envelope
                    .request
                    .intent
                    .as_ref()
                    .and_then(|i| i.name.as_deref())
                    .unwrap_or_default();
                SkillRequest::Intent(SkillIntent::from_name(name))
            }
            _ => SkillRequest::Other,
        }
    }
}

/// Append a randomly chosen closing cue inside the `<speak>` element.
pub fn with_closing_cue(ssml_text: &str) -> String {
    let cue = CLOSING_CUES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("Anything else?");
    ssml::append_before_close(ssml_text, &format!("<break time=\"300ms\"/> {}", cue))
}

/// Handle one invocation at the current time.
pub async fn handle(client: &SpotPriceClient, envelope: &RequestEnvelope) -> ResponseEnvelope {
    handle_at(client, envelope, Utc::now()).await
}

pub async fn handle_at(
    client: &SpotPriceClient,
    envelope: &RequestEnvelope,
    now: DateTime<Utc>,
) -> ResponseEnvelope {
    let request = SkillRequest::from(envelope);
    tracing::debug!(?request, request_id = ?envelope.request.request_id, "Handling skill request");

    match request {
        SkillRequest::Launch => {
            ResponseEnvelope::ssml(Utterance::new().text(WELCOME).ssml(), false)
        }
        SkillRequest::SessionEnded => ResponseEnvelope::empty(),
        SkillRequest::Intent(SkillIntent::Stop) => {
            ResponseEnvelope::ssml(Utterance::new().text(GOODBYE).ssml(), true)
        }
        SkillRequest::Intent(SkillIntent::Help) => answer(Ok(Utterance::new().text(HELP).ssml())),
        SkillRequest::Intent(SkillIntent::CheapestPrice) => {
            answer(cheapest_ssml(client, now).await)
        }
        SkillRequest::Intent(SkillIntent::ShouldIRunMachine) => {
            answer(run_window_ssml(client, now).await)
        }
        SkillRequest::Intent(_) | SkillRequest::Other => answer(outlook_ssml(client, now).await),
    }
}

/// Handle an opaque JSON event, as delivered by a function runtime.
///
/// An event that does not look like a skill envelope is answered with the
/// price outlook.
pub async fn handle_value(
    client: &SpotPriceClient,
    event: serde_json::Value,
) -> serde_json::Result<serde_json::Value> {
    let envelope: RequestEnvelope = serde_json::from_value(event).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Unrecognised envelope, using defaults");
        RequestEnvelope::default()
    });
    serde_json::to_value(handle(client, &envelope).await)
}

fn answer(result: Result<String, SpotError>) -> ResponseEnvelope {
    let ssml_text = result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to produce price answer");
        Utterance::new().text(APOLOGY).ssml()
    });
    ResponseEnvelope::ssml(with_closing_cue(&ssml_text), false)
}

async fn outlook_ssml(client: &SpotPriceClient, now: DateTime<Utc>) -> Result<String, SpotError> {
    let entries = client.prices().upcoming_at(now, OUTLOOK_HOURS).await?;
    speech::format_outlook_speech(&entries)
}

async fn cheapest_ssml(client: &SpotPriceClient, now: DateTime<Utc>) -> Result<String, SpotError> {
    let cheapest = client.prices().cheapest_today_at(now).await?;
    speech::format_cheapest_speech(cheapest.as_ref())
}

async fn run_window_ssml(client: &SpotPriceClient, now: DateTime<Utc>) -> Result<String, SpotError> {
    let advice = client.prices().run_window_at(now).await?;
    speech::format_run_window_speech(&advice, client.run_threshold_cents())
}
