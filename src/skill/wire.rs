//! Wire types for the voice-skill request/response envelope.
//!
//! Only the fields the handler reads are typed; everything else in the
//! inbound envelope is ignored.

use serde::{Deserialize, Serialize};

/// Inbound invocation envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub request: Request,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type", default)]
    pub request_type: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub intent: Option<Intent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub name: Option<String>,
}

/// Outbound response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub version: String,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: String,
    pub ssml: String,
}

impl ResponseEnvelope {
    pub fn ssml(ssml: String, should_end_session: bool) -> Self {
        Self {
            version: "1.0".to_string(),
            response: ResponseBody {
                output_speech: Some(OutputSpeech {
                    speech_type: "SSML".to_string(),
                    ssml,
                }),
                should_end_session,
            },
        }
    }

    /// No speech; used to acknowledge a session end.
    pub fn empty() -> Self {
        Self {
            version: "1.0".to_string(),
            response: ResponseBody {
                output_speech: None,
                should_end_session: true,
            },
        }
    }

    pub fn speech(&self) -> Option<&str> {
        self.response
            .output_speech
            .as_ref()
            .map(|s| s.ssml.as_str())
    }
}
