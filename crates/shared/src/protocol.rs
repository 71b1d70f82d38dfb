use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    domain::{Candidate, CandidateId},
    error::ProtocolError,
};

pub const TOGGLE_MESSAGE: &str = "election:toggle";
pub const UPDATE_MESSAGE: &str = "election:update";

pub const VOTE_ENDPOINT: &str = "electionVote";
pub const CLOSE_ENDPOINT: &str = "electionClose";

/// Partial election state pushed by the host. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_voted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
}

impl StateUpdate {
    pub fn is_empty(&self) -> bool {
        self.region_title.is_none()
            && self.phase.is_none()
            && self.has_voted.is_none()
            && self.candidates.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    #[serde(rename = "election:toggle")]
    Toggle { display: bool },
    #[serde(rename = "election:update")]
    Update(StateUpdate),
    #[serde(skip_serializing)]
    Unrecognized { kind: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage {
    pub message: InboundMessage,
    /// Wire names of fields that were present but had the wrong shape.
    pub rejected_fields: Vec<&'static str>,
    /// Candidate entries skipped for lacking a usable id.
    pub dropped_candidates: usize,
}

impl InboundMessage {
    pub fn parse(raw: &str) -> Result<DecodedMessage, ProtocolError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::decode(&value)
    }

    /// Validates a host payload at the boundary. Fields with the wrong shape are
    /// dropped individually; the rest of the message still applies.
    pub fn decode(value: &Value) -> Result<DecodedMessage, ProtocolError> {
        let object = value.as_object().ok_or(ProtocolError::NotAnObject)?;
        let kind = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ProtocolError::MissingType)?;

        let mut rejected_fields = Vec::new();
        let mut dropped_candidates = 0;
        let message = match kind {
            TOGGLE_MESSAGE => InboundMessage::Toggle {
                display: take_field::<bool>(object, "display", &mut rejected_fields)
                    .unwrap_or(false),
            },
            UPDATE_MESSAGE => InboundMessage::Update(StateUpdate {
                region_title: take_field(object, "regionTitle", &mut rejected_fields),
                phase: take_field(object, "phase", &mut rejected_fields),
                has_voted: take_field(object, "hasVoted", &mut rejected_fields),
                candidates: take_field::<Vec<Value>>(object, "candidates", &mut rejected_fields)
                    .map(|entries| decode_candidates(entries, &mut dropped_candidates)),
            }),
            other => InboundMessage::Unrecognized {
                kind: other.to_string(),
            },
        };

        Ok(DecodedMessage {
            message,
            rejected_fields,
            dropped_candidates,
        })
    }
}

/// Keeps every entry with an integral id; other entries are skipped one by one.
fn decode_candidates(entries: Vec<Value>, dropped: &mut usize) -> Vec<Candidate> {
    entries
        .into_iter()
        .filter_map(|entry| match Candidate::deserialize(entry) {
            Ok(candidate) => Some(candidate),
            Err(_) => {
                *dropped += 1;
                None
            }
        })
        .collect()
}

fn take_field<T: DeserializeOwned>(
    object: &Map<String, Value>,
    name: &'static str,
    rejected: &mut Vec<&'static str>,
) -> Option<T> {
    let raw = object.get(name)?;
    match T::deserialize(raw) {
        Ok(value) => Some(value),
        Err(_) => {
            rejected.push(name);
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub candidate_id: CandidateId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseRequest {}

/// One-way requests the UI sends back to the host controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    Vote(VoteRequest),
    Close(CloseRequest),
}

impl HostRequest {
    pub fn vote(candidate_id: CandidateId) -> Self {
        Self::Vote(VoteRequest { candidate_id })
    }

    pub fn close() -> Self {
        Self::Close(CloseRequest {})
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            HostRequest::Vote(_) => VOTE_ENDPOINT,
            HostRequest::Close(_) => CLOSE_ENDPOINT,
        }
    }

    pub fn body(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            HostRequest::Vote(body) => serde_json::to_vec(body),
            HostRequest::Close(body) => serde_json::to_vec(body),
        }
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
