use std::fmt;

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(CandidateId);

/// Phase label that unlocks vote actions. Compared case-insensitively.
pub const VOTING_PHASE: &str = "voting";
pub const INITIAL_PHASE: &str = "Idle";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(deserialize_with = "lenient_id")]
    pub id: CandidateId,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub region_alias: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Largest magnitude at which every `f64` is still an exact integer.
const MAX_EXACT_FLOAT_ID: f64 = 9_007_199_254_740_992.0;

/// Accepts any integral JSON number, so `2.0` and `2` name the same candidate.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<CandidateId, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if let Some(id) = value.as_i64() {
        return Ok(CandidateId(id));
    }
    match value.as_f64() {
        Some(id) if id.fract() == 0.0 && id.abs() <= MAX_EXACT_FLOAT_ID => {
            Ok(CandidateId(id as i64))
        }
        _ => Err(D::Error::custom(format!(
            "candidate id must be an integral number, got {value}"
        ))),
    }
}

/// Wrong-typed display fields read as absent so the display fallbacks apply.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(Some(value)),
        _ => Ok(None),
    }
}

impl Candidate {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: CandidateId(id),
            name: Some(name.into()),
            region_alias: None,
            portrait: None,
            bio: None,
            status: None,
        }
    }

    pub fn with_region(mut self, region_alias: impl Into<String>) -> Self {
        self.region_alias = Some(region_alias.into());
        self
    }

    pub fn with_portrait(mut self, portrait: impl Into<String>) -> Self {
        self.portrait = Some(portrait.into());
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Open-ended election phase label as pushed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phase(String);

impl Phase {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    pub fn is_voting_active(&self) -> bool {
        self.0.to_lowercase() == VOTING_PHASE
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::new(INITIAL_PHASE)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
