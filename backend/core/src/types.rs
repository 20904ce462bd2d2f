use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DiagnosisError;

/// Verdict the remote model assigns to the photographed plant.
///
/// `Error` is not a pipeline failure: it is the model's way of declining
/// (e.g. the photo is not a plant), and maps to the Error view downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Healthy,
    Diseased,
    Error,
}

impl FromStr for HealthStatus {
    type Err = DiagnosisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The model is told to emit exact casing but doesn't always comply.
        if s.eq_ignore_ascii_case("healthy") {
            Ok(Self::Healthy)
        } else if s.eq_ignore_ascii_case("diseased") {
            Ok(Self::Diseased)
        } else if s.eq_ignore_ascii_case("error") {
            Ok(Self::Error)
        } else {
            Err(DiagnosisError::InvalidSchema(format!(
                "unknown status \"{s}\""
            )))
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "Healthy"),
            Self::Diseased => write!(f, "Diseased"),
            Self::Error => write!(f, "Error"),
        }
    }
}

impl<'de> Deserialize<'de> for HealthStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Structured diagnosis parsed from the model's reply.
///
/// Only `status` is required; every other field defaults when the model
/// omits it, and rendering handles empties defensively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRecord {
    pub status: HealthStatus,
    #[serde(default)]
    pub disease_name: String,
    #[serde(default)]
    pub confidence: u8,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub treatment: Vec<String>,
    #[serde(default)]
    pub prevention: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl DiagnosisRecord {
    /// Message shown when the model declines with `status: "Error"`.
    pub fn decline_message(&self) -> String {
        if self.disease_name.is_empty() {
            "Could not identify plant".to_string()
        } else {
            self.disease_name.clone()
        }
    }
}

/// Base64-encoded image bytes plus their declared media type.
///
/// Exactly one of these is live per session; it is replaced or cleared on
/// reset and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub media_type: String,
    /// Raw base64 payload, without the data-URI prefix.
    pub data: String,
}

impl EncodedImage {
    /// Render as a `data:<mime>;base64,<payload>` URI for inline display.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}
