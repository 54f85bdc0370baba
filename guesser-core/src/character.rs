//! Classification results produced by the CLIP service.
//!
//! Decoding is lenient: missing fields take their zero value, so a partial
//! upstream payload still decodes. Encoding omits empty optional fields,
//! which keeps the relayed body identical to what upstream usually sends.

use serde::{Deserialize, Deserializer, Serialize};

/// A character candidate matched by the classification service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    /// Upstream character identifier (an `AniList` id).
    pub id: i64,
    pub name: String,
    pub anime: String,
    pub description: String,
    pub image_url: String,
    /// Similarity score reported by upstream, usually in `[0.0, 1.0]`.
    pub confidence: f64,
}

/// Outcome of a single analyze or re-examine call.
///
/// Relayed to the caller unchanged; `success` and `error` describe the
/// upstream's own verdict, not the transport outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationResult {
    pub success: bool,

    /// Best match, if any candidate passed the upstream threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<Character>,

    /// Ranked alternatives, best first.
    #[serde(
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub suggestions: Vec<Character>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Character>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Character>>::deserialize(deserializer)?.unwrap_or_default())
}
