use serde::{Deserialize, Serialize};

use crate::model::Method;
use crate::rouge::RougeScores;

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    pub max_sentences: Option<usize>,
    /// Parsed by hand so a bad value gets a descriptive 400.
    pub method: Option<String>,
    pub max_length: Option<usize>,
    pub reference: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub method: Method,
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<RougeScores>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub env: String,
    pub version: &'static str,
    pub model: String,
    pub device: String,
}

/// Fields of the web form; every value arrives as text.
#[derive(Debug, Default, Deserialize)]
pub struct SummarizeForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub num_sentences: String,
}
