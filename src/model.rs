use std::fmt;
use std::str::FromStr;
use serde::Serialize;

use crate::error::AppError;
use crate::rouge::RougeScores;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Extractive,
    Abstractive,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Extractive => "extractive",
            Method::Abstractive => "abstractive",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "extractive" => Ok(Method::Extractive),
            "abstractive" => Ok(Method::Abstractive),
            _ => Err(AppError::InvalidMethod(s.trim().to_string())),
        }
    }
}

/// A validated request. Only `validation::validate` builds these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizationRequest {
    pub text: String,
    pub method: Method,
    /// Sentence count for extractive, maximum summary tokens for abstractive.
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummarizationResult {
    pub summary: String,
    pub method: Method,
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<RougeScores>,
}
