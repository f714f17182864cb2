//! Text-analysis payload serde models.

use serde::{Deserialize, Serialize};

use crate::SafetyError;
use crate::types::{CategorySeverity, FOUR_SEVERITY_LEVELS};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyzeTextApiRequest<'a> {
    pub text: &'a str,
    pub output_type: &'static str,
}

impl<'a> AnalyzeTextApiRequest<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            output_type: FOUR_SEVERITY_LEVELS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeTextApiResponse {
    categories_analysis: Vec<AnalyzeTextApiCategory>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeTextApiCategory {
    category: String,
    #[serde(default)]
    severity: Option<u8>,
}

/// Categories in service order. A missing severity counts as zero.
pub(crate) fn parse_analysis_body(body: &str) -> Result<Vec<CategorySeverity>, SafetyError> {
    let parsed: AnalyzeTextApiResponse = serde_json::from_str(body)
        .map_err(|err| SafetyError::invalid_response(err.to_string()))?;

    Ok(parsed
        .categories_analysis
        .into_iter()
        .map(|entry| CategorySeverity::new(entry.category, entry.severity.unwrap_or(0)))
        .collect())
}
