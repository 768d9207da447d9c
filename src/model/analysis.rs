//! Typed analysis results produced from model output
//!
//! The completion model returns JSON-shaped text with no schema guarantee.
//! `ExtractedAnalysis` holds whatever fields survived a tolerant extraction;
//! `AnalysisResult` is the fully defaulted form the rest of the system uses.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::assessment::RiskLevel;

/// Overall sentiment direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "negative" => Some(Sentiment::Negative),
            "neutral" => Some(Sentiment::Neutral),
            _ => None,
        }
    }
}

/// Five-step sentiment label aligned with the 0-100 sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::VeryNegative => "very_negative",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Positive => "positive",
            SentimentLabel::VeryPositive => "very_positive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "very_negative" => Some(SentimentLabel::VeryNegative),
            "negative" => Some(SentimentLabel::Negative),
            "neutral" => Some(SentimentLabel::Neutral),
            "positive" => Some(SentimentLabel::Positive),
            "very_positive" => Some(SentimentLabel::VeryPositive),
            _ => None,
        }
    }

    /// Derive a label from a 0-100 sentiment score.
    pub fn from_score(score: i32) -> Self {
        match score {
            ..=20 => SentimentLabel::VeryNegative,
            21..=40 => SentimentLabel::Negative,
            41..=60 => SentimentLabel::Neutral,
            61..=80 => SentimentLabel::Positive,
            _ => SentimentLabel::VeryPositive,
        }
    }
}

/// Fields recovered from the model's JSON-shaped output. Every field is
/// optional; wrong-typed values are dropped rather than failing the whole
/// extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractedAnalysis {
    pub predicted_conditions: Option<Vec<String>>,
    pub predicted_risk_level: Option<RiskLevel>,
    pub predicted_sentiment: Option<Sentiment>,
    pub sentiment_score: Option<i32>,
    pub sentiment_label: Option<SentimentLabel>,
    pub analysis: Option<String>,
    pub recommendations: Option<Vec<String>>,
    pub immediate_actions: Option<Vec<String>>,
    pub professional_help_needed: Option<bool>,
    pub crisis_indicators: Option<bool>,
}

impl ExtractedAnalysis {
    /// Extract known fields from a parsed JSON value. Missing or
    /// wrong-typed fields come back as `None` independently of the others.
    pub fn from_value(value: &Value) -> Self {
        Self {
            predicted_conditions: string_array(value.get("predicted_conditions")),
            predicted_risk_level: value
                .get("predicted_risk_level")
                .and_then(Value::as_str)
                .and_then(RiskLevel::parse),
            predicted_sentiment: value
                .get("predicted_sentiment")
                .and_then(Value::as_str)
                .and_then(Sentiment::parse),
            sentiment_score: value
                .get("sentiment_score")
                .and_then(Value::as_f64)
                .map(|s| s.round() as i32),
            sentiment_label: value
                .get("sentiment_label")
                .and_then(Value::as_str)
                .and_then(SentimentLabel::parse),
            analysis: non_empty_string(value.get("analysis")),
            recommendations: string_array(value.get("recommendations")),
            immediate_actions: string_array(value.get("immediate_actions")),
            professional_help_needed: value
                .get("professional_help_needed")
                .and_then(Value::as_bool),
            crisis_indicators: value.get("crisis_indicators").and_then(Value::as_bool),
        }
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_array(value: Option<&Value>) -> Option<Vec<String>> {
    let items: Vec<String> = value?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// The merged analysis for an assessment, with every field defaulted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    pub predicted_conditions: Vec<String>,
    pub predicted_risk_level: RiskLevel,
    pub predicted_sentiment: Sentiment,
    pub sentiment_score: i32,
    pub sentiment_label: SentimentLabel,
    pub analysis: String,
    pub recommendations: Vec<String>,
    pub immediate_actions: Vec<String>,
    pub professional_help_needed: bool,
    pub crisis_indicators: bool,
}

/// Where the analysis came from: a successful model extraction or the local
/// deterministic fallback.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Parsed(AnalysisResult),
    Fallback(AnalysisResult),
}

impl AnalysisOutcome {
    pub fn result(&self) -> &AnalysisResult {
        match self {
            AnalysisOutcome::Parsed(result) | AnalysisOutcome::Fallback(result) => result,
        }
    }

    pub fn into_result(self) -> AnalysisResult {
        match self {
            AnalysisOutcome::Parsed(result) | AnalysisOutcome::Fallback(result) => result,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisOutcome::Fallback(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extraction_tolerates_wrong_types_per_field() {
        let value = json!({
            "predicted_conditions": ["anxiety", "academic_stress"],
            "predicted_risk_level": 7,
            "sentiment_score": "not a number",
            "analysis": "Detailed analysis text.",
            "recommendations": "should be an array",
            "professional_help_needed": true
        });

        let extracted = ExtractedAnalysis::from_value(&value);
        assert_eq!(
            extracted.predicted_conditions,
            Some(vec!["anxiety".to_string(), "academic_stress".to_string()])
        );
        assert_eq!(extracted.predicted_risk_level, None);
        assert_eq!(extracted.sentiment_score, None);
        assert_eq!(extracted.analysis.as_deref(), Some("Detailed analysis text."));
        assert_eq!(extracted.recommendations, None);
        assert_eq!(extracted.professional_help_needed, Some(true));
        assert_eq!(extracted.crisis_indicators, None);
    }

    #[test]
    fn empty_arrays_and_blank_strings_count_as_missing() {
        let value = json!({
            "predicted_conditions": [],
            "analysis": "   "
        });

        let extracted = ExtractedAnalysis::from_value(&value);
        assert_eq!(extracted.predicted_conditions, None);
        assert_eq!(extracted.analysis, None);
    }

    #[test]
    fn sentiment_label_tracks_score_bands() {
        assert_eq!(SentimentLabel::from_score(0), SentimentLabel::VeryNegative);
        assert_eq!(SentimentLabel::from_score(25), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_score(50), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(75), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(100), SentimentLabel::VeryPositive);
    }

    #[test]
    fn fractional_scores_are_rounded() {
        let value = json!({ "sentiment_score": 62.6 });
        let extracted = ExtractedAnalysis::from_value(&value);
        assert_eq!(extracted.sentiment_score, Some(63));
    }
}
