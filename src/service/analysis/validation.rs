//! Parse-then-repair for model output
//!
//! The completion model returns JSON-shaped text: it may be wrapped in a
//! fenced code block, truncated, missing fields, or not JSON at all. This
//! module turns that text into a fully defaulted [`AnalysisResult`], using
//! the locally computed risk level wherever the model gave nothing usable.

use serde_json::Value;

use crate::model::analysis::ExtractedAnalysis;
use crate::model::{AnalysisOutcome, AnalysisResult, RiskLevel, Sentiment, SentimentLabel};
use crate::service::analysis::defaults;

/// Strip a fenced code block wrapper (```json ... ```), if present, and
/// fall back to the outermost brace-delimited span. Returns the original
/// text unchanged when neither applies.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        // Drop the info string (e.g. "json") on the opening fence line.
        let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or(rest);
        if let Some(inner) = body.rsplit_once("```").map(|(i, _)| i) {
            return inner.trim();
        }
        return body.trim();
    }

    // Tolerate prose around the JSON object.
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return &trimmed[start..=end];
        }
    }

    trimmed
}

/// Interpret raw model output. A parseable JSON object becomes a
/// [`AnalysisOutcome::Parsed`] with per-field defaults applied; anything
/// else becomes the complete deterministic fallback.
pub fn interpret(text: &str, local_risk: RiskLevel) -> AnalysisOutcome {
    let cleaned = strip_code_fences(text);

    match serde_json::from_str::<Value>(cleaned) {
        Ok(value) if value.is_object() => {
            let extracted = ExtractedAnalysis::from_value(&value);
            AnalysisOutcome::Parsed(merge(extracted, local_risk))
        }
        Ok(_) => {
            tracing::warn!("Model output parsed but was not a JSON object, using fallback");
            AnalysisOutcome::Fallback(fallback_result(local_risk))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse model output as JSON, using fallback");
            AnalysisOutcome::Fallback(fallback_result(local_risk))
        }
    }
}

/// Default each missing or rejected field independently. The predicted
/// risk level falls back to the local score-derived level; the help and
/// crisis booleans derive from whichever risk level ends up in effect.
pub fn merge(extracted: ExtractedAnalysis, local_risk: RiskLevel) -> AnalysisResult {
    let risk = extracted.predicted_risk_level.unwrap_or(local_risk);
    let sentiment_score = extracted
        .sentiment_score
        .unwrap_or(defaults::DEFAULT_SENTIMENT_SCORE)
        .clamp(0, 100);

    AnalysisResult {
        predicted_conditions: extracted
            .predicted_conditions
            .unwrap_or_else(defaults::default_conditions),
        predicted_risk_level: risk,
        predicted_sentiment: extracted.predicted_sentiment.unwrap_or(Sentiment::Neutral),
        sentiment_score,
        sentiment_label: extracted
            .sentiment_label
            .unwrap_or_else(|| SentimentLabel::from_score(sentiment_score)),
        analysis: extracted
            .analysis
            .unwrap_or_else(|| defaults::GENERIC_ANALYSIS.to_string()),
        recommendations: extracted
            .recommendations
            .unwrap_or_else(defaults::fallback_recommendations),
        immediate_actions: extracted
            .immediate_actions
            .unwrap_or_else(defaults::fallback_immediate_actions),
        professional_help_needed: extracted
            .professional_help_needed
            .unwrap_or(risk >= RiskLevel::High),
        crisis_indicators: extracted
            .crisis_indicators
            .unwrap_or(risk == RiskLevel::Critical),
    }
}

/// The complete deterministic fallback, used when the model call failed or
/// its output was unusable.
pub fn fallback_result(local_risk: RiskLevel) -> AnalysisResult {
    AnalysisResult {
        predicted_conditions: defaults::default_conditions(),
        predicted_risk_level: local_risk,
        predicted_sentiment: Sentiment::Neutral,
        sentiment_score: defaults::DEFAULT_SENTIMENT_SCORE,
        sentiment_label: SentimentLabel::Neutral,
        analysis: defaults::fallback_analysis_text(local_risk),
        recommendations: defaults::fallback_recommendations(),
        immediate_actions: defaults::fallback_immediate_actions(),
        professional_help_needed: local_risk >= RiskLevel::High,
        crisis_indicators: local_risk == RiskLevel::Critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_text_yields_fallback_with_local_risk() {
        let outcome = interpret("I'm sorry, I can't help with that.", RiskLevel::High);
        assert!(outcome.is_fallback());

        let result = outcome.result();
        assert_eq!(result.predicted_risk_level, RiskLevel::High);
        assert!(result.recommendations.len() >= 5);
        assert!(result.professional_help_needed);
        assert!(!result.crisis_indicators);
    }

    #[test]
    fn fallback_booleans_derive_from_local_risk() {
        let critical = fallback_result(RiskLevel::Critical);
        assert!(critical.professional_help_needed);
        assert!(critical.crisis_indicators);

        let low = fallback_result(RiskLevel::Low);
        assert!(!low.professional_help_needed);
        assert!(!low.crisis_indicators);
    }

    #[test]
    fn fenced_block_is_stripped_before_parsing() {
        let text = "```json\n{\"predicted_risk_level\": \"high\", \"sentiment_score\": 30}\n```";
        let outcome = interpret(text, RiskLevel::Low);
        assert!(!outcome.is_fallback());

        let result = outcome.result();
        assert_eq!(result.predicted_risk_level, RiskLevel::High);
        assert_eq!(result.sentiment_score, 30);
        assert_eq!(result.sentiment_label, SentimentLabel::Negative);
    }

    #[test]
    fn prose_around_the_object_is_tolerated() {
        let text = "Here is the analysis you asked for:\n{\"sentiment_score\": 80}\nHope it helps!";
        let outcome = interpret(text, RiskLevel::Low);
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.result().sentiment_score, 80);
    }

    #[test]
    fn missing_sentiment_score_defaults_to_fifty() {
        let text = r#"{"predicted_risk_level": "moderate", "analysis": "All good."}"#;
        let outcome = interpret(text, RiskLevel::Low);
        let result = outcome.result();
        assert_eq!(result.sentiment_score, 50);
        assert_eq!(result.sentiment_label, SentimentLabel::Neutral);
    }

    #[test]
    fn missing_conditions_default_to_academic_stress() {
        let text = r#"{"predicted_risk_level": "low"}"#;
        let outcome = interpret(text, RiskLevel::Low);
        assert_eq!(
            outcome.result().predicted_conditions,
            vec!["academic_stress".to_string()]
        );
    }

    #[test]
    fn missing_risk_level_defaults_to_local() {
        let text = r#"{"sentiment_score": 40}"#;
        let outcome = interpret(text, RiskLevel::Moderate);
        assert_eq!(outcome.result().predicted_risk_level, RiskLevel::Moderate);
    }

    #[test]
    fn wrong_typed_fields_default_independently() {
        let text = r#"{
            "predicted_conditions": ["anxiety"],
            "predicted_risk_level": 3,
            "sentiment_score": "forty",
            "recommendations": ["Talk to a counselor", "Sleep more"]
        }"#;
        let outcome = interpret(text, RiskLevel::High);
        let result = outcome.result();
        assert_eq!(result.predicted_conditions, vec!["anxiety".to_string()]);
        assert_eq!(result.predicted_risk_level, RiskLevel::High);
        assert_eq!(result.sentiment_score, 50);
        assert_eq!(result.recommendations.len(), 2);
    }

    #[test]
    fn out_of_range_sentiment_score_is_clamped() {
        let text = r#"{"sentiment_score": 140}"#;
        let outcome = interpret(text, RiskLevel::Low);
        assert_eq!(outcome.result().sentiment_score, 100);
    }

    #[test]
    fn model_booleans_win_over_derived_defaults() {
        let text = r#"{"predicted_risk_level": "low", "professional_help_needed": true, "crisis_indicators": false}"#;
        let outcome = interpret(text, RiskLevel::Critical);
        let result = outcome.result();
        assert!(result.professional_help_needed);
        assert!(!result.crisis_indicators);
    }

    #[test]
    fn non_object_json_falls_back() {
        let outcome = interpret("[1, 2, 3]", RiskLevel::Low);
        assert!(outcome.is_fallback());
    }

    #[test]
    fn strip_handles_unterminated_fence() {
        let text = "```json\n{\"sentiment_score\": 10}";
        assert_eq!(strip_code_fences(text), "{\"sentiment_score\": 10}");
    }
}
