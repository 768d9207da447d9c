//! Prompt construction for the wellness analysis call

use crate::model::{ResponseSet, RiskLevel};

pub const ANALYSIS_SYSTEM_PROMPT: &str = "You are a compassionate mental health AI assistant \
with expertise in student wellness. Always respond with valid JSON format. Be supportive, \
evidence-based, and provide actionable guidance while maintaining appropriate clinical boundaries.";

/// Free-text answers shorter than this are treated as categorical tokens
/// and excluded from the written-content excerpt.
const MIN_WRITTEN_RESPONSE_LEN: usize = 10;

/// Join the free-text answers into one excerpt for sentiment analysis.
pub fn written_responses(responses: &ResponseSet) -> String {
    responses
        .values()
        .filter(|value| value.len() > MIN_WRITTEN_RESPONSE_LEN)
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the analysis prompt from the full response set, the extracted
/// written content, and the locally computed risk level.
pub fn build_analysis_prompt(responses: &ResponseSet, risk: RiskLevel) -> String {
    let answers_json =
        serde_json::to_string_pretty(responses).unwrap_or_else(|_| "{}".to_string());
    let written = written_responses(responses);

    format!(
        r#"You are a compassionate mental health AI assistant analyzing a student wellness assessment.

Assessment Responses: {answers_json}
Written Content: "{written}"
Calculated Risk Level: {risk}

Please provide a comprehensive analysis in JSON format with the following structure:

{{
  "predicted_conditions": ["condition1", "condition2"],
  "predicted_risk_level": "low|moderate|high|critical",
  "predicted_sentiment": "positive|negative|neutral",
  "sentiment_score": 0-100,
  "sentiment_label": "very_negative|negative|neutral|positive|very_positive",
  "analysis": "A detailed, compassionate analysis of the student's mental health state based on their responses. Include specific observations about their stress levels, anxiety, mood, and any concerning patterns. Be supportive and non-judgmental while being clinically accurate.",
  "recommendations": [
    "Specific, actionable recommendation 1",
    "Specific, actionable recommendation 2",
    "Specific, actionable recommendation 3",
    "Specific, actionable recommendation 4",
    "Specific, actionable recommendation 5"
  ],
  "immediate_actions": [
    "Immediate step they can take today",
    "Another immediate action"
  ],
  "professional_help_needed": true/false,
  "crisis_indicators": true/false
}}

Available mental health conditions to predict from (select the most relevant):
- academic_stress
- anxiety
- depression
- social_anxiety
- adjustment_disorder
- sleep_disorder
- eating_disorder
- substance_abuse
- relationship_issues
- financial_stress
- homesickness
- perfectionism
- imposter_syndrome
- mild_anxiety
- severe_anxiety
- panic_disorder
- generalized_anxiety

Risk level guidelines:
- low: Minor concerns, manageable with self-care and lifestyle changes
- moderate: Some intervention needed, counseling recommended, regular monitoring
- high: Professional help strongly recommended, may need intensive support
- critical: Immediate professional intervention required, safety concerns present

Sentiment analysis guidelines:
- sentiment_score: 0-100 (0=very negative, 25=negative, 50=neutral, 75=positive, 100=very positive)
- Consider the overall tone, hope vs despair, coping vs overwhelm
- Look for positive coping mechanisms, support systems, resilience factors

Analysis should be:
- Compassionate and non-judgmental
- Specific to their responses
- Culturally sensitive
- Evidence-based
- Actionable and hopeful
- Include validation of their feelings
- Highlight strengths and coping resources they mentioned

Recommendations should be:
- Specific and actionable
- Varied (lifestyle, therapeutic, social, academic)
- Appropriate to their risk level
- Include both immediate and long-term strategies
- Consider their specific situation and responses
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responses(pairs: &[(&str, &str)]) -> ResponseSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn written_responses_skip_short_categorical_tokens() {
        let set = responses(&[
            ("mood", "good"),
            ("stress", "high"),
            (
                "additional_thoughts",
                "I have been struggling to keep up with coursework lately",
            ),
        ]);
        assert_eq!(
            written_responses(&set),
            "I have been struggling to keep up with coursework lately"
        );
    }

    #[test]
    fn prompt_includes_answers_and_risk_level() {
        let set = responses(&[("anxiety", "nearly_every_day")]);
        let prompt = build_analysis_prompt(&set, RiskLevel::Moderate);
        assert!(prompt.contains("\"anxiety\": \"nearly_every_day\""));
        assert!(prompt.contains("Calculated Risk Level: moderate"));
        assert!(prompt.contains("predicted_conditions"));
    }
}
