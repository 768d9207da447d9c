//! Fallback content for analysis results
//!
//! Every default the repair step can substitute lives here as a named
//! constant so the merge logic stays free of inline literals.

use crate::model::RiskLevel;

/// Condition set substituted when the model predicts none.
pub const DEFAULT_CONDITIONS: [&str; 1] = ["academic_stress"];

/// Sentiment score substituted when the model omits one (neutral midpoint).
pub const DEFAULT_SENTIMENT_SCORE: i32 = 50;

/// Analysis text substituted when the model output parsed but carried no
/// analysis field.
pub const GENERIC_ANALYSIS: &str = "Thank you for completing this assessment. Your responses \
indicate areas where focused attention and support could be beneficial for your mental wellness.";

/// Recommendations substituted when the model provides none.
pub const FALLBACK_RECOMMENDATIONS: [&str; 7] = [
    "Practice stress-reduction techniques like deep breathing or progressive muscle relaxation",
    "Maintain a regular sleep schedule and aim for 7-9 hours of sleep per night",
    "Engage in regular physical activity, which can significantly improve mood and reduce stress",
    "Stay connected with supportive friends, family members, or peer groups",
    "Consider speaking with a mental health professional for personalized guidance",
    "Practice mindfulness or meditation to help manage overwhelming thoughts",
    "Create a balanced daily routine that includes time for both work and relaxation",
];

/// Immediate actions substituted when the model provides none.
pub const FALLBACK_IMMEDIATE_ACTIONS: [&str; 2] = [
    "Take 5 deep breaths right now to help center yourself",
    "Write down one thing you're grateful for today",
];

/// Analysis text for the complete fallback, phrased around the locally
/// computed risk level.
pub fn fallback_analysis_text(risk: RiskLevel) -> String {
    format!(
        "Based on your assessment responses, you appear to be experiencing {risk} levels of \
stress and mental health concerns. Your responses indicate areas where focused attention and \
support could be beneficial. It's important to remember that seeking help is a sign of strength, \
and there are many effective strategies and resources available to support your mental wellness."
    )
}

pub fn default_conditions() -> Vec<String> {
    DEFAULT_CONDITIONS.iter().map(|c| c.to_string()).collect()
}

pub fn fallback_recommendations() -> Vec<String> {
    FALLBACK_RECOMMENDATIONS
        .iter()
        .map(|r| r.to_string())
        .collect()
}

pub fn fallback_immediate_actions() -> Vec<String> {
    FALLBACK_IMMEDIATE_ACTIONS
        .iter()
        .map(|a| a.to_string())
        .collect()
}
