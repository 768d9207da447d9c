//! Deterministic answer scoring
//!
//! Pure functions only: no I/O, no failure modes. Unknown answer tokens
//! contribute nothing. The bucketed risk level feeds the analysis prompt
//! and is the fallback prediction when the model output is unusable.

use crate::model::{CategoryScores, ResponseSet, RiskLevel};

/// Severity keyword tiers, matched by substring in descending order.
const TIER_3_KEYWORDS: [&str; 3] = ["nearly_every_day", "extremely_stressed", "overwhelming"];
const TIER_2_KEYWORDS: [&str; 3] = ["more_than_half_days", "very_stressed", "high"];
const TIER_1_KEYWORDS: [&str; 3] = ["several_days", "moderately_stressed", "moderate"];

/// Risk score thresholds. Scores at or above each bound map to the paired
/// level; anything below the last bound is low.
const RISK_THRESHOLDS: [(u32, RiskLevel); 3] = [
    (15, RiskLevel::Critical),
    (10, RiskLevel::High),
    (5, RiskLevel::Moderate),
];

/// Question groups for category sub-scores.
const ANXIETY_QUESTIONS: [&str; 2] = ["anxiety", "worry"];
const DEPRESSION_QUESTIONS: [&str; 2] = ["interest", "hopeless"];
const STRESS_QUESTIONS: [&str; 1] = ["stress"];
const WELLBEING_QUESTIONS: [&str; 4] = ["mood", "sleep", "concentration", "social_connections"];

/// Weight contributed by one answer token: 3, 2, or 1 for a tier match,
/// 0 otherwise. Tiers are tested from most severe down so a token matching
/// several tiers counts once at the highest weight.
fn answer_weight(value: &str) -> u32 {
    if TIER_3_KEYWORDS.iter().any(|kw| value.contains(kw)) {
        3
    } else if TIER_2_KEYWORDS.iter().any(|kw| value.contains(kw)) {
        2
    } else if TIER_1_KEYWORDS.iter().any(|kw| value.contains(kw)) {
        1
    } else {
        0
    }
}

/// Sum severity weights over every answer in the response set.
pub fn risk_score(responses: &ResponseSet) -> u32 {
    responses.values().map(|value| answer_weight(value)).sum()
}

/// Bucket a risk score into a risk level.
pub fn risk_level_for_score(score: u32) -> RiskLevel {
    for (bound, level) in RISK_THRESHOLDS {
        if score >= bound {
            return level;
        }
    }
    RiskLevel::Low
}

/// Score a response set and bucket the result. Total over all inputs: an
/// empty set scores 0 and maps to low.
pub fn assess(responses: &ResponseSet) -> RiskLevel {
    risk_level_for_score(risk_score(responses))
}

/// Fixed point value for a categorical answer token on the 0-100 scale.
/// Anxiety, depression, stress, and academic-pressure tokens score higher
/// when worse; wellbeing and satisfaction tokens score higher when better.
fn answer_points(value: &str) -> Option<i64> {
    match value {
        // frequency (anxiety/depression)
        "nearly_every_day" => Some(75),
        "more_than_half_days" => Some(50),
        "several_days" => Some(25),
        "not_at_all" => Some(0),
        // stress
        "extremely_stressed" => Some(100),
        "very_stressed" => Some(75),
        "moderately_stressed" => Some(50),
        "slightly_stressed" => Some(25),
        "not_stressed" => Some(0),
        // general wellbeing
        "excellent" => Some(100),
        "good" => Some(75),
        "fair" => Some(50),
        "poor" => Some(25),
        "very_poor" => Some(0),
        // social connections
        "very_satisfied" => Some(100),
        "satisfied" => Some(75),
        "neutral" => Some(50),
        "dissatisfied" => Some(25),
        "very_dissatisfied" => Some(0),
        // academic pressure
        "overwhelming" => Some(100),
        "high" => Some(75),
        "moderate" => Some(50),
        "low" => Some(25),
        "none" => Some(0),
        _ => None,
    }
}

/// Average the point values of the answered questions in a group, rounded
/// to the nearest integer. Unanswered or unknown answers are skipped; an
/// empty group scores 0.
fn group_average(responses: &ResponseSet, questions: &[&str]) -> i32 {
    let points: Vec<i64> = questions
        .iter()
        .filter_map(|q| responses.get(*q))
        .filter_map(|answer| answer_points(answer))
        .collect();

    if points.is_empty() {
        return 0;
    }

    let sum: i64 = points.iter().sum();
    ((sum as f64) / (points.len() as f64)).round() as i32
}

/// Compute the four persisted category sub-scores.
pub fn category_scores(responses: &ResponseSet) -> CategoryScores {
    CategoryScores {
        anxiety_score: group_average(responses, &ANXIETY_QUESTIONS),
        depression_score: group_average(responses, &DEPRESSION_QUESTIONS),
        stress_score: group_average(responses, &STRESS_QUESTIONS),
        overall_wellbeing_score: group_average(responses, &WELLBEING_QUESTIONS),
    }
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
    fn empty_response_set_scores_zero_and_low() {
        let empty = ResponseSet::new();
        assert_eq!(risk_score(&empty), 0);
        assert_eq!(assess(&empty), RiskLevel::Low);
    }

    #[test]
    fn unknown_tokens_contribute_nothing() {
        let set = responses(&[("mood", "good"), ("sleep", "excellent"), ("extra", "fine")]);
        assert_eq!(risk_score(&set), 0);
        assert_eq!(assess(&set), RiskLevel::Low);
    }

    #[test]
    fn three_tier_three_answers_score_nine_and_moderate() {
        let set = responses(&[
            ("anxiety", "nearly_every_day"),
            ("worry", "nearly_every_day"),
            ("stress", "extremely_stressed"),
        ]);
        assert_eq!(risk_score(&set), 9);
        assert_eq!(assess(&set), RiskLevel::Moderate);
    }

    #[test]
    fn all_tier_three_answers_reach_critical() {
        let set = responses(&[
            ("anxiety", "nearly_every_day"),
            ("worry", "nearly_every_day"),
            ("interest", "nearly_every_day"),
            ("hopeless", "nearly_every_day"),
            ("stress", "extremely_stressed"),
            ("academic_pressure", "overwhelming"),
        ]);
        assert_eq!(risk_score(&set), 18);
        assert_eq!(assess(&set), RiskLevel::Critical);
    }

    #[test]
    fn thresholds_bucket_at_exact_bounds() {
        assert_eq!(risk_level_for_score(0), RiskLevel::Low);
        assert_eq!(risk_level_for_score(4), RiskLevel::Low);
        assert_eq!(risk_level_for_score(5), RiskLevel::Moderate);
        assert_eq!(risk_level_for_score(9), RiskLevel::Moderate);
        assert_eq!(risk_level_for_score(10), RiskLevel::High);
        assert_eq!(risk_level_for_score(14), RiskLevel::High);
        assert_eq!(risk_level_for_score(15), RiskLevel::Critical);
    }

    #[test]
    fn scoring_is_idempotent() {
        let set = responses(&[
            ("anxiety", "more_than_half_days"),
            ("stress", "very_stressed"),
            ("academic_pressure", "high"),
        ]);
        let first = (risk_score(&set), assess(&set));
        let second = (risk_score(&set), assess(&set));
        assert_eq!(first, second);
        assert_eq!(first.0, 6);
        assert_eq!(first.1, RiskLevel::Moderate);
    }

    #[test]
    fn tier_match_counts_once_at_highest_weight() {
        // "extremely_stressed" contains no lower-tier keyword, but a free
        // text answer can mention several; only the top tier counts.
        let set = responses(&[(
            "additional_thoughts",
            "feeling overwhelming pressure, moderate sleep",
        )]);
        assert_eq!(risk_score(&set), 3);
    }

    #[test]
    fn category_scores_average_per_group() {
        let set = responses(&[
            ("anxiety", "nearly_every_day"),
            ("worry", "several_days"),
            ("interest", "more_than_half_days"),
            ("hopeless", "not_at_all"),
            ("stress", "very_stressed"),
            ("mood", "good"),
            ("sleep", "fair"),
            ("concentration", "poor"),
            ("social_connections", "satisfied"),
        ]);

        let scores = category_scores(&set);
        assert_eq!(scores.anxiety_score, 50); // (75 + 25) / 2
        assert_eq!(scores.depression_score, 25); // (50 + 0) / 2
        assert_eq!(scores.stress_score, 75);
        assert_eq!(scores.overall_wellbeing_score, 56); // (75+50+25+75)/4 = 56.25
    }

    #[test]
    fn category_scores_skip_unanswered_questions() {
        let set = responses(&[("anxiety", "nearly_every_day")]);
        let scores = category_scores(&set);
        assert_eq!(scores.anxiety_score, 75);
        assert_eq!(scores.depression_score, 0);
        assert_eq!(scores.stress_score, 0);
        assert_eq!(scores.overall_wellbeing_score, 0);
    }
}
