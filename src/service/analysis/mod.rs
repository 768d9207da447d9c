//! Wellness analysis pipeline
//!
//! Builds the prompt, runs the completion call, and repairs the output
//! into a typed result. Transport and parse failures are absorbed into the
//! deterministic fallback; only a missing credential surfaces as an error.

pub mod defaults;
pub mod prompts;
pub mod validation;

use crate::model::{AnalysisConfig, AnalysisOutcome, ResponseSet, RiskLevel};
use crate::scoring;
use crate::service::llm::CompletionClient;

use prompts::{build_analysis_prompt, ANALYSIS_SYSTEM_PROMPT};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Analysis service is not configured: GROQ_API_KEY is missing")]
    NotConfigured,
}

/// Service producing a merged analysis for a response set
pub struct AnalysisService {
    client: Option<CompletionClient>,
}

impl AnalysisService {
    /// Create the service. Without an API key the model call path is
    /// disabled and [`AnalysisService::analyze`] reports `NotConfigured`.
    pub fn new(api_key: Option<String>, config: AnalysisConfig) -> Self {
        let client = match api_key {
            Some(key) => {
                tracing::info!(model = %config.model, "Analysis service initialized");
                Some(CompletionClient::new(key, config))
            }
            None => {
                tracing::warn!(
                    "GROQ_API_KEY not set, analysis will use the deterministic fallback only"
                );
                None
            }
        };

        Self { client }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Analyze a response set. The risk level is computed locally unless
    /// the caller supplies one. Model failures of any kind degrade to the
    /// fallback result; they never fail the operation.
    pub async fn analyze(
        &self,
        responses: &ResponseSet,
        risk_level: Option<RiskLevel>,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let local_risk = risk_level.unwrap_or_else(|| scoring::assess(responses));

        let client = self.client.as_ref().ok_or(AnalysisError::NotConfigured)?;

        let prompt = build_analysis_prompt(responses, local_risk);
        let start_time = std::time::Instant::now();

        let outcome = match client.complete(ANALYSIS_SYSTEM_PROMPT, &prompt).await {
            Ok(text) => {
                tracing::info!(
                    model = %client.model(),
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt.len(),
                    response_length = text.len(),
                    "Completion call for wellness analysis succeeded"
                );
                validation::interpret(&text, local_risk)
            }
            Err(e) => {
                tracing::warn!(
                    model = %client.model(),
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "Completion call failed, using deterministic fallback"
                );
                AnalysisOutcome::Fallback(validation::fallback_result(local_risk))
            }
        };

        tracing::debug!(
            risk_level = %outcome.result().predicted_risk_level,
            sentiment_score = outcome.result().sentiment_score,
            fallback = outcome.is_fallback(),
            "Analysis completed"
        );

        Ok(outcome)
    }

    /// The fallback used when the model path is unavailable but the
    /// operation must still produce a result (e.g. assessment submission).
    pub fn fallback_for(&self, responses: &ResponseSet, risk_level: Option<RiskLevel>) -> AnalysisOutcome {
        let local_risk = risk_level.unwrap_or_else(|| scoring::assess(responses));
        AnalysisOutcome::Fallback(validation::fallback_result(local_risk))
    }
}
