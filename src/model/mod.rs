pub mod analysis;
pub mod assessment;
pub mod config;

pub use analysis::{AnalysisOutcome, AnalysisResult, Sentiment, SentimentLabel};
pub use assessment::{AssessmentRecord, CategoryScores, Resource, ResponseSet, RiskLevel};
pub use config::{AnalysisConfig, Config};
