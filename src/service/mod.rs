pub mod analysis;
pub mod assessment;
pub mod llm;
pub mod resources;

pub use analysis::AnalysisService;
pub use assessment::SubmissionService;
pub use llm::CompletionClient;
pub use resources::ResourceMatcher;
