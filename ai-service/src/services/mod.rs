pub mod embedding;
pub mod metrics;
pub mod providers;
pub mod summarization;

pub use embedding::EmbeddingService;
pub use summarization::SummarizationService;
