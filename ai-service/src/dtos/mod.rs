//! Request and response bodies of the HTTP API.

pub mod embedding;
pub mod summarization;

pub use embedding::{BatchEmbedRequest, BatchEmbedResponse, EmbedRequest, EmbedResponse};
pub use summarization::{SummaryRequest, SummaryResponse};
