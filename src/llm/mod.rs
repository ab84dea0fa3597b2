pub mod gemini;
pub mod provider;
mod tests;
pub mod types;

pub use gemini::GeminiProvider;
pub use provider::LlmProvider;
pub use types::EmbeddingMode;
