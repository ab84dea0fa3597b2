//! RAG (Retrieval-Augmented Generation) pipeline.
//!
//! This module provides:
//! - `QueryExpander`: rewrites the user's need into catalog vocabulary
//! - `Retriever`: embeds the expanded query and runs the similarity search
//! - `ResponseSynthesizer`: writes a grounded answer from the retrieved records
//! - `DiscoveryPipeline`: sequences the three and applies the failure policy

mod expander;
mod outcome;
mod pipeline;
pub mod prompt;
mod retriever;
mod synthesizer;

pub use expander::QueryExpander;
pub use outcome::{Degradation, Outcome};
pub use pipeline::{surface_items, ChatExchange, DiscoveryPipeline, PipelineError};
pub use retriever::Retriever;
pub use synthesizer::ResponseSynthesizer;
