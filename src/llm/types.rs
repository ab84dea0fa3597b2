use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the retrieval pair a text is embedded for.
///
/// Providers may compute asymmetric representations per mode, so catalog
/// documents and user queries must never share a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingMode {
    Document,
    Query,
}

impl EmbeddingMode {
    /// Vendor task type sent with the embedding request.
    pub fn task_type(self) -> &'static str {
        match self {
            EmbeddingMode::Document => "RETRIEVAL_DOCUMENT",
            EmbeddingMode::Query => "RETRIEVAL_QUERY",
        }
    }
}

impl fmt::Display for EmbeddingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingMode::Document => f.write_str("document"),
            EmbeddingMode::Query => f.write_str("query"),
        }
    }
}
