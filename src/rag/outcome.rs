use std::fmt;

/// Why a stage fell back to its degraded default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degradation {
    ExpansionFailed,
    EmptyExpansion,
    EmbeddingFailed,
    EmptyEmbedding,
    SearchFailed,
    NoMatches,
    SynthesisFailed,
    EmptySynthesis,
}

impl Degradation {
    pub fn stage(self) -> &'static str {
        match self {
            Degradation::ExpansionFailed | Degradation::EmptyExpansion => "expand",
            Degradation::EmbeddingFailed
            | Degradation::EmptyEmbedding
            | Degradation::SearchFailed => "retrieve",
            Degradation::NoMatches
            | Degradation::SynthesisFailed
            | Degradation::EmptySynthesis => "synthesize",
        }
    }
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Degradation::ExpansionFailed => "expansion_failed",
            Degradation::EmptyExpansion => "empty_expansion",
            Degradation::EmbeddingFailed => "embedding_failed",
            Degradation::EmptyEmbedding => "empty_embedding",
            Degradation::SearchFailed => "search_failed",
            Degradation::NoMatches => "no_matches",
            Degradation::SynthesisFailed => "synthesis_failed",
            Degradation::EmptySynthesis => "empty_synthesis",
        };
        f.write_str(label)
    }
}

/// Result of one pipeline stage: the real value, or a usable default.
///
/// Stages never return errors; the degraded variant carries the value the
/// next stage should consume anyway.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Fresh(T),
    Degraded { value: T, reason: Degradation },
}

impl<T> Outcome<T> {
    pub fn degraded(value: T, reason: Degradation) -> Self {
        Outcome::Degraded { value, reason }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Fresh(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Outcome::Fresh(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn degradation(&self) -> Option<Degradation> {
        match self {
            Outcome::Fresh(_) => None,
            Outcome::Degraded { reason, .. } => Some(*reason),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degradation().is_some()
    }

    /// Records the degradation (if any) and yields the value.
    pub fn record_into(self, log: &mut Vec<Degradation>) -> T {
        if let Some(reason) = self.degradation() {
            log.push(reason);
        }
        self.into_inner()
    }
}
