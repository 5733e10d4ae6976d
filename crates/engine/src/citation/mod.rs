//! Citation graph data model
//!
//! Articles, authors, and the reference/citation edges between them,
//! plus PageRank-based authority scores over the same graph.

mod author;
mod authority;
mod graph;
mod pagerank;

pub use author::{Author, AuthorName, AuthorRegistry};
pub use authority::AuthorityScores;
pub use graph::{ArticleNode, CitationGraph, CitationGraphBuilder};
pub use pagerank::{PageRankConfig, PageRankScorer};

use serde::{Deserialize, Serialize};

/// Dense article identifier (`0..article_count`)
pub type ArticleId = usize;

/// Dense author identifier (`0..author_count`)
pub type AuthorId = usize;

/// Article with citation score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredArticle {
    /// Article ID
    pub article_id: ArticleId,

    /// Citation-based authority score (sums to 1.0 over the corpus)
    pub authority_score: f64,

    /// Number of incoming citations
    pub citation_count: usize,

    /// Number of outgoing references
    pub reference_count: usize,
}
