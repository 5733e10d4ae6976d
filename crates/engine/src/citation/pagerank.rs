//! PageRank-based authority scoring
//!
//! Power iteration over citing -> cited edges with a uniform restart.
//! Mass held by articles without references is spread evenly, so the
//! scores always form a distribution over the corpus.

use super::{AuthorityScores, CitationGraph, ScoredArticle};
use creditforge_common::config::AuthorityConfig;
use creditforge_common::errors::Result;
use tracing::debug;

/// PageRank configuration
#[derive(Debug, Clone)]
pub struct PageRankConfig {
    /// Restart probability (typically 0.15)
    pub restart_probability: f64,

    /// Maximum iterations
    pub max_iterations: usize,

    /// Convergence threshold on the L1 change between iterations
    pub epsilon: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self::from(&AuthorityConfig::default())
    }
}

impl From<&AuthorityConfig> for PageRankConfig {
    fn from(config: &AuthorityConfig) -> Self {
        Self {
            restart_probability: config.restart_probability,
            max_iterations: config.max_iterations,
            epsilon: config.epsilon,
        }
    }
}

/// PageRank scorer for articles
pub struct PageRankScorer {
    config: PageRankConfig,
}

impl PageRankScorer {
    /// Create a new scorer
    pub fn new(config: PageRankConfig) -> Self {
        Self { config }
    }

    /// Compute PageRank scores indexed by article id
    pub fn compute(&self, graph: &CitationGraph) -> Vec<f64> {
        let n = graph.article_count();
        if n == 0 {
            return Vec::new();
        }

        let n_f64 = n as f64;
        let restart = self.config.restart_probability;
        let mut scores = vec![1.0 / n_f64; n];
        let mut next = vec![0.0; n];

        for iteration in 0..self.config.max_iterations {
            next.iter_mut().for_each(|v| *v = 0.0);

            // Random walk step along references
            for node in graph.articles() {
                let out = node.references().len();
                if out == 0 {
                    continue;
                }
                let share = scores[node.id()] / out as f64;
                for &cited in node.references() {
                    next[cited] += share;
                }
            }

            // Restart, then hand lost dangling mass back uniformly
            let mut total = 0.0;
            for v in next.iter_mut() {
                *v = *v * (1.0 - restart) + restart / n_f64;
                total += *v;
            }
            let leaked = (1.0 - total) / n_f64;
            let mut diff = 0.0;
            for (v, old) in next.iter_mut().zip(scores.iter()) {
                *v += leaked;
                diff += (*v - old).abs();
            }

            std::mem::swap(&mut scores, &mut next);

            // Check convergence
            if diff < self.config.epsilon {
                debug!(iteration, diff, "PageRank converged");
                break;
            }
        }

        scores
    }

    /// Compute scores as an authority table
    pub fn authority_scores(&self, graph: &CitationGraph) -> Result<AuthorityScores> {
        AuthorityScores::from_dense(self.compute(graph))
    }

    /// Score and rank articles
    pub fn rank(&self, graph: &CitationGraph, limit: usize) -> Vec<ScoredArticle> {
        let scores = self.compute(graph);

        let mut articles: Vec<ScoredArticle> = graph
            .articles()
            .map(|node| ScoredArticle {
                article_id: node.id(),
                authority_score: scores[node.id()],
                citation_count: node.citations().len(),
                reference_count: node.references().len(),
            })
            .collect();

        // Sort by authority score descending
        articles.sort_by(|a, b| {
            b.authority_score
                .partial_cmp(&a.authority_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.article_id.cmp(&b.article_id))
        });

        articles.truncate(limit);
        articles
    }
}
