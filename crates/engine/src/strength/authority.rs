//! Authority-weighted strengths

use super::{accumulate, normalize, StrengthPolicy, Strengths};
use crate::citation::{ArticleId, AuthorityScores, CitationGraph};
use creditforge_common::config::StrengthPolicyKind;
use creditforge_common::errors::{CreditError, Result};
use std::sync::Arc;

/// Like [`super::CiterImportanceStrength`], but each citer's weight comes
/// from an external authority table such as PageRank scores.
#[derive(Debug, Clone)]
pub struct AuthorityStrength {
    scores: Arc<AuthorityScores>,
    include_self: bool,
}

impl AuthorityStrength {
    pub fn new(scores: Arc<AuthorityScores>, include_self: bool) -> Self {
        Self {
            scores,
            include_self,
        }
    }

    pub fn scores(&self) -> &AuthorityScores {
        &self.scores
    }
}

impl StrengthPolicy for AuthorityStrength {
    fn name(&self) -> &'static str {
        StrengthPolicyKind::Authority.as_str()
    }

    fn include_self(&self) -> bool {
        self.include_self
    }

    fn strengths(&self, graph: &CitationGraph, focal: ArticleId) -> Result<Strengths> {
        let mass = accumulate(graph, focal, self.include_self, |citer| {
            self.scores
                .get(citer.id())
                .ok_or(CreditError::MissingScore { article_id: citer.id() })
        })?;
        normalize(focal, mass)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::citation::{PageRankConfig, PageRankScorer};

    #[test]
    fn test_weights_by_authority() {
        let graph = co_citation_graph();
        let scores = AuthorityScores::from_pairs([(P1, 3.0), (P2, 1.0)]).unwrap();
        let policy = AuthorityStrength::new(Arc::new(scores), true);
        let strengths = policy.strengths(&graph, A0).unwrap();

        // A0 gets 3 + 1, AX gets 3; total mass 7
        assert!((strengths.get(A0).unwrap() - 4.0 / 7.0).abs() < 1e-12);
        assert!((strengths.get(AX).unwrap() - 3.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_score_fails() {
        let graph = co_citation_graph();
        let scores = AuthorityScores::from_pairs([(P1, 3.0)]).unwrap();
        let policy = AuthorityStrength::new(Arc::new(scores), true);

        let result = policy.strengths(&graph, A0);
        assert!(matches!(result, Err(CreditError::MissingScore { article_id: P2 })));
    }

    #[test]
    fn test_pagerank_scores_cover_every_citer() {
        let graph = co_citation_graph();
        let scores = PageRankScorer::new(PageRankConfig::default())
            .authority_scores(&graph)
            .unwrap();
        let policy = AuthorityStrength::new(Arc::new(scores), false);

        let strengths = policy.strengths(&graph, A0).unwrap();
        assert!((strengths.total() - 1.0).abs() < 1e-12);
        assert_eq!(policy.scores().len(), graph.article_count());
    }
}
