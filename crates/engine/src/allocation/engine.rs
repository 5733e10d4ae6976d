//! Allocation engine
//!
//! Holds the shared, immutable citation graph and a strength policy.
//! Allocations for different focal articles are independent and can run
//! concurrently over the same engine.

use super::{AllocationMatrixBuilder, AuthorCredit, CreditAllocation};
use crate::citation::{ArticleId, AuthorityScores, CitationGraph};
use crate::strength::{policy_from_config, StrengthPolicy};
use creditforge_common::config::CreditConfig;
use creditforge_common::errors::{CreditError, Result};
use creditforge_common::metrics::AllocationMetrics;
use nalgebra::DVector;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

/// Per-article collective credit allocator
pub struct AllocationEngine {
    graph: Arc<CitationGraph>,
    policy: Arc<dyn StrengthPolicy>,
    record_metrics: bool,
}

impl AllocationEngine {
    /// Create an engine over a built graph
    pub fn new(graph: Arc<CitationGraph>, policy: Arc<dyn StrengthPolicy>) -> Self {
        Self {
            graph,
            policy,
            record_metrics: true,
        }
    }

    /// Create an engine with the configured strength policy
    pub fn from_config(
        graph: Arc<CitationGraph>,
        config: &CreditConfig,
        authority: Option<Arc<AuthorityScores>>,
    ) -> Result<Self> {
        let policy = policy_from_config(&config.strength, authority)?;
        Ok(Self::new(graph, policy).with_metrics(config.observability.metrics_enabled))
    }

    /// Enable or disable metric recording
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.record_metrics = enabled;
        self
    }

    pub fn graph(&self) -> &CitationGraph {
        &self.graph
    }

    pub fn policy(&self) -> &dyn StrengthPolicy {
        self.policy.as_ref()
    }

    /// Allocate credit among the focal article's authors.
    ///
    /// A single author receives 1.0 without further work. Otherwise the
    /// policy's strengths are multiplied into the sharing matrix and
    /// normalized; a zero total fails with `DegenerateAllocation`.
    pub fn allocate(&self, focal: ArticleId) -> Result<CreditAllocation> {
        let timer = self
            .record_metrics
            .then(|| AllocationMetrics::start(self.policy.name()));

        let result = self.compute(focal);

        if let Some(timer) = timer {
            timer.finish(if result.is_ok() { "success" } else { "error" });
        }
        if let Err(e) = &result {
            debug!(article = focal, error = %e, code = ?e.code(), "Allocation failed");
        }
        result
    }

    /// Allocate several articles in parallel, preserving input order
    pub fn allocate_many(&self, focal: &[ArticleId]) -> Vec<Result<CreditAllocation>> {
        let results: Vec<Result<CreditAllocation>> =
            focal.par_iter().map(|&id| self.allocate(id)).collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(
            policy = self.policy.name(),
            articles = focal.len(),
            failed,
            "Batch allocation complete"
        );
        results
    }

    fn compute(&self, focal: ArticleId) -> Result<CreditAllocation> {
        let node = self.graph.node(focal)?;
        let authors = node.authors();

        match authors {
            [] => return Err(CreditError::MalformedArticle { article_id: focal }),
            [only] => return Ok(CreditAllocation::sole(focal, *only)),
            _ => {}
        }

        let strengths = self.policy.strengths(&self.graph, focal)?;
        let committee = strengths.committee();
        let matrix = AllocationMatrixBuilder::new(&self.graph).build(authors, &committee)?;

        // raw = strengths . matrix
        let raw = matrix.tr_mul(&DVector::from_vec(strengths.values()));
        let total = raw.sum();
        if total <= 0.0 || total.is_nan() {
            return Err(CreditError::DegenerateAllocation {
                article_id: focal,
                reason: "no committee member shares an author with the focal article".to_string(),
            });
        }

        let shares = authors
            .iter()
            .zip(raw.iter())
            .map(|(&author_id, &value)| AuthorCredit {
                author_id,
                credit: value / total,
            })
            .collect();

        Ok(CreditAllocation {
            article_id: focal,
            shares,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citation::{Author, AuthorName, PageRankConfig, PageRankScorer};
    use crate::strength::fixtures::*;
    use crate::strength::{AuthorityStrength, CiterImportanceStrength, UniformStrength};
    use creditforge_common::config::StrengthPolicyKind;
    use creditforge_common::CREDIT_SUM_TOLERANCE;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn engine(graph: CitationGraph, policy: Arc<dyn StrengthPolicy>) -> AllocationEngine {
        AllocationEngine::new(Arc::new(graph), policy).with_metrics(false)
    }

    fn named_authors(n: usize) -> Vec<Author> {
        (0..n)
            .map(|i| Author::new(i, AuthorName::new(&format!("Author{}", i), "", "Test")))
            .collect()
    }

    /// Corpus where citers only cite earlier articles, plus a handful of
    /// edges pointing outside the article set when `with_bogus_edges`.
    fn random_builder(seed: u64, with_bogus_edges: bool) -> crate::citation::CitationGraphBuilder {
        let mut rng = StdRng::seed_from_u64(seed);
        let n_authors = 12;
        let n_articles = 40;

        let mut builder = CitationGraph::builder();
        builder.add_authors(named_authors(n_authors));

        for id in 0..n_articles {
            let team = rng.gen_range(1..=4);
            let byline = rand::seq::index::sample(&mut rng, n_authors, team).into_vec();
            builder.add_article(id, byline);

            if id > 0 {
                for _ in 0..rng.gen_range(0..=5) {
                    builder.add_edge(id, rng.gen_range(0..id));
                }
            }
        }

        if with_bogus_edges {
            builder.add_edges([(3, 1000), (1000, 2), (5001, 5002), (7, 40)]);
        }
        builder
    }

    fn policies(graph: &CitationGraph) -> Vec<Arc<dyn StrengthPolicy>> {
        let scores = Arc::new(
            PageRankScorer::new(PageRankConfig::default())
                .authority_scores(graph)
                .unwrap(),
        );
        vec![
            Arc::new(UniformStrength::new(true)),
            Arc::new(UniformStrength::new(false)),
            Arc::new(CiterImportanceStrength::new(true)),
            Arc::new(CiterImportanceStrength::new(false)),
            Arc::new(AuthorityStrength::new(scores.clone(), true)),
            Arc::new(AuthorityStrength::new(scores, false)),
        ]
    }

    #[test]
    fn test_co_citation_scenario() {
        let engine = engine(co_citation_graph(), Arc::new(UniformStrength::new(true)));
        let allocation = engine.allocate(A0).unwrap();

        assert_eq!(allocation.article_id, A0);
        assert_eq!(allocation.len(), 2);
        assert!((allocation.credit_of(0).unwrap() - 0.5).abs() < 1e-12);
        assert!((allocation.credit_of(1).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_scenario_without_self_is_degenerate() {
        // Committee is {AX} only, whose author shares nothing with A0
        let engine = engine(co_citation_graph(), Arc::new(UniformStrength::new(false)));
        let result = engine.allocate(A0);
        assert!(matches!(
            result,
            Err(CreditError::DegenerateAllocation { article_id: A0, .. })
        ));
    }

    #[test]
    fn test_single_author_gets_full_credit() {
        let engine = engine(co_citation_graph(), Arc::new(UniformStrength::new(true)));

        // AX is cited; P1 is not cited at all
        for id in [AX, P1] {
            let allocation = engine.allocate(id).unwrap();
            assert_eq!(allocation.len(), 1);
            assert_eq!(allocation.shares[0].credit, 1.0);
        }
    }

    #[test]
    fn test_error_conditions() {
        let mut builder = CitationGraph::builder();
        builder
            .add_authors(named_authors(3))
            .add_article(0, vec![])
            .add_article(1, vec![0, 1])
            .add_article(2, vec![2])
            .add_edge(2, 0);
        let engine = engine(builder.build().unwrap(), Arc::new(UniformStrength::new(true)));

        assert!(matches!(
            engine.allocate(0),
            Err(CreditError::MalformedArticle { article_id: 0 })
        ));
        assert!(matches!(
            engine.allocate(1),
            Err(CreditError::NoCitations { article_id: 1 })
        ));
        assert!(matches!(engine.allocate(9), Err(CreditError::NotFound { .. })));
    }

    #[test]
    fn test_monotonic_in_committee_strength() {
        // F {a0, a1}; M1 {a0} is co-cited twice, M2 {a1} once
        let mut builder = CitationGraph::builder();
        builder
            .add_authors(named_authors(3))
            .add_article(0, vec![0, 1])
            .add_article(1, vec![0])
            .add_article(2, vec![1])
            .add_article(3, vec![2])
            .add_article(4, vec![2])
            .add_article(5, vec![2])
            .add_edges([(3, 0), (3, 1), (4, 0), (4, 1), (5, 0), (5, 2)]);
        let engine = engine(builder.build().unwrap(), Arc::new(UniformStrength::new(true)));

        let allocation = engine.allocate(0).unwrap();
        let a0 = allocation.credit_of(0).unwrap();
        let a1 = allocation.credit_of(1).unwrap();

        // raw = 3 * [0.5, 0.5] + 2 * [1, 0] + 1 * [0, 1] = [3.5, 2.5]
        assert!(a0 >= a1);
        assert!((a0 - 3.5 / 6.0).abs() < 1e-12);
        assert!((a1 - 2.5 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric_authors_split_evenly() {
        // Same as above with M2 also co-cited twice
        let mut builder = CitationGraph::builder();
        builder
            .add_authors(named_authors(3))
            .add_article(0, vec![0, 1])
            .add_article(1, vec![0])
            .add_article(2, vec![1])
            .add_article(3, vec![2])
            .add_article(4, vec![2])
            .add_edges([(3, 0), (3, 1), (3, 2), (4, 0), (4, 1), (4, 2)]);
        let engine = engine(builder.build().unwrap(), Arc::new(UniformStrength::new(false)));

        let allocation = engine.allocate(0).unwrap();
        assert!((allocation.credit_of(0).unwrap() - 0.5).abs() < 1e-12);
        assert!((allocation.credit_of(1).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_credit_distribution_properties() {
        let graph = Arc::new(random_builder(7, false).build().unwrap());

        for policy in policies(&graph) {
            let engine = AllocationEngine::new(graph.clone(), policy.clone()).with_metrics(false);
            let mut succeeded = 0;

            for node in graph.articles() {
                match engine.allocate(node.id()) {
                    Ok(allocation) => {
                        succeeded += 1;
                        assert_eq!(allocation.len(), node.authors().len());
                        assert!(allocation.iter().all(|share| share.credit >= 0.0));
                        assert!(
                            (allocation.total() - 1.0).abs() <= CREDIT_SUM_TOLERANCE,
                            "{} credits for article {} sum to {}",
                            policy.name(),
                            node.id(),
                            allocation.total()
                        );
                        if node.authors().len() == 1 {
                            assert_eq!(allocation.shares[0].credit, 1.0);
                        }
                    }
                    Err(e) => assert!(
                        e.is_caller_recoverable(),
                        "unexpected {} error for article {}: {}",
                        policy.name(),
                        node.id(),
                        e
                    ),
                }
            }

            assert!(succeeded > 0, "{} produced no allocations", policy.name());
        }
    }

    #[test]
    fn test_unresolved_edges_do_not_change_results() {
        let clean = Arc::new(random_builder(11, false).build().unwrap());
        let noisy = Arc::new(random_builder(11, true).build().unwrap());
        assert!(noisy.dropped_edges() >= 4);

        let policy: Arc<dyn StrengthPolicy> = Arc::new(UniformStrength::new(true));
        let clean_engine = AllocationEngine::new(clean.clone(), policy.clone()).with_metrics(false);
        let noisy_engine = AllocationEngine::new(noisy, policy).with_metrics(false);

        for node in clean.articles() {
            match (clean_engine.allocate(node.id()), noisy_engine.allocate(node.id())) {
                (Ok(a), Ok(b)) => assert_eq!(a, b),
                (Err(a), Err(b)) => assert_eq!(a.code(), b.code()),
                (a, b) => panic!("article {} diverged: {:?} vs {:?}", node.id(), a, b),
            }
        }
    }

    #[test]
    fn test_allocate_many_matches_sequential() {
        let graph = Arc::new(random_builder(3, false).build().unwrap());
        let engine = AllocationEngine::new(graph.clone(), Arc::new(UniformStrength::new(true)))
            .with_metrics(false);

        let ids: Vec<ArticleId> = (0..graph.article_count()).rev().collect();
        let batch = engine.allocate_many(&ids);

        assert_eq!(batch.len(), ids.len());
        for (id, result) in ids.iter().zip(batch) {
            match (result, engine.allocate(*id)) {
                (Ok(a), Ok(b)) => assert_eq!(a, b),
                (Err(a), Err(b)) => assert_eq!(a.code(), b.code()),
                (a, b) => panic!("article {} diverged: {:?} vs {:?}", id, a, b),
            }
        }
    }

    #[test]
    fn test_from_config() {
        let mut config = CreditConfig::default();
        config.strength.policy = StrengthPolicyKind::CiterImportance;
        config.strength.include_self = false;

        let engine =
            AllocationEngine::from_config(Arc::new(co_citation_graph()), &config, None).unwrap();
        assert_eq!(engine.policy().name(), "citer_importance");
        assert!(!engine.policy().include_self());
        assert_eq!(engine.graph().article_count(), 4);
    }
}
