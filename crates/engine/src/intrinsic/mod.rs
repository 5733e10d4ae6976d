//! Intrinsic credit solver
//!
//! Computes a self-consistent credit assignment for every author and
//! article in one dense linear solve instead of article by article.
//!
//! With `B` the authorship mask (0 where an author wrote an article, else
//! 1) and `S` the co-citation count matrix, the solver returns
//!
//! ```text
//! D     = S - I
//! creds = -B . pinv(D . D^T)
//! ```
//!
//! `D . D^T` is usually singular on real corpora, hence the
//! pseudo-inverse; the result is a best-effort least-squares answer.
//!
//! Everything here is dense: the product costs O(M^2) memory and the
//! pseudo-inverse O(M^3) time in the number of articles M. Corpora larger
//! than `SolverConfig::max_articles` are refused with `CorpusTooLarge`.

use crate::citation::{ArticleId, AuthorId, CitationGraph};
use creditforge_common::config::SolverConfig;
use creditforge_common::errors::{CreditError, Result};
use creditforge_common::metrics;
use nalgebra::DMatrix;
use std::time::Instant;
use tracing::info;

/// Working matrices derived from one graph snapshot
#[derive(Debug, Clone)]
pub struct IntrinsicSystem {
    /// `B` (authors x articles): 0 where the author wrote the article, else 1
    indicator: DMatrix<f64>,

    /// `C` (authors x articles): `1 / |authors(article)|` for each author
    equal_share: DMatrix<f64>,

    /// `S` (articles x articles): `S[k][i]` = citers of `i` that also cite `k`
    strength: DMatrix<f64>,
}

impl IntrinsicSystem {
    /// Derive `B`, `C` and `S` from the graph
    pub fn build(graph: &CitationGraph) -> Result<Self> {
        let n = graph.author_count();
        let m = graph.article_count();

        let mut indicator = DMatrix::from_element(n, m, 1.0);
        let mut equal_share = DMatrix::zeros(n, m);
        let mut strength = DMatrix::zeros(m, m);

        for node in graph.articles() {
            let article = node.id();
            let authors = node.authors();
            if !authors.is_empty() {
                let share = 1.0 / authors.len() as f64;
                for &author in authors {
                    indicator[(author, article)] = 0.0;
                    equal_share[(author, article)] = share;
                }
            }

            // Diagonal holds the article's own citer count
            for &citer in node.citations() {
                for &member in graph.node(citer)?.references() {
                    strength[(member, article)] += 1.0;
                }
            }
        }

        Ok(Self {
            indicator,
            equal_share,
            strength,
        })
    }

    pub fn indicator(&self) -> &DMatrix<f64> {
        &self.indicator
    }

    /// Equal-split baseline; not part of the solve
    pub fn equal_share(&self) -> &DMatrix<f64> {
        &self.equal_share
    }

    pub fn strength(&self) -> &DMatrix<f64> {
        &self.strength
    }

    pub fn article_count(&self) -> usize {
        self.strength.nrows()
    }

    pub fn author_count(&self) -> usize {
        self.indicator.nrows()
    }
}

/// Dense credit matrix indexed by `(author_id, article_id)`
#[derive(Debug, Clone)]
pub struct CreditMatrix {
    values: DMatrix<f64>,
}

impl CreditMatrix {
    pub fn get(&self, author: AuthorId, article: ArticleId) -> Result<f64> {
        self.check_author(author)?;
        self.check_article(article)?;
        Ok(self.values[(author, article)])
    }

    /// Credit of every author for one article
    pub fn article_credits(&self, article: ArticleId) -> Result<Vec<f64>> {
        self.check_article(article)?;
        Ok(self.values.column(article).iter().copied().collect())
    }

    /// Credit of one author across all articles
    pub fn author_credits(&self, author: AuthorId) -> Result<Vec<f64>> {
        self.check_author(author)?;
        Ok(self.values.row(author).iter().copied().collect())
    }

    pub fn author_count(&self) -> usize {
        self.values.nrows()
    }

    pub fn article_count(&self) -> usize {
        self.values.ncols()
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub fn into_matrix(self) -> DMatrix<f64> {
        self.values
    }

    fn check_author(&self, author: AuthorId) -> Result<()> {
        if author < self.values.nrows() {
            Ok(())
        } else {
            Err(CreditError::author_not_found(author))
        }
    }

    fn check_article(&self, article: ArticleId) -> Result<()> {
        if article < self.values.ncols() {
            Ok(())
        } else {
            Err(CreditError::article_not_found(article))
        }
    }
}

/// Whole-corpus solver
pub struct IntrinsicCreditSolver {
    config: SolverConfig,
}

impl IntrinsicCreditSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Build the working matrices and solve them.
    ///
    /// One atomic unit of work; the matrices are dropped on return.
    pub fn compute(&self, graph: &CitationGraph) -> Result<CreditMatrix> {
        let articles = graph.article_count();
        if articles > self.config.max_articles {
            return Err(CreditError::CorpusTooLarge {
                articles,
                limit: self.config.max_articles,
            });
        }

        let system = IntrinsicSystem::build(graph)?;
        self.solve(&system)
    }

    /// Solve an already derived system
    pub fn solve(&self, system: &IntrinsicSystem) -> Result<CreditMatrix> {
        let m = system.article_count();
        let n = system.author_count();
        if m == 0 {
            return Ok(CreditMatrix {
                values: DMatrix::zeros(n, 0),
            });
        }

        let start = Instant::now();

        let d = &system.strength - DMatrix::<f64>::identity(m, m);
        let gram = &d * d.transpose();
        let pinv = gram
            .pseudo_inverse(self.config.pinv_epsilon)
            .map_err(|e| CreditError::Solver {
                message: e.to_string(),
            })?;
        let values = -(&system.indicator * pinv);

        let elapsed = start.elapsed().as_secs_f64();
        info!(authors = n, articles = m, elapsed_secs = elapsed, "Intrinsic credit solved");
        metrics::record_solve(elapsed, m, n);

        Ok(CreditMatrix { values })
    }
}
