//! Per-article credit allocation matrix

use crate::citation::{ArticleId, AuthorId, CitationGraph};
use creditforge_common::errors::Result;
use nalgebra::DMatrix;

/// Builds the committee x focal-author sharing matrix.
///
/// Each committee member splits one unit of credit equally among its own
/// coauthors; a focal author receives a share only from members they
/// coauthored. Members without authors contribute an all-zero row.
pub struct AllocationMatrixBuilder<'g> {
    graph: &'g CitationGraph,
}

impl<'g> AllocationMatrixBuilder<'g> {
    pub fn new(graph: &'g CitationGraph) -> Self {
        Self { graph }
    }

    /// Row `c`, column `i` is `1 / |authors(c)|` when `authors[i]` wrote
    /// committee member `c`, else 0.
    pub fn build(&self, authors: &[AuthorId], committee: &[ArticleId]) -> Result<DMatrix<f64>> {
        let mut matrix = DMatrix::zeros(committee.len(), authors.len());

        for (row, &member) in committee.iter().enumerate() {
            let node = self.graph.node(member)?;
            if node.authors().is_empty() {
                continue;
            }
            let share = 1.0 / node.authors().len() as f64;
            for (col, &author) in authors.iter().enumerate() {
                if node.has_author(author) {
                    matrix[(row, col)] = share;
                }
            }
        }

        Ok(matrix)
    }
}
