//! Uniform co-citation counts

use super::{accumulate, StrengthPolicy, Strengths};
use crate::citation::{ArticleId, CitationGraph};
use creditforge_common::config::StrengthPolicyKind;
use creditforge_common::errors::Result;

/// Strength of a member = number of citers of the focal article that
/// also cite it. With `include_self`, the focal article carries the
/// number of its citers.
#[derive(Debug, Clone, Copy)]
pub struct UniformStrength {
    include_self: bool,
}

impl UniformStrength {
    pub fn new(include_self: bool) -> Self {
        Self { include_self }
    }
}

impl StrengthPolicy for UniformStrength {
    fn name(&self) -> &'static str {
        StrengthPolicyKind::Uniform.as_str()
    }

    fn include_self(&self) -> bool {
        self.include_self
    }

    fn strengths(&self, graph: &CitationGraph, focal: ArticleId) -> Result<Strengths> {
        let mut counts = accumulate(graph, focal, self.include_self, |_| Ok(1.0))?;
        if self.include_self {
            counts.insert(focal, graph.citation_count(focal)? as f64);
        }
        Ok(Strengths::from_map(focal, counts))
    }
}
