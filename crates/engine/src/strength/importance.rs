//! Citer-importance weighted strengths

use super::{accumulate, normalize, StrengthPolicy, Strengths};
use crate::citation::{ArticleId, CitationGraph};
use creditforge_common::config::StrengthPolicyKind;
use creditforge_common::errors::Result;

/// Each citer contributes its own citation count to every article it
/// references; the result is normalized over the committee.
///
/// Fails with `DegenerateAllocation` when no citer has been cited itself.
#[derive(Debug, Clone, Copy)]
pub struct CiterImportanceStrength {
    include_self: bool,
}

impl CiterImportanceStrength {
    pub fn new(include_self: bool) -> Self {
        Self { include_self }
    }
}

impl StrengthPolicy for CiterImportanceStrength {
    fn name(&self) -> &'static str {
        StrengthPolicyKind::CiterImportance.as_str()
    }

    fn include_self(&self) -> bool {
        self.include_self
    }

    fn strengths(&self, graph: &CitationGraph, focal: ArticleId) -> Result<Strengths> {
        let mass = accumulate(graph, focal, self.include_self, |citer| {
            Ok(citer.citations().len() as f64)
        })?;
        normalize(focal, mass)
    }
}
