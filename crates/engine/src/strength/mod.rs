//! Co-citation strength policies
//!
//! The committee of a focal article is every article appearing in the
//! reference list of at least one of its citers. A policy assigns each
//! committee member a strength:
//! - Uniform: number of common citers (raw counts)
//! - Citer importance: citers weighted by their own citation count
//! - Authority: citers weighted by an external score table
//!
//! Weighted policies return a distribution summing to 1.0 over the
//! committee. Every policy honours `include_self`, which keeps or removes
//! the focal article from its own committee.

mod authority;
mod importance;
mod uniform;

pub use authority::AuthorityStrength;
pub use importance::CiterImportanceStrength;
pub use uniform::UniformStrength;

use crate::citation::{ArticleId, ArticleNode, AuthorityScores, CitationGraph};
use creditforge_common::config::{StrengthConfig, StrengthPolicyKind};
use creditforge_common::errors::{CreditError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Strength of each committee member, ordered by article id
#[derive(Debug, Clone, PartialEq)]
pub struct Strengths {
    focal: ArticleId,
    entries: Vec<(ArticleId, f64)>,
}

impl Strengths {
    fn from_map(focal: ArticleId, map: BTreeMap<ArticleId, f64>) -> Self {
        Self {
            focal,
            entries: map.into_iter().collect(),
        }
    }

    /// The article whose committee this is
    pub fn focal(&self) -> ArticleId {
        self.focal
    }

    /// Committee members in ascending id order
    pub fn committee(&self) -> Vec<ArticleId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }

    /// Strength values aligned with [`Strengths::committee`]
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, s)| *s).collect()
    }

    pub fn get(&self, member: ArticleId) -> Option<f64> {
        self.entries
            .binary_search_by_key(&member, |(id, _)| *id)
            .ok()
            .map(|idx| self.entries[idx].1)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, s)| s).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ArticleId, f64)> + '_ {
        self.entries.iter().copied()
    }
}

/// Computes co-citation strengths for a focal article
pub trait StrengthPolicy: Send + Sync {
    /// Label used in logs and metrics
    fn name(&self) -> &'static str;

    /// Whether the focal article stays in its own committee
    fn include_self(&self) -> bool;

    /// Strengths over the focal article's committee.
    ///
    /// Fails with `NoCitations` when the committee is empty.
    fn strengths(&self, graph: &CitationGraph, focal: ArticleId) -> Result<Strengths>;
}

/// Build the configured policy.
///
/// The authority policy needs a score table; asking for it without one is
/// a configuration error.
pub fn policy_from_config(
    config: &StrengthConfig,
    authority: Option<Arc<AuthorityScores>>,
) -> Result<Arc<dyn StrengthPolicy>> {
    let policy: Arc<dyn StrengthPolicy> = match config.policy {
        StrengthPolicyKind::Uniform => Arc::new(UniformStrength::new(config.include_self)),
        StrengthPolicyKind::CiterImportance => {
            Arc::new(CiterImportanceStrength::new(config.include_self))
        }
        StrengthPolicyKind::Authority => {
            let scores = authority.ok_or_else(|| CreditError::Configuration {
                message: "authority strength policy requires an authority score table".to_string(),
            })?;
            Arc::new(AuthorityStrength::new(scores, config.include_self))
        }
    };
    Ok(policy)
}

/// Add each citer's score to every member of its reference list.
///
/// `score` is evaluated once per citer. The focal article is removed
/// afterwards unless `include_self` is set.
fn accumulate<F>(
    graph: &CitationGraph,
    focal: ArticleId,
    include_self: bool,
    mut score: F,
) -> Result<BTreeMap<ArticleId, f64>>
where
    F: FnMut(&ArticleNode) -> Result<f64>,
{
    let node = graph.node(focal)?;
    if node.citations().is_empty() {
        return Err(CreditError::NoCitations { article_id: focal });
    }

    let mut strengths = BTreeMap::new();
    for &citer_id in node.citations() {
        let citer = graph.node(citer_id)?;
        let weight = score(citer)?;
        for &member in citer.references() {
            *strengths.entry(member).or_insert(0.0) += weight;
        }
    }

    if !include_self {
        strengths.remove(&focal);
    }
    if strengths.is_empty() {
        return Err(CreditError::NoCitations { article_id: focal });
    }
    Ok(strengths)
}

/// Scale accumulated strengths into a distribution
fn normalize(focal: ArticleId, mut strengths: BTreeMap<ArticleId, f64>) -> Result<Strengths> {
    let total: f64 = strengths.values().sum();
    if total <= 0.0 || total.is_nan() {
        return Err(CreditError::DegenerateAllocation {
            article_id: focal,
            reason: "citers carry no importance mass".to_string(),
        });
    }
    for value in strengths.values_mut() {
        *value /= total;
    }
    Ok(Strengths::from_map(focal, strengths))
}
