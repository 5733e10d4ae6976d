//! Per-article authority score table

use super::ArticleId;
use creditforge_common::errors::{CreditError, Result};
use std::collections::HashMap;

/// Externally supplied importance value per article
#[derive(Debug, Clone, Default)]
pub struct AuthorityScores {
    scores: HashMap<ArticleId, f64>,
}

impl AuthorityScores {
    /// Build from `(article_id, score)` pairs.
    ///
    /// Scores must be finite and non-negative; a later pair for the same
    /// article replaces an earlier one.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (ArticleId, f64)>) -> Result<Self> {
        let mut scores = HashMap::new();
        for (article_id, score) in pairs {
            if !score.is_finite() || score < 0.0 {
                return Err(CreditError::Validation {
                    message: format!("authority score for article {} must be finite and >= 0, got {}", article_id, score),
                });
            }
            scores.insert(article_id, score);
        }
        Ok(Self { scores })
    }

    /// Build from a vector indexed by article id
    pub fn from_dense(values: Vec<f64>) -> Result<Self> {
        Self::from_pairs(values.into_iter().enumerate())
    }

    pub fn get(&self, article_id: ArticleId) -> Option<f64> {
        self.scores.get(&article_id).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ArticleId, f64)> + '_ {
        self.scores.iter().map(|(&id, &score)| (id, score))
    }
}
