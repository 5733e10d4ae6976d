//! Per-article credit allocation
//!
//! Combines co-citation strengths with the committee sharing matrix into
//! a credit distribution over the focal article's authors.

mod engine;
mod matrix;

pub use engine::AllocationEngine;
pub use matrix::AllocationMatrixBuilder;

use crate::citation::{ArticleId, AuthorId};
use creditforge_common::errors::{CreditError, Result};
use serde::{Deserialize, Serialize};

/// Credit assigned to one author
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuthorCredit {
    pub author_id: AuthorId,
    pub credit: f64,
}

/// Credit distribution for one article, in byline order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditAllocation {
    pub article_id: ArticleId,
    pub shares: Vec<AuthorCredit>,
}

impl CreditAllocation {
    /// Full credit to a single author
    pub fn sole(article_id: ArticleId, author_id: AuthorId) -> Self {
        Self {
            article_id,
            shares: vec![AuthorCredit {
                author_id,
                credit: 1.0,
            }],
        }
    }

    /// Equal credit to every author.
    ///
    /// The engine never applies this on its own; callers that want to
    /// fall back from a degenerate allocation do so explicitly.
    pub fn equal_split(article_id: ArticleId, authors: &[AuthorId]) -> Result<Self> {
        if authors.is_empty() {
            return Err(CreditError::MalformedArticle { article_id });
        }
        let credit = 1.0 / authors.len() as f64;
        Ok(Self {
            article_id,
            shares: authors
                .iter()
                .map(|&author_id| AuthorCredit { author_id, credit })
                .collect(),
        })
    }

    pub fn credit_of(&self, author_id: AuthorId) -> Option<f64> {
        self.shares
            .iter()
            .find(|share| share.author_id == author_id)
            .map(|share| share.credit)
    }

    pub fn total(&self) -> f64 {
        self.shares.iter().map(|share| share.credit).sum()
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AuthorCredit> {
        self.shares.iter()
    }
}
