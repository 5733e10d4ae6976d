//! CreditForge Engine
//!
//! Collective credit allocation for coauthors of scientific articles,
//! based on how each article is co-cited alongside other work:
//! - Citation graph model (articles, authors, reference/citation edges)
//! - Co-citation strength policies (uniform, citer importance, authority)
//! - Per-article allocation into a normalized credit vector
//! - Whole-corpus intrinsic credit via one pseudo-inverse solve
//! - PageRank authority scores for the authority policy
//!
//! ```text
//! CitationGraph -> StrengthPolicy -> AllocationMatrixBuilder -> AllocationEngine -> credit vector
//! CitationGraph -> IntrinsicCreditSolver -> credit matrix
//! ```

pub mod allocation;
pub mod citation;
pub mod intrinsic;
pub mod strength;

// Re-export commonly used types
pub use allocation::{AllocationEngine, AllocationMatrixBuilder, AuthorCredit, CreditAllocation};
pub use citation::{
    ArticleId, ArticleNode, Author, AuthorId, AuthorName, AuthorRegistry, AuthorityScores,
    CitationGraph, CitationGraphBuilder, PageRankConfig, PageRankScorer,
};
pub use intrinsic::{CreditMatrix, IntrinsicCreditSolver, IntrinsicSystem};
pub use strength::{
    policy_from_config, AuthorityStrength, CiterImportanceStrength, StrengthPolicy, Strengths,
    UniformStrength,
};
