//! Error types for CreditForge
//!
//! Provides a single error enum for the credit engine with:
//! - Distinct variants for each allocation and solver failure mode
//! - Machine-readable error codes
//! - Classification of per-article data conditions vs setup failures

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using CreditError
pub type Result<T> = std::result::Result<T, CreditError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    DuplicateAuthor,

    // Lookup errors (4xxx)
    NotFound,

    // Allocation errors (5xxx)
    MalformedArticle,
    NoCitations,
    DegenerateAllocation,
    MissingScore,

    // Solver errors (6xxx)
    CorpusTooLarge,
    SolverError,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Validation (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::DuplicateAuthor => 1002,

            // Lookup (4xxx)
            ErrorCode::NotFound => 4001,

            // Allocation (5xxx)
            ErrorCode::MalformedArticle => 5001,
            ErrorCode::NoCitations => 5002,
            ErrorCode::DegenerateAllocation => 5003,
            ErrorCode::MissingScore => 5004,

            // Solver (6xxx)
            ErrorCode::CorpusTooLarge => 6001,
            ErrorCode::SolverError => 6002,

            // Internal (9xxx)
            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
        }
    }
}

/// Credit engine error types
#[derive(Error, Debug)]
pub enum CreditError {
    // Graph construction errors
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Article {article_id} lists author {author_id} more than once")]
    DuplicateAuthor { article_id: usize, author_id: usize },

    // Lookup errors
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound { resource_type: String, id: String },

    // Allocation errors
    #[error("Article {article_id} has no authors to credit")]
    MalformedArticle { article_id: usize },

    #[error("Article {article_id} has an empty co-citation committee")]
    NoCitations { article_id: usize },

    #[error("Degenerate allocation for article {article_id}: {reason}")]
    DegenerateAllocation { article_id: usize, reason: String },

    #[error("No authority score for citing article {article_id}")]
    MissingScore { article_id: usize },

    // Solver errors
    #[error("Corpus of {articles} articles exceeds dense solver limit of {limit}")]
    CorpusTooLarge { articles: usize, limit: usize },

    #[error("Solver error: {message}")]
    Solver { message: String },

    // Internal errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CreditError {
    /// Shorthand for a missing article
    pub fn article_not_found(id: usize) -> Self {
        CreditError::NotFound {
            resource_type: "article".to_string(),
            id: id.to_string(),
        }
    }

    /// Shorthand for a missing author
    pub fn author_not_found(id: usize) -> Self {
        CreditError::NotFound {
            resource_type: "author".to_string(),
            id: id.to_string(),
        }
    }

    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            CreditError::Validation { .. } => ErrorCode::ValidationError,
            CreditError::DuplicateAuthor { .. } => ErrorCode::DuplicateAuthor,
            CreditError::NotFound { .. } => ErrorCode::NotFound,
            CreditError::MalformedArticle { .. } => ErrorCode::MalformedArticle,
            CreditError::NoCitations { .. } => ErrorCode::NoCitations,
            CreditError::DegenerateAllocation { .. } => ErrorCode::DegenerateAllocation,
            CreditError::MissingScore { .. } => ErrorCode::MissingScore,
            CreditError::CorpusTooLarge { .. } => ErrorCode::CorpusTooLarge,
            CreditError::Solver { .. } => ErrorCode::SolverError,
            CreditError::Configuration { .. } => ErrorCode::ConfigurationError,
            CreditError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Whether this error describes a condition of one article's data.
    ///
    /// Batch drivers can skip such articles and continue; anything else
    /// points at a broken setup and should abort the run.
    pub fn is_caller_recoverable(&self) -> bool {
        matches!(
            self,
            CreditError::MalformedArticle { .. }
                | CreditError::NoCitations { .. }
                | CreditError::DegenerateAllocation { .. }
        )
    }
}

impl From<config::ConfigError> for CreditError {
    fn from(err: config::ConfigError) -> Self {
        CreditError::Configuration {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let err = CreditError::article_not_found(7);
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.code().as_code(), 4001);
        assert_eq!(err.to_string(), "Resource not found: article with id 7");
    }

    #[test]
    fn test_recoverable_errors() {
        let err = CreditError::DegenerateAllocation {
            article_id: 3,
            reason: "zero raw credit".into(),
        };
        assert!(err.is_caller_recoverable());
        assert!(CreditError::NoCitations { article_id: 1 }.is_caller_recoverable());

        let err = CreditError::MissingScore { article_id: 2 };
        assert!(!err.is_caller_recoverable());
        assert_eq!(err.code(), ErrorCode::MissingScore);
    }

    #[test]
    fn test_config_error_conversion() {
        let err: CreditError = config::ConfigError::Message("bad value".into()).into();
        assert_eq!(err.code(), ErrorCode::ConfigurationError);
        assert!(err.to_string().contains("bad value"));
    }
}
