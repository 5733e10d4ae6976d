//! CreditForge Common Library
//!
//! Shared code for the CreditForge crates including:
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability
//! - Tracing subscriber setup

pub mod config;
pub mod errors;
pub mod metrics;
pub mod telemetry;

// Re-export commonly used types
pub use config::{CreditConfig, StrengthPolicyKind};
pub use errors::{CreditError, ErrorCode, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tolerance used when checking that credit distributions sum to one
pub const CREDIT_SUM_TOLERANCE: f64 = 1e-9;
