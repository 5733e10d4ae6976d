//! Configuration management for CreditForge
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with CREDIT__)
//! - Configuration files (config/default, config/{env}, config/local)
//! - Default values

use crate::errors::{CreditError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Main engine configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreditConfig {
    /// Co-citation strength configuration
    #[serde(default)]
    pub strength: StrengthConfig,

    /// Built-in PageRank authority scorer configuration
    #[serde(default)]
    pub authority: AuthorityConfig,

    /// Intrinsic credit solver configuration
    #[serde(default)]
    pub solver: SolverConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Which co-citation strength policy the engine uses
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrengthPolicyKind {
    /// Count of common citers
    #[default]
    Uniform,
    /// Citers weighted by their own citation count
    CiterImportance,
    /// Citers weighted by an external authority table
    Authority,
}

impl StrengthPolicyKind {
    /// Stable label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthPolicyKind::Uniform => "uniform",
            StrengthPolicyKind::CiterImportance => "citer_importance",
            StrengthPolicyKind::Authority => "authority",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrengthConfig {
    /// Strength policy
    #[serde(default)]
    pub policy: StrengthPolicyKind,

    /// Keep the focal article in its own committee
    #[serde(default = "default_include_self")]
    pub include_self: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthorityConfig {
    /// Probability of restarting the random walk at a uniform article
    #[serde(default = "default_restart_probability")]
    pub restart_probability: f64,

    /// Maximum power iterations
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// L1 convergence threshold between iterations
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SolverConfig {
    /// Singular values below this are treated as zero in the pseudo-inverse
    #[serde(default = "default_pinv_epsilon")]
    pub pinv_epsilon: f64,

    /// Largest article count accepted by the dense solve
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (debug, info, creditforge_engine=trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logging: bool,

    /// Record metrics through the installed recorder
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

// Default value functions
fn default_include_self() -> bool { true }
fn default_restart_probability() -> f64 { 0.15 }
fn default_max_iterations() -> usize { 300 }
fn default_epsilon() -> f64 { 1e-12 }
fn default_pinv_epsilon() -> f64 { 1e-10 }
fn default_max_articles() -> usize { 5000 }
fn default_log_level() -> String { "info".to_string() }
fn default_metrics_enabled() -> bool { true }

impl Default for StrengthConfig {
    fn default() -> Self {
        Self {
            policy: StrengthPolicyKind::default(),
            include_self: default_include_self(),
        }
    }
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            restart_probability: default_restart_probability(),
            max_iterations: default_max_iterations(),
            epsilon: default_epsilon(),
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pinv_epsilon: default_pinv_epsilon(),
            max_articles: default_max_articles(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: false,
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

impl CreditConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let env = std::env::var("CREDIT_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // e.g., CREDIT__STRENGTH__POLICY=citer_importance
            .add_source(
                Environment::with_prefix("CREDIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a specific file
    pub fn from_file(path: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("CREDIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        let restart = self.authority.restart_probability;
        if !(restart > 0.0 && restart < 1.0) {
            return Err(CreditError::Configuration {
                message: format!("authority.restart_probability must be in (0, 1), got {}", restart),
            });
        }
        if self.authority.max_iterations == 0 {
            return Err(CreditError::Configuration {
                message: "authority.max_iterations must be positive".to_string(),
            });
        }
        if !(self.authority.epsilon >= 0.0) {
            return Err(CreditError::Configuration {
                message: format!("authority.epsilon must be non-negative, got {}", self.authority.epsilon),
            });
        }
        if !(self.solver.pinv_epsilon >= 0.0) {
            return Err(CreditError::Configuration {
                message: format!("solver.pinv_epsilon must be non-negative, got {}", self.solver.pinv_epsilon),
            });
        }
        if self.solver.max_articles == 0 {
            return Err(CreditError::Configuration {
                message: "solver.max_articles must be positive".to_string(),
            });
        }
        Ok(())
    }
}
