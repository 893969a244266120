//! Service context - dependency container for services
//!
//! Holds the repositories and the authorization policy. Built once at startup
//! and shared by every event handler.

use std::sync::Arc;

use repbot_common::PolicyConfig;
use repbot_core::traits::{RuleRepository, ScoreRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    rule_repo: Arc<dyn RuleRepository>,
    score_repo: Arc<dyn ScoreRepository>,

    // Policy
    policy: PolicyConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        rule_repo: Arc<dyn RuleRepository>,
        score_repo: Arc<dyn ScoreRepository>,
        policy: PolicyConfig,
    ) -> Self {
        Self {
            rule_repo,
            score_repo,
            policy,
        }
    }

    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the rule repository
    pub fn rule_repo(&self) -> &dyn RuleRepository {
        self.rule_repo.as_ref()
    }

    /// Get the score repository
    pub fn score_repo(&self) -> &dyn ScoreRepository {
        self.score_repo.as_ref()
    }

    // === Policy ===

    pub fn policy(&self) -> PolicyConfig {
        self.policy
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("policy", &self.policy)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    rule_repo: Option<Arc<dyn RuleRepository>>,
    score_repo: Option<Arc<dyn ScoreRepository>>,
    policy: PolicyConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            rule_repo: None,
            score_repo: None,
            policy: PolicyConfig::default(),
        }
    }

    pub fn rule_repo(mut self, repo: Arc<dyn RuleRepository>) -> Self {
        self.rule_repo = Some(repo);
        self
    }

    pub fn score_repo(mut self, repo: Arc<dyn ScoreRepository>) -> Self {
        self.score_repo = Some(repo);
        self
    }

    pub fn policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if a repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.rule_repo
                .ok_or_else(|| ServiceError::internal("rule_repo is required"))?,
            self.score_repo
                .ok_or_else(|| ServiceError::internal("score_repo is required"))?,
            self.policy,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
