//! Short code reservation: custom alias checks and collision-free generation.

use std::sync::Arc;

use crate::config::LinkPolicy;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_reserved};

/// Picks a short code that is free at the time of the check.
///
/// The existence check is advisory. Between the check and the insert another
/// request may take the same code, so the store's unique constraint stays the
/// final arbiter (see [`super::LinkService::create_short_link`]).
pub struct CodeReserver<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    policy: LinkPolicy,
}

impl<R: LinkRepository + ?Sized> CodeReserver<R> {
    /// Creates a new reserver.
    pub fn new(repository: Arc<R>, policy: LinkPolicy) -> Self {
        Self { repository, policy }
    }

    /// Returns `candidate` if it is free, or a freshly generated free code.
    ///
    /// # Errors
    ///
    /// - [`AppError::AliasConflict`] if the custom alias is taken
    /// - [`AppError::GenerationExhausted`] if every generation attempt collided
    /// - [`AppError::Storage`] if the store cannot be queried
    pub async fn reserve(&self, candidate: Option<&str>) -> Result<String, AppError> {
        match candidate {
            Some(alias) => self.reserve_custom(alias).await,
            None => {
                let mut remaining = self.policy.max_generation_attempts;
                self.reserve_generated(&mut remaining).await
            }
        }
    }

    /// Checks that a custom alias is not taken and returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AliasConflict`] if a link already uses `alias`.
    pub async fn reserve_custom(&self, alias: &str) -> Result<String, AppError> {
        if self.repository.find_by_code(alias).await?.is_some() {
            return Err(AppError::AliasConflict {
                alias: alias.to_string(),
            });
        }

        Ok(alias.to_string())
    }

    /// Generates codes until one is free, spending from `remaining`.
    ///
    /// The budget is shared with the caller so retries after a rejected insert
    /// count against the same limit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::GenerationExhausted`] once `remaining` reaches zero.
    pub async fn reserve_generated(&self, remaining: &mut usize) -> Result<String, AppError> {
        while *remaining > 0 {
            *remaining -= 1;

            let code = generate_code(self.policy.code_length).map_err(|e| {
                AppError::internal(format!("Random number generator failed: {}", e))
            })?;

            if is_reserved(&code) {
                continue;
            }

            if self.repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }

            tracing::debug!(code = %code, "Generated short code collided, retrying");
        }

        Err(AppError::GenerationExhausted {
            attempts: self.policy.max_generation_attempts,
        })
    }

    /// Policy this reserver generates codes with.
    pub fn policy(&self) -> &LinkPolicy {
        &self.policy
    }
}
