//! End-to-end resolution for a launch

use crate::context::LaunchContext;
use crate::expand::expand;
use crate::materializer::{Materializer, ResolvedSecrets};
use crate::parser::parse_references;
use crate::reconciler::reconcile;
use crate::resolver::resolve_secret_name;
use crate::writer::write_destinations;
use gsmenv_core::{Environment, Result};

/// Outcome of a successful resolution: what the child process gets
#[derive(Debug)]
pub struct PreparedLaunch {
    resolved: ResolvedSecrets,
    environment: Environment,
}

impl PreparedLaunch {
    pub fn resolved(&self) -> &ResolvedSecrets {
        &self.resolved
    }

    /// Environment for the child process
    pub fn environment(&self) -> &Environment {
        &self.environment
    }
}

/// Runs the stages of a launch in order against one context
pub struct Pipeline<'a> {
    ctx: LaunchContext<'a>,
}

impl<'a> Pipeline<'a> {
    pub fn new(ctx: LaunchContext<'a>) -> Self {
        Self { ctx }
    }

    /// Parse, fetch, write destinations and reconcile.
    ///
    /// Nothing is written unless every reference resolved.
    pub async fn prepare_launch(&self) -> Result<PreparedLaunch> {
        let references = parse_references(&self.ctx)?;
        let resolved = Materializer::new(self.ctx.client())
            .materialize_all(references)
            .await?;

        write_destinations(&resolved)?;

        let environment = reconcile(self.ctx.environment(), &resolved);
        tracing::debug!(
            references = resolved.len(),
            entries = environment.len(),
            "environment reconciled"
        );
        Ok(PreparedLaunch {
            resolved,
            environment,
        })
    }

    /// Fetch one secret by name, without fallbacks
    pub async fn fetch_named_secret(&self, name: &str) -> Result<String> {
        let expanded = expand(name, self.ctx.environment());
        let secret = resolve_secret_name(&expanded, self.ctx.project())?;
        Materializer::new(self.ctx.client()).fetch(&secret).await
    }
}
