pub mod artifact;
pub mod check;
pub mod feature;
pub mod history;
pub mod init;
pub mod specify;

use anyhow::Context;
use specflow_core::{
    config::Config,
    context::{ContextBuilder, FeatureContext},
    git::GitCli,
    resolver::{ResolvedFeature, Resolver, ResolverConfig, Signals},
};
use std::path::PathBuf;

pub const SPECFLOW_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Feature a command acted on, recorded in history.
pub type Target = Option<String>;

/// Per-invocation inputs shared by every command.
pub struct Session {
    pub root: PathBuf,
    pub cwd: PathBuf,
    pub config: Config,
    pub feature_override: Option<String>,
    pub json: bool,
}

impl Session {
    pub fn specs_root(&self) -> PathBuf {
        self.config.specs_root(&self.root)
    }

    pub fn git(&self) -> GitCli {
        GitCli::new(&self.root)
    }

    pub fn resolver(&self) -> Resolver {
        Resolver::new(ResolverConfig {
            specs_root: self.specs_root(),
            cwd: self.cwd.clone(),
            feature_override: self.feature_override.clone(),
        })
    }

    pub fn context_builder(&self) -> ContextBuilder {
        ContextBuilder::new(SPECFLOW_VERSION)
    }

    /// Query git once for this invocation.
    pub fn signals(&self, resolver: &Resolver) -> Signals {
        resolver.signals(&self.git())
    }

    /// Resolve the current feature and build its context.
    pub fn resolve(&self) -> anyhow::Result<(ResolvedFeature, FeatureContext)> {
        let resolver = self.resolver();
        let signals = self.signals(&resolver);
        let resolved = resolver
            .resolve_signals(&signals)
            .context("failed to resolve current feature")?;
        let ctx = self
            .context_builder()
            .build(Some(&resolved.feature), signals.inside_repo);
        Ok((resolved, ctx))
    }
}
