//! Current-feature resolution.
//!
//! Ambient signals (override text, working directory, git state) are
//! captured once into [`Signals`]. Each strategy is a plain function over
//! the signals and a [`FeatureCatalog`] snapshot; [`first_match`] runs them
//! in order and the first hit wins. When every strategy misses, the error is
//! refined from the git state.
//!
//! Precedence:
//! 1. `environment` — the feature override, if it names an existing feature
//! 2. `working_directory` — cwd is inside `<specs>/NNN-slug/`
//! 3. `branch` — the current branch is named `NNN-...`
//! 4. `latest` — outside git only, the highest-numbered feature
//!
//! An override naming a nonexistent feature falls through to step 2.

use crate::error::{Result, SpecflowError};
use crate::feature::{FeatureCatalog, FeatureId};
use crate::git::GitInspector;
use crate::paths;
use crate::types::DetectionSource;
use serde::Serialize;
use std::path::{Component, PathBuf};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Explicit inputs to the resolver; nothing is read from the process
/// environment.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub specs_root: PathBuf,
    pub cwd: PathBuf,
    pub feature_override: Option<String>,
}

/// Everything the strategies may look at.
#[derive(Debug, Clone, Default)]
pub struct Signals {
    pub feature_override: Option<String>,
    pub cwd: PathBuf,
    pub inside_repo: bool,
    pub branch: Option<String>,
}

impl Signals {
    /// The override, if set to something other than whitespace.
    pub fn override_text(&self) -> Option<&str> {
        self.feature_override
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFeature {
    pub feature: FeatureId,
    pub source: DetectionSource,
}

impl ResolvedFeature {
    fn new(feature: &FeatureId, source: DetectionSource) -> Self {
        Self {
            feature: feature.clone(),
            source,
        }
    }
}

pub type Strategy = fn(&Signals, &FeatureCatalog) -> Option<ResolvedFeature>;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

pub const STRATEGIES: &[Strategy] = &[
    from_environment,
    from_working_directory,
    from_branch,
    from_latest,
];

pub fn from_environment(signals: &Signals, catalog: &FeatureCatalog) -> Option<ResolvedFeature> {
    let text = signals.override_text()?;
    catalog
        .find_by_identifier(text)
        .map(|f| ResolvedFeature::new(f, DetectionSource::Environment))
}

pub fn from_working_directory(
    signals: &Signals,
    catalog: &FeatureCatalog,
) -> Option<ResolvedFeature> {
    let rel = signals.cwd.strip_prefix(catalog.root()).ok()?;
    let first = match rel.components().next()? {
        Component::Normal(name) => name.to_str()?,
        _ => return None,
    };
    catalog
        .by_name(first)
        .map(|f| ResolvedFeature::new(f, DetectionSource::WorkingDirectory))
}

pub fn from_branch(signals: &Signals, catalog: &FeatureCatalog) -> Option<ResolvedFeature> {
    if !signals.inside_repo {
        return None;
    }
    let branch = signals.branch.as_deref()?;
    let found = catalog
        .by_name(branch)
        .or_else(|| catalog.by_number(paths::branch_feature_number(branch)?))?;
    Some(ResolvedFeature::new(found, DetectionSource::Branch))
}

/// Outside git there is no branch to go by, so the newest feature is current.
pub fn from_latest(signals: &Signals, catalog: &FeatureCatalog) -> Option<ResolvedFeature> {
    if signals.inside_repo {
        return None;
    }
    catalog
        .latest()
        .map(|f| ResolvedFeature::new(f, DetectionSource::Latest))
}

/// Run `strategies` in order; the first hit wins.
pub fn first_match(
    strategies: &[Strategy],
    signals: &Signals,
    catalog: &FeatureCatalog,
) -> Option<ResolvedFeature> {
    strategies.iter().find_map(|strategy| strategy(signals, catalog))
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Capture the ambient signals once.
    pub fn signals(&self, git: &dyn GitInspector) -> Signals {
        let inside_repo = git.is_inside_repo();
        Signals {
            feature_override: self.config.feature_override.clone(),
            cwd: self.config.cwd.clone(),
            inside_repo,
            branch: if inside_repo { git.current_branch() } else { None },
        }
    }

    pub fn resolve(&self, git: &dyn GitInspector) -> Result<ResolvedFeature> {
        self.resolve_signals(&self.signals(git))
    }

    /// Resolve against signals captured earlier, so callers that also need
    /// the git state do not query it twice.
    pub fn resolve_signals(&self, signals: &Signals) -> Result<ResolvedFeature> {
        let catalog = FeatureCatalog::scan(&self.config.specs_root)?;
        resolve_with(signals, &catalog)
    }
}

/// Resolve against already-captured signals and a catalog snapshot.
pub fn resolve_with(signals: &Signals, catalog: &FeatureCatalog) -> Result<ResolvedFeature> {
    if let Some(text) = signals.override_text() {
        if catalog.find_by_identifier(text).is_none() {
            tracing::debug!("feature override '{text}' matches no feature, falling back");
        }
    }

    if let Some(found) = first_match(STRATEGIES, signals, catalog) {
        tracing::debug!("resolved {} via {}", found.feature.name, found.source);
        return Ok(found);
    }

    Err(refine_failure(signals, catalog))
}

fn refine_failure(signals: &Signals, catalog: &FeatureCatalog) -> SpecflowError {
    if signals.inside_repo {
        if let Some(branch) = &signals.branch {
            return SpecflowError::NotOnFeatureBranch {
                branch: branch.clone(),
            };
        }
    }

    let cause = if !catalog.root_exists() {
        format!("specs directory {} does not exist", catalog.root().display())
    } else if catalog.is_empty() {
        format!("no feature directories in {}", catalog.root().display())
    } else {
        "no feature override matched and HEAD is not on a branch".to_string()
    };
    SpecflowError::FeatureDetection { cause }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::StaticGit;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new(features: &[&str]) -> Self {
            let dir = TempDir::new().unwrap();
            for f in features {
                std::fs::create_dir_all(dir.path().join("specs").join(f)).unwrap();
            }
            Self { dir }
        }

        fn specs(&self) -> PathBuf {
            self.dir.path().join("specs")
        }

        fn resolver(&self, feature_override: Option<&str>) -> Resolver {
            Resolver::new(ResolverConfig {
                specs_root: self.specs(),
                cwd: self.dir.path().to_path_buf(),
                feature_override: feature_override.map(str::to_string),
            })
        }
    }

    #[test]
    fn override_wins_over_branch_and_latest() {
        let fx = Fixture::new(&["001-init", "002-auth", "003-billing"]);
        for name in ["001-init", "002-auth", "003-billing"] {
            let found = fx
                .resolver(Some(name))
                .resolve(&StaticGit::on_branch("003-billing"))
                .unwrap();
            assert_eq!(found.feature.name, name);
            assert_eq!(found.source, DetectionSource::Environment);

            let found = fx.resolver(Some(name)).resolve(&StaticGit::none()).unwrap();
            assert_eq!(found.feature.name, name);
        }
    }

    #[test]
    fn numeric_override_matches_prefix() {
        let fx = Fixture::new(&["001-init", "002-auth"]);
        let found = fx.resolver(Some("1")).resolve(&StaticGit::none()).unwrap();
        assert_eq!(found.feature.name, "001-init");
        assert_eq!(found.source, DetectionSource::Environment);
    }

    #[test]
    fn stale_override_falls_through() {
        let fx = Fixture::new(&["001-init", "002-auth"]);
        let git = StaticGit::on_branch("001-init");

        let with_stale = fx.resolver(Some("099-gone")).resolve(&git).unwrap();
        let without = fx.resolver(None).resolve(&git).unwrap();
        assert_eq!(with_stale, without);
        assert_eq!(with_stale.source, DetectionSource::Branch);
    }

    #[test]
    fn stale_override_error_matches_unset_override() {
        let fx = Fixture::new(&["001-init"]);
        let git = StaticGit::on_branch("main");
        let a = fx.resolver(Some("nope")).resolve(&git).unwrap_err();
        let b = fx.resolver(None).resolve(&git).unwrap_err();
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn blank_override_is_ignored() {
        let fx = Fixture::new(&["001-init", "002-auth"]);
        let found = fx.resolver(Some("   ")).resolve(&StaticGit::none()).unwrap();
        assert_eq!(found.source, DetectionSource::Latest);
        assert_eq!(found.feature.name, "002-auth");
    }

    #[test]
    fn branch_selects_feature_by_number() {
        let fx = Fixture::new(&["001-init", "002-auth", "003-billing"]);
        let found = fx
            .resolver(None)
            .resolve(&StaticGit::on_branch("002-auth-rework"))
            .unwrap();
        assert_eq!(found.feature.name, "002-auth");
        assert_eq!(found.source, DetectionSource::Branch);
    }

    #[test]
    fn working_directory_beats_branch() {
        let fx = Fixture::new(&["001-init", "002-auth"]);
        let mut signals = fx.resolver(None).signals(&StaticGit::on_branch("002-auth"));
        signals.cwd = fx.specs().join("001-init").join("checklists");

        let catalog = FeatureCatalog::scan(&fx.specs()).unwrap();
        let found = resolve_with(&signals, &catalog).unwrap();
        assert_eq!(found.feature.name, "001-init");
        assert_eq!(found.source, DetectionSource::WorkingDirectory);
    }

    #[test]
    fn non_feature_branch_reports_branch_name() {
        let fx = Fixture::new(&["001-init"]);
        let err = fx
            .resolver(None)
            .resolve(&StaticGit::on_branch("main"))
            .unwrap_err();
        assert!(matches!(&err, SpecflowError::NotOnFeatureBranch { branch } if branch == "main"));
        let msg = err.to_string();
        assert!(msg.contains("`main`"), "{msg}");
        assert!(msg.contains("NNN-feature-name"), "{msg}");
    }

    #[test]
    fn detached_head_gives_generic_error() {
        let fx = Fixture::new(&["001-init"]);
        let git = StaticGit {
            inside_repo: true,
            branch: None,
        };
        let err = fx.resolver(None).resolve(&git).unwrap_err();
        assert!(matches!(err, SpecflowError::FeatureDetection { .. }));
        assert!(err.to_string().starts_with("could not detect current feature"));
    }

    #[test]
    fn detached_head_with_stale_override_names_override() {
        let fx = Fixture::new(&["001-init"]);
        let git = StaticGit {
            inside_repo: true,
            branch: None,
        };
        let err = fx.resolver(Some("099-gone")).resolve(&git).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("no feature override matched"), "{msg}");
    }

    #[test]
    fn prefixed_override_matches_by_number() {
        let fx = Fixture::new(&["001-init", "003-auth", "004-billing"]);
        let found = fx
            .resolver(Some("003-auth-rework"))
            .resolve(&StaticGit::none())
            .unwrap();
        assert_eq!(found.feature.name, "003-auth");
        assert_eq!(found.source, DetectionSource::Environment);
    }

    #[test]
    fn resolve_signals_uses_captured_git_state() {
        let fx = Fixture::new(&["001-init", "002-auth"]);
        let resolver = fx.resolver(None);
        let signals = resolver.signals(&StaticGit::on_branch("001-init"));
        assert!(signals.inside_repo);

        let found = resolver.resolve_signals(&signals).unwrap();
        assert_eq!(found.feature.name, "001-init");
        assert_eq!(found.source, DetectionSource::Branch);
    }

    #[test]
    fn missing_specs_root_outside_git() {
        let fx = Fixture::new(&[]);
        let err = fx.resolver(None).resolve(&StaticGit::none()).unwrap_err();
        assert!(err.to_string().contains("does not exist"), "{err}");
    }

    #[test]
    fn latest_only_applies_outside_git() {
        let fx = Fixture::new(&["001-init", "005-search"]);
        let catalog = FeatureCatalog::scan(&fx.specs()).unwrap();

        let outside = Signals::default();
        assert_eq!(
            from_latest(&outside, &catalog).unwrap().feature.name,
            "005-search"
        );

        let inside = Signals {
            inside_repo: true,
            ..Signals::default()
        };
        assert!(from_latest(&inside, &catalog).is_none());
    }

    #[test]
    fn first_match_respects_order() {
        let fx = Fixture::new(&["001-init", "002-auth"]);
        let catalog = FeatureCatalog::scan(&fx.specs()).unwrap();
        let signals = Signals {
            feature_override: Some("001-init".to_string()),
            ..Signals::default()
        };

        let env_first = first_match(&[from_environment, from_latest], &signals, &catalog).unwrap();
        assert_eq!(env_first.source, DetectionSource::Environment);

        let latest_first =
            first_match(&[from_latest, from_environment], &signals, &catalog).unwrap();
        assert_eq!(latest_first.source, DetectionSource::Latest);
        assert_eq!(latest_first.feature.name, "002-auth");
    }
}
