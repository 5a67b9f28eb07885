use crate::feature::FeatureId;
use crate::types::ArtifactKind;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Resolved paths and metadata for the current feature. Path fields are
/// empty when no feature was resolved.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeatureContext {
    pub feature: Option<FeatureId>,
    pub feature_dir: PathBuf,
    pub spec_file: PathBuf,
    pub plan_file: PathBuf,
    pub tasks_file: PathBuf,
    pub version: String,
    pub created_at: String,
    pub has_git: bool,
    pub available_docs: Vec<String>,
}

impl FeatureContext {
    pub fn artifact_path(&self, kind: ArtifactKind) -> &PathBuf {
        match kind {
            ArtifactKind::Spec => &self.spec_file,
            ArtifactKind::Plan => &self.plan_file,
            ArtifactKind::Tasks => &self.tasks_file,
        }
    }

    pub fn has_feature_dir(&self) -> bool {
        !self.feature_dir.as_os_str().is_empty()
    }
}

/// Builds [`FeatureContext`] values stamped with a fixed version string.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    version: String,
}

impl ContextBuilder {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn build(&self, feature: Option<&FeatureId>, has_git: bool) -> FeatureContext {
        self.build_at(feature, has_git, Utc::now())
    }

    pub fn build_at(
        &self,
        feature: Option<&FeatureId>,
        has_git: bool,
        now: DateTime<Utc>,
    ) -> FeatureContext {
        let mut ctx = FeatureContext {
            feature: feature.cloned(),
            version: self.version.clone(),
            created_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            has_git,
            ..FeatureContext::default()
        };
        if let Some(f) = feature {
            ctx.feature_dir = f.dir.clone();
            ctx.spec_file = f.artifact_path(ArtifactKind::Spec);
            ctx.plan_file = f.artifact_path(ArtifactKind::Plan);
            ctx.tasks_file = f.artifact_path(ArtifactKind::Tasks);
        }
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::Path;

    #[test]
    fn builds_canonical_paths() {
        let feature = FeatureId::from_dir(Path::new("/proj/specs/002-auth")).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let ctx = ContextBuilder::new("1.2.3").build_at(Some(&feature), true, now);

        assert_eq!(ctx.feature_dir, PathBuf::from("/proj/specs/002-auth"));
        assert_eq!(ctx.spec_file, PathBuf::from("/proj/specs/002-auth/spec.yaml"));
        assert_eq!(ctx.plan_file, PathBuf::from("/proj/specs/002-auth/plan.yaml"));
        assert_eq!(
            ctx.tasks_file,
            PathBuf::from("/proj/specs/002-auth/tasks.yaml")
        );
        assert_eq!(ctx.version, "1.2.3");
        assert_eq!(ctx.created_at, "2026-01-02T03:04:05Z");
        assert!(ctx.has_git);
        assert!(ctx.available_docs.is_empty());
    }

    #[test]
    fn timestamp_round_trips() {
        let ctx = ContextBuilder::new("0.1.0").build(None, false);
        let parsed = DateTime::parse_from_rfc3339(&ctx.created_at).unwrap();
        assert_eq!(
            parsed.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true),
            ctx.created_at
        );
    }

    #[test]
    fn no_feature_gives_empty_paths() {
        let ctx = ContextBuilder::new("0.1.0").build(None, false);
        assert!(!ctx.has_feature_dir());
        assert!(ctx.spec_file.as_os_str().is_empty());
        assert!(ctx.plan_file.as_os_str().is_empty());
        assert!(ctx.tasks_file.as_os_str().is_empty());
        assert_eq!(ctx.version, "0.1.0");
    }
}
