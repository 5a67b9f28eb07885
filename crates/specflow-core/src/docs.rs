use crate::context::FeatureContext;
use crate::io;
use crate::paths;
use crate::types::ArtifactKind;

/// Marker reported when the feature has a non-empty `checklists/` directory.
pub const CHECKLISTS_MARKER: &str = "checklists/";

/// Names of the optional documents present in the feature directory, in
/// fixed order: spec, plan, tasks (only with `include_tasks`), checklists.
pub fn available_docs(ctx: &FeatureContext, include_tasks: bool) -> Vec<String> {
    let mut docs = Vec::new();
    if !ctx.has_feature_dir() {
        return docs;
    }

    for kind in ArtifactKind::all() {
        if *kind == ArtifactKind::Tasks && !include_tasks {
            continue;
        }
        if ctx.artifact_path(*kind).is_file() {
            docs.push(kind.filename().to_string());
        }
    }

    if io::is_non_empty_dir(&ctx.feature_dir.join(paths::CHECKLISTS_DIR)) {
        docs.push(CHECKLISTS_MARKER.to_string());
    }
    docs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextBuilder;
    use crate::feature::FeatureId;
    use tempfile::TempDir;

    fn ctx_in(dir: &TempDir) -> FeatureContext {
        let path = dir.path().join("specs/001-auth");
        std::fs::create_dir_all(&path).unwrap();
        let feature = FeatureId::from_dir(&path).unwrap();
        ContextBuilder::new("test").build(Some(&feature), false)
    }

    #[test]
    fn spec_and_plan_in_order() {
        let dir = TempDir::new().unwrap();
        let ctx = ctx_in(&dir);
        std::fs::write(&ctx.plan_file, "").unwrap();
        std::fs::write(&ctx.spec_file, "").unwrap();
        assert_eq!(available_docs(&ctx, true), ["spec.yaml", "plan.yaml"]);
    }

    #[test]
    fn empty_feature_dir_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let ctx = ctx_in(&dir);
        assert!(available_docs(&ctx, true).is_empty());
        assert!(available_docs(&ContextBuilder::new("t").build(None, false), true).is_empty());
    }

    #[test]
    fn tasks_only_when_requested() {
        let dir = TempDir::new().unwrap();
        let ctx = ctx_in(&dir);
        std::fs::write(&ctx.plan_file, "").unwrap();
        std::fs::write(&ctx.tasks_file, "").unwrap();
        assert_eq!(available_docs(&ctx, false), ["plan.yaml"]);
        assert_eq!(available_docs(&ctx, true), ["plan.yaml", "tasks.yaml"]);
    }

    #[test]
    fn checklists_marker_requires_non_empty_dir() {
        let dir = TempDir::new().unwrap();
        let ctx = ctx_in(&dir);
        let checklists = ctx.feature_dir.join("checklists");
        std::fs::create_dir(&checklists).unwrap();
        assert!(available_docs(&ctx, false).is_empty());

        std::fs::write(checklists.join("requirements.md"), "- [ ] done").unwrap();
        std::fs::write(&ctx.spec_file, "").unwrap();
        assert_eq!(available_docs(&ctx, false), ["spec.yaml", "checklists/"]);
    }
}
