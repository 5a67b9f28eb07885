use crate::context::FeatureContext;
use crate::error::{Result, SpecflowError};
use crate::types::ArtifactKind;

/// Which artifacts a caller needs before it can proceed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Requirements {
    pub require_spec: bool,
    pub require_plan: bool,
    pub require_tasks: bool,
    /// List `tasks.yaml` among the available docs when present.
    pub include_tasks: bool,
    /// Skip validation entirely and report paths only.
    pub paths_only: bool,
}

impl Requirements {
    /// Plan is required unless the caller asked for something more specific.
    pub fn effective_require_plan(&self) -> bool {
        self.require_plan || (!self.require_spec && !self.require_tasks)
    }
}

/// Check the feature directory and required artifacts, stopping at the
/// first missing item.
pub fn validate(ctx: &FeatureContext, req: &Requirements) -> Result<()> {
    let remedy = ArtifactKind::Spec.remedy().to_string();
    if !ctx.has_feature_dir() {
        return Err(SpecflowError::NoFeatureDir { remedy });
    }
    if !ctx.feature_dir.is_dir() {
        return Err(SpecflowError::MissingFeatureDir {
            path: ctx.feature_dir.clone(),
            remedy,
        });
    }

    let checks = [
        (ArtifactKind::Spec, req.require_spec),
        (ArtifactKind::Plan, req.effective_require_plan()),
        (ArtifactKind::Tasks, req.require_tasks),
    ];
    for (kind, required) in checks {
        if required && !ctx.artifact_path(kind).is_file() {
            return Err(SpecflowError::MissingArtifact {
                artifact: kind.filename().to_string(),
                dir: ctx.feature_dir.clone(),
                remedy: kind.remedy().to_string(),
            });
        }
    }
    Ok(())
}
