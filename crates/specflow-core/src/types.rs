use crate::paths;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ArtifactKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Spec,
    Plan,
    Tasks,
}

impl ArtifactKind {
    pub fn all() -> &'static [ArtifactKind] {
        &[ArtifactKind::Spec, ArtifactKind::Plan, ArtifactKind::Tasks]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Spec => "spec",
            ArtifactKind::Plan => "plan",
            ArtifactKind::Tasks => "tasks",
        }
    }

    pub fn filename(self) -> &'static str {
        match self {
            ArtifactKind::Spec => paths::SPEC_FILE,
            ArtifactKind::Plan => paths::PLAN_FILE,
            ArtifactKind::Tasks => paths::TASKS_FILE,
        }
    }

    /// The command that produces this artifact.
    pub fn remedy(self) -> &'static str {
        match self {
            ArtifactKind::Spec => "specflow specify",
            ArtifactKind::Plan => "specflow plan",
            ArtifactKind::Tasks => "specflow tasks",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DetectionSource
// ---------------------------------------------------------------------------

/// Which resolution strategy produced a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    Environment,
    WorkingDirectory,
    Branch,
    Latest,
}

impl DetectionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            DetectionSource::Environment => "environment",
            DetectionSource::WorkingDirectory => "working_directory",
            DetectionSource::Branch => "branch",
            DetectionSource::Latest => "latest",
        }
    }
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_kind_filenames() {
        let names: Vec<_> = ArtifactKind::all().iter().map(|k| k.filename()).collect();
        assert_eq!(names, ["spec.yaml", "plan.yaml", "tasks.yaml"]);
    }
}
