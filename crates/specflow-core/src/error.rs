use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecflowError {
    #[error("feature already exists: {0}")]
    FeatureExists(String),

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error(
        "not on a feature branch, current branch is `{branch}`, expected pattern `NNN-feature-name`"
    )]
    NotOnFeatureBranch { branch: String },

    #[error("could not detect current feature: {cause}")]
    FeatureDetection { cause: String },

    #[error("no feature directory resolved\nRun `{remedy}` first to create the feature structure.")]
    NoFeatureDir { remedy: String },

    #[error("feature directory not found: {}\nRun `{remedy}` first to create the feature structure.", path.display())]
    MissingFeatureDir { path: PathBuf, remedy: String },

    #[error("{artifact} not found in {}\nRun `{remedy}` first.", dir.display())]
    MissingArtifact {
        artifact: String,
        dir: PathBuf,
        remedy: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SpecflowError>;
