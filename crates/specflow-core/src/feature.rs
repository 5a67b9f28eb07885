use crate::artifact;
use crate::error::{Result, SpecflowError};
use crate::io;
use crate::paths;
use crate::types::ArtifactKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// FeatureId
// ---------------------------------------------------------------------------

/// A numbered feature directory under the specs root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureId {
    pub number: u32,
    pub slug: String,
    /// Directory name on disk, e.g. `004-auth-login`.
    pub name: String,
    pub dir: PathBuf,
}

impl FeatureId {
    /// Build from a directory path whose final component is `NNN-slug`.
    pub fn from_dir(dir: &Path) -> Option<Self> {
        let name = dir.file_name()?.to_str()?;
        let (number, slug) = paths::parse_feature_dir_name(name)?;
        Some(Self {
            number,
            slug: slug.to_string(),
            name: name.to_string(),
            dir: dir.to_path_buf(),
        })
    }

    pub fn artifact_path(&self, kind: ArtifactKind) -> PathBuf {
        self.dir.join(kind.filename())
    }
}

// ---------------------------------------------------------------------------
// FeatureCatalog
// ---------------------------------------------------------------------------

/// Snapshot of the numbered feature directories under a specs root,
/// ordered by number and then by name.
#[derive(Debug, Clone)]
pub struct FeatureCatalog {
    root: PathBuf,
    exists: bool,
    features: Vec<FeatureId>,
}

impl FeatureCatalog {
    pub fn scan(specs_root: &Path) -> Result<Self> {
        if !specs_root.is_dir() {
            return Ok(Self {
                root: specs_root.to_path_buf(),
                exists: false,
                features: Vec::new(),
            });
        }

        let mut features = Vec::new();
        for entry in std::fs::read_dir(specs_root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            match FeatureId::from_dir(&entry.path()) {
                Some(id) => features.push(id),
                None => tracing::debug!(
                    "skipping non-feature directory {}",
                    entry.file_name().to_string_lossy()
                ),
            }
        }
        features.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.name.cmp(&b.name)));

        Ok(Self {
            root: specs_root.to_path_buf(),
            exists: true,
            features,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the specs root existed when scanned.
    pub fn root_exists(&self) -> bool {
        self.exists
    }

    pub fn features(&self) -> &[FeatureId] {
        &self.features
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn by_name(&self, name: &str) -> Option<&FeatureId> {
        self.features.iter().find(|f| f.name == name)
    }

    /// First feature with the given number. Duplicated numbers resolve to
    /// the alphabetically first directory.
    pub fn by_number(&self, number: u32) -> Option<&FeatureId> {
        self.features.iter().find(|f| f.number == number)
    }

    /// Resolve free-form identifier text: an exact directory name, a bare
    /// number (`7`, `007`), or a numbered prefix (`007-anything`).
    pub fn find_by_identifier(&self, text: &str) -> Option<&FeatureId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Some(found) = self.by_name(text) {
            return Some(found);
        }
        let number = if text.chars().all(|c| c.is_ascii_digit()) {
            text.parse().ok()
        } else {
            paths::branch_feature_number(text)
        };
        number.and_then(|n| self.by_number(n))
    }

    /// Highest-numbered feature; ties go to the alphabetically first name.
    pub fn latest(&self) -> Option<&FeatureId> {
        let max = self.features.iter().map(|f| f.number).max()?;
        self.by_number(max)
    }

    pub fn next_number(&self) -> u32 {
        self.latest().map(|f| f.number + 1).unwrap_or(1)
    }
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Allocate the next feature number, create `NNN-slug/` and scaffold its
/// `spec.yaml`.
pub fn create_feature(
    specs_root: &Path,
    slug: &str,
    title: &str,
    now: DateTime<Utc>,
) -> Result<FeatureId> {
    paths::validate_slug(slug)?;

    let catalog = FeatureCatalog::scan(specs_root)?;
    if let Some(existing) = catalog.features().iter().find(|f| f.slug == slug) {
        return Err(SpecflowError::FeatureExists(existing.name.clone()));
    }

    let number = catalog.next_number();
    let name = paths::feature_dir_name(number, slug);
    let dir = specs_root.join(&name);
    io::ensure_dir(&dir)?;

    let id = FeatureId {
        number,
        slug: slug.to_string(),
        name,
        dir,
    };
    artifact::write_scaffold(ArtifactKind::Spec, &id, title, now)?;
    tracing::debug!("created feature {}", id.name);
    Ok(id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
