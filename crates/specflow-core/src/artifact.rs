//! YAML skeletons for the three feature artifacts.
//!
//! Scaffolds are written once and never overwritten, so agent or human
//! edits to an existing artifact survive re-running a command.

use crate::error::Result;
use crate::feature::FeatureId;
use crate::io;
use crate::types::ArtifactKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecDoc {
    pub feature: String,
    pub title: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user_stories: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDoc {
    pub feature: String,
    pub spec: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksDoc {
    pub feature: String,
    pub plan: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tasks: Vec<TaskItem>,
}

/// Only the part of a hand-edited plan needed to seed tasks.
#[derive(Debug, Deserialize)]
struct PlanSteps {
    #[serde(default)]
    steps: Vec<String>,
}

/// Steps listed in a plan. A plan that is not a YAML mapping (prose, or a
/// hand-edited layout) yields none.
fn plan_steps(data: &str, path: &Path) -> Vec<String> {
    match serde_yaml::from_str::<Option<PlanSteps>>(data) {
        Ok(plan) => plan.map(|p| p.steps).unwrap_or_default(),
        Err(e) => {
            tracing::warn!("not seeding tasks from {}: {e}", path.display());
            Vec::new()
        }
    }
}

/// Render the skeleton for `kind`. Tasks are seeded from the plan's steps
/// when `plan.yaml` exists.
pub fn scaffold(
    kind: ArtifactKind,
    feature: &FeatureId,
    title: &str,
    now: DateTime<Utc>,
) -> Result<String> {
    let yaml = match kind {
        ArtifactKind::Spec => serde_yaml::to_string(&SpecDoc {
            feature: feature.name.clone(),
            title: title.to_string(),
            status: "draft".to_string(),
            created_at: now,
            user_stories: Vec::new(),
            requirements: Vec::new(),
        })?,
        ArtifactKind::Plan => serde_yaml::to_string(&PlanDoc {
            feature: feature.name.clone(),
            spec: ArtifactKind::Spec.filename().to_string(),
            created_at: now,
            summary: String::new(),
            steps: Vec::new(),
        })?,
        ArtifactKind::Tasks => {
            let plan_path = feature.artifact_path(ArtifactKind::Plan);
            let steps = if plan_path.exists() {
                let data = std::fs::read_to_string(&plan_path)?;
                plan_steps(&data, &plan_path)
            } else {
                Vec::new()
            };
            let tasks = steps
                .into_iter()
                .enumerate()
                .map(|(i, step)| TaskItem {
                    id: format!("T{:03}", i + 1),
                    title: step,
                    done: false,
                })
                .collect();
            serde_yaml::to_string(&TasksDoc {
                feature: feature.name.clone(),
                plan: ArtifactKind::Plan.filename().to_string(),
                created_at: now,
                tasks,
            })?
        }
    };
    Ok(yaml)
}

/// Write the skeleton for `kind` unless the file already exists.
/// Returns true if the file was written.
pub fn write_scaffold(
    kind: ArtifactKind,
    feature: &FeatureId,
    title: &str,
    now: DateTime<Utc>,
) -> Result<bool> {
    let path = feature.artifact_path(kind);
    if path.exists() {
        return Ok(false);
    }
    let data = scaffold(kind, feature, title, now)?;
    io::write_if_missing(&path, data.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn feature_in(dir: &TempDir) -> FeatureId {
        let path = dir.path().join("specs/003-search");
        std::fs::create_dir_all(&path).unwrap();
        FeatureId::from_dir(&path).unwrap()
    }

    #[test]
    fn spec_scaffold_names_feature() {
        let dir = TempDir::new().unwrap();
        let feature = feature_in(&dir);
        let yaml = scaffold(ArtifactKind::Spec, &feature, "Search", Utc::now()).unwrap();
        let doc: SpecDoc = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(doc.feature, "003-search");
        assert_eq!(doc.title, "Search");
        assert_eq!(doc.status, "draft");
    }

    #[test]
    fn tasks_seeded_from_plan_steps() {
        let dir = TempDir::new().unwrap();
        let feature = feature_in(&dir);
        let plan = PlanDoc {
            feature: feature.name.clone(),
            spec: "spec.yaml".to_string(),
            created_at: Utc::now(),
            summary: "index then query".to_string(),
            steps: vec!["build index".to_string(), "query api".to_string()],
        };
        std::fs::write(
            feature.artifact_path(ArtifactKind::Plan),
            serde_yaml::to_string(&plan).unwrap(),
        )
        .unwrap();

        let yaml = scaffold(ArtifactKind::Tasks, &feature, "", Utc::now()).unwrap();
        let doc: TasksDoc = serde_yaml::from_str(&yaml).unwrap();
        let ids: Vec<_> = doc.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["T001", "T002"]);
        assert_eq!(doc.tasks[1].title, "query api");
        assert!(!doc.tasks[0].done);
    }

    #[test]
    fn prose_plan_seeds_no_tasks() {
        let dir = TempDir::new().unwrap();
        let feature = feature_in(&dir);
        std::fs::write(
            feature.artifact_path(ArtifactKind::Plan),
            "Build the index first, then the API.\n",
        )
        .unwrap();

        let written = write_scaffold(ArtifactKind::Tasks, &feature, "", Utc::now()).unwrap();
        assert!(written);
        let data = std::fs::read_to_string(feature.artifact_path(ArtifactKind::Tasks)).unwrap();
        let doc: TasksDoc = serde_yaml::from_str(&data).unwrap();
        assert_eq!(doc.feature, "003-search");
        assert!(doc.tasks.is_empty());
    }

    #[test]
    fn empty_plan_seeds_no_tasks() {
        let dir = TempDir::new().unwrap();
        let feature = feature_in(&dir);
        std::fs::write(feature.artifact_path(ArtifactKind::Plan), "").unwrap();

        let yaml = scaffold(ArtifactKind::Tasks, &feature, "", Utc::now()).unwrap();
        let doc: TasksDoc = serde_yaml::from_str(&yaml).unwrap();
        assert!(doc.tasks.is_empty());
    }

    #[test]
    fn write_scaffold_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let feature = feature_in(&dir);
        let path = feature.artifact_path(ArtifactKind::Plan);
        std::fs::write(&path, "summary: hand written\n").unwrap();

        let written = write_scaffold(ArtifactKind::Plan, &feature, "", Utc::now()).unwrap();
        assert!(!written);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "summary: hand written\n"
        );
    }
}
