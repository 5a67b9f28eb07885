use super::{Session, Target};
use crate::output::print_json;
use anyhow::Context;
use chrono::Utc;
use specflow_core::{feature::create_feature, types::ArtifactKind};

/// `specflow specify <slug>` — allocate the next feature number and scaffold
/// its spec.
pub fn run(session: &Session, slug: &str, title: Option<String>) -> anyhow::Result<Target> {
    let title = title.unwrap_or_else(|| slug.replace('-', " "));
    let feature = create_feature(&session.specs_root(), slug, &title, Utc::now())
        .with_context(|| format!("failed to create feature '{slug}'"))?;
    let spec_file = feature.artifact_path(ArtifactKind::Spec);

    if session.json {
        print_json(&serde_json::json!({
            "feature": feature,
            "spec_file": spec_file,
        }))?;
    } else {
        println!("Created feature: {} — {title}", feature.name);
        println!("Spec: {}", spec_file.display());
        println!("Next: {}", ArtifactKind::Plan.remedy());
        println!(
            "Select it with `git checkout -b {}` or `export SPECFLOW_FEATURE={}`",
            feature.name, feature.name
        );
    }
    Ok(Some(feature.name))
}
