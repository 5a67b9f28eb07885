use super::{Session, Target};
use crate::output::print_json;
use anyhow::Context;
use chrono::Utc;
use specflow_core::{
    artifact::write_scaffold,
    docs::available_docs,
    types::ArtifactKind,
    validate::{validate, Requirements},
};

/// Prerequisites for producing `kind`: plan needs a spec, tasks need a plan.
fn prerequisites(kind: ArtifactKind) -> Requirements {
    match kind {
        ArtifactKind::Spec => Requirements::default(),
        ArtifactKind::Plan => Requirements {
            require_spec: true,
            ..Requirements::default()
        },
        ArtifactKind::Tasks => Requirements {
            require_plan: true,
            ..Requirements::default()
        },
    }
}

/// `specflow plan` / `specflow tasks` — scaffold an artifact for the current
/// feature once its prerequisites exist.
pub fn run(session: &Session, kind: ArtifactKind) -> anyhow::Result<Target> {
    let (resolved, mut ctx) = session.resolve()?;
    validate(&ctx, &prerequisites(kind))?;

    let feature = &resolved.feature;
    let created = write_scaffold(kind, feature, &feature.slug, Utc::now())
        .with_context(|| format!("failed to write {} for {}", kind.filename(), feature.name))?;
    ctx.available_docs = available_docs(&ctx, true);
    let path = ctx.artifact_path(kind);

    if session.json {
        print_json(&serde_json::json!({
            "feature": feature.name,
            "artifact": kind.as_str(),
            "path": path,
            "created": created,
            "available_docs": ctx.available_docs,
        }))?;
    } else if created {
        println!("Created {}: {}", kind.filename(), path.display());
        if let Some(next) = next_step(kind) {
            println!("Next: {next}");
        }
    } else {
        println!("{} already exists: {}", kind.filename(), path.display());
    }
    Ok(Some(feature.name.clone()))
}

fn next_step(kind: ArtifactKind) -> Option<&'static str> {
    match kind {
        ArtifactKind::Spec => Some(ArtifactKind::Plan.remedy()),
        ArtifactKind::Plan => Some(ArtifactKind::Tasks.remedy()),
        ArtifactKind::Tasks => None,
    }
}
