use super::{Session, Target};
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use specflow_core::{docs::available_docs, feature::FeatureCatalog};

#[derive(Subcommand)]
pub enum FeatureSubcommand {
    /// List all numbered features
    List,
    /// Show the current feature and how it was detected
    Current,
}

impl FeatureSubcommand {
    pub fn name(&self) -> &'static str {
        match self {
            FeatureSubcommand::List => "feature list",
            FeatureSubcommand::Current => "feature current",
        }
    }
}

pub fn run(session: &Session, subcmd: &FeatureSubcommand) -> anyhow::Result<Target> {
    match subcmd {
        FeatureSubcommand::List => list(session),
        FeatureSubcommand::Current => current(session),
    }
}

fn list(session: &Session) -> anyhow::Result<Target> {
    let catalog =
        FeatureCatalog::scan(&session.specs_root()).context("failed to scan specs directory")?;
    let resolver = session.resolver();
    let signals = session.signals(&resolver);
    let current = resolver
        .resolve_signals(&signals)
        .ok()
        .map(|r| r.feature.name);
    let builder = session.context_builder();
    let has_git = signals.inside_repo;

    if session.json {
        let summaries: Vec<_> = catalog
            .features()
            .iter()
            .map(|f| {
                let ctx = builder.build(Some(f), has_git);
                serde_json::json!({
                    "number": f.number,
                    "name": f.name,
                    "slug": f.slug,
                    "dir": f.dir,
                    "current": current.as_deref() == Some(f.name.as_str()),
                    "docs": available_docs(&ctx, true),
                })
            })
            .collect();
        print_json(&summaries)?;
        return Ok(current);
    }

    if catalog.is_empty() {
        println!("No features yet.");
        return Ok(current);
    }

    let rows: Vec<Vec<String>> = catalog
        .features()
        .iter()
        .map(|f| {
            let ctx = builder.build(Some(f), has_git);
            vec![
                if current.as_deref() == Some(f.name.as_str()) {
                    "*".to_string()
                } else {
                    String::new()
                },
                f.name.clone(),
                available_docs(&ctx, true).join(", "),
            ]
        })
        .collect();
    print_table(&["", "FEATURE", "DOCS"], rows);
    Ok(current)
}

fn current(session: &Session) -> anyhow::Result<Target> {
    let (resolved, _) = session.resolve()?;

    if session.json {
        print_json(&resolved)?;
    } else {
        println!("{} (via {})", resolved.feature.name, resolved.source);
        println!("{}", resolved.feature.dir.display());
    }
    Ok(Some(resolved.feature.name))
}
