use super::{Session, Target};
use crate::output::print_json;
use clap::Args;
use serde::Serialize;
use specflow_core::{
    context::FeatureContext,
    docs::available_docs,
    types::DetectionSource,
    validate::{validate, Requirements},
};

#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Require spec.yaml to exist
    #[arg(long)]
    pub require_spec: bool,
    /// Require plan.yaml to exist (the default when nothing else is required)
    #[arg(long)]
    pub require_plan: bool,
    /// Require tasks.yaml to exist
    #[arg(long)]
    pub require_tasks: bool,
    /// Include tasks.yaml in the available docs list
    #[arg(long)]
    pub include_tasks: bool,
    /// Only report paths; skip validation
    #[arg(long)]
    pub paths_only: bool,
}

impl CheckArgs {
    fn requirements(&self) -> Requirements {
        Requirements {
            require_spec: self.require_spec,
            require_plan: self.require_plan,
            require_tasks: self.require_tasks,
            include_tasks: self.include_tasks,
            paths_only: self.paths_only,
        }
    }
}

#[derive(Serialize)]
struct CheckReport<'a> {
    source: Option<DetectionSource>,
    #[serde(flatten)]
    context: &'a FeatureContext,
}

pub fn run(session: &Session, args: &CheckArgs) -> anyhow::Result<Target> {
    let req = args.requirements();

    if req.paths_only {
        return paths_only(session);
    }

    let (resolved, mut ctx) = session.resolve()?;
    validate(&ctx, &req)?;
    ctx.available_docs = available_docs(&ctx, req.include_tasks);

    print_report(
        session,
        &CheckReport {
            source: Some(resolved.source),
            context: &ctx,
        },
    )?;
    Ok(Some(resolved.feature.name))
}

/// Report whatever paths can be resolved without failing on missing state.
fn paths_only(session: &Session) -> anyhow::Result<Target> {
    let resolver = session.resolver();
    let signals = session.signals(&resolver);
    let resolved = match resolver.resolve_signals(&signals) {
        Ok(r) => Some(r),
        Err(e) => {
            tracing::debug!("paths-only: {e}");
            None
        }
    };
    let ctx = session
        .context_builder()
        .build(resolved.as_ref().map(|r| &r.feature), signals.inside_repo);

    print_report(
        session,
        &CheckReport {
            source: resolved.as_ref().map(|r| r.source),
            context: &ctx,
        },
    )?;
    Ok(resolved.map(|r| r.feature.name))
}

fn print_report(session: &Session, report: &CheckReport) -> anyhow::Result<()> {
    if session.json {
        return print_json(report);
    }

    let ctx = report.context;
    match (&ctx.feature, report.source) {
        (Some(f), Some(source)) => println!("Feature:    {} (via {source})", f.name),
        _ => println!("Feature:    (none)"),
    }
    println!("Directory:  {}", ctx.feature_dir.display());
    println!("Spec:       {}", ctx.spec_file.display());
    println!("Plan:       {}", ctx.plan_file.display());
    println!("Tasks:      {}", ctx.tasks_file.display());
    if !ctx.available_docs.is_empty() {
        println!("Available:  {}", ctx.available_docs.join(", "));
    }
    Ok(())
}
