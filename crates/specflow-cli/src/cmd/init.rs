use super::{Session, Target};
use anyhow::Context;
use specflow_core::{io, paths};

/// `specflow init` — create the specs directory and default config.
/// Idempotent: existing files are left alone.
pub fn run(session: &Session) -> anyhow::Result<Target> {
    let root = &session.root;
    println!("Initializing specflow in: {}", root.display());

    let specs = session.specs_root();
    if specs.is_dir() {
        println!("  exists:  {}/", session.config.specs_dir);
    } else {
        io::ensure_dir(&specs).with_context(|| format!("failed to create {}", specs.display()))?;
        println!("  created: {}/", session.config.specs_dir);
    }

    if paths::config_path(root).exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
    } else {
        session
            .config
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    }

    // History is per-machine.
    io::ensure_gitignore_entry(root, paths::HISTORY_FILE)
        .context("failed to update .gitignore")?;

    println!("\nNext: specflow specify <slug> --title \"...\"");
    Ok(None)
}
