use super::{Session, Target};
use crate::output::{print_json, print_table};
use anyhow::Context;
use specflow_core::{history::HistoryWriter, paths};

/// `specflow history` — show the most recent invocations, oldest first.
pub fn run(session: &Session, limit: usize) -> anyhow::Result<Target> {
    let writer = HistoryWriter::new(
        paths::history_path(&session.root),
        session.config.history.max_entries,
    );
    let log = writer
        .load()
        .with_context(|| format!("failed to read {}", writer.path().display()))?;
    let entries = log.tail(limit);

    if session.json {
        print_json(&entries)?;
        return Ok(None);
    }

    if entries.is_empty() {
        println!("No history yet.");
        return Ok(None);
    }

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                e.command.clone(),
                e.spec.clone(),
                e.exit_code.to_string(),
                e.duration.clone(),
            ]
        })
        .collect();
    print_table(&["TIME", "COMMAND", "SPEC", "EXIT", "DURATION"], rows);
    Ok(None)
}
