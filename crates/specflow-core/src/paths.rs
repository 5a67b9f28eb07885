use crate::error::{Result, SpecflowError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const SPECS_DIR: &str = "specs";
pub const STATE_DIR: &str = ".specflow";

pub const CONFIG_FILE: &str = ".specflow/config.yaml";
pub const HISTORY_FILE: &str = ".specflow/history.yaml";

pub const SPEC_FILE: &str = "spec.yaml";
pub const PLAN_FILE: &str = "plan.yaml";
pub const TASKS_FILE: &str = "tasks.yaml";
pub const CHECKLISTS_DIR: &str = "checklists";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn state_dir(root: &Path) -> PathBuf {
    root.join(STATE_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn history_path(root: &Path) -> PathBuf {
    root.join(HISTORY_FILE)
}

pub fn feature_dir_name(number: u32, slug: &str) -> String {
    format!("{number:03}-{slug}")
}

// ---------------------------------------------------------------------------
// Feature directory names
// ---------------------------------------------------------------------------

static FEATURE_DIR_RE: OnceLock<Regex> = OnceLock::new();
static BRANCH_PREFIX_RE: OnceLock<Regex> = OnceLock::new();
static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn feature_dir_re() -> &'static Regex {
    FEATURE_DIR_RE.get_or_init(|| Regex::new(r"^(\d{3,})-([a-z0-9][a-z0-9\-]*)$").unwrap())
}

fn branch_prefix_re() -> &'static Regex {
    BRANCH_PREFIX_RE.get_or_init(|| Regex::new(r"^(\d{3,})-").unwrap())
}

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

/// Split a `NNN-slug` directory name into its number and slug.
pub fn parse_feature_dir_name(name: &str) -> Option<(u32, &str)> {
    let caps = feature_dir_re().captures(name)?;
    let number = caps.get(1)?.as_str().parse().ok()?;
    let slug = caps.get(2)?.as_str();
    Some((number, slug))
}

/// Numeric prefix of a feature branch name such as `004-auth-login`.
pub fn branch_feature_number(branch: &str) -> Option<u32> {
    let caps = branch_prefix_re().captures(branch)?;
    caps.get(1)?.as_str().parse().ok()
}

pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > 64 || !slug_re().is_match(slug) {
        return Err(SpecflowError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
