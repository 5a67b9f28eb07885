use std::path::{Path, PathBuf};

/// Resolve the project root directory.
///
/// Priority:
/// 1. `--root` flag / `SPECFLOW_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.specflow/`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    if let Some(p) = explicit {
        return absolute(p, cwd);
    }

    for marker in [".specflow", ".git"] {
        if let Some(found) = cwd.ancestors().find(|dir| dir.join(marker).exists()) {
            return found.to_path_buf();
        }
    }

    cwd.to_path_buf()
}

/// Canonical form when the path exists, else joined onto `cwd`.
pub fn absolute(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    joined.canonicalize().unwrap_or(joined)
}

pub fn current_dir() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    cwd.canonicalize().unwrap_or(cwd)
}
