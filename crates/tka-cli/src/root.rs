use std::path::{Path, PathBuf};

/// Resolve the project root that holds `.tka/config.yaml`.
///
/// Priority:
/// 1. `--root` flag / `TKA_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.tka/`
/// 3. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_tka_dir(&cwd).unwrap_or(cwd)
}

fn find_tka_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| tka_core::paths::tka_dir(dir).is_dir())
        .map(Path::to_path_buf)
}
