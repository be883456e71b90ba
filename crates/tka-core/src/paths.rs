use std::path::{Path, PathBuf};

pub const TKA_DIR: &str = ".tka";
pub const CONFIG_FILE: &str = ".tka/config.yaml";

pub fn tka_dir(root: &Path) -> PathBuf {
    root.join(TKA_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}
