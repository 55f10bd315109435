pub mod consts;

use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use directories::ProjectDirs;

pub const PROJECT_NAME: &str = "podprobe";

pub const CLI_PROGRAM_NAME: &str = "podprobe";
pub const CLI_CONFIG_NAME: &str = "config.yaml";

/// Primary configuration directory, `None` when no home directory can be
/// determined (e.g. inside a minimal test container).
pub static PROJECT_CONFIG_DIR: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    ProjectDirs::from("", PROJECT_NAME, PROJECT_NAME).map(|dirs| dirs.config_dir().to_path_buf())
});

#[must_use]
pub fn fallback_project_config_directories() -> Vec<PathBuf> {
    let Some(user_dirs) = directories::UserDirs::new() else {
        return Vec::new();
    };
    vec![
        [user_dirs.home_dir(), Path::new(".config"), Path::new(PROJECT_NAME)].iter().collect(),
        [user_dirs.home_dir(), Path::new(&format!(".{PROJECT_NAME}"))].iter().collect(),
    ]
}
