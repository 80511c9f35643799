use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{
    error::{ShellError, ShellResult},
    CONFIG_DIR_ENV, CONFIG_DIR_NAME, DESKTOP_ENTRY_EXTENSION, SPEC_FILE_EXTENSION,
    WINDOW_STATE_DIR_NAME, XDG_DATA_HOME_ENV,
};

fn non_empty_env_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub fn config_dir(override_dir: Option<&Path>) -> ShellResult<PathBuf> {
    if let Some(path) = override_dir {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = non_empty_env_path(CONFIG_DIR_ENV) {
        return Ok(path);
    }
    home::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME))
        .ok_or(ShellError::HomeUnavailable)
}

pub fn applications_dir(override_dir: Option<&Path>) -> ShellResult<PathBuf> {
    if let Some(path) = override_dir {
        return Ok(path.to_path_buf());
    }
    if let Some(data_home) = non_empty_env_path(XDG_DATA_HOME_ENV) {
        return Ok(data_home.join("applications"));
    }
    home::home_dir()
        .map(|home| home.join(".local").join("share").join("applications"))
        .ok_or(ShellError::HomeUnavailable)
}

pub fn file_stem_for_title(title: &str) -> String {
    let replaced: String = title
        .trim()
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' => '-',
            ch if ch.is_control() => '-',
            ch => ch,
        })
        .collect();
    let stem = replaced.trim_matches(|ch: char| ch == '.' || ch.is_whitespace());
    if stem.is_empty() {
        "app".to_string()
    } else {
        stem.to_string()
    }
}

pub fn spec_path_for_title(config_dir: &Path, title: &str) -> PathBuf {
    config_dir.join(format!(
        "{}.{}",
        file_stem_for_title(title),
        SPEC_FILE_EXTENSION
    ))
}

pub fn desktop_entry_path_for_title(applications_dir: &Path, title: &str) -> PathBuf {
    applications_dir.join(format!(
        "{}.{}",
        file_stem_for_title(title),
        DESKTOP_ENTRY_EXTENSION
    ))
}

pub fn window_state_path(spec_path: &Path) -> PathBuf {
    let stem = spec_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "app".to_string());
    // Kept out of the spec directory so no title can map onto another spec file.
    spec_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(WINDOW_STATE_DIR_NAME)
        .join(format!("{stem}.{SPEC_FILE_EXTENSION}"))
}
