use std::{
    env,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::RwLock,
};

use chrono::{Local, SecondsFormat};

use crate::{runtime_paths, DESKTOP_LOG_FILE};

static DESKTOP_LOG_DIR: RwLock<Option<PathBuf>> = RwLock::new(None);

pub fn set_log_dir(dir: &Path) {
    if let Ok(mut slot) = DESKTOP_LOG_DIR.write() {
        *slot = Some(dir.to_path_buf());
    }
}

pub fn resolve_desktop_log_path(config_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    config_dir
        .unwrap_or_else(|| env::temp_dir().join("ssb-shell"))
        .join(file_name)
}

pub fn desktop_log_path() -> PathBuf {
    let configured = DESKTOP_LOG_DIR.read().ok().and_then(|slot| slot.clone());
    resolve_desktop_log_path(
        configured.or_else(|| runtime_paths::config_dir(None).ok()),
        DESKTOP_LOG_FILE,
    )
}

pub(crate) fn format_log_line(channel: &str, message: &str) -> String {
    format!(
        "[{}] [{}] {}\n",
        Local::now().to_rfc3339_opts(SecondsFormat::Millis, false),
        channel,
        message
    )
}

fn append_log(channel: &str, message: &str) {
    let line = format_log_line(channel, message);
    if cfg!(debug_assertions) {
        eprint!("{line}");
    }

    let path = desktop_log_path();
    if let Some(parent_dir) = path.parent() {
        if fs::create_dir_all(parent_dir).is_err() {
            return;
        }
    }
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&path) {
        let _ = file.write_all(line.as_bytes());
    }
}

pub fn append_desktop_log(message: &str) {
    append_log("desktop", message);
}

pub fn append_startup_log(message: &str) {
    append_log("startup", message);
}

pub fn append_shutdown_log(message: &str) {
    append_log("shutdown", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_log_line_tags_channel() {
        let line = format_log_line("startup", "window created");
        assert!(line.starts_with('['));
        assert!(line.ends_with("] [startup] window created\n"));
    }

    #[test]
    fn resolve_desktop_log_path_prefers_config_dir() {
        let path = resolve_desktop_log_path(Some(PathBuf::from("/cfg")), DESKTOP_LOG_FILE);
        assert_eq!(path, PathBuf::from("/cfg").join(DESKTOP_LOG_FILE));
    }

    #[test]
    fn set_log_dir_redirects_appended_lines() {
        let dir = tempfile::tempdir().unwrap();
        set_log_dir(dir.path());
        assert_eq!(desktop_log_path(), dir.path().join(DESKTOP_LOG_FILE));

        append_desktop_log("make-app wrote site spec /cfg/Mail.json");
        let written = fs::read_to_string(dir.path().join(DESKTOP_LOG_FILE)).unwrap();
        assert!(written.contains("[desktop] make-app wrote site spec /cfg/Mail.json"));
    }
}
