use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse site spec {}: {source}", .path.display())]
    SpecParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid site spec: {0}")]
    InvalidSpec(String),

    #[error("Invalid site URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Input closed before all questions were answered")]
    InputClosed,

    #[error("Home directory is unavailable; set SSB_SHELL_HOME")]
    HomeUnavailable,

    #[error("Host runtime error: {0}")]
    Host(String),
}

impl ShellError {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

impl From<tauri::Error> for ShellError {
    fn from(error: tauri::Error) -> Self {
        Self::Host(error.to_string())
    }
}

pub type ShellResult<T> = Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_message_names_action_and_path() {
        let error = ShellError::io(
            "write site spec",
            "/tmp/site.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            error.to_string(),
            "Failed to write site spec /tmp/site.json: denied"
        );
    }
}
