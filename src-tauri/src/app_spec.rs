use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ShellError, ShellResult};

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppSpec {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub use_tray_icon: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub minimize_to_tray: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub minimize_on_close: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub persist_window_appearance: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowBehaviours {
    pub start_hidden: bool,
    pub hide_on_minimize: bool,
    pub minimize_on_close: bool,
    pub persist_layout: bool,
}

impl AppSpec {
    pub fn validate(&self) -> ShellResult<()> {
        if self.title.trim().is_empty() {
            return Err(ShellError::InvalidSpec("title is empty".to_string()));
        }
        if self.url.trim().is_empty() {
            return Err(ShellError::InvalidSpec("url is empty".to_string()));
        }
        Ok(())
    }

    pub fn site_url(&self) -> ShellResult<Url> {
        let raw = self.url.trim();
        let parsed = Url::parse(raw).map_err(|source| ShellError::InvalidUrl {
            url: raw.to_string(),
            source,
        })?;
        match parsed.scheme() {
            "http" | "https" | "file" => Ok(parsed),
            scheme => Err(ShellError::InvalidSpec(format!(
                "unsupported URL scheme '{scheme}'"
            ))),
        }
    }

    pub fn hides_on_minimize(&self) -> bool {
        self.use_tray_icon && self.minimize_to_tray
    }

    pub fn starts_hidden(&self) -> bool {
        self.use_tray_icon && self.start_hidden.unwrap_or(true)
    }

    // Hiding is only offered while a tray icon exists to bring the window back.
    pub fn window_behaviours(&self, tray_ready: bool) -> WindowBehaviours {
        WindowBehaviours {
            start_hidden: tray_ready && self.starts_hidden(),
            hide_on_minimize: tray_ready && self.hides_on_minimize(),
            minimize_on_close: self.minimize_on_close,
            persist_layout: self.persist_window_appearance,
        }
    }

    pub fn icon_path(&self) -> Option<&Path> {
        self.icon
            .as_deref()
            .map(str::trim)
            .filter(|icon| !icon.is_empty())
            .map(Path::new)
    }

    pub fn to_json(&self) -> ShellResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(raw: &str) -> ShellResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> ShellResult<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|error| ShellError::io("read site spec", path, error))?;
        let spec: Self = serde_json::from_str(&raw).map_err(|source| ShellError::SpecParse {
            path: path.to_path_buf(),
            source,
        })?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn save(&self, path: &Path) -> ShellResult<()> {
        self.validate()?;
        if let Some(parent_dir) = path.parent() {
            fs::create_dir_all(parent_dir)
                .map_err(|error| ShellError::io("create config directory", parent_dir, error))?;
        }
        fs::write(path, self.to_json()?)
            .map_err(|error| ShellError::io("write site spec", path, error))
    }
}
