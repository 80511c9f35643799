use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use crate::error::{ShellError, ShellResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcutOptions {
    pub categories: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    pub name: String,
    pub exec_binary: String,
    pub spec_path: PathBuf,
    pub icon: Option<String>,
    pub categories: Vec<String>,
}

pub fn parse_categories(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|category| !category.is_empty())
        .map(str::to_string)
        .collect()
}

// Desktop entry Exec values reserve `"`, `` ` ``, `$` and `\` inside quotes.
fn quote_exec_arg(arg: &str) -> String {
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for ch in arg.chars() {
        if matches!(ch, '"' | '`' | '$' | '\\') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

fn single_line(value: &str) -> String {
    value.replace(['\n', '\r'], " ")
}

impl DesktopEntry {
    pub fn render(&self) -> String {
        let mut text = String::from("[Desktop Entry]\n");
        let categories = if self.categories.is_empty() {
            String::new()
        } else {
            format!("{};", self.categories.join(";"))
        };
        let _ = writeln!(text, "Version=1.0");
        let _ = writeln!(text, "Type=Application");
        let _ = writeln!(text, "Name={}", single_line(&self.name));
        let _ = writeln!(text, "Comment=");
        let _ = writeln!(
            text,
            "Exec={} {}",
            self.exec_binary,
            quote_exec_arg(&self.spec_path.to_string_lossy())
        );
        let _ = writeln!(
            text,
            "Icon={}",
            self.icon.as_deref().map(single_line).unwrap_or_default()
        );
        let _ = writeln!(text, "Path=");
        let _ = writeln!(text, "Terminal=false");
        let _ = writeln!(text, "StartupNotify=false");
        let _ = writeln!(text, "Categories={categories}");
        text
    }

    pub fn write(&self, path: &Path) -> ShellResult<()> {
        if let Some(parent_dir) = path.parent() {
            fs::create_dir_all(parent_dir).map_err(|error| {
                ShellError::io("create applications directory", parent_dir, error)
            })?;
        }
        fs::write(path, self.render())
            .map_err(|error| ShellError::io("write desktop entry", path, error))
    }
}
