use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use clap::Parser;

use crate::{
    desktop_entry::{self, DesktopEntry},
    error::ShellResult,
    runtime_paths,
    wizard::{self, Platform, WizardOutcome},
    RUNTIME_BINARY_NAME,
};

/// Interactively create a single site browser app.
#[derive(Debug, Parser)]
#[command(name = "make-app", version, about)]
pub struct MakeAppArgs {
    /// Directory for site spec files (defaults to $SSB_SHELL_HOME or ~/.ssb-shell).
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Directory for desktop shortcut files.
    #[arg(long)]
    pub applications_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenApp {
    pub spec_path: PathBuf,
    pub shortcut_path: Option<PathBuf>,
}

pub fn write_app<W: Write>(
    outcome: &WizardOutcome,
    platform: Platform,
    config_dir: &Path,
    applications_dir: Option<&Path>,
    output: &mut W,
) -> ShellResult<WrittenApp> {
    let spec = &outcome.spec;
    let spec_path = runtime_paths::spec_path_for_title(config_dir, &spec.title);
    writeln!(output, "Writing to {}", spec_path.display())?;
    spec.save(&spec_path)?;

    if !platform.supports_shortcuts() {
        writeln!(
            output,
            "I'm sorry, but automated shortcut generation is not available on this device."
        )?;
        return Ok(WrittenApp {
            spec_path,
            shortcut_path: None,
        });
    }

    let applications_dir = runtime_paths::applications_dir(applications_dir)?;
    let shortcut_path = runtime_paths::desktop_entry_path_for_title(&applications_dir, &spec.title);
    let entry = DesktopEntry {
        name: spec.title.clone(),
        exec_binary: RUNTIME_BINARY_NAME.to_string(),
        spec_path: spec_path.clone(),
        icon: spec.icon.clone(),
        categories: outcome
            .shortcut
            .categories
            .as_deref()
            .map(desktop_entry::parse_categories)
            .unwrap_or_default(),
    };
    writeln!(output, "Writing to {}", shortcut_path.display())?;
    entry.write(&shortcut_path)?;

    Ok(WrittenApp {
        spec_path,
        shortcut_path: Some(shortcut_path),
    })
}

pub fn run_make_app<R, W>(
    args: &MakeAppArgs,
    input: R,
    output: &mut W,
    platform: Platform,
) -> ShellResult<WrittenApp>
where
    R: BufRead,
    W: Write,
{
    let config_dir = runtime_paths::config_dir(args.config_dir.as_deref())?;
    let outcome = wizard::run_wizard(input, output, platform)?;
    write_app(
        &outcome,
        platform,
        &config_dir,
        args.applications_dir.as_deref(),
        output,
    )
}
