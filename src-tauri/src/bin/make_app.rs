use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;
use ssb_shell_lib::{
    append_desktop_log, logging,
    make_app::{run_make_app, MakeAppArgs},
    runtime_paths,
    wizard::Platform,
};

fn main() -> ExitCode {
    let args = MakeAppArgs::parse();
    if let Ok(config_dir) = runtime_paths::config_dir(args.config_dir.as_deref()) {
        logging::set_log_dir(&config_dir);
    }
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    match run_make_app(&args, stdin.lock(), &mut stdout, Platform::current()) {
        Ok(written) => {
            append_desktop_log(&format!(
                "make-app wrote site spec {}",
                written.spec_path.display()
            ));
            ExitCode::SUCCESS
        }
        Err(error) => {
            let _ = stdout.flush();
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
