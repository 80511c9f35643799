#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    ssb_shell_lib::app_runtime::run();
}
