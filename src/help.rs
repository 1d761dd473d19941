use std::ffi::OsStr;

use current_platform::CURRENT_PLATFORM;
use strum::VariantArray;

use crate::config::{Setting, CONFIG_FILE};

pub fn maybe_print_help_and_exit(bin_name: &str) {
    if let Some(arg) = std::env::args_os().nth(1) {
        if arg.as_os_str() == OsStr::new("--help") || arg.as_os_str() == OsStr::new("-help") {
            print_help_and_exit(bin_name)
        }
    }
}

fn print_help_and_exit(bin_name: &str) -> ! {
    print_help(bin_name);
    std::process::exit(0);
}

fn print_help(bin_name: &str) {
    println!("Version: {}", version_string());
    println!("License: {}", env!("CARGO_PKG_LICENSE"));
    println!("Usage: {bin_name} [url]");
    println!();
    println!("Fetches one image, fits it into the target box and writes it to the output directory,");
    println!("named after the last segment of the URL. Existing files are never overwritten.");
    println!();
    println!("Settings (environment, or {CONFIG_FILE}.toml in the working directory):");
    for setting in Setting::VARIANTS {
        println!("  {:27} {}", setting.env_var(), setting.help_text());
    }
}

fn version_string() -> String {
    let cpu = CURRENT_PLATFORM.split('-').next().unwrap_or("unknown");
    let version = env!("CARGO_PKG_VERSION");
    let repo = env!("CARGO_PKG_REPOSITORY");

    format!("resize-once {version} {cpu} {repo}")
}
