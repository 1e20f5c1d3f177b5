use clap::Parser;
use std::path::PathBuf;

// Build version with decoder info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Decode: image crate (PNG/JPEG, pure Rust)\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Split-compare viewer for multi-channel render sequences
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Path to a scene manifest (JSON) - optional, falls back to the built-in scene list
    #[arg(value_name = "MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Start in fullscreen mode
    #[arg(short = 'F', long = "fullscreen")]
    pub fullscreen: bool,

    /// Disable autoplay on startup (scene 0 plays by default)
    #[arg(long = "no-autoplay")]
    pub no_autoplay: bool,

    /// Scene index to activate at startup (0-based)
    #[arg(short = 's', long = "scene", value_name = "N")]
    pub scene: Option<usize>,

    /// Enable debug logging to file (default: wipeview.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}
