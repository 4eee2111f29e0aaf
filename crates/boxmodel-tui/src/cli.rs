//! CLI argument parsing for boxmodel-tui.

use boxmodel_types::ModifierKey;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "boxmodel-tui")]
#[command(about = "Boxmodel launcher in the terminal", version)]
pub struct Cli {
    /// Enable debug logging (logs to /tmp/boxmodel-tui.log)
    #[arg(short, long)]
    pub debug: bool,

    /// Config file to use instead of the one in the config directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Text to pre-fill the input line with
    #[arg(short, long, value_name = "TEXT")]
    pub input: Option<String>,

    /// Modifier that shows fallbacks while held (shift, meta, control, alt)
    #[arg(long, value_name = "KEY")]
    pub mod_fallback: Option<ModifierKey>,

    /// Modifier that shows the selected row's actions while held
    #[arg(long, value_name = "KEY")]
    pub mod_actions: Option<ModifierKey>,
}
