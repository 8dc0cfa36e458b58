use std::path::PathBuf;

use clap::Parser;

/// Delete a file even when other processes hold it open.
#[derive(Debug, Parser)]
#[command(name = "unhold", version, about)]
pub struct Cli {
    /// File to delete (or move, when --move-to is given)
    pub path: PathBuf,

    /// Move the file to this destination instead of deleting it
    #[arg(long, value_name = "DEST")]
    pub move_to: Option<PathBuf>,

    /// Register a boot-time fallback when the operation cannot succeed
    /// right now
    #[arg(long)]
    pub schedule_on_reboot: bool,
}
