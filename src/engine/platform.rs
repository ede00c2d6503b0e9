// Host-specific bits: discard target, terminal control, file manager

use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType, SetTitle},
};
use std::io;
use std::path::Path;

/// Output target that discards the analysis pass
pub fn null_output_target() -> &'static str {
    if cfg!(windows) { "NUL" } else { "/dev/null" }
}

/// Set the terminal window title
pub fn set_terminal_title(title: &str) -> io::Result<()> {
    execute!(io::stdout(), SetTitle(title))
}

/// Clear the screen and move the cursor home
pub fn clear_screen() -> io::Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))
}

/// Open a directory in the platform file manager
pub fn open_directory(path: &Path) -> Result<()> {
    open::that(path).with_context(|| format!("Failed to open {}", path.display()))
}
