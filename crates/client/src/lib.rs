pub mod canvas;
pub mod keymap;
pub mod render;
pub mod session;
pub mod tui;

pub use session::{Flow, SessionConfig, Viewer};

use anyhow::Result;

/// Open the file and run an interactive session on the real terminal.
///
/// The file and the terminal are both released when this returns, whether
/// the session ended normally or with an error.
pub fn run(config: &SessionConfig) -> Result<()> {
    let mut viewer = Viewer::open(config)?;
    let mut tui = tui::Tui::stdout()?;
    viewer.run(&mut tui, tui::events())
}
