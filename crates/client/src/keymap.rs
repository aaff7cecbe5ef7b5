use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Viewer command derived from a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the viewer.
    Quit,
    /// Scroll up by one row.
    ScrollUp,
    /// Scroll up by one page.
    PageUp,
    /// Scroll down by one row, unless the end is already shown.
    ScrollDown,
    /// Scroll down by one page, unless the end is already shown.
    PageDown,
    /// Switch between byte and character display.
    ToggleMode,
    /// Show or hide the help panel.
    ToggleHelp,
}

/// Translate a crossterm [`KeyEvent`] into a viewer [`Command`].
///
/// Returns `None` for keys that have no associated command.
pub fn map_key_event(ev: KeyEvent) -> Option<Command> {
    let ctrl = ev.modifiers.contains(KeyModifiers::CONTROL);
    match ev.code {
        KeyCode::Char('c') if ctrl => Some(Command::Quit),
        KeyCode::Char('w') if ctrl => Some(Command::PageUp),
        KeyCode::Char('s') if ctrl => Some(Command::PageDown),
        KeyCode::Char(_) if ctrl || ev.modifiers.contains(KeyModifiers::ALT) => None,
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Char('w') => Some(Command::ScrollUp),
        KeyCode::Char('s') => Some(Command::ScrollDown),
        KeyCode::Char('m') => Some(Command::ToggleMode),
        KeyCode::Char('h') => Some(Command::ToggleHelp),
        KeyCode::Up => Some(Command::ScrollUp),
        KeyCode::Down => Some(Command::ScrollDown),
        KeyCode::PageUp => Some(Command::PageUp),
        KeyCode::PageDown => Some(Command::PageDown),
        _ => None,
    }
}
