// Viewport state: where the grid starts, display modes and which overlay is up.

use crate::layout::ROW_WIDTH;

/// Panel shown in place of the byte grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Help,
    /// Description of the error raised by the last step.
    Error(String),
}

/// Scroll position and display flags for one viewing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportState {
    position: u64,
    position_max: u64,
    is_end: bool,
    char_mode: bool,
    rainbow: bool,
    overlay: Overlay,
}

impl ViewportState {
    pub fn new(rainbow: bool) -> Self {
        Self {
            position: 0,
            position_max: 0,
            is_end: false,
            char_mode: false,
            rainbow,
            overlay: Overlay::None,
        }
    }

    /// Offset of the first byte in the top-left cell.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Highest position reached so far.
    pub fn position_max(&self) -> u64 {
        self.position_max
    }

    /// True once the last render reached end of file.
    pub fn is_end(&self) -> bool {
        self.is_end
    }

    pub fn char_mode(&self) -> bool {
        self.char_mode
    }

    pub fn rainbow(&self) -> bool {
        self.rainbow
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn help_shown(&self) -> bool {
        self.overlay == Overlay::Help
    }

    pub fn error_shown(&self) -> bool {
        matches!(self.overlay, Overlay::Error(_))
    }

    /// Move by `delta_rows` grid rows.
    ///
    /// Scrolling up at the very start is ignored. Otherwise the position is
    /// clamped at zero and the end flag is cleared until the next render.
    /// Returns `false` when nothing changed.
    pub fn scroll_by(&mut self, delta_rows: i64) -> bool {
        if self.position == 0 && delta_rows < 0 {
            return false;
        }
        let delta = delta_rows.saturating_mul(ROW_WIDTH as i64);
        self.position = if delta < 0 {
            self.position.saturating_sub(delta.unsigned_abs())
        } else {
            self.position.saturating_add(delta as u64)
        };
        self.position_max = self.position_max.max(self.position);
        self.is_end = false;
        tracing::debug!(position = self.position, "scrolled");
        true
    }

    /// Record whether the window just read reached end of file.
    pub fn set_end(&mut self, is_end: bool) {
        self.is_end = is_end;
    }

    pub fn toggle_char_mode(&mut self) {
        self.char_mode = !self.char_mode;
        tracing::debug!(char_mode = self.char_mode, "display mode toggled");
    }

    /// Show help, or go back to the grid if help is already up.
    pub fn toggle_help(&mut self) {
        self.overlay = match self.overlay {
            Overlay::Help => Overlay::None,
            _ => Overlay::Help,
        };
    }

    /// Replace whatever is on screen with an error description.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.overlay = Overlay::Error(message.into());
    }

    /// Drop a stale error overlay after a successful step.
    pub fn clear_error(&mut self) {
        if self.error_shown() {
            self.overlay = Overlay::None;
        }
    }
}
