use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use hexviewer_core::format::{column_header, elide, format_label};
use hexviewer_core::layout::{
    CELL_LEFT, FOOTER_TOP, GRID_TOP, GRID_WIDTH, LABEL_WIDTH, PANEL_HEIGHT, PANEL_LEFT, PANEL_TOP,
    PANEL_WIDTH, ROW_WIDTH, ROWS, WIDTH, separator, window_len,
};
use hexviewer_core::wrap::{fits, wrap};
use hexviewer_core::{
    ByteSource, ColorSelector, Overlay, Result, TextEncoding, ViewerError, ViewportState,
    color_for, format_byte, human_size,
};
use ratatui::style::Modifier;

use crate::canvas::Canvas;

/// Prefix put in front of a short error message.
const INFO_LABEL: &str = "Information: ";
/// Indent of wrapped error lines.
const INFO_INDENT: &str = "   ";
/// Columns available to the footer text left of the right border.
const FOOTER_TEXT_WIDTH: usize = WIDTH as usize - 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emphasis {
    Plain,
    Heading,
    Title,
}

impl Emphasis {
    fn modifier(self) -> Modifier {
        match self {
            Emphasis::Plain => Modifier::empty(),
            Emphasis::Heading => Modifier::UNDERLINED,
            Emphasis::Title => Modifier::BOLD | Modifier::UNDERLINED,
        }
    }
}

const HELP: &[(&str, Emphasis)] = &[
    ("Help for HexViewer.", Emphasis::Title),
    ("View any file as a grid of bytes.", Emphasis::Plain),
    ("Controls and keyboard shortcuts:", Emphasis::Heading),
    ("  1. `h` - show or hide this help;", Emphasis::Plain),
    ("  2. `w`, Up - scroll up one row;", Emphasis::Plain),
    ("     `ctrl+w`, PgUp - scroll up (step=16);", Emphasis::Plain),
    ("  3. `s`, Down - scroll down one row;", Emphasis::Plain),
    ("     `ctrl+s`, PgDn - scroll down (step=16);", Emphasis::Plain),
    ("  4. `m` - switch between byte mode", Emphasis::Plain),
    ("     and character mode;", Emphasis::Plain),
    ("  5. `q`, `ctrl+c` - exit the program.", Emphasis::Plain),
    ("", Emphasis::Plain),
    ("If the window was stretched, press any key", Emphasis::Plain),
    ("to bring it back to its fixed size.", Emphasis::Plain),
    ("", Emphasis::Plain),
    ("Thank you for choosing this program! :D", Emphasis::Plain),
];

/// Details about the viewed file shown under the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    pub size: u64,
    pub cwd: PathBuf,
}

impl FileInfo {
    /// Collect info for `path`, made absolute against the working directory.
    pub fn new(path: &Path, size: u64) -> Result<Self> {
        Ok(Self {
            path: std::path::absolute(path)?,
            size,
            cwd: std::env::current_dir()?,
        })
    }
}

/// Draws the whole window for the current viewport state.
#[derive(Debug, Clone)]
pub struct RenderEngine {
    encoding: TextEncoding,
    info: FileInfo,
}

impl RenderEngine {
    pub fn new(encoding: TextEncoding, info: FileInfo) -> Self {
        Self { encoding, info }
    }

    /// Redraw everything: header, body (grid or overlay) and footer.
    ///
    /// Drawing the grid re-reads the window and updates the end flag.
    pub fn render<R: Read + Seek>(
        &self,
        state: &mut ViewportState,
        source: &mut ByteSource<R>,
        canvas: &mut Canvas,
    ) -> Result<()> {
        canvas.clear();
        self.draw_header(canvas)?;
        self.draw_footer(canvas)?;
        match state.overlay().clone() {
            Overlay::None => self.draw_grid(state, source, canvas),
            Overlay::Help => {
                draw_frame(canvas)?;
                draw_help(canvas)
            }
            Overlay::Error(message) => {
                draw_frame(canvas)?;
                draw_error(canvas, &message)
            }
        }
    }

    fn draw_header(&self, canvas: &mut Canvas) -> Result<()> {
        let title = format!("HexViewer | {} |", column_header());
        canvas.put(0, 1, &title, ColorSelector::Default)?;
        canvas.put(1, 0, &separator(), ColorSelector::Default)
    }

    fn draw_footer(&self, canvas: &mut Canvas) -> Result<()> {
        canvas.put(FOOTER_TOP, 0, &separator(), ColorSelector::Default)?;
        let rows = [
            ("File", self.info.path.display().to_string()),
            ("Size", human_size(self.info.size)),
            ("CWD", self.info.cwd.display().to_string()),
        ];
        for (i, (name, value)) in rows.iter().enumerate() {
            let text = format!("{name:<width$}| {value}", width = LABEL_WIDTH - 1);
            let text = elide(&text, FOOTER_TEXT_WIDTH);
            let line = format!("{text:<width$}|", width = WIDTH as usize - 2);
            canvas.put(FOOTER_TOP + 1 + i as u16, 1, &line, ColorSelector::Default)?;
        }
        canvas.put(FOOTER_TOP + 4, 0, &separator(), ColorSelector::Default)
    }

    fn draw_grid<R: Read + Seek>(
        &self,
        state: &mut ViewportState,
        source: &mut ByteSource<R>,
        canvas: &mut Canvas,
    ) -> Result<()> {
        let bytes = read_window(state, source)?;
        let position = state.position();
        let mut is_end = false;

        for row in 0..ROWS {
            let y = GRID_TOP + row as u16;
            let start = (row * ROW_WIDTH).min(bytes.len());
            let end = (start + ROW_WIDTH).min(bytes.len());
            let chunk = &bytes[start..end];

            if is_end || chunk.is_empty() {
                is_end = true;
                draw_blank_row(canvas, y)?;
                continue;
            }

            let offset = position + (row * ROW_WIDTH) as u64;
            let label = format!("{} | ", format_label(offset));
            canvas.put(y, 1, &label, ColorSelector::Default)?;

            for (col, &byte) in chunk.iter().enumerate() {
                let cell = format_byte(byte, &self.encoding, state.char_mode())?;
                let color = color_for(offset + col as u64, byte, state.rainbow());
                canvas.put(y, CELL_LEFT + 3 * col as u16, &cell, color)?;
            }

            if chunk.len() < ROW_WIDTH {
                is_end = true;
                let pad_from = CELL_LEFT + 3 * chunk.len() as u16;
                let pad = " ".repeat((WIDTH - 1 - pad_from) as usize);
                canvas.put(y, pad_from, &pad, ColorSelector::Default)?;
            }
            canvas.put(y, WIDTH - 1, "|", ColorSelector::Default)?;
        }

        state.set_end(is_end);
        Ok(())
    }
}

/// Read the window at the current position.
///
/// A window lying entirely past the end steps back one row, once. An empty
/// window after that means the file shrank under us.
fn read_window<R: Read + Seek>(
    state: &mut ViewportState,
    source: &mut ByteSource<R>,
) -> Result<Vec<u8>> {
    let mut bytes = source.read(state.position(), window_len())?;
    if bytes.is_empty() && state.scroll_by(-1) {
        bytes = source.read(state.position(), window_len())?;
    }
    if bytes.is_empty() {
        return Err(ViewerError::EmptyWindow {
            position: state.position(),
        });
    }
    Ok(bytes)
}

fn draw_blank_row(canvas: &mut Canvas, y: u16) -> Result<()> {
    let line = format!(
        "{}|{}|",
        " ".repeat(LABEL_WIDTH),
        " ".repeat(GRID_WIDTH)
    );
    canvas.put(y, 0, &line, ColorSelector::Default)
}

/// Grid borders without content, drawn behind an overlay.
fn draw_frame(canvas: &mut Canvas) -> Result<()> {
    (0..ROWS).try_for_each(|row| draw_blank_row(canvas, GRID_TOP + row as u16))
}

fn draw_help(canvas: &mut Canvas) -> Result<()> {
    let mut row = 0;
    for &(text, emphasis) in HELP {
        let lines = if fits(text, PANEL_WIDTH) {
            vec![text.to_string()]
        } else {
            wrap(text, PANEL_WIDTH)
        };
        for line in lines {
            if row >= PANEL_HEIGHT {
                return Ok(());
            }
            canvas.put_styled(
                PANEL_TOP + row as u16,
                PANEL_LEFT,
                &line,
                ColorSelector::Help,
                emphasis.modifier(),
            )?;
            row += 1;
        }
    }
    Ok(())
}

fn draw_error(canvas: &mut Canvas, message: &str) -> Result<()> {
    canvas.put(PANEL_TOP, PANEL_LEFT, "Exception!", ColorSelector::Error)?;

    if fits(message, PANEL_WIDTH - INFO_LABEL.len()) {
        let line = format!("{INFO_LABEL}{message}");
        return canvas.put(PANEL_TOP + 1, PANEL_LEFT, &line, ColorSelector::Error);
    }

    canvas.put(PANEL_TOP + 1, PANEL_LEFT, INFO_LABEL.trim_end(), ColorSelector::Error)?;
    let width = PANEL_WIDTH - INFO_INDENT.len() + 1;
    let mut lines = wrap(message, width);
    let room = PANEL_HEIGHT - 2;
    if lines.len() > room {
        lines.truncate(room);
        if let Some(last) = lines.last_mut() {
            *last = elide(&format!("{last} ..."), width - 1);
        }
    }
    for (i, line) in lines.iter().enumerate() {
        let text = format!("{INFO_INDENT}{line}");
        canvas.put(PANEL_TOP + 2 + i as u16, PANEL_LEFT, &text, ColorSelector::Error)?;
    }
    Ok(())
}
