//! Off-screen drawing surface with the fixed window geometry.
//!
//! Renders go into a [`Canvas`] first and the terminal driver copies it to
//! the screen, so drawing can fail with a proper error instead of panicking
//! inside the backend.

use hexviewer_core::ColorSelector;
use hexviewer_core::layout::{HEIGHT, WIDTH};
use hexviewer_core::{Result, ViewerError};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

/// Terminal styles registered for each color slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Palette;

impl Palette {
    pub fn style(&self, color: ColorSelector) -> Style {
        match color {
            ColorSelector::Default => Style::default(),
            ColorSelector::Null => Style::default().fg(Color::Green).bg(Color::Black),
            ColorSelector::Error => Style::default().fg(Color::Red).bg(Color::Black),
            ColorSelector::Help => Style::default().fg(Color::Yellow).bg(Color::Black),
            ColorSelector::Rainbow(idx) => Style::default().fg(Color::Indexed(idx)).bg(Color::Reset),
        }
    }
}

/// Fixed-size character grid addressed by (row, column).
#[derive(Debug, Clone)]
pub struct Canvas {
    buffer: Buffer,
    palette: Palette,
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, WIDTH, HEIGHT)),
            palette: Palette,
        }
    }

    /// Blank every cell.
    pub fn clear(&mut self) {
        self.buffer.reset();
    }

    /// Draw `text` starting at (`row`, `col`) in the given color slot.
    pub fn put(&mut self, row: u16, col: u16, text: &str, color: ColorSelector) -> Result<()> {
        self.put_styled(row, col, text, color, Modifier::empty())
    }

    /// Like [`Canvas::put`] with extra text attributes.
    pub fn put_styled(
        &mut self,
        row: u16,
        col: u16,
        text: &str,
        color: ColorSelector,
        modifier: Modifier,
    ) -> Result<()> {
        let len = text.chars().count();
        if row >= HEIGHT || col as usize + len > WIDTH as usize {
            return Err(ViewerError::OutOfBounds { row, col });
        }
        let style = self.palette.style(color).add_modifier(modifier);
        self.buffer.set_string(col, row, text, style);
        Ok(())
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Text of one screen row, for inspection.
    pub fn row_text(&self, row: u16) -> String {
        (0..WIDTH).map(|x| self.buffer[(x, row)].symbol()).collect()
    }

    /// Style of a single cell, for inspection.
    pub fn style_at(&self, row: u16, col: u16) -> Style {
        self.buffer[(col, row)].style()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}
