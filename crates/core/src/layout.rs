//! Fixed screen geometry shared by the renderer and the terminal driver.
//!
//! The window is never reflowed: the driver is asked to lock the terminal to
//! [`WIDTH`] x [`HEIGHT`] and every component draws at these coordinates.

/// Bytes shown per grid row.
pub const ROW_WIDTH: usize = 16;
/// Grid rows shown at once. Also the page step.
pub const ROWS: usize = 16;
/// Hex digits in the left offset label.
pub const LABEL_DIGITS: usize = 7;
/// Colors cycled through in rainbow mode.
pub const PALETTE_SIZE: usize = 252;

/// Width of the label column, `0x` prefix and trailing space included.
pub const LABEL_WIDTH: usize = 3 + LABEL_DIGITS + 1;
/// Width of the cell area between the two vertical borders.
pub const GRID_WIDTH: usize = 3 * ROW_WIDTH + 1;

/// Total window width in columns.
pub const WIDTH: u16 = (3 + LABEL_DIGITS + 1 + 3 * ROW_WIDTH + 3) as u16;
/// Total window height in rows.
pub const HEIGHT: u16 = (2 + ROWS + 5) as u16;

/// First screen row of the byte grid.
pub const GRID_TOP: u16 = 2;
/// Screen column of the first cell.
pub const CELL_LEFT: u16 = (3 + LABEL_DIGITS + 3) as u16;
/// Screen row of the separator under the grid.
pub const FOOTER_TOP: u16 = GRID_TOP + ROWS as u16;

/// Overlay panel: same rows as the grid, spanning the cell area.
pub const PANEL_TOP: u16 = GRID_TOP;
pub const PANEL_LEFT: u16 = CELL_LEFT;
pub const PANEL_WIDTH: usize = 3 * ROW_WIDTH - 1;
pub const PANEL_HEIGHT: usize = ROWS;

/// Number of bytes requested per render.
pub const fn window_len() -> usize {
    ROWS * ROW_WIDTH
}

/// Horizontal rule drawn above and below the grid.
pub fn separator() -> String {
    format!("{}+{}+", "-".repeat(LABEL_WIDTH), "-".repeat(GRID_WIDTH))
}
