use crate::encoding::TextEncoding;
use crate::error::Result;
use crate::layout::{LABEL_DIGITS, PALETTE_SIZE, ROW_WIDTH};

/// Placeholder for bytes outside the printable range in character mode.
const NON_PRINTABLE: &str = " .";

/// Color slot for a drawn string.
///
/// The fixed slots map to a small set of terminal colors; `Rainbow` indexes
/// into a palette of [`PALETTE_SIZE`] entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSelector {
    #[default]
    Default,
    Null,
    Error,
    Help,
    Rainbow(u8),
}

/// Format a byte as the two characters shown in its cell.
///
/// Byte mode gives lowercase hex. Character mode gives a space followed by
/// the decoded character for `32..=127`, and `" ."` for everything else.
pub fn format_byte(byte: u8, encoding: &TextEncoding, char_mode: bool) -> Result<String> {
    if !char_mode {
        return Ok(format!("{byte:02x}"));
    }
    if !(32..=127).contains(&byte) {
        return Ok(NON_PRINTABLE.to_string());
    }
    let c = encoding.decode_byte(byte)?;
    // DEL decodes to a control character; keep the cell two columns wide.
    let c = if c.is_control() { '.' } else { c };
    Ok(format!(" {c}"))
}

/// Offset label shown left of each grid row, e.g. `0x00001f0`.
pub fn format_label(offset: u64) -> String {
    format!("0x{offset:0width$x}", width = LABEL_DIGITS)
}

/// Column legend: byte-mode cells for `0..ROW_WIDTH`, space separated.
pub fn column_header() -> String {
    (0..ROW_WIDTH as u8)
        .map(|i| format!("{i:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pick the color for the byte at absolute `offset`.
pub fn color_for(offset: u64, byte: u8, rainbow: bool) -> ColorSelector {
    if rainbow {
        ColorSelector::Rainbow((offset % PALETTE_SIZE as u64) as u8)
    } else if byte == 0 {
        ColorSelector::Null
    } else {
        ColorSelector::Default
    }
}

/// Human-readable size with binary thresholds.
///
/// The largest class is labelled `bc`.
pub fn human_size(size: u64) -> String {
    const UNITS: [&str; 5] = ["Kb", "Mb", "Gb", "Tb", "bc"];

    if size < 1 << 10 {
        return format!("{size} b");
    }
    let mut exp = 1;
    while exp < UNITS.len() && size >= 1u64 << (10 * (exp + 1)) {
        exp += 1;
    }
    let scaled = size as f64 / (1u64 << (10 * exp)) as f64;
    // Ties go to the even digit: 1088 bytes is 1.062 Kb.
    let rounded = (scaled * 1000.0).round_ties_even() / 1000.0;
    // `{:?}` keeps a trailing `.0` for whole numbers.
    format!("{rounded:?} {}", UNITS[exp - 1])
}

/// Truncate `text` to at most `width` characters, ending with `...` when cut.
pub fn elide(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
