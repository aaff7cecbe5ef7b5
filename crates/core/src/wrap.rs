//! Greedy word wrapping for text shown inside the overlay panel.

/// A line under construction: its current width and the words placed on it.
#[derive(Debug, Default)]
struct WrapUnit<'a> {
    width: usize,
    words: Vec<&'a str>,
}

impl<'a> WrapUnit<'a> {
    fn start(word: &'a str) -> Self {
        Self {
            width: word.chars().count(),
            words: vec![word],
        }
    }

    fn line(&self) -> String {
        self.words.join(" ")
    }
}

/// Whether `message` fits on one line of `width` columns without wrapping.
pub fn fits(message: &str, width: usize) -> bool {
    message.chars().count() <= width
}

/// Pack the words of `message` into lines shorter than `width`.
///
/// A word joins the current line while `current + 1 + word < width`, so no
/// line is longer than `width - 1`. Words that are longer than that on their
/// own are cut into pieces of `width - 1` characters.
pub fn wrap(message: &str, width: usize) -> Vec<String> {
    let limit = width.saturating_sub(1).max(1);
    let mut units: Vec<WrapUnit<'_>> = Vec::new();

    for word in message.split_whitespace().flat_map(|w| split_long(w, limit)) {
        let len = word.chars().count();
        match units.last_mut() {
            Some(unit) if unit.width + 1 + len < width => {
                unit.width += 1 + len;
                unit.words.push(word);
            }
            _ => units.push(WrapUnit::start(word)),
        }
    }

    units.iter().map(WrapUnit::line).collect()
}

fn split_long(word: &str, limit: usize) -> Vec<&str> {
    if word.chars().count() <= limit {
        return vec![word];
    }
    let mut pieces = Vec::new();
    let mut rest = word;
    while !rest.is_empty() {
        let cut = rest
            .char_indices()
            .nth(limit)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(cut);
        pieces.push(head);
        rest = tail;
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn packs_words_greedily() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 12);
        assert_eq!(
            lines,
            vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]
        );
    }

    #[test]
    fn boundary_is_strict() {
        // "aaaa bbbb" is 9 wide: allowed for width 10, not for width 9.
        assert_eq!(wrap("aaaa bbbb", 10), vec!["aaaa bbbb"]);
        assert_eq!(wrap("aaaa bbbb", 9), vec!["aaaa", "bbbb"]);
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(wrap("  a\tb\n\nc  ", 80), vec!["a b c"]);
    }

    #[test]
    fn empty_message_has_no_lines() {
        assert!(wrap("", 10).is_empty());
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn long_word_is_split() {
        assert_eq!(wrap("abcdefghij", 5), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn long_path_is_cut_into_chunks() {
        let lines = wrap("see /some/very/long/path/to/file.bin now", 10);
        assert_eq!(
            lines,
            vec!["see", "/some/ver", "y/long/pa", "th/to/fil", "e.bin now"]
        );
        // The pieces keep every character, but the word itself no longer
        // appears as one unit.
        let joined: String = lines[1..].concat();
        assert!(joined.starts_with("/some/very/long/path/to/file.bin"));
        assert!(lines.iter().all(|l| l.chars().count() <= 9));
    }

    #[test]
    fn fits_checks_width() {
        assert!(fits("12345", 5));
        assert!(!fits("123456", 5));
    }

    proptest! {
        #[test]
        fn lines_stay_within_budget(
            words in prop::collection::vec("[a-z]{1,12}", 0..40),
            width in 14usize..60,
        ) {
            let message = words.join(" ");
            let lines = wrap(&message, width);
            for line in &lines {
                prop_assert!(line.chars().count() <= width - 1);
            }
            let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
            prop_assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
