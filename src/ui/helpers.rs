//! Shared rendering utilities.
//!
//! Components draw into a frame `String` rather than straight to stdout; the
//! renderer prints the finished frame once. Text measurements use character
//! counts, not bytes.

use crate::ui::theme::Theme;

/// Appends an absolute cursor move (`\u{1b}[{row};{col}H`, 1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Number of characters in `text`.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Appends `text` with the given character ranges in match highlight colors.
///
/// `base_fg` is restored after each highlighted section. Ranges must be
/// ordered and non-overlapping; out-of-bounds ends are clamped.
///
/// # Example
///
/// ```rust
/// use poemseek::ui::helpers::render_highlighted_text;
/// use poemseek::ui::Theme;
///
/// let theme = Theme::default();
/// let mut out = String::new();
/// render_highlighted_text(&mut out, "hope springs", &[(0, 4)], &theme, &theme.colors.text_normal);
/// assert!(out.ends_with(" springs"));
/// ```
pub fn render_highlighted_text(out: &mut String, text: &str, ranges: &[(usize, usize)], theme: &Theme, base_fg: &str) {
    out.push_str(&Theme::fg(base_fg));
    if ranges.is_empty() {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(base_fg));

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut plain = String::new();
        let mut in_escape = false;
        for c in s.chars() {
            match (in_escape, c) {
                (false, '\u{1b}') => in_escape = true,
                (true, c) if c.is_ascii_alphabetic() => in_escape = false,
                (true, _) => {}
                (false, c) => plain.push(c),
            }
        }
        plain
    }

    #[test]
    fn highlighted_text_keeps_every_character() {
        let theme = Theme::default();
        let mut out = String::new();
        render_highlighted_text(&mut out, "Hope, and hope", &[(0, 4), (10, 14)], &theme, &theme.colors.text_normal);
        assert_eq!(strip_ansi(&out), "Hope, and hope");
        assert_eq!(out.matches(&Theme::bg(&theme.colors.match_highlight_bg)).count(), 2);
    }

    #[test]
    fn out_of_range_highlights_are_clamped() {
        let theme = Theme::default();
        let mut out = String::new();
        render_highlighted_text(&mut out, "hope", &[(2, 40)], &theme, &theme.colors.text_normal);
        assert_eq!(strip_ansi(&out), "hope");
    }

    #[test]
    fn width_counts_characters() {
        assert_eq!(display_width("élan"), 4);
    }
}
