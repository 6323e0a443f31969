//! Widgets shared by every screen.

pub mod header;
pub mod status_bar;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cuts `text` to at most `width` terminal columns, ending in `…` when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate("Pizza", 10), "Pizza");
    }

    #[test]
    fn long_text_ends_with_ellipsis() {
        assert_eq!(truncate("Margherita", 5), "Marg…");
        assert_eq!(truncate("Margherita", 0), "");
    }

    #[test]
    fn wide_chars_count_double() {
        // Each ideograph takes two columns.
        assert_eq!(truncate("寿司寿司", 5), "寿司…");
    }
}
