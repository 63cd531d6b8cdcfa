//! Text Utilities - width-aware wrapping, truncation and padding
//!
//! All width calculations use unicode display width, not byte length.
//! Tag and title columns are full of CJK text where one char is two cells.

use std::borrow::Cow;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Get display width of a string (handles unicode properly)
#[inline]
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

#[inline]
fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Wrap a single line at word boundaries to fit within max_width
///
/// Words longer than max_width are force-broken by character.
pub fn wrap_line(line: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || display_width(line) <= max_width {
        return vec![line.to_string()];
    }

    let mut result = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in line.split_whitespace() {
        let word_width = display_width(word);

        if current.is_empty() {
            current = word.to_string();
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            result.push(current);
            current = word.to_string();
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        result.push(current);
    }

    result
        .into_iter()
        .flat_map(|s| {
            if display_width(&s) <= max_width {
                return vec![s];
            }
            let mut chunks = Vec::new();
            let mut chunk = String::new();
            let mut chunk_width = 0usize;
            for c in s.chars() {
                let w = char_width(c);
                if chunk_width + w > max_width && !chunk.is_empty() {
                    chunks.push(std::mem::take(&mut chunk));
                    chunk_width = 0;
                }
                chunk.push(c);
                chunk_width += w;
            }
            if !chunk.is_empty() {
                chunks.push(chunk);
            }
            chunks
        })
        .collect()
}

/// Wrap multi-line text, preserving empty lines
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || text.is_empty() {
        return vec![];
    }

    let mut result = Vec::new();
    for line in text.lines() {
        if line.is_empty() {
            result.push(String::new());
            continue;
        }
        result.extend(wrap_line(line, max_width));
    }
    result
}

/// Truncate a string to fit within max display width, adding ellipsis if needed.
///
/// Returns `Cow::Borrowed` if no truncation needed.
pub fn truncate_ellipsis(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    if max_width < 4 {
        let mut width = 0;
        return Cow::Owned(
            s.chars()
                .take_while(|c| {
                    width += char_width(*c);
                    width <= max_width
                })
                .collect(),
        );
    }

    let target_width = max_width - 3;
    let mut width = 0;
    let truncated: String = s
        .chars()
        .take_while(|c| {
            let w = char_width(*c);
            if width + w <= target_width {
                width += w;
                true
            } else {
                false
            }
        })
        .collect();

    Cow::Owned(format!("{}...", truncated))
}

/// Truncate then right-pad with spaces to exactly `width` cells
pub fn pad_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_ellipsis(s, width);
    let fill = width.saturating_sub(display_width(&truncated));
    format!("{}{}", truncated, " ".repeat(fill))
}

/// Longest suffix of `s` that fits in `max_width` cells
pub fn tail_to_width(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = s.len();
    for (idx, c) in s.char_indices().rev() {
        let w = char_width(c);
        if width + w > max_width {
            break;
        }
        width += w;
        start = idx;
    }
    &s[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_line_breaks() {
        assert_eq!(wrap_line("hello world foo", 10), vec!["hello", "world foo"]);
        assert_eq!(wrap_line("superlongword", 5), vec!["super", "longw", "ord"]);
    }

    #[test]
    fn test_wrap_line_wide_chars() {
        // Each hangul syllable is two cells wide
        assert_eq!(wrap_line("가나다라", 4), vec!["가나", "다라"]);
    }

    #[test]
    fn test_wrap_text_multiline() {
        let result = wrap_text("hello world\n\nfoo bar", 8);
        assert_eq!(result, vec!["hello", "world", "", "foo bar"]);
    }

    #[test]
    fn test_truncate_ellipsis() {
        assert_eq!(truncate_ellipsis("short", 10), "short");
        assert_eq!(truncate_ellipsis("a long title", 8), "a lon...");
        assert_eq!(truncate_ellipsis("新作ゲーム", 7), "新作...");
    }

    #[test]
    fn test_pad_to_width_cjk() {
        let padded = pad_to_width("신작", 6);
        assert_eq!(display_width(&padded), 6);
        assert_eq!(padded, "신작  ");
    }

    #[test]
    fn test_tail_to_width() {
        assert_eq!(tail_to_width("abcdef", 3), "def");
        assert_eq!(tail_to_width("가나다", 5), "나다");
        assert_eq!(tail_to_width("ab", 10), "ab");
    }
}
