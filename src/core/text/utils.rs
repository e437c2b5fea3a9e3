//! Truncation, padding and line layout.

use unicode_segmentation::UnicodeSegmentation;

use super::ansi::extract_ansi_code;
use super::width::{grapheme_width, visible_width};

const ANSI_RESET: &str = "\x1b[0m";

/// Truncates `text` to `max_width` cells, appending `ellipsis` when anything was cut.
///
/// Escape sequences are kept in place; a reset is inserted before the ellipsis so styles
/// never bleed into it. With `pad`, the result is right-padded with spaces to exactly
/// `max_width` cells.
pub fn truncate_to_width(text: &str, max_width: usize, ellipsis: &str, pad: bool) -> String {
    if max_width == 0 {
        return String::new();
    }

    let text_width = visible_width(text);
    if text_width <= max_width {
        if pad {
            return format!("{text}{}", " ".repeat(max_width - text_width));
        }
        return text.to_string();
    }

    let ellipsis_width = visible_width(ellipsis);
    let target_width = max_width.saturating_sub(ellipsis_width);
    if target_width == 0 {
        return ellipsis.chars().take(max_width).collect();
    }

    let mut truncated = String::new();
    let mut current_width = 0;
    let mut idx = 0;
    'outer: while idx < text.len() {
        if let Some(ansi) = extract_ansi_code(text, idx) {
            truncated.push_str(&ansi.code);
            idx += ansi.length;
            continue;
        }

        let run_end = next_ansi_or_end(text, idx);
        for grapheme in text[idx..run_end].graphemes(true) {
            let width = grapheme_width(grapheme);
            if current_width + width > target_width {
                break 'outer;
            }
            truncated.push_str(grapheme);
            current_width += width;
        }
        idx = run_end;
    }

    truncated.push_str(ANSI_RESET);
    truncated.push_str(ellipsis);
    if pad {
        let width = visible_width(&truncated);
        if width < max_width {
            truncated.push_str(&" ".repeat(max_width - width));
        }
    }
    truncated
}

/// Drops control characters other than `\n` and `\t`, so text from outside the app cannot
/// carry escape sequences into a frame.
pub fn sanitize_control(text: &str) -> String {
    text.chars()
        .filter(|ch| !ch.is_control() || matches!(ch, '\n' | '\t'))
        .collect()
}

/// Truncates without an ellipsis and pads to exactly `width` cells.
pub fn fit_to_width(text: &str, width: usize) -> String {
    truncate_to_width(text, width, "", true)
}

/// Pads `lines` with blank rows (or drops trailing rows) so exactly `height` rows remain.
pub fn fit_to_height(mut lines: Vec<String>, height: usize, width: usize) -> Vec<String> {
    lines.truncate(height);
    while lines.len() < height {
        lines.push(" ".repeat(width));
    }
    lines
}

/// Places column blocks side by side. Each block is padded to its stated width and the
/// tallest block decides the row count.
pub fn join_horizontal(blocks: &[(Vec<String>, usize)]) -> Vec<String> {
    let rows = blocks.iter().map(|(lines, _)| lines.len()).max().unwrap_or(0);
    (0..rows)
        .map(|row| {
            blocks
                .iter()
                .map(|(lines, width)| {
                    let line = lines.get(row).map(String::as_str).unwrap_or("");
                    fit_to_width(line, *width)
                })
                .collect::<String>()
        })
        .collect()
}

/// Indents every line by `left` spaces and adds `top`/`bottom` blank rows.
pub fn pad_block(lines: Vec<String>, top: usize, left: usize, bottom: usize) -> Vec<String> {
    let indent = " ".repeat(left);
    let mut out = Vec::with_capacity(lines.len() + top + bottom);
    out.extend(std::iter::repeat_with(String::new).take(top));
    out.extend(lines.into_iter().map(|line| format!("{indent}{line}")));
    out.extend(std::iter::repeat_with(String::new).take(bottom));
    out
}

fn next_ansi_or_end(input: &str, mut idx: usize) -> usize {
    while idx < input.len() {
        if extract_ansi_code(input, idx).is_some() {
            break;
        }
        match input[idx..].chars().next() {
            Some(ch) => idx += ch.len_utf8(),
            None => break,
        }
    }
    idx
}
