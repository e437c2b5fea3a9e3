//! Structured input events produced by the runtime.

use crate::core::input::{parse_key, parse_text};

const PASTE_START: &str = "\x1b[200~";
const PASTE_END: &str = "\x1b[201~";

/// Input event delivered to components.
///
/// `raw` is the exact sequence received from the terminal. `key_id` is the normalized id used
/// for keybinding lookups. Text and paste events carry decoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key { raw: String, key_id: String },
    Text { raw: String, text: String },
    Paste { raw: String, text: String },
    Resize { columns: u16, rows: u16 },
    UnknownRaw { raw: String },
}

/// Splits one read from the terminal into events.
///
/// A single read can carry several keys (fast typing, key repeat) and bracketed pastes; each
/// escape sequence or character becomes its own event, and paste bodies stay whole.
pub fn parse_input_events(data: &str) -> Vec<InputEvent> {
    let mut events = Vec::new();
    let mut remaining = data;

    while !remaining.is_empty() {
        let Some(start) = remaining.find(PASTE_START) else {
            parse_sequences(remaining, &mut events);
            break;
        };

        parse_sequences(&remaining[..start], &mut events);
        let body_start = start + PASTE_START.len();
        let (text, consumed) = match remaining[body_start..].find(PASTE_END) {
            Some(end) => (
                &remaining[body_start..body_start + end],
                body_start + end + PASTE_END.len(),
            ),
            None => (&remaining[body_start..], remaining.len()),
        };
        events.push(InputEvent::Paste {
            raw: remaining[start..consumed].to_string(),
            text: text.to_string(),
        });
        remaining = &remaining[consumed..];
    }

    events
}

fn parse_sequences(data: &str, events: &mut Vec<InputEvent>) {
    for sequence in split_sequences(data) {
        if let Some(text) = parse_text(sequence) {
            events.push(InputEvent::Text {
                raw: sequence.to_string(),
                text,
            });
        } else if let Some(key_id) = parse_key(sequence) {
            events.push(InputEvent::Key {
                raw: sequence.to_string(),
                key_id,
            });
        } else {
            events.push(InputEvent::UnknownRaw {
                raw: sequence.to_string(),
            });
        }
    }
}

/// Splits raw input into escape sequences and single characters.
pub fn split_sequences(data: &str) -> Vec<&str> {
    let bytes = data.as_bytes();
    let mut out = Vec::new();
    let mut idx = 0;

    while idx < data.len() {
        let end = if bytes[idx] == 0x1b {
            escape_end(data, idx)
        } else {
            let width = data[idx..].chars().next().map(char::len_utf8).unwrap_or(1);
            idx + width
        };
        out.push(&data[idx..end]);
        idx = end;
    }

    out
}

fn escape_end(data: &str, start: usize) -> usize {
    let bytes = data.as_bytes();
    match bytes.get(start + 1) {
        None => start + 1,
        Some(b'[') => {
            let mut idx = start + 2;
            while idx < bytes.len() {
                if (0x40..=0x7e).contains(&bytes[idx]) {
                    return idx + 1;
                }
                idx += 1;
            }
            bytes.len()
        }
        Some(b'O') => {
            let end = (start + 3).min(bytes.len());
            if data.is_char_boundary(end) {
                end
            } else {
                start + 2
            }
        }
        Some(0x1b) => start + 1,
        Some(_) => {
            let width = data[start + 1..]
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1);
            start + 1 + width
        }
    }
}
