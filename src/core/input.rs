//! Key parsing for legacy (VT/xterm) terminal input.
//!
//! Key ids are lowercase names joined with modifiers, e.g. `up`, `enter`, `shift+tab`,
//! `ctrl+c`, `alt+x`. Page keys keep their camel-case ids (`pageUp`, `pageDown`).

const ESC: &str = "\x1b";

/// Parses a single input sequence into a key id.
///
/// Printable text is not a key; see [`parse_text`].
pub fn parse_key(data: &str) -> Option<String> {
    if let Some(named) = named_sequence(data) {
        return Some(named.to_string());
    }

    let mut chars = data.chars();
    let first = chars.next()?;
    let rest = chars.as_str();

    if rest.is_empty() {
        return control_key(first);
    }

    // ESC followed by a single key is the legacy alt prefix.
    if first == '\x1b' {
        let mut rest_chars = rest.chars();
        let next = rest_chars.next()?;
        if !rest_chars.as_str().is_empty() {
            return None;
        }
        if next == '\x7f' {
            return Some("alt+backspace".to_string());
        }
        if let Some(ctrl) = control_key(next) {
            return Some(format!("alt+{ctrl}"));
        }
        if !next.is_control() {
            return Some(format!("alt+{}", next.to_ascii_lowercase()));
        }
    }

    None
}

fn control_key(ch: char) -> Option<String> {
    let key = match ch {
        '\x1b' => "escape".to_string(),
        '\r' | '\n' => "enter".to_string(),
        '\t' => "tab".to_string(),
        '\x7f' | '\x08' => "backspace".to_string(),
        '\x00' => "ctrl+space".to_string(),
        '\x01'..='\x1a' => {
            let letter = (b'a' + (ch as u8 - 1)) as char;
            format!("ctrl+{letter}")
        }
        _ => return None,
    };
    Some(key)
}

fn named_sequence(data: &str) -> Option<&'static str> {
    let named = match data {
        "\x1b[A" | "\x1bOA" => "up",
        "\x1b[B" | "\x1bOB" => "down",
        "\x1b[C" | "\x1bOC" => "right",
        "\x1b[D" | "\x1bOD" => "left",
        "\x1b[H" | "\x1bOH" | "\x1b[1~" | "\x1b[7~" => "home",
        "\x1b[F" | "\x1bOF" | "\x1b[4~" | "\x1b[8~" => "end",
        "\x1b[2~" => "insert",
        "\x1b[3~" => "delete",
        "\x1b[5~" => "pageUp",
        "\x1b[6~" => "pageDown",
        "\x1b[Z" => "shift+tab",
        "\x1b[1;5A" => "ctrl+up",
        "\x1b[1;5B" => "ctrl+down",
        "\x1b[1;5C" => "ctrl+right",
        "\x1b[1;5D" => "ctrl+left",
        "\x1b[1;3C" => "alt+right",
        "\x1b[1;3D" => "alt+left",
        "\x1bOP" => "f1",
        _ => return None,
    };
    Some(named)
}

/// Returns the text of a printable input sequence.
pub fn parse_text(data: &str) -> Option<String> {
    if data.is_empty() || data.starts_with(ESC) {
        return None;
    }
    if data.chars().any(char::is_control) {
        return None;
    }
    Some(data.to_string())
}

/// Whether `data` is the key named `key_id`. Key id comparison ignores ASCII case except for
/// single printable characters, where `H` and `h` are different keys.
pub fn matches_key(data: &str, key_id: &str) -> bool {
    if let Some(parsed) = parse_key(data) {
        return key_ids_equal(&parsed, key_id);
    }
    parse_text(data).is_some_and(|text| text == key_id)
}

pub fn key_ids_equal(left: &str, right: &str) -> bool {
    if left.chars().count() == 1 || right.chars().count() == 1 {
        left == right
    } else {
        left.eq_ignore_ascii_case(right)
    }
}
