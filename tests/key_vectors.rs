use ghtui::core::input::{matches_key, parse_key};
use ghtui::core::input_event::{parse_input_events, InputEvent};
use ghtui::core::keybindings::{Action, Keybindings};
use pretty_assertions::assert_eq;

const VECTORS: &str = include_str!("fixtures/key_vectors.tsv");

/// One row of `fixtures/key_vectors.tsv`.
#[derive(Debug)]
enum KeyVector {
    Parse {
        input: String,
        expected: Option<String>,
    },
    Match {
        input: String,
        key_id: String,
        expected: bool,
    },
}

/// Terminal bytes are written as `\xNN`, `\t` and `\r` in the fixture.
fn decode_input(column: &str) -> String {
    let mut out = String::new();
    let mut rest = column;
    while let Some(idx) = rest.find('\\') {
        out.push_str(&rest[..idx]);
        let escape = &rest[idx + 1..];
        let consumed = match escape.as_bytes().first() {
            Some(b't') => {
                out.push('\t');
                1
            }
            Some(b'r') => {
                out.push('\r');
                1
            }
            Some(b'x') => {
                let byte = escape
                    .get(1..3)
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                    .unwrap_or_else(|| panic!("bad \\x escape in {column:?}"));
                out.push(char::from(byte));
                3
            }
            _ => panic!("unknown escape in {column:?}"),
        };
        rest = &escape[consumed..];
    }
    out.push_str(rest);
    out
}

fn key_vectors() -> Vec<(usize, KeyVector)> {
    VECTORS
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(idx, line)| {
            let columns: Vec<&str> = line.split('\t').collect();
            let vector = match columns.as_slice() {
                ["parse", input, expected] => KeyVector::Parse {
                    input: decode_input(input),
                    expected: (*expected != "none").then(|| expected.to_string()),
                },
                ["match", input, key_id, expected] => KeyVector::Match {
                    input: decode_input(input),
                    key_id: key_id.to_string(),
                    expected: *expected == "true",
                },
                other => panic!("line {}: malformed vector {other:?}", idx + 1),
            };
            (idx + 1, vector)
        })
        .collect()
}

#[test]
fn fixture_escapes_decode_to_terminal_bytes() {
    assert_eq!(decode_input("\\x1b[A"), "\x1b[A");
    assert_eq!(decode_input("\\t"), "\t");
    assert_eq!(decode_input("H"), "H");
}

#[test]
fn terminal_bytes_parse_and_match_as_listed() {
    let vectors = key_vectors();
    assert!(vectors.len() > 20);

    for (line, vector) in vectors {
        match vector {
            KeyVector::Parse { input, expected } => assert_eq!(
                parse_key(&input),
                expected,
                "line {line}: parse_key({input:?})"
            ),
            KeyVector::Match {
                input,
                key_id,
                expected,
            } => assert_eq!(
                matches_key(&input, &key_id),
                expected,
                "line {line}: matches_key({input:?}, {key_id:?})"
            ),
        }
    }
}

#[test]
fn chunk_of_keys_resolves_to_actions_in_order() {
    let keys = Keybindings::default();
    let events = parse_input_events("\x1b[Bj\x1b[5~\r");
    let actions: Vec<Option<Action>> = events
        .iter()
        .map(|event| {
            let id = match event {
                InputEvent::Key { key_id, .. } => key_id.as_str(),
                InputEvent::Text { text, .. } => text.as_str(),
                _ => return None,
            };
            [Action::Down, Action::PageDown, Action::Select]
                .into_iter()
                .find(|action| keys.matches(id, *action))
        })
        .collect();
    assert_eq!(
        actions,
        vec![
            Some(Action::Down),
            Some(Action::Down),
            Some(Action::PageDown),
            Some(Action::Select)
        ]
    );
}
