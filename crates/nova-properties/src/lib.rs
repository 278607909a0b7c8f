//! A small parser for Java `.properties` files.
//!
//! Framework analyzers read project configuration (e.g. `ErraiApp.properties`)
//! through this crate. The goal is tooling support rather than perfect
//! `java.util.Properties` compliance.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyEntry {
    pub key: String,
    pub value: String,
    /// 1-based line on which the entry starts.
    pub line: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertiesFile {
    pub entries: Vec<PropertyEntry>,
}

impl PropertiesFile {
    #[must_use]
    pub fn by_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a PropertyEntry> + 'a {
        self.entries.iter().filter(move |e| e.key == key)
    }
}

/// Parse a `.properties` file into key/value entries, in file order.
#[must_use]
pub fn parse(text: &str) -> PropertiesFile {
    let mut entries = Vec::new();
    let mut lines = text.lines().enumerate().peekable();

    while let Some((idx, first)) = lines.next() {
        // Comment lines end at the line break, even with a trailing `\`.
        if is_comment(first) {
            continue;
        }

        let mut logical = String::new();
        let mut physical = first;
        loop {
            let continues = ends_with_unescaped_backslash(physical);
            if continues {
                logical.push_str(&physical[..physical.len() - 1]);
            } else {
                logical.push_str(physical);
            }
            if !continues {
                break;
            }
            // Continuation: leading whitespace on the next physical line is dropped.
            match lines.next() {
                Some((_, next)) => physical = next.trim_start_matches(is_whitespace),
                None => break,
            }
        }

        if let Some((key, value)) = parse_logical_line(&logical) {
            entries.push(PropertyEntry {
                key,
                value,
                line: idx + 1,
            });
        }
    }

    PropertiesFile { entries }
}

fn ends_with_unescaped_backslash(line: &str) -> bool {
    let backslashes = line.bytes().rev().take_while(|b| *b == b'\\').count();
    backslashes % 2 == 1
}

fn is_comment(line: &str) -> bool {
    let line = line.trim_start_matches(is_whitespace);
    line.starts_with('#') || line.starts_with('!')
}

fn parse_logical_line(line: &str) -> Option<(String, String)> {
    let line = line.trim_start_matches(is_whitespace);
    if line.is_empty() {
        return None;
    }

    let mut chars = line.char_indices();
    let mut key_end = line.len();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '=' | ':' => {
                key_end = idx;
                break;
            }
            ch if is_whitespace(ch) => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_whitespace);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches(is_whitespace);
    }

    Some((unescape(key), unescape(rest)))
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\x0C' | '\r')
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            None => out.push('\\'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0C'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => {
                        out.push(decoded);
                        for _ in 0..4 {
                            chars.next();
                        }
                    }
                    _ => out.push('u'),
                }
            }
            Some(other) => out.push(other),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_basic_entries() {
        let text = "# comment\nerrai.ui.bindableTypes=com.example.Customer\n! other\nkey : value\n";
        let parsed = parse(text);
        assert_eq!(
            parsed.entries,
            vec![
                PropertyEntry {
                    key: "errai.ui.bindableTypes".into(),
                    value: "com.example.Customer".into(),
                    line: 2,
                },
                PropertyEntry {
                    key: "key".into(),
                    value: "value".into(),
                    line: 4,
                },
            ]
        );
    }

    #[test]
    fn supports_line_continuations_and_unicode_escapes() {
        let text = "types=com.example.A \\\n   com.example.B\r\nunicode=\\u0041\n";
        let parsed = parse(text);
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.entries[0].value, "com.example.A com.example.B");
        assert_eq!(parsed.entries[1].value, "A");
        assert_eq!(parsed.entries[1].line, 3);
    }

    #[test]
    fn by_key_returns_every_occurrence() {
        let parsed = parse("a=1\nb=2\na=3\n");
        let values: Vec<_> = parsed.by_key("a").map(|e| e.value.as_str()).collect();
        assert_eq!(values, vec!["1", "3"]);
    }

    #[test]
    fn trailing_backslash_does_not_continue_a_comment() {
        let text = "# see C:\\\nerrai.ui.bindableTypes=com.example.Address\n! also \\\nb=2\n";
        let parsed = parse(text);
        assert_eq!(
            parsed.entries,
            vec![
                PropertyEntry {
                    key: "errai.ui.bindableTypes".into(),
                    value: "com.example.Address".into(),
                    line: 2,
                },
                PropertyEntry {
                    key: "b".into(),
                    value: "2".into(),
                    line: 4,
                },
            ]
        );
    }

    #[test]
    fn escaped_separator_stays_in_key() {
        let parsed = parse("my\\=key=value\n");
        assert_eq!(parsed.entries[0].key, "my=key");
        assert_eq!(parsed.entries[0].value, "value");
    }
}
