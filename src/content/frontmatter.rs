//! Front-matter block parsing
//!
//! A front-matter block is the text between the first two lines that are
//! exactly `---`. Each line inside the block is a `key: value` pair; values
//! are parsed as JSON when syntactically valid, else kept as the trimmed raw
//! string. Everything after the closing delimiter is the body.

use serde_json::{Map, Value};

/// Split a document into parsed front-matter fields and the raw body.
///
/// Only the first delimiter pair is significant; later `---` lines belong to
/// the body. An opening delimiter with no closing one consumes the remainder
/// as front-matter and leaves the body empty. Text with no delimiters at all
/// is entirely body.
pub fn parse(text: &str) -> (Map<String, Value>, String) {
    let mut front_matter_lines: Vec<&str> = Vec::new();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut fences_seen = 0u8;

    for line in text.lines() {
        if line.trim() == "---" && fences_seen < 2 {
            fences_seen += 1;
            continue;
        }
        if fences_seen == 1 {
            front_matter_lines.push(line);
        } else {
            body_lines.push(line);
        }
    }

    let mut front_matter = Map::new();
    for line in front_matter_lines {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        front_matter.insert(key.to_string(), parse_value(value.trim()));
    }

    (front_matter, body_lines.join("\n"))
}

/// JSON when it parses, trimmed raw string otherwise
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
