//! Front matter splitting.
//!
//! A content file may start with a metadata block:
//!
//! ```text
//! ---
//! title: Hello
//! published: 2024-03-01
//! tags: [rust, search]
//! ---
//! body text...
//! ```
//!
//! `---` blocks use a YAML subset: flat `key: value` pairs, flow and
//! block sequences of scalars, and `|` / `>` block scalars. `+++`
//! blocks are TOML. Files without a
//! block keep their whole text as the body.

use serde_json::{Number, Value};

use crate::core::error::{PostsyncError, Result};
use crate::core::types::{Metadata, ParsedContent};

const YAML_FENCE: &str = "---";
const TOML_FENCE: &str = "+++";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fence {
    Yaml,
    Toml,
}

/// Split raw file text into metadata and body
///
/// Required fields are not validated here; a missing `title` stays
/// missing.
pub fn parse_front_matter(raw: &str) -> Result<ParsedContent> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some((fence, block, body)) = split_block(text) else {
        return Ok(ParsedContent {
            metadata: Metadata::new(),
            body: raw.to_string(),
        });
    };

    let metadata = match fence {
        Fence::Yaml => parse_yaml_block(block),
        Fence::Toml => parse_toml_block(block)?,
    };

    Ok(ParsedContent {
        metadata,
        body: body.to_string(),
    })
}

/// Locate the opening and closing fence lines.
///
/// Returns the fence kind, the text between the fences and the body
/// after the closing fence line.
fn split_block(text: &str) -> Option<(Fence, &str, &str)> {
    let first_end = text.find('\n')?;
    let fence = match fence_line(&text[..first_end]) {
        YAML_FENCE => Fence::Yaml,
        TOML_FENCE => Fence::Toml,
        _ => return None,
    };
    let marker = match fence {
        Fence::Yaml => YAML_FENCE,
        Fence::Toml => TOML_FENCE,
    };

    let rest = &text[first_end + 1..];
    let mut pos = 0;
    while pos <= rest.len() {
        let line_end = rest[pos..].find('\n').map(|i| pos + i);
        let line = &rest[pos..line_end.unwrap_or(rest.len())];
        if fence_line(line) == marker {
            let body = match line_end {
                Some(end) => &rest[end + 1..],
                None => "",
            };
            return Some((fence, &rest[..pos], body));
        }
        match line_end {
            Some(end) => pos = end + 1,
            None => break,
        }
    }

    None
}

fn fence_line(line: &str) -> &str {
    line.trim_end_matches('\r').trim_end()
}

fn parse_yaml_block(block: &str) -> Metadata {
    let lines: Vec<&str> = block.lines().collect();
    let mut metadata = Metadata::new();
    // Key whose value may continue as `- item` lines
    let mut open_key: Option<String> = None;
    let mut next = 0;

    while next < lines.len() {
        let line = lines[next].trim_end();
        next += 1;
        let content = line.trim_start();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        if let Some(item) = sequence_item(content) {
            if let Some(key) = &open_key {
                let slot = metadata.entry(key.clone()).or_insert(Value::Null);
                if slot.is_null() {
                    *slot = Value::Array(Vec::new());
                }
                if let Value::Array(items) = slot {
                    items.push(parse_scalar(item));
                }
                continue;
            }
        }

        if line.starts_with(is_indent) {
            tracing::debug!("Ignoring nested front matter line: {:?}", content);
            continue;
        }

        let Some((key, value)) = content.split_once(':') else {
            tracing::debug!("Ignoring front matter line without a key: {:?}", content);
            open_key = None;
            continue;
        };

        let key = unquote(key.trim()).to_string();
        let value = value.trim();
        if key.is_empty() {
            open_key = None;
            continue;
        }

        if value.is_empty() {
            metadata.insert(key.clone(), Value::Null);
            open_key = Some(key);
            continue;
        }

        open_key = None;
        if let Some((style, chomp)) = block_header(value) {
            let len = block_scalar_len(&lines[next..]);
            let text = render_block_scalar(&lines[next..next + len], style, chomp);
            metadata.insert(key, Value::String(text));
            next += len;
        } else {
            metadata.insert(key, parse_scalar(value));
        }
    }

    metadata
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockStyle {
    /// `|` keeps line breaks
    Literal,
    /// `>` joins lines with spaces
    Folded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chomp {
    Strip,
    Clip,
    Keep,
}

fn is_indent(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Parse a `|` or `>` block scalar header such as `>-` or `|+ # note`
fn block_header(value: &str) -> Option<(BlockStyle, Chomp)> {
    let mut chars = strip_comment(value).chars();
    let style = match chars.next()? {
        '|' => BlockStyle::Literal,
        '>' => BlockStyle::Folded,
        _ => return None,
    };

    let mut chomp = Chomp::Clip;
    for c in chars {
        match c {
            '-' => chomp = Chomp::Strip,
            '+' => chomp = Chomp::Keep,
            '1'..='9' => {}
            _ => return None,
        }
    }
    Some((style, chomp))
}

/// Number of lines after a block header that belong to the scalar:
/// indented or blank lines up to the next top-level line.
fn block_scalar_len(lines: &[&str]) -> usize {
    lines
        .iter()
        .take_while(|line| line.trim().is_empty() || line.starts_with(is_indent))
        .count()
}

fn render_block_scalar(lines: &[&str], style: BlockStyle, chomp: Chomp) -> String {
    let indent_of = |line: &str| line.len() - line.trim_start_matches(is_indent).len();
    let indent = lines
        .iter()
        .find(|line| !line.trim().is_empty())
        .map(|&line| indent_of(line))
        .unwrap_or(0);

    let mut text: Vec<&str> = lines
        .iter()
        .map(|&line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[indent_of(line).min(indent)..]
            }
        })
        .collect();

    let trailing = text.iter().rev().take_while(|line| line.is_empty()).count();
    text.truncate(text.len() - trailing);
    if text.is_empty() {
        return String::new();
    }

    let mut out = match style {
        BlockStyle::Literal => text.join("\n"),
        BlockStyle::Folded => fold_lines(&text),
    };
    match chomp {
        Chomp::Strip => {}
        Chomp::Clip => out.push('\n'),
        Chomp::Keep => out.push_str(&"\n".repeat(trailing + 1)),
    }
    out
}

/// Join lines with spaces; each blank line becomes one line break
fn fold_lines(lines: &[&str]) -> String {
    let mut out = String::new();
    let mut after_text = false;
    for line in lines {
        if line.is_empty() {
            out.push('\n');
            after_text = false;
        } else {
            if after_text {
                out.push(' ');
            }
            out.push_str(line);
            after_text = true;
        }
    }
    out
}

fn sequence_item(content: &str) -> Option<&str> {
    if content == "-" {
        Some("")
    } else {
        content.strip_prefix("- ").map(str::trim)
    }
}

/// Parse one YAML scalar (or a flow sequence of scalars)
fn parse_scalar(raw: &str) -> Value {
    let raw = strip_trailing_comment(raw.trim());

    if let Some(inner) = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        return Value::String(unescape_double(inner));
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return Value::String(raw[1..raw.len() - 1].replace("''", "'"));
    }
    if let Some(inner) = raw.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        let items = split_flow_items(inner)
            .into_iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(parse_scalar)
            .collect();
        return Value::Array(items);
    }

    match raw {
        "" | "~" | "null" | "Null" | "NULL" => return Value::Null,
        "true" | "True" | "TRUE" => return Value::Bool(true),
        "false" | "False" | "FALSE" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(n) = raw.parse::<i64>() {
        return Value::Number(n.into());
    }
    if looks_numeric(raw) {
        if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
    }

    Value::String(raw.to_string())
}

fn unquote(s: &str) -> &str {
    let quoted = s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')));
    if quoted {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

fn unescape_double(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Split `a, "b, c", d` on commas outside quotes
fn split_flow_items(inner: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), _) if c == q => quote = None,
            (None, ',') => {
                items.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&inner[start..]);
    items
}

/// Drop a `# comment` after a scalar, leaving quoted and flow text intact
fn strip_trailing_comment(raw: &str) -> &str {
    let end = match raw.chars().next() {
        Some(quote @ ('"' | '\'')) => closing_quote(raw, quote),
        Some('[') => raw.rfind(']').map(|idx| idx + 1),
        _ => return strip_comment(raw),
    };

    match end {
        Some(end) if is_comment_or_empty(&raw[end..]) => &raw[..end],
        _ => raw,
    }
}

/// Byte offset just past the quote closing the one at position 0
fn closing_quote(raw: &str, quote: char) -> Option<usize> {
    let mut chars = raw.char_indices().skip(1).peekable();
    while let Some((idx, c)) = chars.next() {
        if c == '\\' && quote == '"' {
            chars.next();
        } else if c == quote {
            // '' is an escaped quote inside single quotes
            if quote == '\'' && chars.peek().map(|&(_, n)| n) == Some('\'') {
                chars.next();
                continue;
            }
            return Some(idx + c.len_utf8());
        }
    }
    None
}

fn is_comment_or_empty(rest: &str) -> bool {
    rest.is_empty() || (rest.starts_with(is_indent) && rest.trim_start().starts_with('#'))
}

fn strip_comment(plain: &str) -> &str {
    match plain.find(" #") {
        Some(idx) => plain[..idx].trim_end(),
        None => plain,
    }
}

// Rust's f64 parser also accepts "inf" and "nan"; YAML plain scalars
// like those stay strings here.
fn looks_numeric(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
}

fn parse_toml_block(block: &str) -> Result<Metadata> {
    let table: toml::Table = toml::from_str(block)
        .map_err(|e| PostsyncError::FrontMatterError(format!("TOML front matter: {e}")))?;

    Ok(table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect())
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
