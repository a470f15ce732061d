//! Markdown/MDX body to plain-text reduction.
//!
//! The sanitizer is an ordered table of pure text transforms. Each
//! stage sees the previous stage's output, so the order is part of the
//! contract: code is removed before punctuation stripping could mangle
//! it into searchable noise.

use once_cell::sync::Lazy;
use regex::Regex;

/// A single sanitizing stage
pub type Transform = fn(&str) -> String;

/// Sanitizer stages in application order
pub const STAGES: [(&str, Transform); 8] = [
    ("fenced_code", strip_fenced_code),
    ("indented_code", strip_indented_code),
    ("inline_code", strip_inline_code),
    ("dashed_blocks", strip_dashed_blocks),
    ("tags", strip_tags),
    ("markdown_punctuation", strip_markdown_punctuation),
    ("whitespace", collapse_whitespace),
    ("trim", trim),
];

static FENCED_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INDENTED_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^( {4,}|\t).*$").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]*`").unwrap());
static DASHED_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)---.*?---").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static MARKDOWN_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[#*_~\[\]()\-+=>|{}]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Reduce a markdown body to its plain-text search corpus
pub fn sanitize(body: &str) -> String {
    STAGES
        .iter()
        .fold(body.to_string(), |text, (_, stage)| stage(&text))
}

/// Remove triple-backtick fences and everything between them,
/// language tag included
pub fn strip_fenced_code(text: &str) -> String {
    FENCED_CODE.replace_all(text, "").into_owned()
}

/// Replace each line indented by four spaces or a tab with a newline
pub fn strip_indented_code(text: &str) -> String {
    INDENTED_CODE.replace_all(text, "\n").into_owned()
}

/// Remove single-backtick spans (shortest match, may cross lines)
pub fn strip_inline_code(text: &str) -> String {
    INLINE_CODE.replace_all(text, "").into_owned()
}

/// Remove residual `---` ... `---` blocks
pub fn strip_dashed_blocks(text: &str) -> String {
    DASHED_BLOCK.replace_all(text, "").into_owned()
}

/// Remove HTML/JSX tags, keeping the text between them
pub fn strip_tags(text: &str) -> String {
    TAG.replace_all(text, "").into_owned()
}

/// Remove `# * _ ~ [ ] ( ) - + = > | { }`
pub fn strip_markdown_punctuation(text: &str) -> String {
    MARKDOWN_PUNCTUATION.replace_all(text, "").into_owned()
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

pub fn trim(text: &str) -> String {
    text.trim().to_string()
}
