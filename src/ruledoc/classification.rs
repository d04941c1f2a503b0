//! Line Classification
//!
//! Stateless predicates and extractors over a single raw source line. The
//! scanner decides *when* each one applies; these functions only answer
//! whether a line has a given shape and pull out its payload.
//!
//! Recognized shapes:
//!
//! ```text
//! # Title: Style Guide          title marker (anywhere, trimmed)
//! # Section: Naming             section marker (trimmed)
//! # free text                   comment line
//! rules:                        rules block start (trimmed, exact)
//!   rule-name: error            rule header, two-space indent, optional inline severity
//!     severity: warn            nested severity attribute, four-space indent
//! ```
//!
//! Example headers are matched against comment text that has already had its
//! `#` prefix removed: `valid example:`, `Invalid example (edge case):`.

use crate::ruledoc::ast::ExampleKind;
use once_cell::sync::Lazy;
use regex::Regex;

pub const TITLE_MARKER: &str = "# Title:";
pub const SECTION_MARKER: &str = "# Section:";
pub const RULES_MARKER: &str = "rules:";

/// Appended to document and section description lines so Markdown renders a
/// hard line break after each one.
pub const HARD_BREAK: &str = "  ";

/// Indentation that keeps a line inside a rule's nested attribute block.
const NESTED_INDENT: &str = "    ";

static COMMENT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#\s?").unwrap());

static RULE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s{2}([a-zA-Z0-9._\-$]+)\s*:\s*(\w+)?\s*$").unwrap());

static NESTED_SEVERITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s{4}severity:\s*(\w+)\s*$").unwrap());

static EXAMPLE_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(valid|invalid)\s+example(?:\s*\(([^)]+)\))?:$").unwrap()
});

/// A matched rule entry inside a rules block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleHeader<'a> {
    pub name: &'a str,
    pub severity: Option<&'a str>,
}

/// A matched example header inside rule documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleHeader {
    pub kind: ExampleKind,
    pub label: Option<String>,
}

/// Title text if the trimmed line starts with `# Title:`.
pub fn match_title(line: &str) -> Option<&str> {
    line.trim().strip_prefix(TITLE_MARKER).map(str::trim)
}

/// Section name if the trimmed line starts with `# Section:`.
pub fn match_section_header(line: &str) -> Option<&str> {
    line.trim().strip_prefix(SECTION_MARKER).map(str::trim)
}

pub fn is_comment(line: &str) -> bool {
    line.trim().starts_with('#')
}

/// Remove leading whitespace, the `#`, and at most one following whitespace
/// character. Everything after that, trailing whitespace included, is kept.
pub fn strip_comment_prefix(line: &str) -> &str {
    match COMMENT_PREFIX.find(line) {
        Some(prefix) => &line[prefix.end()..],
        None => line,
    }
}

pub fn is_rules_block_start(line: &str) -> bool {
    line.trim() == RULES_MARKER
}

pub fn match_rule_header(line: &str) -> Option<RuleHeader<'_>> {
    let caps = RULE_HEADER.captures(line)?;
    Some(RuleHeader {
        name: caps.get(1)?.as_str(),
        severity: caps.get(2).map(|m| m.as_str()),
    })
}

pub fn match_nested_severity(line: &str) -> Option<&str> {
    NESTED_SEVERITY
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether the raw line still belongs to the nested attribute block of the
/// preceding rule header. Blank lines do not.
pub fn is_nested_attribute(line: &str) -> bool {
    line.starts_with(NESTED_INDENT)
}

/// Match already-stripped comment text against the example header pattern.
///
/// The keyword is case-insensitive; the label keeps its original case. A
/// malformed parenthetical (empty or unclosed) is not a header.
pub fn match_example_header(text: &str) -> Option<ExampleHeader> {
    let caps = EXAMPLE_HEADER.captures(text)?;
    let kind = ExampleKind::from_keyword(caps.get(1)?.as_str())?;
    Some(ExampleHeader {
        kind,
        label: caps.get(2).map(|m| m.as_str().to_string()),
    })
}
