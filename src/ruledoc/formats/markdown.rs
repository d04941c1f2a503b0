//! Markdown style guide rendering
//!
//! A straight projection of the document model, in document order:
//!
//! ```text
//! # Style Guide
//!
//! <document description lines>
//!
//! ## Naming
//!
//! <section description lines>
//!
//! ---
//!
//! ### no-short-names
//! #### Severity: <span style="color:red">ERROR</span>
//!
//! <rule description lines>
//!
//! **Valid example:**
//! <example content lines>
//!
//! ---
//! ```
//!
//! Description and example lines are written exactly as captured, so code
//! fences and inline markup authored in the ruleset comments pass through.
//! The output is right-trimmed and ends with a single newline.

use crate::ruledoc::ast::{Document, Example, Rule, Section};
use crate::ruledoc::formats::registry::{FormatError, Formatter};

/// Colors for the two highlighted severities. Everything else renders as
/// plain uppercase text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityPalette {
    pub error: String,
    pub warn: String,
}

impl Default for SeverityPalette {
    fn default() -> Self {
        Self {
            error: "red".to_string(),
            warn: "goldenrod".to_string(),
        }
    }
}

impl SeverityPalette {
    pub fn tag(&self, severity: &str) -> String {
        let display = severity.to_uppercase();
        if severity.eq_ignore_ascii_case("error") {
            span(&self.error, &display)
        } else if severity.eq_ignore_ascii_case("warn") {
            span(&self.warn, &display)
        } else {
            display
        }
    }
}

fn span(color: &str, text: &str) -> String {
    format!("<span style=\"color:{color}\">{text}</span>")
}

#[derive(Debug, Clone, Default)]
pub struct MarkdownFormatter {
    palette: SeverityPalette,
}

impl MarkdownFormatter {
    pub fn new(palette: SeverityPalette) -> Self {
        Self { palette }
    }

    pub fn render(&self, doc: &Document) -> String {
        let mut lines: Vec<String> = Vec::new();

        if let Some(title) = doc.title.as_deref().filter(|t| !t.is_empty()) {
            lines.push(format!("# {title}"));
            lines.push(String::new());
        }

        if !doc.description.is_empty() {
            lines.extend(doc.description.iter().cloned());
            lines.push(String::new());
        }

        for section in &doc.sections {
            self.render_section(&mut lines, section);
        }

        let mut output = lines.join("\n").trim_end().to_string();
        output.push('\n');
        output
    }

    fn render_section(&self, lines: &mut Vec<String>, section: &Section) {
        lines.push(format!("## {}", section.name));
        lines.push(String::new());
        lines.extend(section.description.iter().cloned());
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());

        for rule in &section.rules {
            self.render_rule(lines, rule);
        }
    }

    fn render_rule(&self, lines: &mut Vec<String>, rule: &Rule) {
        lines.push(format!("### {}", rule.name));
        lines.push(format!("#### Severity: {}", self.palette.tag(&rule.severity)));
        lines.push(String::new());
        lines.extend(rule.description.iter().cloned());
        lines.push(String::new());

        for example in &rule.examples {
            lines.push(example_heading(example));
            lines.extend(example.content.iter().cloned());
            lines.push(String::new());
        }

        lines.push("---".to_string());
        lines.push(String::new());
    }
}

fn example_heading(example: &Example) -> String {
    match &example.label {
        Some(label) => format!("**{} example ({label}):**", example.kind.heading()),
        None => format!("**{} example:**", example.kind.heading()),
    }
}

impl Formatter for MarkdownFormatter {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown style guide"
    }

    fn file_extension(&self) -> &str {
        "md"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(self.render(doc))
    }
}
