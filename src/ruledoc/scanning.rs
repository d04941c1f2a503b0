//! Scanner
//!
//! A single pass over the source lines that rebuilds the document model. The
//! scanner is an explicit state machine: a [`ScanMode`], the document built so
//! far (whose last section is the "current" one), and a queue of comment lines
//! waiting for the rule header they document.
//!
//! Transitions, in the order they are tried for every line:
//!
//! 1. `# Title:` sets the title. A later title replaces an earlier one.
//! 2. Any other comment before the first section (and not a section header)
//!    joins the document description.
//! 3. `# Section:` drops pending rule comments, opens a section and starts
//!    collecting its description.
//! 4. While collecting a section description, comments append to it. The first
//!    non-comment line ends collection and falls through to the steps below.
//! 5. `rules:` opens the rules block and drops pending comments.
//! 6. Outside a rules block, or before any section exists, nothing else
//!    happens.
//! 7. Inside a rules block, comments are queued.
//! 8. A rule header turns the queue into the rule's description and examples.
//!    Its severity is the inline value, else the first nested `severity:` in
//!    the indented block below it, else the configured default.
//! 9. Anything else inside the rules block discards the queue.
//!
//! The rules block, once opened, stays open across later section headers: a
//! section without its own `rules:` line keeps collecting rule entries.

use crate::ruledoc::ast::{Document, Example, Rule, Section};
use crate::ruledoc::classification::{
    is_comment, is_nested_attribute, is_rules_block_start, match_example_header,
    match_nested_severity, match_rule_header, match_section_header, match_title,
    strip_comment_prefix, RuleHeader, HARD_BREAK,
};
use tracing::{debug, trace};

/// Severity given to rules that declare none.
pub const DEFAULT_SEVERITY: &str = "off";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub default_severity: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            default_severity: DEFAULT_SEVERITY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// No section seen and no rules block open.
    PreSection,
    /// Collecting the description of the section just opened. `rules_open`
    /// remembers whether a rules block was active when the header appeared.
    SectionDescription { rules_open: bool },
    /// Inside a rules block.
    Rules,
    /// A section exists but no rules block is open.
    Idle,
}

#[derive(Debug)]
pub struct Scanner {
    options: ScanOptions,
    document: Document,
    mode: ScanMode,
    pending: Vec<String>,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            document: Document::new(),
            mode: ScanMode::PreSection,
            pending: Vec::new(),
        }
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn has_current_section(&self) -> bool {
        !self.document.sections.is_empty()
    }

    /// Comment lines queued for the next rule header.
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Apply one line. `following` holds the lines after it and is only read
    /// to resolve a deferred severity.
    pub fn step(&mut self, line: &str, following: &[&str]) {
        if let Some(title) = match_title(line) {
            self.document.title = Some(title.to_string());
            return;
        }

        let comment = is_comment(line);
        let section_header = match_section_header(line);

        if comment && section_header.is_none() && !self.has_current_section() {
            self.document.description.push(hard_break(line));
            return;
        }

        if let Some(name) = section_header {
            self.open_section(name);
            return;
        }

        if let ScanMode::SectionDescription { rules_open } = self.mode {
            if comment {
                if let Some(section) = self.document.sections.last_mut() {
                    section.description.push(hard_break(line));
                }
                return;
            }
            self.mode = if rules_open {
                ScanMode::Rules
            } else {
                ScanMode::Idle
            };
        }

        if is_rules_block_start(line) {
            self.mode = ScanMode::Rules;
            self.pending.clear();
            return;
        }

        if self.mode != ScanMode::Rules || !self.has_current_section() {
            return;
        }

        if comment {
            self.pending.push(strip_comment_prefix(line).to_string());
            return;
        }

        if let Some(header) = match_rule_header(line) {
            let severity = self.resolve_severity(header, following);
            self.finalize_rule(header.name, severity);
            return;
        }

        if !self.pending.is_empty() {
            debug!(
                discarded = self.pending.len(),
                line, "dropping comments not followed by a rule header"
            );
        }
        self.pending.clear();
    }

    pub fn finish(self) -> Document {
        debug!(
            sections = self.document.sections.len(),
            rules = self.document.rules().count(),
            "scan complete"
        );
        self.document
    }

    fn open_section(&mut self, name: &str) {
        let rules_open = match self.mode {
            ScanMode::Rules => true,
            ScanMode::SectionDescription { rules_open } => rules_open,
            ScanMode::PreSection | ScanMode::Idle => false,
        };
        self.pending.clear();
        self.document.sections.push(Section::new(name));
        self.mode = ScanMode::SectionDescription { rules_open };
    }

    fn resolve_severity(&self, header: RuleHeader<'_>, following: &[&str]) -> String {
        if let Some(inline) = header.severity {
            return inline.to_string();
        }
        following
            .iter()
            .take_while(|line| is_nested_attribute(line))
            .find_map(|line| match_nested_severity(line))
            .map(str::to_string)
            .unwrap_or_else(|| self.options.default_severity.clone())
    }

    fn finalize_rule(&mut self, name: &str, severity: String) {
        let mut rule = Rule::new(name, severity);
        let mut current: Option<Example> = None;

        for comment in self.pending.drain(..) {
            if let Some(header) = match_example_header(&comment) {
                if let Some(done) = current.replace(Example::new(header.kind, header.label)) {
                    rule.examples.push(done);
                }
                continue;
            }
            match current.as_mut() {
                Some(example) => example.content.push(comment),
                None => rule.description.push(comment),
            }
        }
        if let Some(done) = current {
            rule.examples.push(done);
        }

        trace!(
            rule = %rule.name,
            severity = %rule.severity,
            examples = rule.examples.len(),
            "rule finalized"
        );
        if let Some(section) = self.document.sections.last_mut() {
            section.rules.push(rule);
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}

fn hard_break(line: &str) -> String {
    format!("{}{}", strip_comment_prefix(line), HARD_BREAK)
}

/// Compile ruleset source into a document using default options.
pub fn compile(source: &str) -> Document {
    compile_with(source, &ScanOptions::default())
}

pub fn compile_with(source: &str, options: &ScanOptions) -> Document {
    let lines: Vec<&str> = source.lines().collect();
    let mut scanner = Scanner::new(options.clone());
    for (index, line) in lines.iter().enumerate() {
        scanner.step(line, &lines[index + 1..]);
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruledoc::ast::ExampleKind;
    use crate::ruledoc::testing::assert_document;

    fn feed(scanner: &mut Scanner, lines: &[&str]) {
        for (index, line) in lines.iter().enumerate() {
            scanner.step(line, &lines[index + 1..]);
        }
    }

    #[test]
    fn test_mode_transitions() {
        let mut scanner = Scanner::default();
        assert_eq!(scanner.mode(), ScanMode::PreSection);
        assert!(!scanner.has_current_section());

        feed(&mut scanner, &["# Section: Naming"]);
        assert_eq!(
            scanner.mode(),
            ScanMode::SectionDescription { rules_open: false }
        );
        assert!(scanner.has_current_section());

        feed(&mut scanner, &["# still describing"]);
        assert_eq!(
            scanner.mode(),
            ScanMode::SectionDescription { rules_open: false }
        );

        feed(&mut scanner, &["extends: base"]);
        assert_eq!(scanner.mode(), ScanMode::Idle);

        feed(&mut scanner, &["rules:"]);
        assert_eq!(scanner.mode(), ScanMode::Rules);

        feed(&mut scanner, &["# Section: Paths"]);
        assert_eq!(
            scanner.mode(),
            ScanMode::SectionDescription { rules_open: true }
        );

        feed(&mut scanner, &["  rule: warn"]);
        assert_eq!(scanner.mode(), ScanMode::Rules);
        assert_eq!(scanner.document().sections[1].rules.len(), 1);
    }

    #[test]
    fn test_pending_queue_fills_and_clears() {
        let mut scanner = Scanner::default();
        feed(&mut scanner, &["# Section: S", "rules:", "  # one", "  # two"]);
        assert_eq!(scanner.pending(), ["one", "two"]);

        feed(&mut scanner, &["  rule: error"]);
        assert!(scanner.pending().is_empty());

        feed(&mut scanner, &["  # orphan", "    given: $"]);
        assert!(scanner.pending().is_empty());
    }

    #[test]
    fn test_document_description_gets_hard_breaks() {
        let doc = compile("# Title: Guide\n# First line.\n#Second line.\n");
        assert_document(&doc)
            .title("Guide")
            .description(&["First line.  ", "Second line.  "])
            .section_count(0);
    }

    #[test]
    fn test_last_title_wins() {
        let doc = compile("# Title: First\n# Section: S\n# Title: Second\n");
        assert_document(&doc).title("Second").section_count(1);
    }

    #[test]
    fn test_section_description_ends_at_first_non_comment() {
        let source = "\
# Section: Naming
# Rules about naming.
# More about naming.
extends: base
# Not part of the section.
";
        let doc = compile(source);
        assert_document(&doc).section(0, |section| {
            section
                .name("Naming")
                .description(&["Rules about naming.  ", "More about naming.  "]);
        });
    }

    #[test]
    fn test_inline_nested_and_default_severity() {
        let source = "\
# Section: S
rules:
  inline-rule: error
  nested-rule:
    description: checks things
    given: $.paths
    severity: warn
  bare-rule:
    given: $.info
";
        let doc = compile(source);
        assert_document(&doc).section(0, |section| {
            section
                .rule_count(3)
                .rule(0, |rule| {
                    rule.name("inline-rule").severity("error");
                })
                .rule(1, |rule| {
                    rule.name("nested-rule").severity("warn");
                })
                .rule(2, |rule| {
                    rule.name("bare-rule").severity("off");
                });
        });
    }

    #[test]
    fn test_inline_severity_wins_over_nested() {
        let doc = compile("# Section: S\nrules:\n  rule: error\n    severity: warn\n");
        assert_eq!(doc.find_rule("rule").unwrap().severity, "error");
    }

    #[test]
    fn test_lookahead_stops_at_next_rule_header() {
        let source = "\
# Section: S
rules:
  first:
  second:
    severity: error
";
        let doc = compile(source);
        assert_eq!(doc.find_rule("first").unwrap().severity, "off");
        assert_eq!(doc.find_rule("second").unwrap().severity, "error");
    }

    #[test]
    fn test_lookahead_stops_at_blank_line() {
        let doc = compile("# Section: S\nrules:\n  first:\n\n    severity: error\n");
        assert_eq!(doc.find_rule("first").unwrap().severity, "off");
    }

    #[test]
    fn test_lookahead_ignores_deeper_severity_keys() {
        let source = "\
# Section: S
rules:
  first:
    then:
      severity: error
    severity: warn
";
        let doc = compile(source);
        assert_eq!(doc.find_rule("first").unwrap().severity, "warn");
    }

    #[test]
    fn test_custom_default_severity() {
        let options = ScanOptions {
            default_severity: "info".to_string(),
        };
        let doc = compile_with("# Section: S\nrules:\n  rule:\n", &options);
        assert_eq!(doc.find_rule("rule").unwrap().severity, "info");
    }

    #[test]
    fn test_comments_become_description_and_examples() {
        let source = "\
# Section: S
rules:
  # Disallow one-letter names.
  # valid example:
  #   longName = 1
  # Invalid Example (edge case):
  #   x = 1
  #   y = 2
  no-short-names: error
";
        let doc = compile(source);
        assert_document(&doc).section(0, |section| {
            section.rule(0, |rule| {
                rule.description(&["Disallow one-letter names."])
                    .example_count(2)
                    .example(0, |example| {
                        example
                            .kind(ExampleKind::Valid)
                            .no_label()
                            .content(&["  longName = 1"]);
                    })
                    .example(1, |example| {
                        example
                            .kind(ExampleKind::Invalid)
                            .label("edge case")
                            .content(&["  x = 1", "  y = 2"]);
                    });
            });
        });
    }

    #[test]
    fn test_malformed_example_header_is_description() {
        let source = "\
# Section: S
rules:
  # invalid example (unclosed:
  #   x = 1
  rule: warn
";
        let doc = compile(source);
        assert_document(&doc).section(0, |section| {
            section.rule(0, |rule| {
                rule.example_count(0)
                    .description(&["invalid example (unclosed:", "  x = 1"]);
            });
        });
    }

    #[test]
    fn test_orphaned_comments_are_discarded() {
        let source = "\
# Section: S
rules:
  # orphaned
  other-key: [1, 2]
  rule: warn
";
        let doc = compile(source);
        assert_document(&doc).section(0, |section| {
            section.rule(0, |rule| {
                rule.name("rule").description(&[]);
            });
        });
    }

    #[test]
    fn test_rules_before_any_section_are_ignored() {
        let doc = compile("rules:\n  rule: error\n# Section: S\n");
        assert_document(&doc).section_count(1).section(0, |section| {
            section.rule_count(0);
        });
    }

    #[test]
    fn test_comments_before_first_section_stay_in_description() {
        let doc = compile("rules:\n# about the guide\n  rule: error\n# Section: S\n");
        assert_document(&doc).description(&["about the guide  "]);
        assert!(doc.find_rule("rule").is_none());
    }

    #[test]
    fn test_rules_block_carries_into_next_section() {
        let source = "\
# Section: A
rules:
  a-rule: error
# Section: B
# Description of B.
  b-rule: warn
";
        let doc = compile(source);
        assert_document(&doc)
            .section(0, |section| {
                section.rule_count(1);
            })
            .section(1, |section| {
                section
                    .description(&["Description of B.  "])
                    .rule_count(1)
                    .rule(0, |rule| {
                        rule.name("b-rule").severity("warn");
                    });
            });
    }

    #[test]
    fn test_section_header_drops_pending_comments() {
        let source = "\
# Section: A
rules:
  # belongs to nothing
# Section: B
  b-rule: warn
";
        let doc = compile(source);
        assert_eq!(doc.find_rule("b-rule").unwrap().description, Vec::<String>::new());
    }

    #[test]
    fn test_section_without_rules_block_ignores_rule_lines() {
        let doc = compile("# Section: S\n  rule: error\n");
        assert_document(&doc).section(0, |section| {
            section.rule_count(0);
        });
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = compile("# Title: Guide\r\n# Section: S\r\nrules:\r\n  # Doc.\r\n  rule: error\r\n");
        assert_document(&doc).title("Guide").section(0, |section| {
            section.rule(0, |rule| {
                rule.name("rule").severity("error").description(&["Doc."]);
            });
        });
    }
}
