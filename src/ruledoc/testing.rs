//! Fluent assertion API for the document model
//!
//! ```rust,ignore
//! use ruledoc::ruledoc::testing::assert_document;
//!
//! assert_document(&doc)
//!     .title("Style Guide")
//!     .section(0, |section| {
//!         section.name("Naming").rule(0, |rule| {
//!             rule.name("no-short-names")
//!                 .severity("error")
//!                 .example(0, |example| {
//!                     example.kind(ExampleKind::Valid).content(&["  longName = 1"]);
//!                 });
//!         });
//!     });
//! ```
//!
//! Failures name the path to the offending node (`sections[0].rules[1]`) so a
//! broken assertion deep in a tree is easy to locate.

use crate::ruledoc::ast::{Document, Example, ExampleKind, Rule, Section};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a document
pub fn assert_document(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

// ============================================================================
// Document Assertions
// ============================================================================

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    pub fn title(self, expected: &str) -> Self {
        assert_eq!(
            self.doc.title.as_deref(),
            Some(expected),
            "Unexpected document title"
        );
        self
    }

    pub fn no_title(self) -> Self {
        assert!(
            self.doc.title.is_none(),
            "Expected no title, found {:?}",
            self.doc.title
        );
        self
    }

    pub fn description(self, expected: &[&str]) -> Self {
        assert_lines("document.description", &self.doc.description, expected);
        self
    }

    pub fn section_count(self, expected: usize) -> Self {
        let actual = self.doc.sections.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} sections, found {}: [{}]",
            expected,
            actual,
            summarize(self.doc.sections.iter().map(|s| s.name.as_str()))
        );
        self
    }

    /// Assert on a specific section by index
    pub fn section<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SectionAssertion<'a>),
    {
        assert!(
            index < self.doc.sections.len(),
            "Section index {} out of bounds (document has {} sections)",
            index,
            self.doc.sections.len()
        );
        assertion(SectionAssertion {
            section: &self.doc.sections[index],
            context: format!("sections[{}]", index),
        });
        self
    }
}

// ============================================================================
// Section Assertions
// ============================================================================

pub struct SectionAssertion<'a> {
    section: &'a Section,
    context: String,
}

impl<'a> SectionAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.section.name, expected,
            "{}: unexpected section name",
            self.context
        );
        self
    }

    pub fn description(self, expected: &[&str]) -> Self {
        let context = format!("{}.description", self.context);
        assert_lines(&context, &self.section.description, expected);
        self
    }

    pub fn rule_count(self, expected: usize) -> Self {
        let actual = self.section.rules.len();
        assert_eq!(
            actual,
            expected,
            "{}: expected {} rules, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize(self.section.rules.iter().map(|r| r.name.as_str()))
        );
        self
    }

    pub fn rule<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(RuleAssertion<'a>),
    {
        assert!(
            index < self.section.rules.len(),
            "{}: rule index {} out of bounds (section has {} rules)",
            self.context,
            index,
            self.section.rules.len()
        );
        assertion(RuleAssertion {
            rule: &self.section.rules[index],
            context: format!("{}.rules[{}]", self.context, index),
        });
        self
    }
}

// ============================================================================
// Rule Assertions
// ============================================================================

pub struct RuleAssertion<'a> {
    rule: &'a Rule,
    context: String,
}

impl<'a> RuleAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.rule.name, expected,
            "{}: unexpected rule name",
            self.context
        );
        self
    }

    pub fn severity(self, expected: &str) -> Self {
        assert_eq!(
            self.rule.severity, expected,
            "{}: unexpected severity for rule '{}'",
            self.context, self.rule.name
        );
        self
    }

    pub fn description(self, expected: &[&str]) -> Self {
        let context = format!("{}.description", self.context);
        assert_lines(&context, &self.rule.description, expected);
        self
    }

    pub fn example_count(self, expected: usize) -> Self {
        assert_eq!(
            self.rule.examples.len(),
            expected,
            "{}: unexpected number of examples for rule '{}'",
            self.context,
            self.rule.name
        );
        self
    }

    pub fn example<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ExampleAssertion<'a>),
    {
        assert!(
            index < self.rule.examples.len(),
            "{}: example index {} out of bounds (rule has {} examples)",
            self.context,
            index,
            self.rule.examples.len()
        );
        assertion(ExampleAssertion {
            example: &self.rule.examples[index],
            context: format!("{}.examples[{}]", self.context, index),
        });
        self
    }
}

// ============================================================================
// Example Assertions
// ============================================================================

pub struct ExampleAssertion<'a> {
    example: &'a Example,
    context: String,
}

impl<'a> ExampleAssertion<'a> {
    pub fn kind(self, expected: ExampleKind) -> Self {
        assert_eq!(
            self.example.kind, expected,
            "{}: unexpected example kind",
            self.context
        );
        self
    }

    pub fn label(self, expected: &str) -> Self {
        assert_eq!(
            self.example.label.as_deref(),
            Some(expected),
            "{}: unexpected example label",
            self.context
        );
        self
    }

    pub fn no_label(self) -> Self {
        assert!(
            self.example.label.is_none(),
            "{}: expected no label, found {:?}",
            self.context,
            self.example.label
        );
        self
    }

    pub fn content(self, expected: &[&str]) -> Self {
        let context = format!("{}.content", self.context);
        assert_lines(&context, &self.example.content, expected);
        self
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn assert_lines(context: &str, actual: &[String], expected: &[&str]) {
    let actual: Vec<&str> = actual.iter().map(String::as_str).collect();
    assert_eq!(actual, expected, "{}: lines differ", context);
}

fn summarize<'s>(names: impl Iterator<Item = &'s str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}
